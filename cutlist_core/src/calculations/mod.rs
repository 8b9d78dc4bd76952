//! # Cut-List Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - a derived result type (JSON-serializable)
//! - a pure function `input -> Result<_, CalcError>`
//!
//! ## Available Calculations
//!
//! - [`cabinet`] - Shaker door row for one cabinet opening

pub mod cabinet;

pub use cabinet::{
    derive_cabinet, Cabinet, CabinetInput, Door, KnobSide, Panel, StileRail, GROOVE_DEPTH_IN,
    TENON_ALLOWANCE_IN, TENON_LENGTH_IN,
};
