//! # cutlist_core - Shaker Door Cut-List Engine
//!
//! `cutlist_core` derives every cut dimension for a row of shaker-style
//! cabinet doors (stiles, rails and floating panels) from the cabinet opening
//! and stock sizes, and renders the results as a cut list, a fabrication
//! procedure, a calculation worksheet, an SVG schematic and a PDF report.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All inputs and results implement Serialize/Deserialize
//! - **Shop Units**: Every length carries its nearest-1/16" fraction text
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use cutlist_core::{derive_cabinet, CabinetInput};
//!
//! let cabinet = derive_cabinet(&CabinetInput {
//!     opening_height_in: 30.0,
//!     opening_width_in: 24.0,
//!     overlay_in: 0.5,
//!     gap_in: 0.125,
//!     num_doors: 2,
//!     stile_rail_width_in: 2.25,
//!     stile_rail_thickness_in: 0.75,
//!     panel_thickness_in: 0.25,
//! }).unwrap();
//!
//! assert_eq!(cabinet.rail_length.to_string(), "8 11/16\"");
//!
//! let json = serde_json::to_string_pretty(&cabinet).unwrap();
//! assert!(json.contains("\"panel_height\""));
//! ```
//!
//! ## Modules
//!
//! - [`measurement`] - Inch measurements and nearest-fraction rendering
//! - [`calculations`] - Cabinet, door, stile/rail and panel derivation
//! - [`worksheet`] - Step-by-step calculation explanation
//! - [`report`] - Cut list and fabrication procedure
//! - [`schematic`] - Scaled door drawing and SVG output
//! - [`pdf`] - Typst-based PDF shop report
//! - [`config`] - TOML shop configuration
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod config;
pub mod errors;
pub mod measurement;
pub mod pdf;
pub mod report;
pub mod schematic;
pub mod worksheet;

// Re-export commonly used types at crate root for convenience
pub use calculations::{derive_cabinet, Cabinet, CabinetInput, Door, KnobSide, Panel, StileRail};
pub use config::{DrawingSettings, ReportMeta, ShopConfig};
pub use errors::{CalcError, CalcResult};
pub use measurement::{nearest_fraction, parse_fraction, Measurement};
pub use report::{render_text, CutList, Procedure};
pub use schematic::Schematic;
pub use worksheet::Worksheet;
