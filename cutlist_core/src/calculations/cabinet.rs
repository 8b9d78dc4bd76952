//! # Shaker Door Cabinet Derivation
//!
//! Derives door, stile, rail and panel sizes for a row of equal-width shaker
//! doors covering one cabinet opening.
//!
//! ## Assumptions
//!
//! - Doors overlay the opening by the same amount on all four outer edges
//! - Doors sit side by side in a single row, separated by a constant gap
//! - Stiles run the full door height; rails fit between them
//! - Rails carry a 3/8" tenon on each end
//! - Panels float in a 3/8" deep groove on all four sides
//!
//! ## Example
//!
//! ```rust
//! use cutlist_core::calculations::cabinet::{derive_cabinet, CabinetInput};
//!
//! let input = CabinetInput {
//!     opening_height_in: 30.0,
//!     opening_width_in: 24.0,
//!     overlay_in: 0.5,
//!     gap_in: 0.125,
//!     num_doors: 2,
//!     stile_rail_width_in: 2.25,
//!     stile_rail_thickness_in: 0.75,
//!     panel_thickness_in: 0.25,
//! };
//!
//! let cabinet = derive_cabinet(&input).unwrap();
//!
//! assert_eq!(cabinet.doors.len(), 2);
//! assert_eq!(cabinet.door_width().text(), "12 7/16");
//! assert_eq!(cabinet.rail_length.to_string(), "8 11/16\"");
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::{CalcError, CalcResult};
use crate::measurement::Measurement;

/// Depth of the panel groove cut into stiles and rails (in)
pub const GROOVE_DEPTH_IN: f64 = 0.375;

/// Length of the tenon on each rail end (in)
pub const TENON_LENGTH_IN: f64 = 0.375;

/// Extra rail length for both tenons (in)
pub const TENON_ALLOWANCE_IN: f64 = 2.0 * TENON_LENGTH_IN;

/// Cabinet opening and stock dimensions supplied by the user.
///
/// ## JSON Example
///
/// ```json
/// {
///   "opening_height_in": 30.0,
///   "opening_width_in": 24.0,
///   "overlay_in": 0.5,
///   "gap_in": 0.125,
///   "num_doors": 2,
///   "stile_rail_width_in": 2.25,
///   "stile_rail_thickness_in": 0.75,
///   "panel_thickness_in": 0.25
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CabinetInput {
    /// Height of the cabinet opening (in)
    pub opening_height_in: f64,

    /// Width of the cabinet opening (in)
    pub opening_width_in: f64,

    /// How far each door extends past the opening edge (in)
    pub overlay_in: f64,

    /// Gap between neighbouring doors (in). Ignored for a single door.
    pub gap_in: f64,

    /// Number of doors across the opening
    pub num_doors: u32,

    /// Face width of stile and rail stock (in)
    pub stile_rail_width_in: f64,

    /// Thickness of stile and rail stock (in)
    pub stile_rail_thickness_in: f64,

    /// Thickness of panel stock (in). Also sets groove width and tenon thickness.
    pub panel_thickness_in: f64,
}

/// Stock shaker defaults: a 30" x 24" opening with a pair of doors.
impl Default for CabinetInput {
    fn default() -> Self {
        CabinetInput {
            opening_height_in: 30.0,
            opening_width_in: 24.0,
            overlay_in: 0.5,
            gap_in: 0.125,
            num_doors: 2,
            stile_rail_width_in: 2.25,
            stile_rail_thickness_in: 0.75,
            panel_thickness_in: 0.25,
        }
    }
}

impl CabinetInput {
    /// Validate input parameters.
    ///
    /// Dimensions must be finite and non-negative and there must be at least
    /// one door. Oversized stock that produces negative rails or panels is
    /// allowed through; see [`Cabinet::negative_dimensions`].
    pub fn validate(&self) -> CalcResult<()> {
        if self.num_doors == 0 {
            return Err(CalcError::invalid_input(
                "num_doors",
                self.num_doors.to_string(),
                "At least one door is required",
            ));
        }

        for (field, value) in self.dimensions() {
            if !value.is_finite() {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    "Dimension must be a finite number",
                ));
            }
            if value < 0.0 {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    "Dimension cannot be negative",
                ));
            }
        }
        Ok(())
    }

    /// Gap actually applied between doors (zero for a single door)
    pub fn effective_gap_in(&self) -> f64 {
        if self.num_doors > 1 {
            self.gap_in
        } else {
            0.0
        }
    }

    fn dimensions(&self) -> [(&'static str, f64); 7] {
        [
            ("opening_height_in", self.opening_height_in),
            ("opening_width_in", self.opening_width_in),
            ("overlay_in", self.overlay_in),
            ("gap_in", self.gap_in),
            ("stile_rail_width_in", self.stile_rail_width_in),
            ("stile_rail_thickness_in", self.stile_rail_thickness_in),
            ("panel_thickness_in", self.panel_thickness_in),
        ]
    }
}

/// One stile or rail board. Identical for every door of a cabinet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StileRail {
    pub width: Measurement,
    pub length: Measurement,
}

/// Floating center panel. Identical for every door of a cabinet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub height: Measurement,
    pub width: Measurement,
    pub thickness: Measurement,
}

/// Which lower corner of a door carries the knob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KnobSide {
    Left,
    Right,
}

/// A single door in the row, left to right by `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Door {
    /// Zero-based position in the row
    pub id: usize,
    pub height: Measurement,
    pub width: Measurement,
    pub stile: StileRail,
    pub rail: StileRail,
    pub panel: Panel,
}

impl Door {
    /// Even doors get the knob on the right, odd doors on the left, so a
    /// pair of doors meets with knobs side by side.
    pub fn knob_side(&self) -> KnobSide {
        if self.id % 2 == 0 {
            KnobSide::Right
        } else {
            KnobSide::Left
        }
    }
}

/// Fully derived cabinet: inputs, overall sizes, and the door row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cabinet {
    pub opening_height: Measurement,
    pub opening_width: Measurement,
    pub overlay: Measurement,

    /// Gap between doors, already zero for a single door
    pub gap: Measurement,

    pub num_doors: u32,
    pub stile_rail_width: Measurement,
    pub stile_rail_thickness: Measurement,
    pub panel_thickness: Measurement,

    /// Opening height plus overlay top and bottom
    pub total_height: Measurement,
    /// Opening width plus overlay left and right
    pub total_width: Measurement,
    /// Width of each door once the gaps are taken out
    pub door_width: Measurement,
    pub stile_height: Measurement,
    pub rail_length: Measurement,
    pub panel_height: Measurement,
    pub panel_width: Measurement,

    /// Doors in left-to-right placement order
    pub doors: Vec<Door>,
}

impl Cabinet {
    /// Height of every door (doors are uniform)
    pub fn door_height(&self) -> &Measurement {
        &self.total_height
    }

    /// Width of every door (doors are uniform)
    pub fn door_width(&self) -> &Measurement {
        &self.door_width
    }

    /// Opening inside the frame, across the panel (door width minus both stiles)
    pub fn frame_opening_width(&self) -> Measurement {
        self.door_width() - self.stile_rail_width.decimal() * 2.0
    }

    /// Opening inside the frame, top to bottom (door height minus both rails)
    pub fn frame_opening_height(&self) -> Measurement {
        self.door_height() - self.stile_rail_width.decimal() * 2.0
    }

    /// Number of stiles to cut
    pub fn stile_count(&self) -> u32 {
        self.num_doors * 2
    }

    /// Number of rails to cut
    pub fn rail_count(&self) -> u32 {
        self.num_doors * 2
    }

    /// Number of panels to cut
    pub fn panel_count(&self) -> u32 {
        self.num_doors
    }

    /// Derived fields that came out negative because the stock is too wide
    /// for the door.
    pub fn negative_dimensions(&self) -> Vec<&'static str> {
        [
            ("door_width", self.door_width().decimal()),
            ("rail_length", self.rail_length.decimal()),
            ("panel_height", self.panel_height.decimal()),
            ("panel_width", self.panel_width.decimal()),
        ]
        .into_iter()
        .filter(|(_, value)| *value < 0.0)
        .map(|(name, _)| name)
        .collect()
    }

    /// One-line summary of the opening
    pub fn description(&self) -> String {
        format!(
            "The cabinet opening is {} H x {} W.",
            self.opening_height, self.opening_width
        )
    }
}

/// Derive every cut-list dimension for a cabinet.
///
/// # Returns
///
/// * `Ok(Cabinet)` - Derived cabinet with `num_doors` identical doors
/// * `Err(CalcError)` - If inputs fail [`CabinetInput::validate`]
pub fn derive_cabinet(input: &CabinetInput) -> CalcResult<Cabinet> {
    input.validate()?;

    let n = f64::from(input.num_doors);
    let gap_in = input.effective_gap_in();
    let srw = input.stile_rail_width_in;

    // Step 1: overall size
    let total_height_in = input.opening_height_in + 2.0 * input.overlay_in;
    let total_width_in = input.opening_width_in + 2.0 * input.overlay_in;

    // Step 2: per-door size
    let door_height_in = total_height_in;
    let door_width_in = (total_width_in - (n - 1.0) * gap_in) / n;

    // Step 3: stiles and rails
    let stile_height_in = door_height_in;
    let rail_length_in = door_width_in - 2.0 * srw + TENON_ALLOWANCE_IN;

    // Step 4: panel, captured by the groove on every side
    let panel_height_in = door_height_in + 2.0 * GROOVE_DEPTH_IN - 2.0 * srw;
    let panel_width_in = door_width_in + 2.0 * GROOVE_DEPTH_IN - 2.0 * srw;

    let stile = StileRail {
        width: Measurement::new(srw),
        length: Measurement::new(stile_height_in),
    };
    let rail = StileRail {
        width: Measurement::new(srw),
        length: Measurement::new(rail_length_in),
    };
    let panel = Panel {
        height: Measurement::new(panel_height_in),
        width: Measurement::new(panel_width_in),
        thickness: Measurement::new(input.panel_thickness_in),
    };

    // Step 5: the door row
    let doors = (0..input.num_doors as usize)
        .map(|id| Door {
            id,
            height: Measurement::new(door_height_in),
            width: Measurement::new(door_width_in),
            stile: stile.clone(),
            rail: rail.clone(),
            panel: panel.clone(),
        })
        .collect();

    let cabinet = Cabinet {
        opening_height: Measurement::new(input.opening_height_in),
        opening_width: Measurement::new(input.opening_width_in),
        overlay: Measurement::new(input.overlay_in),
        gap: Measurement::new(gap_in),
        num_doors: input.num_doors,
        stile_rail_width: Measurement::new(srw),
        stile_rail_thickness: Measurement::new(input.stile_rail_thickness_in),
        panel_thickness: Measurement::new(input.panel_thickness_in),
        total_height: Measurement::new(total_height_in),
        total_width: Measurement::new(total_width_in),
        door_width: Measurement::new(door_width_in),
        stile_height: Measurement::new(stile_height_in),
        rail_length: Measurement::new(rail_length_in),
        panel_height: Measurement::new(panel_height_in),
        panel_width: Measurement::new(panel_width_in),
        doors,
    };

    debug!(
        num_doors = input.num_doors,
        door_height_in,
        door_width_in,
        rail_length_in,
        panel_height_in,
        panel_width_in,
        "derived cabinet"
    );

    let negative = cabinet.negative_dimensions();
    if !negative.is_empty() {
        warn!(
            fields = ?negative,
            stile_rail_width_in = srw,
            "stile/rail stock is too wide for the door; derived sizes are negative"
        );
    }

    Ok(cabinet)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn test_input() -> CabinetInput {
        CabinetInput {
            opening_height_in: 30.0,
            opening_width_in: 24.0,
            overlay_in: 0.5,
            gap_in: 0.125,
            num_doors: 2,
            stile_rail_width_in: 2.25,
            stile_rail_thickness_in: 0.75,
            panel_thickness_in: 0.25,
        }
    }

    #[test]
    fn test_worked_example() {
        let cabinet = derive_cabinet(&test_input()).unwrap();

        assert!((cabinet.total_width.decimal() - 25.0).abs() < TOLERANCE);
        assert!((cabinet.total_height.decimal() - 31.0).abs() < TOLERANCE);
        assert!((cabinet.door_width().decimal() - 12.4375).abs() < TOLERANCE);
        assert!((cabinet.stile_height.decimal() - 31.0).abs() < TOLERANCE);
        // 12.4375 - 4.5 + 0.75
        assert!((cabinet.rail_length.decimal() - 8.6875).abs() < TOLERANCE);
        // 12.4375 + 0.75 - 4.5
        assert!((cabinet.panel_width.decimal() - 8.6875).abs() < TOLERANCE);
        // 31 + 0.75 - 4.5
        assert!((cabinet.panel_height.decimal() - 27.25).abs() < TOLERANCE);

        assert_eq!(cabinet.rail_length.text(), "8 11/16");
        assert_eq!(cabinet.panel_height.text(), "27 1/4");
    }

    #[test]
    fn test_single_door_ignores_gap() {
        let mut input = test_input();
        input.num_doors = 1;
        input.gap_in = 0.5;

        let cabinet = derive_cabinet(&input).unwrap();
        assert_eq!(cabinet.gap.decimal(), 0.0);
        assert_eq!(cabinet.door_width(), &cabinet.total_width);
        assert_eq!(cabinet.doors.len(), 1);
    }

    #[test]
    fn test_door_size_accessors_match_door_row() {
        let mut input = test_input();
        input.num_doors = 3;
        let cabinet = derive_cabinet(&input).unwrap();

        for door in &cabinet.doors {
            assert_eq!(&door.width, cabinet.door_width());
            assert_eq!(&door.height, cabinet.door_height());
        }
        assert_eq!(cabinet.door_width().text(), cabinet.doors[2].width.text());
    }

    #[test]
    fn test_gap_applies_between_doors_only() {
        let mut input = test_input();
        input.num_doors = 3;
        input.gap_in = 0.25;

        let cabinet = derive_cabinet(&input).unwrap();
        // (25 - 2 * 0.25) / 3
        assert!((cabinet.door_width().decimal() - 24.5 / 3.0).abs() < TOLERANCE);
        let covered = cabinet.door_width().decimal() * 3.0 + 2.0 * 0.25;
        assert!((covered - cabinet.total_width.decimal()).abs() < TOLERANCE);
    }

    #[test]
    fn test_doors_are_uniform() {
        let mut input = test_input();
        input.num_doors = 4;
        let cabinet = derive_cabinet(&input).unwrap();

        assert_eq!(cabinet.doors.len(), 4);
        let first = &cabinet.doors[0];
        for (i, door) in cabinet.doors.iter().enumerate() {
            assert_eq!(door.id, i);
            assert_eq!(door.height, first.height);
            assert_eq!(door.width, first.width);
            assert_eq!(door.stile, first.stile);
            assert_eq!(door.rail, first.rail);
            assert_eq!(door.panel, first.panel);
        }
    }

    #[test]
    fn test_stiles_and_rails_relationships() {
        let cabinet = derive_cabinet(&test_input()).unwrap();
        let door = &cabinet.doors[0];

        assert_eq!(door.stile.length, door.height);
        assert_eq!(door.stile.width, cabinet.stile_rail_width);
        let expected_rail = door.width.decimal() - 2.0 * 2.25 + 0.75;
        assert!((door.rail.length.decimal() - expected_rail).abs() < TOLERANCE);
        assert_eq!(door.panel.thickness.decimal(), 0.25);
    }

    #[test]
    fn test_panel_overlaps_groove_on_each_side() {
        let cabinet = derive_cabinet(&test_input()).unwrap();
        let overlap_w = cabinet.panel_width.decimal() - cabinet.frame_opening_width().decimal();
        let overlap_h = cabinet.panel_height.decimal() - cabinet.frame_opening_height().decimal();
        assert!((overlap_w - 2.0 * GROOVE_DEPTH_IN).abs() < TOLERANCE);
        assert!((overlap_h - 2.0 * GROOVE_DEPTH_IN).abs() < TOLERANCE);
    }

    #[test]
    fn test_knob_side_alternates() {
        let mut input = test_input();
        input.num_doors = 5;
        let cabinet = derive_cabinet(&input).unwrap();

        for door in &cabinet.doors {
            let expected = if door.id % 2 == 0 { KnobSide::Right } else { KnobSide::Left };
            assert_eq!(door.knob_side(), expected);
        }
    }

    #[test]
    fn test_piece_counts() {
        let cabinet = derive_cabinet(&test_input()).unwrap();
        assert_eq!(cabinet.stile_count(), 4);
        assert_eq!(cabinet.rail_count(), 4);
        assert_eq!(cabinet.panel_count(), 2);
    }

    #[test]
    fn test_zero_doors_rejected() {
        let mut input = test_input();
        input.num_doors = 0;
        let err = derive_cabinet(&input).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_negative_and_non_finite_inputs_rejected() {
        let mut input = test_input();
        input.overlay_in = -0.5;
        assert!(derive_cabinet(&input).is_err());

        let mut input = test_input();
        input.opening_width_in = f64::NAN;
        match derive_cabinet(&input) {
            Err(CalcError::InvalidInput { field, .. }) => assert_eq!(field, "opening_width_in"),
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_oversized_stock_propagates_negative_sizes() {
        let mut input = test_input();
        input.stile_rail_width_in = 7.0;

        let cabinet = derive_cabinet(&input).unwrap();
        // 12.4375 - 14 + 0.75
        assert!(cabinet.rail_length.is_negative());
        assert_eq!(cabinet.rail_length.text(), "-13/16");
        assert_eq!(cabinet.negative_dimensions(), vec!["rail_length", "panel_width"]);
    }

    #[test]
    fn test_description() {
        let cabinet = derive_cabinet(&test_input()).unwrap();
        assert_eq!(cabinet.description(), "The cabinet opening is 30\" H x 24\" W.");
    }

    #[test]
    fn test_serialization() {
        let input = test_input();
        let json = serde_json::to_string_pretty(&input).unwrap();
        let roundtrip: CabinetInput = serde_json::from_str(&json).unwrap();
        assert_eq!(input, roundtrip);

        let cabinet = derive_cabinet(&input).unwrap();
        let json = serde_json::to_string(&cabinet).unwrap();
        assert!(json.contains(r#""rail_length":{"decimal":8.6875,"text":"8 11/16"}"#));
        let roundtrip: Cabinet = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, cabinet);
    }
}
