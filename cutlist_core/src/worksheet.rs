//! # Calculation Worksheet
//!
//! Step-by-step "show your work" derivation of a cabinet's cut list, with the
//! actual values substituted into each formula. Shown after the cut list so a
//! woodworker can check the arithmetic before cutting stock.
//!
//! ## Example
//!
//! ```rust
//! use cutlist_core::calculations::cabinet::{derive_cabinet, CabinetInput};
//! use cutlist_core::worksheet::{StepKind, Worksheet};
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
//! let sheet = Worksheet::from_cabinet(&cabinet);
//! let rail = sheet.step(StepKind::RailLength).unwrap();
//! assert_eq!(rail.expression, "7 15/16\" + 3/4\" = 8 11/16\"");
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::cabinet::{Cabinet, GROOVE_DEPTH_IN, TENON_ALLOWANCE_IN, TENON_LENGTH_IN};
use crate::measurement::{nearest_fraction, Measurement};

/// Grouping used when printing the worksheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkSection {
    DoorSize,
    Rails,
    Panels,
}

impl WorkSection {
    pub fn display_name(&self) -> &'static str {
        match self {
            WorkSection::DoorSize => "Final Door Dimensions",
            WorkSection::Rails => "Rail Length",
            WorkSection::Panels => "Panel Size",
        }
    }
}

/// Each derivation step the worksheet can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepKind {
    /// opening width + 2 × overlay
    TotalWidth,
    /// (total width - gaps) / doors
    DoorWidth,
    /// opening height + 2 × overlay
    DoorHeight,
    /// door width - 2 × stile width
    FrameOpeningWidth,
    /// frame opening + both tenons
    RailLength,
    /// door height - 2 × rail width
    FrameOpeningHeight,
    /// frame opening width + 2 × groove depth
    PanelWidth,
    /// frame opening height + 2 × groove depth
    PanelHeight,
}

impl StepKind {
    pub fn label(&self) -> &'static str {
        match self {
            StepKind::TotalWidth => "Total width of all doors",
            StepKind::DoorWidth => "Each door width",
            StepKind::DoorHeight => "Each door height",
            StepKind::FrameOpeningWidth => "Frame opening for the panel (width)",
            StepKind::RailLength => "Final rail length",
            StepKind::FrameOpeningHeight => "Frame opening for the panel (height)",
            StepKind::PanelWidth => "Final panel width",
            StepKind::PanelHeight => "Final panel height",
        }
    }

    /// Formula in words, for readers who want the rule rather than the numbers
    pub fn formula_plain(&self) -> &'static str {
        match self {
            StepKind::TotalWidth => "opening width + overlay + overlay",
            StepKind::DoorWidth => "(total width - (doors - 1) × gap) / doors",
            StepKind::DoorHeight => "opening height + overlay + overlay",
            StepKind::FrameOpeningWidth => "door width - (2 × stile width)",
            StepKind::RailLength => "frame opening width + 2 × tenon length",
            StepKind::FrameOpeningHeight => "door height - (2 × rail width)",
            StepKind::PanelWidth => "frame opening width + (2 × groove depth)",
            StepKind::PanelHeight => "frame opening height + (2 × groove depth)",
        }
    }

    pub fn section(&self) -> WorkSection {
        match self {
            StepKind::TotalWidth | StepKind::DoorWidth | StepKind::DoorHeight => WorkSection::DoorSize,
            StepKind::FrameOpeningWidth | StepKind::RailLength => WorkSection::Rails,
            StepKind::FrameOpeningHeight | StepKind::PanelWidth | StepKind::PanelHeight => WorkSection::Panels,
        }
    }
}

/// One line of the worksheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkStep {
    pub kind: StepKind,
    /// Formula with values substituted, e.g. `24" + 1/2" + 1/2" = 25"`
    pub expression: String,
    pub result: Measurement,
    /// Shop explanation printed under the step
    pub note: Option<String>,
}

/// Ordered derivation for one cabinet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Worksheet {
    pub intro: String,
    pub steps: Vec<WorkStep>,
}

impl Worksheet {
    pub fn from_cabinet(cabinet: &Cabinet) -> Self {
        let n = cabinet.num_doors;
        let door_width = cabinet.door_width();
        let door_height = cabinet.door_height();
        let srw = &cabinet.stile_rail_width;
        let opening_w = cabinet.frame_opening_width();
        let opening_h = cabinet.frame_opening_height();
        let total_gap = &cabinet.gap * f64::from(n.saturating_sub(1));

        let groove = nearest_fraction(GROOVE_DEPTH_IN);
        let tenon = nearest_fraction(TENON_LENGTH_IN);
        let allowance = nearest_fraction(TENON_ALLOWANCE_IN);

        let intro = if n > 1 {
            format!(
                "Each door will have a {} overlay on all outer edges and a {} gap between them.",
                cabinet.overlay, cabinet.gap
            )
        } else {
            format!(
                "The door will have a {} overlay on all outer edges.",
                cabinet.overlay
            )
        };

        let steps = vec![
            WorkStep {
                kind: StepKind::TotalWidth,
                expression: format!(
                    "{} + {} + {} = {}",
                    cabinet.opening_width, cabinet.overlay, cabinet.overlay, cabinet.total_width
                ),
                result: cabinet.total_width.clone(),
                note: None,
            },
            WorkStep {
                kind: StepKind::DoorWidth,
                expression: format!(
                    "({} - {}) / {} = {}",
                    cabinet.total_width, total_gap, n, door_width
                ),
                result: door_width.clone(),
                note: None,
            },
            WorkStep {
                kind: StepKind::DoorHeight,
                expression: format!(
                    "{} + {} + {} = {}",
                    cabinet.opening_height, cabinet.overlay, cabinet.overlay, door_height
                ),
                result: door_height.clone(),
                note: None,
            },
            WorkStep {
                kind: StepKind::FrameOpeningWidth,
                expression: format!("{} - (2 × {}) = {}", door_width, srw, opening_w),
                result: opening_w.clone(),
                note: None,
            },
            WorkStep {
                kind: StepKind::RailLength,
                expression: format!("{} + {}\" = {}", opening_w, allowance, cabinet.rail_length),
                result: cabinet.rail_length.clone(),
                note: Some(format!(
                    "Each tenon extends {}\" per end, so {}\" is added to the rail length.",
                    tenon, allowance
                )),
            },
            WorkStep {
                kind: StepKind::FrameOpeningHeight,
                expression: format!("{} - (2 × {}) = {}", door_height, srw, opening_h),
                result: opening_h.clone(),
                note: None,
            },
            WorkStep {
                kind: StepKind::PanelWidth,
                expression: format!("{} + (2 × {}\") = {}", opening_w, groove, cabinet.panel_width),
                result: cabinet.panel_width.clone(),
                note: Some(format!(
                    "The panel fits into a {} wide x {}\" deep groove and extends {}\" into each stile.",
                    cabinet.panel_thickness, groove, groove
                )),
            },
            WorkStep {
                kind: StepKind::PanelHeight,
                expression: format!("{} + (2 × {}\") = {}", opening_h, groove, cabinet.panel_height),
                result: cabinet.panel_height.clone(),
                note: Some(format!("The panel extends {}\" into each rail's groove.", groove)),
            },
        ];

        Worksheet { intro, steps }
    }

    pub fn step(&self, kind: StepKind) -> Option<&WorkStep> {
        self.steps.iter().find(|s| s.kind == kind)
    }

    /// Plain-text rendering, one section header per [`WorkSection`]
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str("CALCULATIONS\n");
        out.push_str(&self.intro);
        out.push('\n');

        let mut current: Option<WorkSection> = None;
        for step in &self.steps {
            let section = step.kind.section();
            if current != Some(section) {
                out.push('\n');
                out.push_str(section.display_name());
                out.push_str(":\n");
                current = Some(section);
            }
            out.push_str(&format!("  {}: {}\n", step.kind.label(), step.expression));
            if let Some(note) = &step.note {
                out.push_str(&format!("    {}\n", note));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::cabinet::{derive_cabinet, CabinetInput};

    fn cabinet(num_doors: u32) -> Cabinet {
        derive_cabinet(&CabinetInput {
            opening_height_in: 30.0,
            opening_width_in: 24.0,
            overlay_in: 0.5,
            gap_in: 0.125,
            num_doors,
            stile_rail_width_in: 2.25,
            stile_rail_thickness_in: 0.75,
            panel_thickness_in: 0.25,
        })
        .unwrap()
    }

    #[test]
    fn test_steps_in_derivation_order() {
        let sheet = Worksheet::from_cabinet(&cabinet(2));
        let kinds: Vec<StepKind> = sheet.steps.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                StepKind::TotalWidth,
                StepKind::DoorWidth,
                StepKind::DoorHeight,
                StepKind::FrameOpeningWidth,
                StepKind::RailLength,
                StepKind::FrameOpeningHeight,
                StepKind::PanelWidth,
                StepKind::PanelHeight,
            ]
        );
    }

    #[test]
    fn test_expressions_substitute_values() {
        let sheet = Worksheet::from_cabinet(&cabinet(2));

        assert_eq!(
            sheet.step(StepKind::TotalWidth).unwrap().expression,
            "24\" + 1/2\" + 1/2\" = 25\""
        );
        assert_eq!(
            sheet.step(StepKind::DoorWidth).unwrap().expression,
            "(25\" - 1/8\") / 2 = 12 7/16\""
        );
        assert_eq!(
            sheet.step(StepKind::FrameOpeningHeight).unwrap().expression,
            "31\" - (2 × 2 1/4\") = 26 1/2\""
        );
        assert_eq!(
            sheet.step(StepKind::PanelHeight).unwrap().expression,
            "26 1/2\" + (2 × 3/8\") = 27 1/4\""
        );
    }

    #[test]
    fn test_gap_total_scales_with_door_count() {
        let sheet = Worksheet::from_cabinet(&cabinet(3));
        let step = sheet.step(StepKind::DoorWidth).unwrap();
        assert!(step.expression.starts_with("(25\" - 1/4\") / 3 = "));
    }

    #[test]
    fn test_single_door_intro_omits_gap() {
        let sheet = Worksheet::from_cabinet(&cabinet(1));
        assert!(!sheet.intro.contains("gap"));
        assert_eq!(
            sheet.step(StepKind::DoorWidth).unwrap().expression,
            "(25\" - 0\") / 1 = 25\""
        );
    }

    #[test]
    fn test_results_match_cabinet() {
        let cab = cabinet(2);
        let sheet = Worksheet::from_cabinet(&cab);
        assert_eq!(sheet.step(StepKind::RailLength).unwrap().result, cab.rail_length);
        assert_eq!(sheet.step(StepKind::PanelWidth).unwrap().result, cab.panel_width);
        assert_eq!(sheet.step(StepKind::DoorHeight).unwrap().result, cab.total_height);
    }

    #[test]
    fn test_render_text_groups_sections() {
        let text = Worksheet::from_cabinet(&cabinet(2)).render_text();
        let door = text.find("Final Door Dimensions:").unwrap();
        let rails = text.find("Rail Length:").unwrap();
        let panels = text.find("Panel Size:").unwrap();
        assert!(door < rails && rails < panels);
        assert!(text.contains("Each tenon extends 3/8\" per end"));
    }
}
