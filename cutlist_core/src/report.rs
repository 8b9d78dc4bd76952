//! # Cut List and Fabrication Procedure
//!
//! Turns a derived [`Cabinet`] into the shop documents: a cut list of every
//! piece and a step-by-step procedure for building the doors.

use serde::{Deserialize, Serialize};

use crate::calculations::cabinet::{Cabinet, GROOVE_DEPTH_IN, TENON_LENGTH_IN};
use crate::measurement::{nearest_fraction, Measurement};
use crate::worksheet::Worksheet;

/// One line of the cut list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutListEntry {
    /// Piece name, plural ("Stiles", "Rails", "Panels")
    pub name: String,
    pub quantity: u32,
    pub width: Measurement,
    pub length: Measurement,
    /// Thickness of the stock the piece is cut from
    pub stock_thickness: Measurement,
}

impl CutListEntry {
    /// `4 pieces, 2 1/4" x 31"`
    pub fn summary(&self) -> String {
        format!("{} pieces, {} x {}", self.quantity, self.width, self.length)
    }
}

/// All pieces needed for a cabinet's doors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutList {
    pub stiles: CutListEntry,
    pub rails: CutListEntry,
    pub panels: CutListEntry,
}

impl CutList {
    pub fn from_cabinet(cabinet: &Cabinet) -> Self {
        CutList {
            stiles: CutListEntry {
                name: "Stiles".to_string(),
                quantity: cabinet.stile_count(),
                width: cabinet.stile_rail_width.clone(),
                length: cabinet.stile_height.clone(),
                stock_thickness: cabinet.stile_rail_thickness.clone(),
            },
            rails: CutListEntry {
                name: "Rails".to_string(),
                quantity: cabinet.rail_count(),
                width: cabinet.stile_rail_width.clone(),
                length: cabinet.rail_length.clone(),
                stock_thickness: cabinet.stile_rail_thickness.clone(),
            },
            panels: CutListEntry {
                name: "Panels".to_string(),
                quantity: cabinet.panel_count(),
                width: cabinet.panel_width.clone(),
                length: cabinet.panel_height.clone(),
                stock_thickness: cabinet.panel_thickness.clone(),
            },
        }
    }

    pub fn entries(&self) -> [&CutListEntry; 3] {
        [&self.stiles, &self.rails, &self.panels]
    }
}

/// A titled group of instructions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcedureStep {
    pub title: String,
    pub instructions: Vec<String>,
}

/// Fabrication steps with this cabinet's sizes filled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Procedure {
    pub steps: Vec<ProcedureStep>,
}

impl Procedure {
    pub fn for_cabinet(cabinet: &Cabinet) -> Self {
        let cut_list = CutList::from_cabinet(cabinet);
        let groove = nearest_fraction(GROOVE_DEPTH_IN);
        let tenon = nearest_fraction(TENON_LENGTH_IN);
        let panel_t = &cabinet.panel_thickness;

        let cut_materials = cut_list
            .entries()
            .iter()
            .map(|entry| {
                format!(
                    "Cut {} {} to {} x {} from {} material.",
                    entry.quantity,
                    entry.name.to_lowercase(),
                    entry.width,
                    entry.length,
                    entry.stock_thickness
                )
            })
            .collect();

        let steps = vec![
            ProcedureStep {
                title: "Step 1: Cut Materials".to_string(),
                instructions: cut_materials,
            },
            ProcedureStep {
                title: "Step 2: Cut the Joinery".to_string(),
                instructions: vec![
                    format!(
                        concat!(
                            "Grooves: use a router with a {} slot cutter or a table saw with a dado blade ",
                            "to cut a {} wide groove, {}\" deep, along the inside edges of all stiles and rails."
                        ),
                        panel_t, panel_t, groove
                    ),
                    "The panel will slide into this groove.".to_string(),
                    format!(
                        concat!(
                            "Tenons: on the rails, cut a tenon (tongue) {} thick and {}\" long on each end ",
                            "to fit into the grooves of the stiles."
                        ),
                        panel_t, tenon
                    ),
                    "You can do this using a table saw with a dado blade or a router.".to_string(),
                ],
            },
            ProcedureStep {
                title: "Step 3: Dry Fit the Frame".to_string(),
                instructions: vec![
                    "Test fit the stiles, rails, and panel to ensure a snug fit.".to_string(),
                    "The panel should fit into the grooves without forcing.".to_string(),
                ],
            },
            ProcedureStep {
                title: "Step 4: Assemble the Door".to_string(),
                instructions: vec![
                    concat!(
                        "Apply glue to the tenons of the rails (avoid getting glue in the panel grooves ",
                        "so the panel can expand and contract)."
                    )
                    .to_string(),
                    "Insert the panel into the grooves.".to_string(),
                    "Clamp the frame together and ensure the door is square by measuring diagonally.".to_string(),
                    "Let the glue dry for at least 30 minutes to an hour.".to_string(),
                ],
            },
            ProcedureStep {
                title: "Step 5: Sand and Finish".to_string(),
                instructions: vec![
                    "Sand the assembled doors smooth.".to_string(),
                    "Slightly round over or chamfer the edges for a softer look.".to_string(),
                    "Apply primer and paint or stain and seal.".to_string(),
                ],
            },
        ];

        Procedure { steps }
    }
}

/// Render the cut list and procedure as plain text, optionally followed by
/// the calculation worksheet.
///
/// ```rust
/// use cutlist_core::calculations::cabinet::{derive_cabinet, CabinetInput};
/// use cutlist_core::report::render_text;
///
/// let cabinet = derive_cabinet(&CabinetInput {
///     opening_height_in: 30.0,
///     opening_width_in: 24.0,
///     overlay_in: 0.5,
///     gap_in: 0.125,
///     num_doors: 2,
///     stile_rail_width_in: 2.25,
///     stile_rail_thickness_in: 0.75,
///     panel_thickness_in: 0.25,
/// }).unwrap();
///
/// let text = render_text(&cabinet, false);
/// assert!(text.contains("Stiles: 4 pieces, 2 1/4\" x 31\""));
/// ```
pub fn render_text(cabinet: &Cabinet, show_work: bool) -> String {
    let cut_list = CutList::from_cabinet(cabinet);
    let procedure = Procedure::for_cabinet(cabinet);

    let mut out = String::new();
    out.push_str("CUT LIST\n");
    out.push_str(&cabinet.description());
    out.push('\n');
    for entry in cut_list.entries() {
        out.push_str(&format!("  {}: {}\n", entry.name, entry.summary()));
    }

    let negative = cabinet.negative_dimensions();
    if !negative.is_empty() {
        out.push_str(&format!(
            "  WARNING: negative sizes ({}) - the stile/rail stock is too wide for these doors\n",
            negative.join(", ")
        ));
    }

    out.push_str("\nPROCEDURES\n");
    for step in &procedure.steps {
        out.push_str(&format!("\n{}\n", step.title));
        for instruction in &step.instructions {
            out.push_str(&format!("  - {}\n", instruction));
        }
    }

    if show_work {
        out.push('\n');
        out.push_str(&Worksheet::from_cabinet(cabinet).render_text());
    }

    out
}
