//! # Door Schematic
//!
//! Proportional front view of the cabinet and its doors, produced as a list
//! of drawing primitives in painter order. Any 2D surface (SVG, a GUI
//! canvas, a PDF) can replay the list; [`Schematic::to_svg`] is provided.
//!
//! ## Layout
//!
//! - The cabinet box is the opening plus an arbitrary 2" face frame all round
//! - Everything is scaled so the box spans the requested surface width
//! - Doors are drawn left to right, starting one overlay outside the opening
//! - Each door shows a 1/2" outer chamfer, a 1/4" chamfer around the panel,
//!   and a knob in the lower corner chosen by [`Door::knob_side`]
//!
//! [`Door::knob_side`]: crate::calculations::cabinet::Door::knob_side

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::cabinet::{Cabinet, KnobSide};
use crate::errors::{CalcError, CalcResult};

/// Face frame drawn around the opening (in)
pub const FACE_FRAME_IN: f64 = 2.0;

/// Chamfer detail around the door edge (in)
pub const OUTER_CHAMFER_IN: f64 = 0.5;

/// Chamfer detail around the panel (in)
pub const INNER_CHAMFER_IN: f64 = 0.25;

/// Surface color shown where a shape is cleared
pub const BACKGROUND: Color = Color::WHITE;

// ============================================================================
// Primitives
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255 };
    pub const DARK_GRAY: Color = Color { r: 169, g: 169, b: 169 };

    /// `#rrggbb`
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Shrink by `amount` on every side
    pub fn inset(&self, amount: f64) -> Rect {
        Rect {
            x: self.x + amount,
            y: self.y + amount,
            width: self.width - 2.0 * amount,
            height: self.height - 2.0 * amount,
        }
    }

    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width * 0.5,
            y: self.y + self.height * 0.5,
        }
    }
}

/// Two concentric circles: `inner_color` inside `inner_radius`, blending to
/// `outer_color` at `outer_radius`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadialGradient {
    pub center: Point,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub inner_color: Color,
    pub outer_color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Paint {
    Solid(Color),
    Radial(RadialGradient),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    FillRect { rect: Rect, paint: Paint },
    /// Reset the area back to the surface background
    ClearRect(Rect),
    FillCircle { center: Point, radius: f64, paint: Paint },
}

// ============================================================================
// Schematic
// ============================================================================

/// Scaled drawing of one cabinet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schematic {
    /// Surface width in drawing units (px)
    pub width: f64,
    /// Surface height, proportional to the cabinet box
    pub height: f64,
    /// Drawing units per inch
    pub scale: f64,
    pub shapes: Vec<Shape>,
}

impl Schematic {
    /// Lay out the cabinet on a surface `canvas_width` units wide.
    pub fn from_cabinet(cabinet: &Cabinet, canvas_width: f64) -> CalcResult<Self> {
        if !canvas_width.is_finite() || canvas_width <= 0.0 {
            return Err(CalcError::invalid_input(
                "canvas_width",
                canvas_width.to_string(),
                "Drawing width must be a positive number",
            ));
        }

        let box_width = 2.0 * FACE_FRAME_IN + cabinet.opening_width.decimal();
        let box_height = 2.0 * FACE_FRAME_IN + cabinet.opening_height.decimal();
        let scale = canvas_width / box_width;
        if !scale.is_finite() || scale <= 0.0 {
            return Err(CalcError::invalid_input(
                "opening_width",
                cabinet.opening_width.decimal().to_string(),
                "Cabinet is too small to draw",
            ));
        }
        let height = box_height * scale;

        let gap = cabinet.gap.decimal() * scale;
        let srw = cabinet.stile_rail_width.decimal() * scale;
        let outer_chamfer = OUTER_CHAMFER_IN * scale;
        let inner_chamfer = INNER_CHAMFER_IN * scale;

        let mut shapes = Vec::with_capacity(1 + 5 * cabinet.doors.len());

        shapes.push(Shape::FillRect {
            rect: Rect {
                x: 0.0,
                y: 0.0,
                width: box_width * scale,
                height,
            },
            paint: Paint::Solid(Color::BLACK),
        });

        let mut x = (FACE_FRAME_IN - cabinet.overlay.decimal()) * scale;
        let y = x;

        for door in &cabinet.doors {
            let door_rect = Rect {
                x,
                y,
                width: door.width.decimal() * scale,
                height: door.height.decimal() * scale,
            };
            let panel_rect = door_rect.inset(srw);

            let chamfer = Paint::Radial(RadialGradient {
                center: door_rect.center(),
                inner_radius: door_rect.width * 0.25,
                outer_radius: door_rect.width,
                inner_color: Color::WHITE,
                outer_color: Color::DARK_GRAY,
            });

            shapes.push(Shape::FillRect {
                rect: door_rect,
                paint: chamfer,
            });
            shapes.push(Shape::ClearRect(door_rect.inset(outer_chamfer)));
            shapes.push(Shape::FillRect {
                rect: panel_rect,
                paint: chamfer,
            });
            shapes.push(Shape::ClearRect(panel_rect.inset(inner_chamfer)));

            let knob_center = Point {
                x: match door.knob_side() {
                    KnobSide::Right => door_rect.x + door_rect.width - srw * 0.5,
                    KnobSide::Left => door_rect.x + srw * 0.5,
                },
                y: door_rect.y + door_rect.height - srw * 0.5,
            };
            let knob_radius = srw / 4.0;
            shapes.push(Shape::FillCircle {
                center: knob_center,
                radius: knob_radius,
                paint: Paint::Radial(RadialGradient {
                    center: knob_center,
                    inner_radius: 0.0,
                    outer_radius: knob_radius,
                    inner_color: Color::WHITE,
                    outer_color: Color::BLACK,
                }),
            });

            x += door_rect.width + gap;
        }

        debug!(
            width = canvas_width,
            height,
            scale,
            shapes = shapes.len(),
            "laid out door schematic"
        );

        Ok(Schematic {
            width: canvas_width,
            height,
            scale,
            shapes,
        })
    }

    /// Render as a standalone SVG document.
    pub fn to_svg(&self) -> String {
        let mut defs = String::new();
        let mut body = String::new();
        let mut gradient_count = 0usize;

        let mut paint_ref = |paint: &Paint, defs: &mut String| -> String {
            match paint {
                Paint::Solid(color) => color.hex(),
                Paint::Radial(g) => {
                    let id = format!("grad{}", gradient_count);
                    gradient_count += 1;
                    let _ = writeln!(
                        defs,
                        concat!(
                            r#"    <radialGradient id="{id}" gradientUnits="userSpaceOnUse" "#,
                            r#"cx="{cx:.2}" cy="{cy:.2}" r="{r:.2}" fx="{cx:.2}" fy="{cy:.2}" fr="{fr:.2}">"#,
                            r#"<stop offset="0" stop-color="{c0}"/><stop offset="1" stop-color="{c1}"/>"#,
                            r#"</radialGradient>"#
                        ),
                        id = id,
                        cx = g.center.x,
                        cy = g.center.y,
                        r = g.outer_radius,
                        fr = g.inner_radius,
                        c0 = g.inner_color.hex(),
                        c1 = g.outer_color.hex(),
                    );
                    format!("url(#{})", id)
                }
            }
        };

        for shape in &self.shapes {
            match shape {
                Shape::FillRect { rect, paint } => {
                    let fill = paint_ref(paint, &mut defs);
                    let _ = writeln!(body, "  {}", svg_rect(rect, &fill));
                }
                Shape::ClearRect(rect) => {
                    let _ = writeln!(body, "  {}", svg_rect(rect, &BACKGROUND.hex()));
                }
                Shape::FillCircle { center, radius, paint } => {
                    let fill = paint_ref(paint, &mut defs);
                    let _ = writeln!(
                        body,
                        r#"  <circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="{}"/>"#,
                        center.x,
                        center.y,
                        radius.max(0.0),
                        fill
                    );
                }
            }
        }

        let mut svg = String::new();
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.2}" height="{h:.2}" viewBox="0 0 {w:.2} {h:.2}">"#,
            w = self.width,
            h = self.height
        );
        svg.push_str("  <defs>\n");
        svg.push_str(&defs);
        svg.push_str("  </defs>\n");
        svg.push_str(&body);
        svg.push_str("</svg>\n");
        svg
    }
}

/// Negative sizes (oversized stock) are clamped so the SVG stays valid.
fn svg_rect(rect: &Rect, fill: &str) -> String {
    format!(
        r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}"/>"#,
        rect.x,
        rect.y,
        rect.width.max(0.0),
        rect.height.max(0.0),
        fill
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::cabinet::{derive_cabinet, CabinetInput};

    const TOLERANCE: f64 = 1e-9;

    fn test_cabinet(num_doors: u32) -> Cabinet {
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

    fn door_rects(schematic: &Schematic) -> Vec<Rect> {
        // Every door starts with its gradient-filled outline, right after the box
        schematic
            .shapes
            .iter()
            .skip(1)
            .step_by(5)
            .map(|shape| match shape {
                Shape::FillRect { rect, .. } => *rect,
                other => panic!("expected door outline, got {:?}", other),
            })
            .collect()
    }

    #[test]
    fn test_scaling_to_canvas_width() {
        // Box is 28" x 34"; 280 px wide gives 10 px per inch
        let schematic = Schematic::from_cabinet(&test_cabinet(2), 280.0).unwrap();
        assert!((schematic.scale - 10.0).abs() < TOLERANCE);
        assert!((schematic.height - 340.0).abs() < TOLERANCE);
        assert_eq!(schematic.shapes.len(), 1 + 5 * 2);

        match schematic.shapes[0] {
            Shape::FillRect { rect, paint } => {
                assert_eq!(paint, Paint::Solid(Color::BLACK));
                assert!((rect.width - 280.0).abs() < TOLERANCE);
            }
            other => panic!("expected cabinet box, got {:?}", other),
        }
    }

    #[test]
    fn test_doors_placed_left_to_right_with_gap() {
        let schematic = Schematic::from_cabinet(&test_cabinet(2), 280.0).unwrap();
        let doors = door_rects(&schematic);
        assert_eq!(doors.len(), 2);

        // (2 - 0.5) * 10
        assert!((doors[0].x - 15.0).abs() < TOLERANCE);
        assert!((doors[0].y - 15.0).abs() < TOLERANCE);
        assert!((doors[0].width - 124.375).abs() < TOLERANCE);
        assert!((doors[0].height - 310.0).abs() < TOLERANCE);
        // 15 + 124.375 + 1.25
        assert!((doors[1].x - 140.625).abs() < TOLERANCE);
    }

    #[test]
    fn test_chamfers_and_panel_insets() {
        let schematic = Schematic::from_cabinet(&test_cabinet(1), 280.0).unwrap();
        let shapes = &schematic.shapes;

        match (shapes[1], shapes[2], shapes[3], shapes[4]) {
            (
                Shape::FillRect { rect: door, .. },
                Shape::ClearRect(outer),
                Shape::FillRect { rect: panel, .. },
                Shape::ClearRect(inner),
            ) => {
                assert!((outer.x - door.x - 5.0).abs() < TOLERANCE);
                assert!((panel.x - door.x - 22.5).abs() < TOLERANCE);
                assert!((panel.width - (door.width - 45.0)).abs() < TOLERANCE);
                assert!((inner.x - panel.x - 2.5).abs() < TOLERANCE);
            }
            other => panic!("unexpected shape sequence {:?}", other),
        }
    }

    #[test]
    fn test_knobs_alternate_sides() {
        let schematic = Schematic::from_cabinet(&test_cabinet(2), 280.0).unwrap();
        let doors = door_rects(&schematic);
        let knobs: Vec<(Point, f64)> = schematic
            .shapes
            .iter()
            .filter_map(|shape| match shape {
                Shape::FillCircle { center, radius, .. } => Some((*center, *radius)),
                _ => None,
            })
            .collect();
        assert_eq!(knobs.len(), 2);

        let srw = 22.5;
        // Door 0: lower right
        assert!((knobs[0].0.x - (doors[0].x + doors[0].width - srw / 2.0)).abs() < TOLERANCE);
        // Door 1: lower left
        assert!((knobs[1].0.x - (doors[1].x + srw / 2.0)).abs() < TOLERANCE);
        assert!((knobs[0].0.y - (doors[0].y + doors[0].height - srw / 2.0)).abs() < TOLERANCE);
        assert!((knobs[0].1 - srw / 4.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_invalid_canvas_width() {
        let cabinet = test_cabinet(2);
        assert!(Schematic::from_cabinet(&cabinet, 0.0).is_err());
        assert!(Schematic::from_cabinet(&cabinet, -5.0).is_err());
        assert!(Schematic::from_cabinet(&cabinet, f64::NAN).is_err());
    }

    #[test]
    fn test_svg_output() {
        let svg = Schematic::from_cabinet(&test_cabinet(2), 280.0).unwrap().to_svg();
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"280.00\" height=\"340.00\""));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<rect").count(), 1 + 4 * 2);
        assert_eq!(svg.matches("<circle").count(), 2);
        // Two chamfer fills and one knob per door
        assert_eq!(svg.matches("<radialGradient").count(), 6);
        assert!(svg.contains("fill=\"url(#grad5)\""));
        assert!(svg.contains("stop-color=\"#a9a9a9\""));

        let gradient = svg.lines().find(|line| line.contains("id=\"grad0\"")).unwrap();
        assert!(gradient.contains("gradientUnits=\"userSpaceOnUse\" cx=\""));
        assert!(gradient.contains("\"><stop offset=\"0\""));
        assert!(gradient.trim_end().ends_with("/></radialGradient>"));
    }
}
