//! # PDF Shop Report
//!
//! Generates a printable cut-list report for a cabinet using Typst.
//!
//! ## Architecture
//!
//! - The Typst template is embedded as a string constant
//! - Data is injected via placeholder replacement before compilation
//! - The door schematic is embedded as an inline SVG image
//! - Output is raw PDF bytes (`Vec<u8>`)
//!
//! ## Example
//!
//! ```rust,no_run
//! use cutlist_core::calculations::cabinet::{derive_cabinet, CabinetInput};
//! use cutlist_core::config::ReportMeta;
//! use cutlist_core::pdf::render_cabinet_pdf;
//!
//! let cabinet = derive_cabinet(&CabinetInput::default()).unwrap();
//! let pdf_bytes = render_cabinet_pdf(&cabinet, &ReportMeta::default()).unwrap();
//! std::fs::write("doors.pdf", pdf_bytes).unwrap();
//! ```

use chrono::Utc;
use tracing::debug;
use typst::diag::{FileError, FileResult};
use typst::foundations::{Bytes, Datetime};
use typst::syntax::{FileId, Source};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, LibraryExt, World};
use typst_pdf::PdfOptions;

use crate::calculations::cabinet::Cabinet;
use crate::config::ReportMeta;
use crate::errors::{CalcError, CalcResult};
use crate::report::{CutList, Procedure};
use crate::schematic::Schematic;
use crate::worksheet::Worksheet;

/// Layout width for the embedded schematic. The image is scaled to the page,
/// so this only sets line and gradient precision.
const SCHEMATIC_WIDTH_PX: f64 = 600.0;

// ============================================================================
// Typst World Implementation
// ============================================================================

/// A minimal Typst world for compiling documents without external files.
struct PdfWorld {
    /// The main source document
    main: Source,
    /// Font book
    book: LazyHash<FontBook>,
    /// Available fonts
    fonts: Vec<Font>,
    /// Library (standard functions)
    library: LazyHash<Library>,
}

impl PdfWorld {
    fn new(source: String) -> Self {
        let fonts = Self::load_fonts();
        let book = FontBook::from_fonts(&fonts);

        PdfWorld {
            main: Source::detached(source),
            book: LazyHash::new(book),
            fonts,
            library: LazyHash::new(Library::default()),
        }
    }

    /// Fonts bundled with typst-assets (Libertinus Serif, New Computer Modern, DejaVu Sans Mono)
    fn load_fonts() -> Vec<Font> {
        typst_assets::fonts()
            .flat_map(|font_bytes| Font::iter(Bytes::new(font_bytes.to_vec())))
            .collect()
    }
}

impl World for PdfWorld {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        &self.book
    }

    fn main(&self) -> FileId {
        self.main.id()
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        if id == self.main.id() {
            Ok(self.main.clone())
        } else {
            Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
        }
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
    }

    fn font(&self, index: usize) -> Option<Font> {
        self.fonts.get(index).cloned()
    }

    fn today(&self, _offset: Option<i64>) -> Option<Datetime> {
        let now = Utc::now();
        Datetime::from_ymd(
            now.format("%Y").to_string().parse().ok()?,
            now.format("%m").to_string().parse().ok()?,
            now.format("%d").to_string().parse().ok()?,
        )
    }
}

// ============================================================================
// PDF Template
// ============================================================================

const CABINET_TEMPLATE: &str = r##"
#set page(
  paper: "us-letter",
  margin: (top: 0.75in, bottom: 0.75in, left: 0.9in, right: 0.9in),
  header: align(right)[
    #text(size: 9pt, fill: gray)[{{SHOP_NAME}}]
  ],
  footer: context [
    #line(length: 100%, stroke: 0.5pt + gray)
    #v(4pt)
    #grid(
      columns: (1fr, 1fr, 1fr),
      align(left)[#text(size: 9pt)[Job: {{JOB_ID}}]],
      align(center)[#text(size: 9pt)[Page #counter(page).display()]],
      align(right)[#text(size: 9pt)[{{DATE}}]],
    )
  ]
)

#set text(font: "Libertinus Serif", size: 11pt)

#align(center)[
  #block(width: 100%, fill: rgb("#f0f0f0"), inset: 12pt, radius: 4pt)[
    #text(size: 18pt, weight: "bold")[Shaker Door Cut List]
    #v(4pt)
    #text(size: 12pt)[{{DESCRIPTION}}]
  ]
]

#v(12pt)

== Cabinet Inputs

#table(
  columns: (1fr, auto),
  inset: 6pt,
  stroke: 0.5pt,
  align: (left, right),
  table.header([*Input*], [*Value (in)*]),
{{INPUT_ROWS}}
)

#v(12pt)

== Cut List

#table(
  columns: (1fr, auto, auto, auto, auto),
  inset: 6pt,
  stroke: 0.5pt,
  align: (left, center, right, right, right),
  table.header([*Piece*], [*Qty*], [*Width (in)*], [*Length (in)*], [*Stock (in)*]),
{{CUT_ROWS}}
)

{{WARNING}}

#v(12pt)

== Schematic

#align(center)[
  #image(bytes("{{SCHEMATIC_SVG}}"), format: "svg", width: 70%)
]

#pagebreak()

== Procedures

{{PROCEDURE}}

#v(12pt)

== Calculations

{{WORKSHEET}}

#v(24pt)
#line(length: 100%, stroke: 0.5pt)
#v(8pt)

#text(size: 9pt, fill: gray)[
  Measurements are rounded to the nearest 1/16 inch. Verify against your stock before cutting.
]
"##;

// ============================================================================
// PDF Rendering
// ============================================================================

/// Render a cabinet's cut list, procedure, worksheet and schematic to PDF.
///
/// # Returns
///
/// * `Ok(Vec<u8>)` - PDF file as bytes
/// * `Err(CalcError::RenderFailed)` - If Typst compilation or PDF export fails
pub fn render_cabinet_pdf(cabinet: &Cabinet, meta: &ReportMeta) -> CalcResult<Vec<u8>> {
    let source = build_cabinet_source(cabinet, meta)?;

    let world = PdfWorld::new(source);
    let warned = typst::compile(&world);

    let document = warned.output.map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        CalcError::render_failed("typst compile", error_msgs.join("; "))
    })?;

    let pdf_bytes = typst_pdf::pdf(&document, &PdfOptions::default()).map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        CalcError::render_failed("pdf export", error_msgs.join("; "))
    })?;

    debug!(bytes = pdf_bytes.len(), "rendered cabinet pdf");
    Ok(pdf_bytes)
}

/// Fill the Typst template for one cabinet.
fn build_cabinet_source(cabinet: &Cabinet, meta: &ReportMeta) -> CalcResult<String> {
    let schematic = Schematic::from_cabinet(cabinet, SCHEMATIC_WIDTH_PX)?;
    let job_id = if meta.job_id.is_empty() { "-" } else { meta.job_id.as_str() };

    let warning = {
        let negative = cabinet.negative_dimensions();
        if negative.is_empty() {
            String::new()
        } else {
            format!(
                "#text(fill: red)[*Warning:* negative sizes ({}). The stile/rail stock is too wide for these doors.]",
                escape_typst(&negative.join(", "))
            )
        }
    };

    Ok(CABINET_TEMPLATE
        .replace("{{SHOP_NAME}}", &escape_typst(&meta.shop_name))
        .replace("{{JOB_ID}}", &escape_typst(job_id))
        .replace("{{DATE}}", &Utc::now().format("%Y-%m-%d").to_string())
        .replace("{{DESCRIPTION}}", &escape_typst(&cabinet.description()))
        .replace("{{INPUT_ROWS}}", &build_input_rows(cabinet))
        .replace("{{CUT_ROWS}}", &build_cut_rows(cabinet))
        .replace("{{WARNING}}", &warning)
        .replace("{{SCHEMATIC_SVG}}", &escape_typst_string(&schematic.to_svg()))
        .replace("{{PROCEDURE}}", &build_procedure(cabinet))
        .replace("{{WORKSHEET}}", &build_worksheet(cabinet)))
}

fn build_input_rows(cabinet: &Cabinet) -> String {
    [
        ("Opening height", cabinet.opening_height.text().to_string()),
        ("Opening width", cabinet.opening_width.text().to_string()),
        ("Overlay", cabinet.overlay.text().to_string()),
        ("Gap between doors", cabinet.gap.text().to_string()),
        ("Number of doors", cabinet.num_doors.to_string()),
        ("Stile/rail width", cabinet.stile_rail_width.text().to_string()),
        ("Stile/rail thickness", cabinet.stile_rail_thickness.text().to_string()),
        ("Panel thickness", cabinet.panel_thickness.text().to_string()),
    ]
    .iter()
    .map(|(label, value)| format!("  [{}], [{}],", label, escape_typst(value)))
    .collect::<Vec<_>>()
    .join("\n")
}

fn build_cut_rows(cabinet: &Cabinet) -> String {
    CutList::from_cabinet(cabinet)
        .entries()
        .iter()
        .map(|entry| {
            format!(
                "  [{}], [{}], [{}], [{}], [{}],",
                entry.name,
                entry.quantity,
                escape_typst(entry.width.text()),
                escape_typst(entry.length.text()),
                escape_typst(entry.stock_thickness.text()),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn build_procedure(cabinet: &Cabinet) -> String {
    let mut out = String::new();
    for step in Procedure::for_cabinet(cabinet).steps {
        out.push_str(&format!("=== {}\n\n", escape_typst(&step.title)));
        for instruction in &step.instructions {
            out.push_str(&format!("- {}\n", escape_typst(instruction)));
        }
        out.push('\n');
    }
    out
}

fn build_worksheet(cabinet: &Cabinet) -> String {
    let sheet = Worksheet::from_cabinet(cabinet);
    let mut out = format!("{}\n\n", escape_typst(&sheet.intro));
    out.push_str("#table(\n");
    out.push_str("  columns: (auto, 1fr),\n");
    out.push_str("  inset: 6pt,\n");
    out.push_str("  stroke: 0.5pt,\n");
    out.push_str("  table.header([*Step*], [*Calculation*]),\n");
    for step in &sheet.steps {
        let mut cell = escape_typst(&step.expression);
        if let Some(note) = &step.note {
            cell.push_str(&format!(" \\\n#text(size: 9pt, fill: gray)[{}]", escape_typst(note)));
        }
        out.push_str(&format!("  [{}], [{}],\n", escape_typst(step.kind.label()), cell));
    }
    out.push_str(")\n");
    out
}

/// Escape special Typst markup characters in text
fn escape_typst(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '*' => "\\*".to_string(),
            '_' => "\\_".to_string(),
            '#' => "\\#".to_string(),
            '$' => "\\$".to_string(),
            '@' => "\\@".to_string(),
            '<' => "\\<".to_string(),
            '>' => "\\>".to_string(),
            '[' => "\\[".to_string(),
            ']' => "\\]".to_string(),
            '"' => "\\\"".to_string(),
            '\'' => "\\'".to_string(),
            '\\' => "\\\\".to_string(),
            '`' => "\\`".to_string(),
            _ => c.to_string(),
        })
        .collect()
}

/// Escape text for use inside a Typst string literal
fn escape_typst_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}
