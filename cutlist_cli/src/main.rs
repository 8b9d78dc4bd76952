//! # Shaker Door Cut-List CLI
//!
//! Terminal front end for `cutlist_core`. Reads the cabinet opening and stock
//! sizes from flags, a shop config file, or interactive prompts, then prints
//! the cut list and procedure (or JSON) and optionally writes an SVG
//! schematic and a PDF report.
//!
//! ```text
//! cutlist --opening-height 30 --opening-width 24 --doors 2 \
//!         --stile-rail-width "2 1/4" --show-work --svg doors.svg
//! ```

mod logger;

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{debug, info};

use cutlist_core::{
    derive_cabinet, nearest_fraction, parse_fraction, render_text, CabinetInput, CalcError, CalcResult, CutList,
    Schematic, ShopConfig, Worksheet,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Shaker cabinet door cut-list calculator.
///
/// Dimensions are in inches and accept fractions such as "2 1/4" or "3/8".
#[derive(Parser, Debug)]
#[command(name = "cutlist", version, about)]
struct Args {
    /// Cabinet opening height
    #[arg(long, value_parser = parse_inches)]
    opening_height: Option<f64>,

    /// Cabinet opening width
    #[arg(long, value_parser = parse_inches)]
    opening_width: Option<f64>,

    /// Door overlay past the opening on each edge
    #[arg(long, value_parser = parse_inches)]
    overlay: Option<f64>,

    /// Gap between doors (ignored for a single door)
    #[arg(long, value_parser = parse_inches)]
    gap: Option<f64>,

    /// Number of doors across the opening
    #[arg(long)]
    doors: Option<u32>,

    /// Face width of the stile and rail stock
    #[arg(long, value_parser = parse_inches)]
    stile_rail_width: Option<f64>,

    /// Thickness of the stile and rail stock
    #[arg(long, value_parser = parse_inches)]
    stile_rail_thickness: Option<f64>,

    /// Thickness of the panel stock
    #[arg(long, value_parser = parse_inches)]
    panel_thickness: Option<f64>,

    /// Shop config file (TOML) supplying defaults and report details
    #[arg(long)]
    config: Option<PathBuf>,

    /// Prompt for every value not given as a flag
    #[arg(short, long)]
    interactive: bool,

    /// Output format for stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Include the step-by-step calculations
    #[arg(long)]
    show_work: bool,

    /// Write the door schematic as SVG
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Write a PDF shop report
    #[arg(long)]
    pdf: Option<PathBuf>,

    /// Schematic width in px (overrides the config file)
    #[arg(long)]
    canvas_width: Option<f64>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_inches(text: &str) -> std::result::Result<f64, String> {
    parse_fraction(text).map_err(|e| e.to_string())
}

/// Apply command-line flags on top of the configured defaults.
fn apply_flags(args: &Args, defaults: &CabinetInput) -> CabinetInput {
    CabinetInput {
        opening_height_in: args.opening_height.unwrap_or(defaults.opening_height_in),
        opening_width_in: args.opening_width.unwrap_or(defaults.opening_width_in),
        overlay_in: args.overlay.unwrap_or(defaults.overlay_in),
        gap_in: args.gap.unwrap_or(defaults.gap_in),
        num_doors: args.doors.unwrap_or(defaults.num_doors),
        stile_rail_width_in: args.stile_rail_width.unwrap_or(defaults.stile_rail_width_in),
        stile_rail_thickness_in: args.stile_rail_thickness.unwrap_or(defaults.stile_rail_thickness_in),
        panel_thickness_in: args.panel_thickness.unwrap_or(defaults.panel_thickness_in),
    }
}

/// Ask for every value the user did not pass as a flag.
fn prompt_missing(args: &Args, input: &mut CabinetInput) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock();

    if args.opening_height.is_none() {
        input.opening_height_in = prompt_inches(&mut lines, "Opening height", input.opening_height_in)?;
    }
    if args.opening_width.is_none() {
        input.opening_width_in = prompt_inches(&mut lines, "Opening width", input.opening_width_in)?;
    }
    if args.overlay.is_none() {
        input.overlay_in = prompt_inches(&mut lines, "Overlay", input.overlay_in)?;
    }
    if args.doors.is_none() {
        input.num_doors = prompt_count(&mut lines, "Number of doors", input.num_doors)?;
    }
    // A single door has no gap to ask about
    if args.gap.is_none() && input.num_doors > 1 {
        input.gap_in = prompt_inches(&mut lines, "Gap between doors", input.gap_in)?;
    }
    if args.stile_rail_width.is_none() {
        input.stile_rail_width_in = prompt_inches(&mut lines, "Stile/rail width", input.stile_rail_width_in)?;
    }
    if args.stile_rail_thickness.is_none() {
        input.stile_rail_thickness_in =
            prompt_inches(&mut lines, "Stile/rail thickness", input.stile_rail_thickness_in)?;
    }
    if args.panel_thickness.is_none() {
        input.panel_thickness_in = prompt_inches(&mut lines, "Panel thickness", input.panel_thickness_in)?;
    }
    Ok(())
}

/// Read one line; `None` on end of input.
fn read_answer(lines: &mut impl BufRead, prompt: &str) -> Result<Option<String>> {
    print!("{}", prompt);
    io::stdout().flush().context("flushing prompt")?;

    let mut answer = String::new();
    let read = lines.read_line(&mut answer).context("reading from stdin")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(answer.trim().to_string()))
}

fn prompt_inches(lines: &mut impl BufRead, label: &str, default: f64) -> Result<f64> {
    let prompt = format!("{} (in) [{}]: ", label, nearest_fraction(default));
    loop {
        match read_answer(lines, &prompt)? {
            None => return Ok(default),
            Some(answer) if answer.is_empty() => return Ok(default),
            Some(answer) => match parse_fraction(&answer) {
                Ok(value) => return Ok(value),
                Err(e) => println!("  {}", e),
            },
        }
    }
}

fn prompt_count(lines: &mut impl BufRead, label: &str, default: u32) -> Result<u32> {
    let prompt = format!("{} [{}]: ", label, default);
    loop {
        match read_answer(lines, &prompt)? {
            None => return Ok(default),
            Some(answer) if answer.is_empty() => return Ok(default),
            Some(answer) => match answer.parse::<u32>() {
                Ok(value) => return Ok(value),
                Err(_) => println!("  '{}' is not a whole number", answer),
            },
        }
    }
}

/// Write a rendered SVG or PDF file.
fn write_output(path: &Path, contents: impl AsRef<[u8]>) -> CalcResult<()> {
    std::fs::write(path, contents)
        .map_err(|e| CalcError::file_error("write", path.display().to_string(), e.to_string()))
}

/// 2 when a changed input value would fix the run, 1 otherwise.
fn failure_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<CalcError>() {
        Some(calc_error) if calc_error.is_input_error() => 2,
        _ => 1,
    }
}

fn run(args: &Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => ShopConfig::load(path).with_context(|| format!("loading config {}", path.display()))?,
        None => ShopConfig::default(),
    };

    let mut input = apply_flags(args, &config.defaults);
    if args.interactive {
        prompt_missing(args, &mut input)?;
    }
    debug!(?input, "resolved cabinet input");

    let cabinet = derive_cabinet(&input)?;
    info!(
        doors = cabinet.num_doors,
        door_width = %cabinet.door_width(),
        door_height = %cabinet.door_height(),
        "calculated cut list"
    );

    match args.format {
        OutputFormat::Text => print!("{}", render_text(&cabinet, args.show_work)),
        OutputFormat::Json => {
            let mut report = serde_json::json!({
                "input": input,
                "cabinet": cabinet,
                "cut_list": CutList::from_cabinet(&cabinet),
            });
            if args.show_work {
                report["worksheet"] = serde_json::to_value(Worksheet::from_cabinet(&cabinet))?;
            }
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    if let Some(path) = &args.svg {
        let width = args.canvas_width.unwrap_or(config.drawing.canvas_width_px);
        let svg = Schematic::from_cabinet(&cabinet, width)?.to_svg();
        write_output(path, svg)?;
        info!(path = %path.display(), "wrote schematic");
    }

    if let Some(path) = &args.pdf {
        let pdf = cutlist_core::pdf::render_cabinet_pdf(&cabinet, &config.report)?;
        write_output(path, pdf)?;
        info!(path = %path.display(), "wrote pdf report");
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            if let Some(calc_error) = e.downcast_ref::<CalcError>() {
                if calc_error.is_input_error() {
                    eprintln!("Check the value and run again (fractions like \"2 1/4\" are accepted).");
                }
                if let Ok(json) = serde_json::to_string_pretty(calc_error) {
                    eprintln!();
                    eprintln!("Error JSON:");
                    eprintln!("{}", json);
                }
            }
            ExitCode::from(failure_code(&e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_flags_accept_fractions() {
        let args = Args::try_parse_from([
            "cutlist",
            "--opening-width",
            "23 1/2",
            "--stile-rail-width",
            "2 1/4\"",
            "--doors",
            "3",
        ])
        .unwrap();
        assert_eq!(args.opening_width, Some(23.5));
        assert_eq!(args.stile_rail_width, Some(2.25));
        assert_eq!(args.doors, Some(3));
        assert_eq!(args.format, OutputFormat::Text);
    }

    #[test]
    fn test_bad_fraction_flag_rejected() {
        assert!(Args::try_parse_from(["cutlist", "--gap", "1/0"]).is_err());
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = Args::try_parse_from(["cutlist", "--opening-height", "36", "--doors", "1"]).unwrap();
        let input = apply_flags(&args, &CabinetInput::default());
        assert_eq!(input.opening_height_in, 36.0);
        assert_eq!(input.num_doors, 1);
        // untouched values come from the defaults
        assert_eq!(input.opening_width_in, 24.0);
        assert_eq!(input.panel_thickness_in, 0.25);
    }

    #[test]
    fn test_prompt_inches_reprompts_until_valid() {
        let mut lines = Cursor::new("abc\n2 3/8\n");
        assert_eq!(prompt_inches(&mut lines, "Overlay", 0.5).unwrap(), 2.375);
    }

    #[test]
    fn test_prompts_fall_back_to_default() {
        let mut lines = Cursor::new("\n");
        assert_eq!(prompt_inches(&mut lines, "Overlay", 0.5).unwrap(), 0.5);

        let mut eof = Cursor::new("");
        assert_eq!(prompt_count(&mut eof, "Number of doors", 2).unwrap(), 2);
    }

    #[test]
    fn test_write_output_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doors.svg");
        write_output(&path, "<svg/>").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<svg/>");
    }

    #[test]
    fn test_write_failure_is_file_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("doors.pdf");
        let err = write_output(&path, b"%PDF").unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
        match err {
            CalcError::FileError { operation, path: reported, .. } => {
                assert_eq!(operation, "write");
                assert!(reported.ends_with("doors.pdf"));
            }
            other => panic!("expected FileError, got {:?}", other),
        }
    }

    #[test]
    fn test_failure_code_separates_input_errors() {
        let bad_input =
            anyhow::Error::from(CalcError::invalid_input("num_doors", "0", "At least one door is required"));
        assert_eq!(failure_code(&bad_input), 2);

        let bad_write = anyhow::Error::from(CalcError::file_error("write", "doors.svg", "denied"));
        assert_eq!(failure_code(&bad_write), 1);

        assert_eq!(failure_code(&anyhow::anyhow!("stdin closed")), 1);
    }

    #[test]
    fn test_prompt_count_parses_whole_numbers() {
        let mut lines = Cursor::new("two\n4\n");
        assert_eq!(prompt_count(&mut lines, "Number of doors", 2).unwrap(), 4);
    }
}
