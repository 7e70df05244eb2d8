#![deny(unsafe_code)]
//! CLI binary for the HSL color picker.
//!
//! Subcommands:
//! - `plane` — render the saturation/lightness plane for one hue to PNG
//! - `scale` — render the hue scale strip to PNG
//! - `export` — write all 360 hue planes (and optionally the hue sheet)
//! - `pick` — replay scale and plane drags headlessly, print notifications

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use hsl_picker_core::{
    render_scale, Color, ColorPickerState, HuePlaneRenderer, NullSurface, PickerConfig, Point,
};
use hsl_picker_export::snapshot::write_png;
use hsl_picker_export::{build_hue_sheet, export_planes, DirectorySink, SHEET_ARTIFACT_NAME};
use std::path::{Path, PathBuf};
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hsl-picker", about = "HSL color picker rendering and export CLI")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// JSON file with picker geometry (plane_width, plane_height, scale_width,
    /// scale_height, marker_size).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the plane for one hue and write it as PNG.
    Plane {
        /// Hue in whole degrees, 0..359.
        #[arg(long)]
        hue: u16,

        /// Plane width in pixels (overrides config).
        #[arg(short = 'W', long)]
        width: Option<usize>,

        /// Plane height in pixels (overrides config).
        #[arg(short = 'H', long)]
        height: Option<usize>,

        /// Output file path.
        #[arg(short, long, default_value = "plane.png")]
        output: PathBuf,
    },
    /// Render the hue scale strip and write it as PNG.
    Scale {
        /// Strip width in pixels (overrides config).
        #[arg(short = 'W', long)]
        width: Option<usize>,

        /// Strip height in pixels (overrides config).
        #[arg(short = 'H', long)]
        height: Option<usize>,

        /// Output file path.
        #[arg(short, long, default_value = "scale.png")]
        output: PathBuf,
    },
    /// Write 0.png .. 359.png, one plane per hue, into a directory.
    Export {
        /// Target directory (created if missing).
        #[arg(short, long, default_value = "areas")]
        dir: PathBuf,

        /// Plane width in pixels (overrides config).
        #[arg(short = 'W', long)]
        width: Option<usize>,

        /// Plane height in pixels (overrides config).
        #[arg(short = 'H', long)]
        height: Option<usize>,

        /// Also write all planes side by side as areas.png.
        #[arg(long)]
        sheet: bool,
    },
    /// Replay drags through the picker and print every change notification.
    ///
    /// The scale drag (if any) runs first, then the plane drag.
    Pick {
        /// Plane pointer positions as "x,y"; the first one is the press.
        #[arg(long = "plane", value_parser = parse_point, allow_hyphen_values = true)]
        plane: Vec<Point>,

        /// Scale pointer rows; the first one is the press.
        #[arg(long = "scale", allow_negative_numbers = true)]
        scale: Vec<f64>,
    },
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected \"x,y\", got {s:?}"))?;
    let x: f64 = x
        .trim()
        .parse()
        .map_err(|e| format!("invalid x in {s:?}: {e}"))?;
    let y: f64 = y
        .trim()
        .parse()
        .map_err(|e| format!("invalid y in {s:?}: {e}"))?;
    Ok(Point::new(x, y))
}

fn load_config(path: Option<&Path>) -> Result<PickerConfig, CliError> {
    let Some(path) = path else {
        return Ok(PickerConfig::default());
    };
    let text = std::fs::read_to_string(path).map_err(|e| CliError::config(path, e))?;
    PickerConfig::from_json_str(&text).map_err(|e| CliError::config(path, e))
}

/// Runs the scale drag (if any rows were given) and then the plane drag
/// through a headless picker. Returns every notified color and the final one.
fn replay(
    config: PickerConfig,
    scale: &[f64],
    plane: &[Point],
) -> Result<(Vec<Color>, Color), CliError> {
    let mut picker = ColorPickerState::new(config, NullSurface)?;
    let mut changes = Vec::new();

    if let Some((first, rest)) = scale.split_first() {
        changes.extend(picker.scale_press(*first));
        changes.extend(rest.iter().filter_map(|&y| picker.scale_move(y)));
        picker.scale_release();
    }

    if let Some((first, rest)) = plane.split_first() {
        changes.extend(picker.plane_press(first.x, first.y));
        changes.extend(rest.iter().filter_map(|p| picker.plane_move(p.x, p.y)));
        picker.plane_release();
    }

    Ok((changes, picker.color()))
}

fn color_json(c: &Color) -> serde_json::Value {
    serde_json::json!({
        "hue": c.hue(),
        "saturation": c.saturation(),
        "lightness": c.lightness(),
        "hex": c.to_srgb().to_hex(),
    })
}

fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Plane {
            hue,
            width,
            height,
            output,
        } => {
            config.plane_width = width.unwrap_or(config.plane_width);
            config.plane_height = height.unwrap_or(config.plane_height);
            let renderer = HuePlaneRenderer::new(config.plane_width, config.plane_height)?;
            let bitmap = renderer.render(hue)?;
            write_png(&bitmap, &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "hue": hue,
                    "width": bitmap.width(),
                    "height": bitmap.height(),
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered plane for hue {hue} ({}x{}) -> {}",
                    bitmap.width(),
                    bitmap.height(),
                    output.display()
                );
            }
        }
        Command::Scale {
            width,
            height,
            output,
        } => {
            config.scale_width = width.unwrap_or(config.scale_width);
            config.scale_height = height.unwrap_or(config.scale_height);
            let bitmap = render_scale(config.scale_width, config.scale_height)?;
            write_png(&bitmap, &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "width": bitmap.width(),
                    "height": bitmap.height(),
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered scale ({}x{}) -> {}",
                    bitmap.width(),
                    bitmap.height(),
                    output.display()
                );
            }
        }
        Command::Export {
            dir,
            width,
            height,
            sheet,
        } => {
            config.plane_width = width.unwrap_or(config.plane_width);
            config.plane_height = height.unwrap_or(config.plane_height);
            let renderer = HuePlaneRenderer::new(config.plane_width, config.plane_height)?;
            let mut sink = DirectorySink::create(&dir)?;
            let report = export_planes(&renderer, &mut sink, |hue| {
                if hue % 60 == 59 {
                    info!(done = hue + 1, total = 360, "export progress");
                }
            })?;

            let sheet_path = if sheet {
                let path = dir.join(SHEET_ARTIFACT_NAME);
                write_png(&build_hue_sheet(&renderer)?, &path)?;
                Some(path)
            } else {
                None
            };

            if cli.json {
                let info = serde_json::json!({
                    "dir": dir.display().to_string(),
                    "width": config.plane_width,
                    "height": config.plane_height,
                    "files": report.written.len(),
                    "sheet": sheet_path.as_ref().map(|p| p.display().to_string()),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "exported {} planes ({}x{}) -> {}",
                    report.written.len(),
                    config.plane_width,
                    config.plane_height,
                    dir.display()
                );
                if let Some(path) = sheet_path {
                    eprintln!("wrote hue sheet -> {}", path.display());
                }
            }
        }
        Command::Pick { plane, scale } => {
            let (changes, final_color) = replay(config, &scale, &plane)?;
            if cli.json {
                let info = serde_json::json!({
                    "changes": changes.iter().map(color_json).collect::<Vec<_>>(),
                    "color": color_json(&final_color),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                for c in &changes {
                    println!(
                        "change: hue {:.0} saturation {:.3} lightness {:.3} {}",
                        c.hue(),
                        c.saturation(),
                        c.lightness(),
                        c.to_srgb().to_hex()
                    );
                }
                println!(
                    "color: hue {:.0} saturation {:.3} lightness {:.3} {}",
                    final_color.hue(),
                    final_color.saturation(),
                    final_color.lightness(),
                    final_color.to_srgb().to_hex()
                );
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
