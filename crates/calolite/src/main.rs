//! Command-line front end: loads a geometry and an event file, applies the
//! requested toggles, selection and camera moves, and renders one frame.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use calolite::{
    CellGeometry, DetectorConfig, EventCatalog, EventSelection, PointerButton, Result, Stage,
    Vec2,
};
use clap::Parser;

/// Calorimeter event viewer
#[derive(Parser, Clone, Debug)]
#[command(name = "calolite", version)]
#[command(about = "Render calorimeter geometry and simulated events to an image")]
struct Cli {
    /// Cell geometry file (JSON, millimetres)
    #[arg(long)]
    geometry: PathBuf,

    /// Event file (JSON, millimetres)
    #[arg(long)]
    events: PathBuf,

    /// Detector configuration replacing the built-in ATLAS table
    #[arg(long)]
    config: Option<PathBuf>,

    /// Event number to overlay, or "none"
    #[arg(long, default_value = "none")]
    event: EventSelection,

    /// Channel or group to hide; may be repeated
    #[arg(long, value_name = "NAME")]
    hide: Vec<String>,

    /// Hide the axis
    #[arg(long)]
    no_axis: bool,

    /// Yaw in degrees, applied as a horizontal left drag
    #[arg(long, default_value = "0", allow_hyphen_values = true, value_parser = finite_f32)]
    yaw: f32,

    /// Pitch in degrees, applied as a vertical left drag
    #[arg(long, default_value = "0", allow_hyphen_values = true, value_parser = finite_f32)]
    pitch: f32,

    /// Wheel delta (120 per notch); positive zooms in
    #[arg(long, default_value = "0", allow_hyphen_values = true, value_parser = finite_f32)]
    wheel: f32,

    /// Output image (.png, .jpg); defaults to a timestamped PNG
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long, default_value = "1280")]
    width: u32,

    /// Image height in pixels
    #[arg(long, default_value = "720")]
    height: u32,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => DetectorConfig::load(path)?,
        None => DetectorConfig::default(),
    };
    let config = Arc::new(config);
    let geometry = CellGeometry::load(&cli.geometry, &config)?;
    let events = EventCatalog::load(&cli.events)?;

    let mut stage = Stage::new(config, &geometry, Box::new(events))?;

    if cli.no_axis {
        stage.on_axis_toggle(false);
    }
    for name in &cli.hide {
        hide(&mut stage, name)?;
    }
    stage.on_event_selected(cli.event)?;

    stage.on_pointer_down(Vec2::ZERO);
    stage.on_pointer_move(Vec2::new(cli.yaw, cli.pitch), Some(PointerButton::Left));
    stage.on_wheel(cli.wheel);

    let output = cli.output.clone().unwrap_or_else(default_output);
    stage.render_to_file(&output, cli.width, cli.height)
}

/// Hides a group if `name` is one, otherwise a single channel.
fn hide(stage: &mut Stage, name: &str) -> Result<()> {
    if stage.config().group(name).is_some() {
        stage.on_group_toggle(name, false)?;
    } else {
        stage.on_channel_toggle(name, false)?;
    }
    Ok(())
}

/// Parses a finite number; `NaN` and infinities are rejected.
fn finite_f32(s: &str) -> std::result::Result<f32, String> {
    let value: f32 = s.parse().map_err(|e| format!("{e}"))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("{s} is not a finite number"))
    }
}

fn default_output() -> PathBuf {
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    PathBuf::from(format!("calolite_{timestamp}.png"))
}
