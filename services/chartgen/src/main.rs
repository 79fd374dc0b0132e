//! Azimuthal equidistant chart generator.
//!
//! Reprojects an equirectangular world map around a chosen center and
//! writes the result as a PNG sized for printing:
//! - Center from decimal or DMS coordinates, or a Maidenhead locator
//! - Diameter derived from paper size and DPI unless given explicitly
//! - Optional YAML config file, with flags and environment taking priority

mod config;
mod pipeline;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use chart_common::ChartError;
use clap::{Parser, ValueEnum};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use config::{FileConfig, Overrides, Settings};

#[derive(Parser, Debug)]
#[command(name = "chartgen")]
#[command(about = "Azimuthal equidistant world chart generator")]
struct Args {
    /// Center latitude, decimal or DMS (e.g. "42 52 41 N")
    #[arg(long, allow_hyphen_values = true, requires = "longitude")]
    latitude: Option<String>,

    /// Center longitude, decimal or DMS (e.g. "8 32 41 W")
    #[arg(long, allow_hyphen_values = true, requires = "latitude")]
    longitude: Option<String>,

    /// Center as a 4 or 6 character Maidenhead locator
    #[arg(long, conflicts_with_all = ["latitude", "longitude"])]
    locator: Option<String>,

    /// Chart diameter in pixels (default: derived from paper and DPI)
    #[arg(long, env = "CHART_DIAMETER")]
    diameter: Option<u32>,

    /// Paper size: a4, letter or a3
    #[arg(long, env = "CHART_PAPER")]
    paper: Option<String>,

    /// Default to US letter paper instead of A4
    #[arg(long)]
    imperial: bool,

    /// Print resolution in dots per inch
    #[arg(long, env = "CHART_DPI")]
    dpi: Option<u32>,

    /// Equirectangular world map image
    #[arg(long, env = "WORLD_MAP")]
    world_map: Option<PathBuf>,

    /// Output PNG path (default: named after the center)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// YAML configuration file
    #[arg(long, env = "CHARTGEN_CONFIG")]
    config: Option<PathBuf>,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Log output format
    #[arg(long, value_enum, default_value = "json")]
    log_format: LogFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogFormat {
    Json,
    Pretty,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            latitude: self.latitude.clone(),
            longitude: self.longitude.clone(),
            locator: self.locator.clone(),
            diameter: self.diameter,
            paper: self.paper.clone(),
            imperial: self.imperial,
            dpi: self.dpi,
            world_map: self.world_map.clone(),
            output: self.output.clone(),
        }
    }
}

fn main() -> ExitCode {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    if let Err(e) = init_tracing(&args) {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    match generate(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Chart generation failed: {e:#}");
            eprintln!("chartgen: {e:#}");
            ExitCode::from(exit_code(&e))
        }
    }
}

fn init_tracing(args: &Args) -> Result<()> {
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(std::io::stderr);

    match args.log_format {
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish())?,
        LogFormat::Pretty => tracing::subscriber::set_global_default(builder.pretty().finish())?,
    }
    Ok(())
}

fn generate(args: &Args) -> Result<()> {
    info!("Starting chart generator");

    let file = match &args.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    let settings = Settings::resolve(&args.overrides(), &file)?;
    let summary = pipeline::run(&settings)?;

    info!(
        output = %summary.output.display(),
        diameter = summary.diameter,
        bytes = summary.bytes,
        "Done"
    );
    println!("{}", summary.output.display());
    Ok(())
}

/// Input problems exit with 2, everything else with 1.
fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<ChartError>() {
        Some(chart_err) => chart_err.exit_code() as u8,
        None => 1,
    }
}
