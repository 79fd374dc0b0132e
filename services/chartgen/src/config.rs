//! Configuration for chart generation.
//!
//! Values come from three layers, highest priority first: command-line flags
//! (or their environment variables), an optional YAML file, built-in defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chart_common::{
    maidenhead_to_point, parse_latitude, parse_longitude, ChartError, ChartResult, GeoPoint,
    PaperSize, PrintLayout, DEFAULT_DPI,
};
use serde::Deserialize;
use tracing::debug;

/// Default location of the world map asset.
pub const DEFAULT_WORLD_MAP: &str = "assets/world.png";

/// Optional settings file.
///
/// ```yaml
/// world_map: /srv/hamchart/world.png
/// dpi: 300
/// paper: letter
/// output_dir: /tmp/charts
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub world_map: Option<PathBuf>,
    #[serde(default)]
    pub dpi: Option<u32>,
    #[serde(default)]
    pub paper: Option<PaperSize>,
    #[serde(default)]
    pub imperial: Option<bool>,
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

impl FileConfig {
    /// Load a config from a YAML file.
    ///
    /// Read and parse failures surface as `ChartError::Config`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ChartError::Config(format!("cannot read {}: {}", path.display(), e)))
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: FileConfig = serde_yaml::from_str(&content)
            .map_err(|e| ChartError::Config(format!("{}: {}", path.display(), e)))
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        debug!(path = %path.display(), ?config, "Loaded chart config");
        Ok(config)
    }
}

/// Values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub locator: Option<String>,
    pub diameter: Option<u32>,
    pub paper: Option<String>,
    pub imperial: bool,
    pub dpi: Option<u32>,
    pub world_map: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

/// Fully resolved settings for one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub center: GeoPoint,
    pub layout: PrintLayout,
    /// Raster diameter in pixels.
    pub diameter: u32,
    pub world_map: PathBuf,
    pub output: PathBuf,
}

impl Settings {
    /// Merge command-line values over file values over defaults.
    pub fn resolve(overrides: &Overrides, file: &FileConfig) -> ChartResult<Self> {
        let center = resolve_center(overrides)?;

        let imperial = overrides.imperial || file.imperial.unwrap_or(false);
        let paper = match &overrides.paper {
            Some(name) => name.parse::<PaperSize>()?,
            None => file.paper.unwrap_or(PaperSize::default_for(!imperial)),
        };
        let dpi = overrides.dpi.or(file.dpi).unwrap_or(DEFAULT_DPI);
        let layout = PrintLayout::new(paper, dpi)?;

        let diameter = overrides.diameter.unwrap_or_else(|| layout.chart_diameter_px());
        if diameter == 0 {
            return Err(ChartError::invalid_parameter(
                "diameter",
                "chart must be at least one pixel across",
            ));
        }

        let world_map = overrides
            .world_map
            .clone()
            .or_else(|| file.world_map.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_WORLD_MAP));

        let output = match &overrides.output {
            Some(path) => path.clone(),
            None => file
                .output_dir
                .clone()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(default_file_name(&center)),
        };

        Ok(Self {
            center,
            layout,
            diameter,
            world_map,
            output,
        })
    }
}

fn resolve_center(overrides: &Overrides) -> ChartResult<GeoPoint> {
    if let Some(locator) = &overrides.locator {
        return maidenhead_to_point(locator);
    }
    match (&overrides.latitude, &overrides.longitude) {
        (Some(lat), Some(lon)) => GeoPoint::new(parse_latitude(lat)?, parse_longitude(lon)?),
        _ => Err(ChartError::invalid_parameter(
            "center",
            "give --latitude and --longitude, or --locator",
        )),
    }
}

/// `chart_42.87820_-8.54480.png`
pub fn default_file_name(center: &GeoPoint) -> String {
    format!("chart_{:.5}_{:.5}.png", center.latitude, center.longitude)
}
