//! One chart, start to finish: load map, project, encode, write.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use chart_common::ChartError;
use projection::{ProjectionError, SourceRaster};
use renderer::{encode_chart, load_world_map};
use tracing::info;

use crate::config::Settings;

/// What a run produced.
#[derive(Debug, Clone)]
pub struct ChartSummary {
    pub output: PathBuf,
    pub diameter: u32,
    pub bytes: usize,
}

/// Load the configured world map and render one chart.
pub fn run(settings: &Settings) -> Result<ChartSummary> {
    let world = load_world_map(&settings.world_map)?;
    render_with(&world, settings)
}

/// Render a chart from an already decoded world map.
pub fn render_with(world: &SourceRaster, settings: &Settings) -> Result<ChartSummary> {
    let started = Instant::now();
    let (latitude, longitude) = settings.center.to_radians();

    info!(
        center = %settings.center,
        paper = %settings.layout.paper,
        dpi = settings.layout.dots_per_inch,
        diameter = settings.diameter,
        "Generating chart"
    );

    let chart = projection::project(world, latitude, longitude, settings.diameter)
        .map_err(projection_failed)?;
    let png = encode_chart(&chart)?;

    if let Some(parent) = settings.output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    std::fs::write(&settings.output, &png)
        .map_err(ChartError::from)
        .with_context(|| format!("Failed to write chart: {}", settings.output.display()))?;

    info!(
        output = %settings.output.display(),
        bytes = png.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Chart written"
    );

    Ok(ChartSummary {
        output: settings.output.clone(),
        diameter: settings.diameter,
        bytes: png.len(),
    })
}

fn projection_failed(err: ProjectionError) -> ChartError {
    match err {
        ProjectionError::ZeroDiameter => ChartError::invalid_parameter("diameter", err.to_string()),
        ProjectionError::NonFiniteCenter { .. } => {
            ChartError::invalid_parameter("center", err.to_string())
        }
        ProjectionError::EmptySource { .. } | ProjectionError::PixelBufferMismatch { .. } => {
            ChartError::InvalidRaster(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FileConfig, Overrides};
    use test_utils::{indexed_pixels, solid_pixels, temp_test_dir, write_png_fixture};

    fn settings_for(dir: &std::path::Path, world_map: PathBuf, diameter: u32) -> Settings {
        let overrides = Overrides {
            latitude: Some("42 52 41 N".to_string()),
            longitude: Some("8 32 41 W".to_string()),
            diameter: Some(diameter),
            world_map: Some(world_map),
            output: Some(dir.join("charts").join("santiago.png")),
            ..Default::default()
        };
        Settings::resolve(&overrides, &FileConfig::default()).unwrap()
    }

    #[test]
    fn test_end_to_end() {
        let dir = temp_test_dir();
        let map = write_png_fixture(dir.path(), "world.png", 360, 180, indexed_pixels(360, 180));
        let settings = settings_for(dir.path(), map, 65);

        let summary = run(&settings).unwrap();
        assert_eq!(summary.diameter, 65);
        assert!(summary.output.exists());

        let written = std::fs::read(&summary.output).unwrap();
        assert_eq!(written.len(), summary.bytes);
        let image = image::load_from_memory(&written).unwrap().into_rgba8();
        assert_eq!(image.dimensions(), (65, 65));
        // Corners are beyond the antipode ring
        assert_eq!(image.get_pixel(0, 0).0[3], 0);
        assert_eq!(image.get_pixel(32, 32).0[3], 255);
    }

    #[test]
    fn test_render_with_solid_map() {
        let dir = temp_test_dir();
        let world = SourceRaster::new(8, 4, solid_pixels(8, 4, [10, 20, 30, 255])).unwrap();
        let settings = settings_for(dir.path(), PathBuf::from("unused.png"), 16);

        let summary = render_with(&world, &settings).unwrap();
        let image = image::open(&summary.output).unwrap().into_rgba8();
        assert_eq!(image.get_pixel(8, 8).0, [10, 20, 30, 255]);
        assert_eq!(image.get_pixel(0, 0).0, [0, 0, 0, 0]);
    }

    #[test]
    fn test_missing_world_map() {
        let dir = temp_test_dir();
        let settings = settings_for(dir.path(), dir.path().join("nope.png"), 8);
        let err = run(&settings).unwrap_err();
        let chart_err = err.downcast_ref::<ChartError>().unwrap();
        assert!(matches!(chart_err, ChartError::ImageDecode(_)));
        assert!(!settings.output.exists());
    }

    #[test]
    fn test_projection_errors_map_to_input_errors() {
        assert_eq!(projection_failed(ProjectionError::ZeroDiameter).exit_code(), 2);
        assert_eq!(
            projection_failed(ProjectionError::EmptySource { width: 0, height: 0 }).exit_code(),
            1
        );
    }
}
