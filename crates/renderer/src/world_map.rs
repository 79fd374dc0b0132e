//! Decoding the equirectangular world map.
//!
//! The map is decoded once at startup and shared read-only between charts.
//! Any format the `image` crate was built with works; pixels are converted to
//! RGBA8.

use std::path::Path;
use std::time::Instant;

use chart_common::{ChartError, ChartResult};
use image::{DynamicImage, RgbaImage};
use projection::{OutputRaster, SourceRaster};
use tracing::{info, warn};

/// Load a world map from disk.
pub fn load_world_map(path: impl AsRef<Path>) -> ChartResult<SourceRaster> {
    let path = path.as_ref();
    let started = Instant::now();
    let image = image::open(path)
        .map_err(|e| ChartError::ImageDecode(format!("{}: {}", path.display(), e)))?;
    let raster = from_dynamic_image(image)?;
    info!(
        path = %path.display(),
        width = raster.width(),
        height = raster.height(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Loaded world map"
    );
    Ok(raster)
}

/// Decode a world map from an in-memory encoded image.
pub fn decode_world_map(bytes: &[u8]) -> ChartResult<SourceRaster> {
    let image =
        image::load_from_memory(bytes).map_err(|e| ChartError::ImageDecode(e.to_string()))?;
    from_dynamic_image(image)
}

fn from_dynamic_image(image: DynamicImage) -> ChartResult<SourceRaster> {
    let rgba = image.into_rgba8();
    let (width, height) = rgba.dimensions();
    if width != 2 * height {
        // Still usable, but the map will look stretched
        warn!(width, height, "World map is not 2:1 equirectangular");
    }
    SourceRaster::new(width as usize, height as usize, rgba.into_raw())
        .map_err(|e| ChartError::InvalidRaster(e.to_string()))
}

/// Convert a projected chart into an `image` buffer.
pub fn to_rgba_image(chart: &OutputRaster) -> ChartResult<RgbaImage> {
    let side = chart.side() as u32;
    RgbaImage::from_raw(side, side, chart.as_bytes().to_vec())
        .ok_or_else(|| ChartError::InvalidRaster("chart buffer does not match its side".to_string()))
}
