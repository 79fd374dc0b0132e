//! Azimuthal equidistant reprojection of equirectangular world rasters.
//!
//! The kernel takes a shared, read-only [`SourceRaster`] and returns a fresh
//! [`OutputRaster`] per call; no state survives between calls.

pub mod azimuthal;
pub mod raster;
pub mod reference;
pub mod wrap;

pub use azimuthal::{project, Center, Reprojector};
pub use raster::{OutputRaster, ProjectionError, ProjectionResult, Rgba, SourceRaster, TRANSPARENT};
pub use reference::project_per_pixel;
pub use wrap::{lat_lon_to_source, wrap};
