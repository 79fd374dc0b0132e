//! Per-pixel reprojection without the octant symmetry.
//!
//! Evaluates the inverse projection independently for every output pixel.
//! Roughly eight times the transcendental calls of [`Reprojector::project`],
//! kept as a correctness oracle and benchmark baseline. For even diameters
//! both produce identical bytes.
//!
//! [`Reprojector::project`]: crate::Reprojector::project

use std::num::NonZeroU32;

use crate::azimuthal::{Center, CenterTrig, Grid, Reprojector, WedgeTrig};
use crate::raster::{OutputRaster, SourceRaster};

/// Reproject `source` one output pixel at a time.
pub fn project_per_pixel(source: &SourceRaster, center: Center, diameter: NonZeroU32) -> OutputRaster {
    let grid = Grid::new(diameter);
    let trig = CenterTrig::new(center);
    let reprojector = Reprojector::new(source);
    let mut output = OutputRaster::new(grid.diameter);

    for py in 0..grid.diameter {
        let y = grid.y_offset(py);
        for px in 0..grid.diameter {
            let x = grid.x_offset(px);
            let dist = (x * x + y * y).sqrt();
            if dist == 0.0 {
                output.set(px, py, reprojector.sample(trig.latitude, trig.longitude));
            } else if dist < grid.max_distance {
                let (lat, lon) = WedgeTrig::new(dist, &trig).destination(x, y, trig.longitude);
                output.set(px, py, reprojector.sample(lat, lon));
            }
        }
    }
    output
}
