//! Azimuthal equidistant reprojection.
//!
//! Produces a circular view of an equirectangular world raster centered on an
//! arbitrary point. Distance from the circle's center is proportional to
//! great-circle distance from the center point, and direction is true
//! bearing. The circle's edge is the antipode.
//!
//! # Symmetry
//!
//! The expensive terms (`sin`, `cos`, `sqrt` of the angular distance) depend
//! only on `x² + y²`, which is invariant under the eight reflections of a
//! circle. They are computed once for each pixel of the upper-left wedge
//! (`0 ≤ px ≤ py < center`) and reused for all eight mirrored destinations.
//! Each destination still gets its own bearing and therefore its own sample.
//!
//! # Parallelism
//!
//! Wedge rows are independent. Large diameters compute rows in parallel with
//! rayon and apply their writes in row order, so the output is byte-identical
//! to a sequential run.

use std::f64::consts::PI;
use std::num::NonZeroU32;
use std::time::Instant;

use rayon::prelude::*;
use tracing::debug;

use crate::raster::{OutputRaster, ProjectionError, ProjectionResult, Rgba, SourceRaster};
use crate::wrap::lat_lon_to_source;

/// Diameters below this run on the calling thread.
const PARALLEL_THRESHOLD: u32 = 256;

/// Wedge rows computed per parallel batch. Bounds the buffered writes.
const ROW_BATCH: usize = 64;

/// Projection center in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Center {
    pub latitude: f64,
    pub longitude: f64,
}

impl Center {
    /// Any finite values are accepted; out-of-range longitude wraps.
    pub fn new(latitude: f64, longitude: f64) -> ProjectionResult<Self> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(ProjectionError::NonFiniteCenter {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// Pixel geometry of one output circle.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Grid {
    pub diameter: usize,
    /// Circle center in pixel units (`diameter / 2`).
    pub center: f64,
    /// Wedge rows to scan; includes the middle row for odd diameters.
    pub wedge_rows: usize,
    /// Angular radians per pixel.
    pub pixel_radians: f64,
    /// Cutoff slightly past the antipode so edge pixels are not lost to rounding.
    pub max_distance: f64,
}

impl Grid {
    pub fn new(diameter: NonZeroU32) -> Self {
        let diameter = diameter.get() as usize;
        let center = diameter as f64 / 2.0;
        let pixel_radians = PI / center;
        Self {
            diameter,
            center,
            wedge_rows: (center + 0.5) as usize,
            pixel_radians,
            max_distance: (center + 0.5f64.sqrt()) * pixel_radians,
        }
    }

    /// Local x offset in radians of the center of column `px`.
    #[inline]
    pub fn x_offset(&self, px: usize) -> f64 {
        (px as f64 + 0.5 - self.center) * self.pixel_radians
    }

    /// Local y offset in radians (north positive) of the center of row `py`.
    #[inline]
    pub fn y_offset(&self, py: usize) -> f64 {
        (self.center - py as f64 - 0.5) * self.pixel_radians
    }
}

/// Center terms fixed for a whole call.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CenterTrig {
    pub latitude: f64,
    pub latitude_sin: f64,
    pub latitude_cos: f64,
    pub longitude: f64,
}

impl CenterTrig {
    pub fn new(center: Center) -> Self {
        Self {
            latitude: center.latitude,
            latitude_sin: center.latitude.sin(),
            latitude_cos: center.latitude.cos(),
            longitude: center.longitude,
        }
    }
}

/// Distance-only terms shared by the eight reflections of a wedge pixel.
#[derive(Debug, Clone, Copy)]
pub(crate) struct WedgeTrig {
    pub dist_sin: f64,
    pub lat_part1: f64,
    pub lat_part2: f64,
    pub long_part1: f64,
    pub long_part2: f64,
}

impl WedgeTrig {
    /// `dist` must be non-zero.
    #[inline]
    pub fn new(dist: f64, center: &CenterTrig) -> Self {
        let dist_sin = dist.sin();
        let dist_cos = dist.cos();
        Self {
            dist_sin,
            lat_part1: dist_cos * center.latitude_sin,
            lat_part2: dist_sin * center.latitude_cos / dist,
            long_part1: dist * center.latitude_cos * dist_cos,
            long_part2: center.latitude_sin * dist_sin,
        }
    }

    /// Inverse projection of local offset `(x, y)` to latitude/longitude.
    #[inline]
    pub fn destination(&self, x: f64, y: f64, longitude: f64) -> (f64, f64) {
        // Rounding can push the sine a hair past ±1 right at a pole
        let lat = (self.lat_part1 + y * self.lat_part2).clamp(-1.0, 1.0).asin();
        let lon = longitude + (x * self.dist_sin).atan2(self.long_part1 - y * self.long_part2);
        (lat, lon)
    }
}

/// One reflection of the wedge onto the full circle.
#[derive(Debug, Clone, Copy)]
struct Octant {
    swap: bool,
    negate_x: bool,
    negate_y: bool,
    mirror_x: bool,
    mirror_y: bool,
}

const fn octant(swap: bool, negate_x: bool, negate_y: bool, mirror_x: bool, mirror_y: bool) -> Octant {
    Octant {
        swap,
        negate_x,
        negate_y,
        mirror_x,
        mirror_y,
    }
}

/// Swap for {1,2,5,6}, negate x for {1,3,4,6}, negate y for {1,2,4,7},
/// mirror columns for {2,3,4,5}, mirror rows for {4,5,6,7}.
const OCTANTS: [Octant; 8] = [
    octant(false, false, false, false, false),
    octant(true, true, true, false, false),
    octant(true, false, true, true, false),
    octant(false, true, false, true, false),
    octant(false, true, true, true, true),
    octant(true, false, false, true, true),
    octant(true, true, false, false, true),
    octant(false, false, true, false, true),
];

impl Octant {
    /// Reflect wedge offsets and pixel position into this octant.
    #[inline]
    fn reflect(&self, x: f64, y: f64, px: usize, py: usize, diameter: usize) -> (f64, f64, usize, usize) {
        let (mut x, mut y, mut px, mut py) = if self.swap {
            (y, x, py, px)
        } else {
            (x, y, px, py)
        };
        if self.negate_x {
            x = -x;
        }
        if self.negate_y {
            y = -y;
        }
        if self.mirror_x {
            px = diameter - px - 1;
        }
        if self.mirror_y {
            py = diameter - py - 1;
        }
        (x, y, px, py)
    }
}

/// A destination pixel and the color sampled for it.
#[derive(Debug, Clone, Copy)]
struct PixelWrite {
    x: usize,
    y: usize,
    color: Rgba,
}

/// Reprojects one shared source raster; cheap to create per call.
#[derive(Debug, Clone, Copy)]
pub struct Reprojector<'a> {
    source: &'a SourceRaster,
}

impl<'a> Reprojector<'a> {
    pub fn new(source: &'a SourceRaster) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &'a SourceRaster {
        self.source
    }

    /// Render the azimuthal equidistant view around `center`.
    ///
    /// Returns a `diameter`-sided square whose inscribed circle holds the
    /// projected image; corners stay transparent.
    pub fn project(&self, center: Center, diameter: NonZeroU32) -> OutputRaster {
        let started = Instant::now();
        let grid = Grid::new(diameter);
        let trig = CenterTrig::new(center);
        let mut output = OutputRaster::new(grid.diameter);

        if diameter.get() < PARALLEL_THRESHOLD {
            for py in 0..grid.wedge_rows {
                self.wedge_row(&grid, &trig, py, &mut |w: PixelWrite| output.set(w.x, w.y, w.color));
            }
        } else {
            let rows: Vec<usize> = (0..grid.wedge_rows).collect();
            for batch in rows.chunks(ROW_BATCH) {
                let writes: Vec<Vec<PixelWrite>> = batch
                    .par_iter()
                    .map(|&py| {
                        let mut row = Vec::with_capacity(8 * (py + 1));
                        self.wedge_row(&grid, &trig, py, &mut |w: PixelWrite| row.push(w));
                        row
                    })
                    .collect();
                for w in writes.iter().flatten() {
                    output.set(w.x, w.y, w.color);
                }
            }
        }

        debug!(
            diameter = grid.diameter,
            latitude = center.latitude,
            longitude = center.longitude,
            source_width = self.source.width(),
            source_height = self.source.height(),
            elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
            "Projected azimuthal equidistant chart"
        );
        output
    }

    /// Compute wedge row `py` and emit every destination it covers, in
    /// column then octant order.
    fn wedge_row(&self, grid: &Grid, trig: &CenterTrig, py: usize, emit: &mut impl FnMut(PixelWrite)) {
        let y = grid.y_offset(py);
        for px in 0..=py {
            let x = grid.x_offset(px);
            let dist = (x * x + y * y).sqrt();
            if dist == 0.0 {
                // Exact center: no bearing, and no mirrored partners
                emit(PixelWrite {
                    x: px,
                    y: py,
                    color: self.sample(trig.latitude, trig.longitude),
                });
            } else if dist < grid.max_distance {
                let wedge = WedgeTrig::new(dist, trig);
                for octant in &OCTANTS {
                    let (x_coord, y_coord, x_out, y_out) = octant.reflect(x, y, px, py, grid.diameter);
                    let (lat, lon) = wedge.destination(x_coord, y_coord, trig.longitude);
                    emit(PixelWrite {
                        x: x_out,
                        y: y_out,
                        color: self.sample(lat, lon),
                    });
                }
            }
        }
    }

    #[inline]
    pub(crate) fn sample(&self, latitude: f64, longitude: f64) -> Rgba {
        let (x, y) = lat_lon_to_source(latitude, longitude, self.source.width(), self.source.height());
        self.source.pixel(x, y)
    }
}

/// Validate inputs and run the reprojection.
///
/// `center_latitude` and `center_longitude` are radians.
pub fn project(
    source: &SourceRaster,
    center_latitude: f64,
    center_longitude: f64,
    diameter: u32,
) -> ProjectionResult<OutputRaster> {
    let diameter = NonZeroU32::new(diameter).ok_or(ProjectionError::ZeroDiameter)?;
    let center = Center::new(center_latitude, center_longitude)?;
    Ok(Reprojector::new(source).project(center, diameter))
}
