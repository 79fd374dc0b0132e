//! Synthetic equirectangular rasters.
//!
//! All generators return RGBA8 buffers in row-major order, fully opaque, so
//! any projected pixel can be told apart from the transparent background.

/// Color that uniquely identifies source pixel `(x, y)`.
///
/// Distinct for every pixel of rasters up to 4096x4096.
///
/// # Example
///
/// ```
/// use test_utils::indexed_color;
///
/// assert_eq!(indexed_color(2, 1), [2, 1, 0, 255]);
/// assert_ne!(indexed_color(256, 0), indexed_color(0, 0));
/// ```
pub fn indexed_color(x: usize, y: usize) -> [u8; 4] {
    [
        (x % 256) as u8,
        (y % 256) as u8,
        ((x / 256) % 16 + ((y / 256) % 16) * 16) as u8,
        255,
    ]
}

/// Raster where every pixel carries its own coordinates (see [`indexed_color`]).
pub fn indexed_pixels(width: usize, height: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        for x in 0..width {
            data.extend_from_slice(&indexed_color(x, y));
        }
    }
    data
}

/// Raster symmetric under longitude negation.
///
/// Column `x` and column `width - 1 - x` share a color. Colors change every
/// `band` columns (measured from the nearer edge) and every `band` rows.
pub fn mirrored_pixels(width: usize, height: usize, band: usize) -> Vec<u8> {
    let band = band.max(1);
    let mut data = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        for x in 0..width {
            let from_edge = x.min(width - 1 - x);
            let column_band = (from_edge / band) as u8;
            let row_band = (y / band) as u8;
            data.extend_from_slice(&[
                column_band.wrapping_mul(37),
                row_band.wrapping_mul(53),
                column_band ^ row_band,
                255,
            ]);
        }
    }
    data
}

/// Raster of vertical stripes `band` columns wide.
pub fn striped_pixels(width: usize, height: usize, band: usize) -> Vec<u8> {
    let band = band.max(1);
    let mut data = Vec::with_capacity(width * height * 4);
    for _ in 0..height {
        for x in 0..width {
            let stripe = (x / band) as u8;
            data.extend_from_slice(&[stripe.wrapping_mul(29), 128, 255 - stripe, 255]);
        }
    }
    data
}

/// Single opaque color everywhere.
pub fn solid_pixels(width: usize, height: usize, color: [u8; 4]) -> Vec<u8> {
    color
        .iter()
        .copied()
        .cycle()
        .take(width * height * 4)
        .collect()
}
