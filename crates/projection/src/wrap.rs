//! Periodic normalization and the equirectangular lookup.

use std::f64::consts::PI;

/// Wrap `value` into `[0, period)`.
///
/// Closed form, so any finite input terminates in constant time. NaN stays NaN.
#[inline]
pub fn wrap(value: f64, period: f64) -> f64 {
    let wrapped = value.rem_euclid(period);
    // rem_euclid rounds tiny negative inputs up to `period` itself
    if wrapped >= period {
        wrapped - period
    } else {
        wrapped
    }
}

/// Map a latitude/longitude in radians to integer source pixel indices.
///
/// Longitude -π lands on column 0 and latitude +π/2 on row 0. Indices are
/// truncated, not rounded. Out-of-range angles wrap around; NaN maps to 0.
#[inline]
pub fn lat_lon_to_source(latitude: f64, longitude: f64, width: usize, height: usize) -> (usize, usize) {
    let x = (wrap(1.0 + longitude / PI, 2.0) * width as f64 / 2.0) as usize;
    let y = (wrap(1.0 - 2.0 * latitude / PI, 2.0) * height as f64 / 2.0) as usize;
    (x.min(width - 1), y.min(height - 1))
}
