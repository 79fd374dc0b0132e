//! Geographic center points and the textual forms users type them in.
//!
//! Coordinates arrive either as decimal degrees (`-33.5`), as
//! degree/minute/second text with a hemisphere letter (`33 30 S`,
//! `40°26'46"N`), or as a Maidenhead grid locator (`IN53`, `in53dj`).

use std::f64::consts::PI;
use std::fmt;

use crate::error::{ChartError, ChartResult};

/// A chart center in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a point, rejecting non-finite or out-of-range degrees.
    pub fn new(latitude: f64, longitude: f64) -> ChartResult<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(ChartError::InvalidCoordinate(format!(
                "latitude {} outside [-90, 90]",
                latitude
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(ChartError::InvalidCoordinate(format!(
                "longitude {} outside [-180, 180]",
                longitude
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude and longitude in radians.
    pub fn to_radians(&self) -> (f64, f64) {
        (self.latitude * PI / 180.0, self.longitude * PI / 180.0)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}",
            format_dms(self.latitude, 'N', 'S'),
            format_dms(self.longitude, 'E', 'W')
        )
    }
}

/// Format degrees as `40° 26' 46.0" N`.
///
/// Minutes are omitted when both minutes and seconds are negligible, and
/// seconds are omitted below a tenth of a second.
pub fn format_dms(degrees: f64, positive: char, negative: char) -> String {
    let (degrees, symbol) = if degrees < 0.0 {
        (-degrees, negative)
    } else {
        (degrees, positive)
    };
    let deg = degrees.trunc();
    let frac = (degrees - deg) * 60.0;
    let min = frac.trunc();
    let sec = (frac - min) * 60.0;

    let mut out = format!("{:.0}° ", deg);
    if min > 0.0 || sec >= 0.1 {
        out.push_str(&format!("{:.0}' ", min));
    }
    if sec >= 0.1 {
        out.push_str(&format!("{:.1}\" ", sec));
    }
    out.push(symbol);
    out
}

/// Parse a latitude in decimal or DMS form (`N`/`S`).
pub fn parse_latitude(text: &str) -> ChartResult<f64> {
    parse_coordinate(text, 'N', 'S', -90.0, 90.0)
}

/// Parse a longitude in decimal or DMS form (`E`/`W`).
pub fn parse_longitude(text: &str) -> ChartResult<f64> {
    parse_coordinate(text, 'E', 'W', -180.0, 180.0)
}

/// Parse a coordinate given as decimal degrees or degrees/minutes/seconds.
///
/// A hemisphere letter (either case) may appear anywhere and sets the sign.
/// The result is rounded to five decimal places.
pub fn parse_coordinate(
    text: &str,
    positive: char,
    negative: char,
    min: f64,
    max: f64,
) -> ChartResult<f64> {
    let invalid = |reason: &str| ChartError::InvalidCoordinate(format!("'{}': {}", text, reason));

    let (sign, rest) = match strip_hemisphere(text, positive) {
        Some(rest) => (1.0, rest),
        None => match strip_hemisphere(text, negative) {
            Some(rest) => (-1.0, rest),
            None => (0.0, text.to_string()),
        },
    };

    let numbers = rest
        .split(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-'))
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<f64>().map_err(|_| invalid("not a number")))
        .collect::<ChartResult<Vec<f64>>>()?;

    if numbers.is_empty() || numbers.len() > 3 {
        return Err(invalid("expected between one and three numbers"));
    }
    let last = numbers.len() - 1;
    if numbers[..last].iter().any(|n| n.fract() != 0.0) {
        return Err(invalid("only the last number may have decimals"));
    }
    if sign != 0.0 && numbers[0] < 0.0 {
        return Err(invalid("negative degrees with a hemisphere letter"));
    }
    if sign == 0.0 && numbers.len() > 1 {
        return Err(invalid("minutes and seconds need a hemisphere letter"));
    }
    if numbers[1..].iter().any(|n| !(0.0..60.0).contains(n)) {
        return Err(invalid("minutes and seconds must be in [0, 60)"));
    }

    let sign = if sign == 0.0 { 1.0 } else { sign };
    let minutes = numbers.get(1).copied().unwrap_or(0.0);
    let seconds = numbers.get(2).copied().unwrap_or(0.0);
    let coord = sign * (numbers[0] + minutes / 60.0 + seconds / 3600.0);
    if !coord.is_finite() || coord > max || coord < min {
        return Err(invalid(&format!("outside [{}, {}]", min, max)));
    }
    Ok((coord * 100_000.0).round() / 100_000.0)
}

/// Remove the first occurrence of a hemisphere letter, in either case.
fn strip_hemisphere(text: &str, letter: char) -> Option<String> {
    let index = text
        .char_indices()
        .find(|(_, c)| c.eq_ignore_ascii_case(&letter))
        .map(|(i, _)| i)?;
    let mut rest = String::with_capacity(text.len());
    rest.push_str(&text[..index]);
    rest.push_str(&text[index + letter.len_utf8()..]);
    Some(rest)
}

/// Decode a 4 or 6 character Maidenhead locator to the center of its square.
pub fn maidenhead_to_point(locator: &str) -> ChartResult<GeoPoint> {
    let locator = locator.trim().to_ascii_lowercase();
    let bytes = locator.as_bytes();
    let invalid = || ChartError::InvalidLocator(locator.clone());

    if bytes.len() != 4 && bytes.len() != 6 {
        return Err(invalid());
    }
    let field = |b: u8| (b'a'..=b'r').contains(&b);
    let square = |b: u8| b.is_ascii_digit();
    let subsquare = |b: u8| (b'a'..=b'x').contains(&b);
    if !field(bytes[0]) || !field(bytes[1]) || !square(bytes[2]) || !square(bytes[3]) {
        return Err(invalid());
    }
    if bytes.len() == 6 && (!subsquare(bytes[4]) || !subsquare(bytes[5])) {
        return Err(invalid());
    }

    let mut longitude = f64::from(bytes[0] - b'a') * 20.0 - 180.0;
    let mut latitude = f64::from(bytes[1] - b'a') * 10.0 - 90.0;
    longitude += f64::from(bytes[2] - b'0') * 2.0;
    latitude += f64::from(bytes[3] - b'0');
    let mut size = 1.0;
    if bytes.len() == 6 {
        longitude += f64::from(bytes[4] - b'a') / 12.0;
        latitude += f64::from(bytes[5] - b'a') / 24.0;
        size = 1.0 / 24.0;
    }

    GeoPoint::new(latitude + size / 2.0, longitude + size)
}
