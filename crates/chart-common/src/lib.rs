//! Common types and utilities shared across the hamchart crates.

pub mod coords;
pub mod error;
pub mod paper;

pub use coords::{maidenhead_to_point, parse_latitude, parse_longitude, GeoPoint};
pub use error::{ChartError, ChartResult};
pub use paper::{PaperSize, PrintLayout, DEFAULT_DPI};
