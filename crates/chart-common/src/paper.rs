//! Paper sizes and the print layout that fixes the chart diameter.
//!
//! The chart is printed as a circle centered on a portrait page. The circle
//! fills the content width minus a ring reserved for bearing labels, so the
//! projected raster diameter depends only on paper width and resolution.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Default print resolution.
pub const DEFAULT_DPI: u32 = 300;

/// Page margin on every side, in inches.
pub const PAGE_MARGIN_INCHES: f64 = 0.25;

/// Gap between the chart circle and the outer label ring, in points.
pub const LABEL_RING_POINTS: f64 = 8.0;

const MM_PER_INCH: f64 = 25.4;

/// Supported paper sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperSize {
    #[default]
    A4,
    Letter,
    A3,
}

impl PaperSize {
    /// Page width and height in inches (portrait).
    pub fn dimensions_inches(&self) -> (f64, f64) {
        match self {
            PaperSize::A4 => (210.0 / MM_PER_INCH, 297.0 / MM_PER_INCH),
            PaperSize::Letter => (8.5, 11.0),
            PaperSize::A3 => (297.0 / MM_PER_INCH, 420.0 / MM_PER_INCH),
        }
    }

    /// A4 for metric users, Letter otherwise.
    pub fn default_for(metric: bool) -> Self {
        if metric {
            PaperSize::A4
        } else {
            PaperSize::Letter
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaperSize::A4 => "a4",
            PaperSize::Letter => "letter",
            PaperSize::A3 => "a3",
        }
    }
}

impl fmt::Display for PaperSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaperSize {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "a4" => Ok(PaperSize::A4),
            "letter" => Ok(PaperSize::Letter),
            "a3" => Ok(PaperSize::A3),
            other => Err(ChartError::UnsupportedPaperSize(other.to_string())),
        }
    }
}

/// Physical print parameters that determine the projected raster size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintLayout {
    pub paper: PaperSize,
    pub dots_per_inch: u32,
}

impl PrintLayout {
    pub fn new(paper: PaperSize, dots_per_inch: u32) -> ChartResult<Self> {
        if dots_per_inch == 0 {
            return Err(ChartError::invalid_parameter(
                "dpi",
                "resolution must be at least 1 dot per inch",
            ));
        }
        Ok(Self {
            paper,
            dots_per_inch,
        })
    }

    /// Width available between the page margins.
    pub fn content_width_inches(&self) -> f64 {
        self.paper.dimensions_inches().0 - 2.0 * PAGE_MARGIN_INCHES
    }

    /// Radius of the projected circle on paper.
    pub fn chart_radius_inches(&self) -> f64 {
        self.content_width_inches() / 2.0 - LABEL_RING_POINTS / 72.0
    }

    /// Diameter of the projected raster in pixels (truncated).
    pub fn chart_diameter_px(&self) -> u32 {
        (f64::from(self.dots_per_inch) * 2.0 * self.chart_radius_inches()) as u32
    }
}

impl Default for PrintLayout {
    fn default() -> Self {
        Self {
            paper: PaperSize::default(),
            dots_per_inch: DEFAULT_DPI,
        }
    }
}
