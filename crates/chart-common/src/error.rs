//! Error types for hamchart crates.

use thiserror::Error;

/// Result type alias using ChartError.
pub type ChartResult<T> = Result<T, ChartError>;

/// Primary error type for chart generation.
#[derive(Debug, Error)]
pub enum ChartError {
    // === Input Errors ===
    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("Invalid Maidenhead locator: {0}")]
    InvalidLocator(String),

    #[error("Paper size not supported: {0}")]
    UnsupportedPaperSize(String),

    // === Raster Errors ===
    #[error("Invalid raster: {0}")]
    InvalidRaster(String),

    #[error("Failed to decode image: {0}")]
    ImageDecode(String),

    #[error("Encoding failed: {0}")]
    Encode(String),

    // === Infrastructure Errors ===
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ChartError {
    /// Process exit code for this error.
    ///
    /// Bad user input exits with 2 (usage), everything else with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            ChartError::InvalidParameter { .. }
            | ChartError::InvalidCoordinate(_)
            | ChartError::InvalidLocator(_)
            | ChartError::UnsupportedPaperSize(_)
            | ChartError::Config(_) => 2,

            _ => 1,
        }
    }

    /// Shorthand for an `InvalidParameter` error.
    pub fn invalid_parameter(param: impl Into<String>, message: impl Into<String>) -> Self {
        ChartError::InvalidParameter {
            param: param.into(),
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for ChartError {
    fn from(err: std::io::Error) -> Self {
        ChartError::Io(err.to_string())
    }
}
