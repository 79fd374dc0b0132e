//! RGBA rasters consumed and produced by the reprojection kernel.

use thiserror::Error;

/// One RGBA8 sample.
pub type Rgba = [u8; 4];

/// Background value of a freshly allocated output raster.
pub const TRANSPARENT: Rgba = [0, 0, 0, 0];

/// Result type alias using ProjectionError.
pub type ProjectionResult<T> = Result<T, ProjectionError>;

/// Precondition violations detected before the kernel runs.
#[derive(Debug, Error, PartialEq)]
pub enum ProjectionError {
    #[error("Source raster must have non-zero dimensions, got {width}x{height}")]
    EmptySource { width: usize, height: usize },

    #[error("Pixel buffer holds {actual} bytes, expected {expected}")]
    PixelBufferMismatch { expected: usize, actual: usize },

    #[error("Output diameter must be at least 1 pixel")]
    ZeroDiameter,

    #[error("Center coordinates must be finite, got ({latitude}, {longitude})")]
    NonFiniteCenter { latitude: f64, longitude: f64 },
}

/// Equirectangular world raster.
///
/// Column 0 is longitude -π and row 0 is latitude +π/2. The raster is
/// read-only once built and can be shared between threads.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRaster {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl SourceRaster {
    /// Wrap an RGBA8 buffer (4 bytes per pixel, row-major).
    pub fn new(width: usize, height: usize, pixels: Vec<u8>) -> ProjectionResult<Self> {
        if width == 0 || height == 0 {
            return Err(ProjectionError::EmptySource { width, height });
        }
        let expected = width * height * 4;
        if pixels.len() != expected {
            return Err(ProjectionError::PixelBufferMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build a raster by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(
        width: usize,
        height: usize,
        mut f: impl FnMut(usize, usize) -> Rgba,
    ) -> ProjectionResult<Self> {
        let mut pixels = Vec::with_capacity(width * height * 4);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&f(x, y));
            }
        }
        Self::new(width, height, pixels)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Sample at integer coordinates. Panics if out of bounds.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Rgba {
        let i = (y * self.width + x) * 4;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }
}

/// Square RGBA output of one reprojection call, transparent until written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRaster {
    side: usize,
    pixels: Vec<u8>,
}

impl OutputRaster {
    pub fn new(side: usize) -> Self {
        Self {
            side,
            pixels: vec![0u8; side * side * 4],
        }
    }

    /// Width and height in pixels.
    pub fn side(&self) -> usize {
        self.side
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Rgba {
        let i = (y * self.side + x) * 4;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, color: Rgba) {
        let i = (y * self.side + x) * 4;
        self.pixels[i..i + 4].copy_from_slice(&color);
    }

    /// True if the pixel was never written.
    pub fn is_background(&self, x: usize, y: usize) -> bool {
        self.pixel(x, y) == TRANSPARENT
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.pixels
    }
}
