//! Common test fixtures for projection tests.
//!
//! Centers are given in degrees, matching what users type; convert with
//! `to_radians()` before handing them to the kernel.

/// Named chart centers as (latitude, longitude) in degrees.
pub mod centers {
    /// Intersection of the equator and the prime meridian
    pub const NULL_ISLAND: (f64, f64) = (0.0, 0.0);

    /// Mid-latitude northern hemisphere station
    pub const SANTIAGO_DE_COMPOSTELA: (f64, f64) = (42.8782, -8.5448);

    /// Southern hemisphere, east of Greenwich
    pub const SYDNEY: (f64, f64) = (-33.8688, 151.2093);

    /// Just west of the antimeridian
    pub const DATE_LINE_WEST: (f64, f64) = (10.0, 179.999);

    /// Just east of the antimeridian
    pub const DATE_LINE_EAST: (f64, f64) = (10.0, -179.999);

    /// Geographic north pole
    pub const NORTH_POLE: (f64, f64) = (90.0, 0.0);

    /// Geographic south pole
    pub const SOUTH_POLE: (f64, f64) = (-90.0, 0.0);

    /// A representative set for sweeping tests.
    pub const ALL: [(f64, f64); 7] = [
        NULL_ISLAND,
        SANTIAGO_DE_COMPOSTELA,
        SYDNEY,
        DATE_LINE_WEST,
        DATE_LINE_EAST,
        NORTH_POLE,
        SOUTH_POLE,
    ];
}

/// Output diameters worth exercising.
pub mod diameters {
    /// One pixel: only the center sample
    pub const SINGLE: u32 = 1;

    /// Smallest even circle with every pixel covered
    pub const TINY_EVEN: u32 = 4;

    /// Smallest odd circle with a true center pixel and mirrored partners
    pub const TINY_ODD: u32 = 5;

    /// Small enough to run on the calling thread
    pub const SMALL: u32 = 64;

    /// Large enough to take the parallel path
    pub const PARALLEL: u32 = 300;
}

/// Common source raster sizes as (width, height).
pub mod sources {
    /// The 8-cell raster used for exact pixel assertions
    pub const EIGHT_CELLS: (usize, usize) = (4, 2);

    /// One pixel per degree
    pub const ONE_DEGREE: (usize, usize) = (360, 180);

    /// Odd dimensions to catch off-by-one indexing
    pub const ODD: (usize, usize) = (97, 51);
}
