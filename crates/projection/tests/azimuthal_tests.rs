//! Tests for the azimuthal equidistant reprojection kernel.
//!
//! Covers exact pixel placement on tiny rasters, the center and coverage
//! guarantees, octant symmetry, longitude wraparound, and agreement between
//! the wedge kernel, its parallel driver, and the per-pixel reference.

use std::f64::consts::PI;
use std::num::NonZeroU32;
use std::sync::Arc;

use projection::{
    lat_lon_to_source, project, project_per_pixel, Center, OutputRaster, ProjectionError,
    Reprojector, SourceRaster,
};
use test_utils::{centers, diameters, indexed_color, indexed_pixels, mirrored_pixels, sources, striped_pixels};

// ============================================================================
// Helper functions
// ============================================================================

fn indexed_source(width: usize, height: usize) -> SourceRaster {
    SourceRaster::new(width, height, indexed_pixels(width, height)).unwrap()
}

fn radians((lat, lon): (f64, f64)) -> (f64, f64) {
    (lat.to_radians(), lon.to_radians())
}

fn nz(d: u32) -> NonZeroU32 {
    NonZeroU32::new(d).unwrap()
}

/// Distance of pixel `(px, py)`'s center from the output center, in pixels.
fn pixel_distance(px: usize, py: usize, diameter: u32) -> f64 {
    let c = diameter as f64 / 2.0;
    let dx = px as f64 + 0.5 - c;
    let dy = py as f64 + 0.5 - c;
    (dx * dx + dy * dy).sqrt()
}

/// Fraction of pixels identical between two equally sized outputs.
fn agreement(a: &OutputRaster, b: &OutputRaster) -> f64 {
    let side = a.side();
    let same = (0..side)
        .flat_map(|y| (0..side).map(move |x| (x, y)))
        .filter(|&(x, y)| a.pixel(x, y) == b.pixel(x, y))
        .count();
    same as f64 / (side * side) as f64
}

/// Assert every pixel of `out` equals the source cell given in `expected`.
fn assert_cells(out: &OutputRaster, expected: &[&[Option<(usize, usize)>]]) {
    for (y, row) in expected.iter().enumerate() {
        for (x, cell) in row.iter().enumerate() {
            match cell {
                Some((sx, sy)) => assert_eq!(
                    out.pixel(x, y),
                    indexed_color(*sx, *sy),
                    "pixel ({}, {}) should sample source ({}, {})",
                    x,
                    y,
                    sx,
                    sy
                ),
                None => assert!(out.is_background(x, y), "pixel ({}, {}) should be background", x, y),
            }
        }
    }
}

// ============================================================================
// Exact pixel placement
// ============================================================================

#[test]
fn test_eight_cell_source_diameter_four() {
    let (w, h) = sources::EIGHT_CELLS;
    let source = indexed_source(w, h);
    let out = project(&source, 0.0, 0.0, diameters::TINY_EVEN).unwrap();

    assert_eq!(out.side(), 4);
    // Sub-point of (0, 0) is source cell (2, 1)
    assert_eq!(lat_lon_to_source(0.0, 0.0, w, h), (2, 1));

    let s = Some;
    assert_cells(
        &out,
        &[
            &[s((3, 1)), s((0, 0)), s((3, 0)), s((0, 1))],
            &[s((0, 0)), s((1, 0)), s((2, 0)), s((3, 0))],
            &[s((0, 1)), s((1, 1)), s((2, 1)), s((3, 1))],
            &[s((3, 0)), s((0, 1)), s((3, 1)), s((0, 0))],
        ],
    );
}

#[test]
fn test_eight_cell_source_cardinal_directions() {
    let source = indexed_source(4, 2);
    let out = project(&source, 0.0, 0.0, 4).unwrap();

    // Just north of center stays in the northern row, south in the southern
    assert_eq!(out.pixel(1, 1)[1], 0);
    assert_eq!(out.pixel(2, 1)[1], 0);
    assert_eq!(out.pixel(1, 2)[1], 1);
    assert_eq!(out.pixel(2, 2)[1], 1);
    // West of center samples western columns, east samples eastern ones
    assert_eq!(out.pixel(0, 1), indexed_color(0, 0));
    assert_eq!(out.pixel(3, 2), indexed_color(3, 1));
}

#[test]
fn test_eight_cell_source_diameter_five() {
    let source = indexed_source(4, 2);
    let out = project(&source, 0.0, 0.0, diameters::TINY_ODD).unwrap();

    let s = Some;
    assert_cells(
        &out,
        &[
            &[s((3, 1)), s((0, 0)), s((0, 0)), s((3, 0)), s((0, 1))],
            &[s((0, 0)), s((0, 0)), s((2, 0)), s((3, 0)), s((3, 0))],
            &[s((0, 1)), s((1, 1)), s((2, 1)), s((2, 1)), s((3, 1))],
            &[s((0, 1)), s((0, 1)), s((2, 1)), s((3, 1)), s((3, 1))],
            &[s((3, 0)), s((0, 1)), s((0, 1)), s((3, 1)), s((0, 0))],
        ],
    );
}

#[test]
fn test_eight_cell_source_diameter_eight_corners_background() {
    let source = indexed_source(4, 2);
    let out = project(&source, 0.0, 0.0, 8).unwrap();

    for (x, y) in [(0, 0), (7, 0), (0, 7), (7, 7)] {
        assert!(out.is_background(x, y), "corner ({}, {}) should be background", x, y);
    }
    assert_eq!(out.pixel(1, 0), indexed_color(3, 1));
    assert_eq!(out.pixel(3, 3), indexed_color(1, 0));
    assert_eq!(out.pixel(4, 4), indexed_color(2, 1));
}

#[test]
fn test_single_pixel_is_center_sample() {
    let source = indexed_source(8, 4);
    let out = project(&source, 0.0, 0.0, diameters::SINGLE).unwrap();
    assert_eq!(out.side(), 1);
    assert_eq!(out.pixel(0, 0), indexed_color(4, 2));
}

// ============================================================================
// Center invariance
// ============================================================================

#[test]
fn test_center_pixel_samples_center_point() {
    let (w, h) = sources::ONE_DEGREE;
    let source = indexed_source(w, h);
    let reprojector = Reprojector::new(&source);

    for &center in centers::ALL.iter() {
        let (lat, lon) = radians(center);
        for diameter in [1u32, 3, 5, 51, 101] {
            let out = reprojector.project(Center::new(lat, lon).unwrap(), nz(diameter));
            let mid = (diameter / 2) as usize;
            let (sx, sy) = lat_lon_to_source(lat, lon, w, h);
            assert_eq!(
                out.pixel(mid, mid),
                indexed_color(sx, sy),
                "center {:?} diameter {}",
                center,
                diameter
            );
        }
    }
}

// ============================================================================
// Coverage
// ============================================================================

#[test]
fn test_coverage_inside_and_outside_circle() {
    let (w, h) = sources::ODD;
    let source = indexed_source(w, h);
    let margin = 0.5f64.sqrt();

    for &center in centers::ALL.iter() {
        let (lat, lon) = radians(center);
        for diameter in [2u32, 7, 40, 65] {
            let out = project(&source, lat, lon, diameter).unwrap();
            let radius = diameter as f64 / 2.0;
            for py in 0..diameter as usize {
                for px in 0..diameter as usize {
                    let d = pixel_distance(px, py, diameter);
                    if d < radius {
                        assert!(
                            !out.is_background(px, py),
                            "({}, {}) inside radius left empty for {:?} d={}",
                            px,
                            py,
                            center,
                            diameter
                        );
                    } else if d > radius + margin + 1e-9 {
                        assert!(
                            out.is_background(px, py),
                            "({}, {}) outside circle was written for {:?} d={}",
                            px,
                            py,
                            center,
                            diameter
                        );
                    }
                }
            }
        }
    }
}

// ============================================================================
// Symmetry
// ============================================================================

#[test]
fn test_equator_center_mirror_symmetric() {
    let (w, h) = sources::ONE_DEGREE;
    let source = SourceRaster::new(w, h, mirrored_pixels(w, h, 15)).unwrap();

    for diameter in [diameters::SMALL, 100] {
        let out = project(&source, 0.0, 0.0, diameter).unwrap();
        let side = out.side();
        let mut mismatches = 0;
        for y in 0..side {
            for x in 0..side / 2 {
                if out.pixel(x, y) != out.pixel(side - 1 - x, y) {
                    mismatches += 1;
                }
            }
        }
        assert_eq!(mismatches, 0, "diameter {} is not left-right symmetric", diameter);
    }
}

#[test]
fn test_wedge_kernel_matches_per_pixel_reference() {
    let (w, h) = sources::ODD;
    let source = indexed_source(w, h);
    let reprojector = Reprojector::new(&source);

    for &center in centers::ALL.iter() {
        let (lat, lon) = radians(center);
        let center = Center::new(lat, lon).unwrap();
        for diameter in [2u32, 4, 10, 64, 128] {
            let fast = reprojector.project(center, nz(diameter));
            let slow = project_per_pixel(&source, center, nz(diameter));
            assert_eq!(fast, slow, "center {:?} diameter {}", center, diameter);
        }
    }
}

#[test]
fn test_parallel_path_matches_reference() {
    let (w, h) = sources::ONE_DEGREE;
    let source = indexed_source(w, h);
    let (lat, lon) = radians(centers::SANTIAGO_DE_COMPOSTELA);
    let center = Center::new(lat, lon).unwrap();

    let fast = Reprojector::new(&source).project(center, nz(diameters::PARALLEL));
    let slow = project_per_pixel(&source, center, nz(diameters::PARALLEL));
    assert_eq!(fast, slow);
}

#[test]
fn test_odd_reference_agrees_almost_everywhere() {
    // Odd diameters put pixels on the axes, where the sign of zero can flip a
    // longitude between +π and -π; allow for a rare truncation difference
    let source = indexed_source(360, 180);
    let center = Center::new(0.7, -1.2).unwrap();
    let fast = Reprojector::new(&source).project(center, nz(101));
    let slow = project_per_pixel(&source, center, nz(101));
    assert!(agreement(&fast, &slow) > 0.99);
}

// ============================================================================
// Longitude wraparound
// ============================================================================

#[test]
fn test_date_line_seam_is_continuous() {
    let (w, h) = sources::ONE_DEGREE;
    let source = SourceRaster::new(w, h, striped_pixels(w, h, 10)).unwrap();
    let eps = 1e-9;

    let west = project(&source, 0.2, PI - eps, 120).unwrap();
    let east = project(&source, 0.2, -PI + eps, 120).unwrap();
    assert!(
        agreement(&west, &east) > 0.98,
        "views either side of the date line should be nearly identical"
    );

    // Center samples land on the last and first columns respectively
    assert_eq!(lat_lon_to_source(0.2, PI - eps, w, h).0, w - 1);
    assert_eq!(lat_lon_to_source(0.2, -PI + eps, w, h).0, 0);
}

#[test]
fn test_out_of_range_longitude_wraps() {
    let source = indexed_source(360, 180);
    let base = project(&source, 0.4, 0.3, 80).unwrap();
    let shifted = project(&source, 0.4, 0.3 + 10.0 * PI, 80).unwrap();
    let negative = project(&source, 0.4, 0.3 - 6.0 * PI, 80).unwrap();
    assert!(agreement(&base, &shifted) > 0.99);
    assert!(agreement(&base, &negative) > 0.99);
}

#[test]
fn test_extreme_center_terminates() {
    let source = indexed_source(36, 18);
    let out = project(&source, 123.0, 1e12, 33).unwrap();
    assert_eq!(out.side(), 33);
    assert!(!out.is_background(16, 16));
}

// ============================================================================
// Determinism and concurrency
// ============================================================================

#[test]
fn test_deterministic_output() {
    let source = indexed_source(97, 51);
    let a = project(&source, -0.5, 2.0, 257).unwrap();
    let b = project(&source, -0.5, 2.0, 257).unwrap();
    assert_eq!(a.as_bytes(), b.as_bytes());
}

#[test]
fn test_shared_source_across_threads() {
    let source = Arc::new(indexed_source(360, 180));
    let expected = project(&source, 0.3, -0.3, 90).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let source = Arc::clone(&source);
            std::thread::spawn(move || project(&source, 0.3, -0.3, 90).unwrap())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

// ============================================================================
// Preconditions
// ============================================================================

#[test]
fn test_rejects_zero_diameter() {
    let source = indexed_source(4, 2);
    assert_eq!(project(&source, 0.0, 0.0, 0), Err(ProjectionError::ZeroDiameter));
}

#[test]
fn test_rejects_non_finite_center() {
    let source = indexed_source(4, 2);
    assert!(matches!(
        project(&source, f64::NAN, 0.0, 4),
        Err(ProjectionError::NonFiniteCenter { .. })
    ));
    assert!(matches!(
        project(&source, 0.0, f64::NEG_INFINITY, 4),
        Err(ProjectionError::NonFiniteCenter { .. })
    ));
}
