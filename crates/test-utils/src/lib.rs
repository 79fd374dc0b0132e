//! Test support shared by the hamchart crates.
//!
//! - Synthetic equirectangular rasters whose pixels name their own position
//! - Well-known projection centers, diameters and source sizes
//! - Temporary directories, PNG fixtures and lookup of optional large assets
//!
//! Generators hand back raw RGBA8 buffers, not projection types, so every
//! crate can take this one as a dev-dependency.

pub mod fixtures;
pub mod generators;
pub mod paths;

pub use fixtures::*;
pub use generators::*;
pub use paths::*;

/// Resolve an optional asset, or return early from the calling test.
///
/// A real world map is too large to keep in the repository, so tests that
/// need one skip quietly when it is absent:
///
/// ```ignore
/// let path = test_utils::require_test_file!("world.png");
/// ```
#[macro_export]
macro_rules! require_test_file {
    ($name:expr) => {{
        match $crate::find_test_file($name) {
            Some(path) => path,
            None => {
                eprintln!(
                    "skipping: '{}' not found in {:?} (set TEST_DATA_DIR to add a location)",
                    $name,
                    $crate::search_dirs()
                );
                return;
            }
        }
    }};
}
