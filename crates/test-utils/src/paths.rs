//! Filesystem helpers: asset lookup, scratch directories, PNG fixtures.

use std::path::{Path, PathBuf};

/// Directory holding the workspace `Cargo.toml`.
pub fn workspace_root() -> PathBuf {
    // crates/test-utils -> crates -> root
    let manifest = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest
        .ancestors()
        .nth(2)
        .unwrap_or(manifest)
        .to_path_buf()
}

/// Where optional assets are looked for, in priority order.
///
/// `TEST_DATA_DIR` comes first when set, then `testdata` and `assets` at the
/// workspace root.
pub fn search_dirs() -> Vec<PathBuf> {
    let root = workspace_root();
    std::env::var_os("TEST_DATA_DIR")
        .map(PathBuf::from)
        .into_iter()
        .chain([root.join("testdata"), root.join("assets")])
        .collect()
}

/// First existing `name` among [`search_dirs`].
pub fn find_test_file(name: &str) -> Option<PathBuf> {
    search_dirs()
        .into_iter()
        .map(|dir| dir.join(name))
        .find(|path| path.is_file())
}

/// Scratch directory removed when the handle drops.
pub fn temp_test_dir() -> tempfile::TempDir {
    tempfile::Builder::new()
        .prefix("hamchart_test_")
        .tempdir()
        .expect("Failed to create temporary test directory")
}

/// Save an RGBA8 buffer as `dir/name` and return the path.
pub fn write_png_fixture(
    dir: &Path,
    name: &str,
    width: usize,
    height: usize,
    pixels: Vec<u8>,
) -> PathBuf {
    let path = dir.join(name);
    image::RgbaImage::from_raw(width as u32, height as u32, pixels)
        .expect("pixel buffer does not match dimensions")
        .save(&path)
        .expect("Failed to write PNG fixture");
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::indexed_pixels;

    #[test]
    fn test_workspace_root_has_manifest() {
        let root = workspace_root();
        assert!(root.join("Cargo.toml").is_file(), "no Cargo.toml in {:?}", root);
        assert!(root.join("crates").join("test-utils").is_dir());
    }

    #[test]
    fn test_search_dirs_are_workspace_level() {
        let root = workspace_root();
        let dirs = search_dirs();
        assert!(dirs.len() >= 2);
        assert_eq!(&dirs[dirs.len() - 2..], &[root.join("testdata"), root.join("assets")]);
    }

    #[test]
    fn test_write_png_fixture_decodes() {
        let dir = temp_test_dir();
        let path = write_png_fixture(dir.path(), "cells.png", 4, 2, indexed_pixels(4, 2));
        let image = image::open(&path).unwrap().into_rgba8();
        assert_eq!(image.dimensions(), (4, 2));
        assert_eq!(image.into_raw(), indexed_pixels(4, 2));
    }
}
