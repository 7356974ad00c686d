//! Assertion helpers for tests.

use std::path::Path;

use pretty_assertions::assert_eq;

/// File names directly inside `dir`, sorted.
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap_or_else(|e| panic!("read {}: {e}", dir.display()))
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Assert `dir` holds exactly `expected` (any order).
pub fn assert_dir_files(dir: &Path, expected: &[&str]) {
    let mut expected: Vec<String> = expected.iter().map(|s| s.to_string()).collect();
    expected.sort();
    assert_eq!(
        file_names(dir),
        expected,
        "Unexpected contents of {}",
        dir.display()
    );
}

/// Assert the image at `path` decodes with the given dimensions.
pub fn assert_image_size(path: &Path, width: usize, height: usize) {
    let raster = stimkit::services::image_io::read_raster(path)
        .unwrap_or_else(|e| panic!("decode {}: {e}", path.display()));
    assert_eq!(
        (raster.width(), raster.height()),
        (width, height),
        "Unexpected size of {}",
        path.display()
    );
}
