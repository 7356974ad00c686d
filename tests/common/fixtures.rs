//! Test fixtures: temporary directory trees and generated images.

use std::path::{Path, PathBuf};

use stim_transform::Raster;
use stimkit::models::{AppConfig, OutputFormat};
use stimkit::services::image_io::encode_raster;
use tempfile::TempDir;

/// Low-chroma colors that stay in gamut under any hue rotation.
pub const SWATCHES: [[u8; 3]; 4] = [
    [150, 120, 110],
    [110, 130, 120],
    [120, 125, 150],
    [140, 140, 115],
];

/// A temporary root with an `input` directory inside.
pub struct TestDirs {
    pub root: TempDir,
}

impl TestDirs {
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir(root.path().join("input")).expect("create input dir");
        Self { root }
    }

    pub fn input(&self) -> PathBuf {
        self.root.path().join("input")
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.root.path().join(name)
    }

    /// Write a solid-color PNG into the input directory.
    pub fn add_png(&self, name: &str, width: usize, height: usize, color: [u8; 3]) -> PathBuf {
        let path = self.input().join(name);
        write_png(&path, &Raster::filled(width, height, color));
        path
    }

    /// Write bytes that no decoder accepts.
    pub fn add_corrupt(&self, name: &str) -> PathBuf {
        let path = self.input().join(name);
        std::fs::write(&path, b"\x89PNG but not really").expect("write corrupt file");
        path
    }
}

pub fn write_png(path: &Path, raster: &Raster) {
    let bytes = encode_raster(raster, OutputFormat::Png, 95, path).expect("encode png");
    std::fs::write(path, bytes).expect("write png");
}

/// Defaults with lossless output, a small canvas and few steps.
pub fn fast_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.output.format = OutputFormat::Png;
    config.scramble.canvas_size = 48;
    config.scramble.steps = 4;
    config.seed = Some(1234);
    config
}
