use std::path::PathBuf;

use stim_transform::{DataError, ParseColorError, TransformError};
use thiserror::Error;

/// Problems with the configuration. Always fatal, reported before any
/// image is touched.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid background color {value:?}: {source}")]
    InvalidColor {
        value: String,
        #[source]
        source: ParseColorError,
    },

    #[error("JPEG quality must be in 1..=100, got {0}")]
    InvalidQuality(u8),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] TransformError),
}

impl From<stim_transform::ConfigError> for ConfigError {
    fn from(e: stim_transform::ConfigError) -> Self {
        ConfigError::Invalid(e.into())
    }
}

/// A failure tied to one file or directory. Per-image failures are logged
/// and recorded; the batch continues.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to encode {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unusable image data in {path}: {source}")]
    Transform {
        path: PathBuf,
        #[source]
        source: DataError,
    },
}

impl FileError {
    /// The file or directory the error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            FileError::Read { path, .. }
            | FileError::Decode { path, .. }
            | FileError::Encode { path, .. }
            | FileError::Write { path, .. }
            | FileError::Transform { path, .. } => path,
        }
    }
}
