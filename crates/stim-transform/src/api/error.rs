//! Unified error type for the stim-transform public API.

use std::num::ParseIntError;

use thiserror::Error;

use crate::color::ColorSpace;

/// Unified error type for the stim-transform public API.
///
/// Configuration errors are fatal and should be reported before any image
/// is processed. Data errors concern one image and leave the caller free to
/// skip it and continue.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    /// Invalid parameters (zero steps, impossible angle separation, ...)
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    /// Malformed image data (channel count, buffer length, color space)
    #[error("data error: {0}")]
    Data(#[from] DataError),
}

/// Invalid parameter combinations, detected before processing starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("step count must be at least 1")]
    ZeroSteps,

    #[error("image size must be at least 1 pixel")]
    ZeroImageSize,

    #[error("maximum distortion must be positive, got {0}")]
    NonPositiveDistortion(f32),

    #[error("fit fraction must be in (0, 1], got {0}")]
    InvalidFitFraction(f32),

    #[error("angle count must be at least 1")]
    EmptyAngleCount,

    #[error("angle domain is empty: maximum {maximum} <= minimum {minimum}")]
    EmptyAngleDomain { minimum: f32, maximum: f32 },

    #[error("minimum angle gap must not be negative, got {0}")]
    NegativeGap(f32),

    #[error(
        "cannot place {count} angles at least {min_gap} apart in a range of {range}"
    )]
    ImpossibleSeparation { count: usize, min_gap: f32, range: f32 },
}

/// Problems with the pixel data of a single image.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    #[error("unsupported channel count {0} (expected 3 or 4)")]
    UnsupportedChannels(usize),

    #[error("pixel buffer has {actual} bytes, expected {expected}")]
    BufferLength { expected: usize, actual: usize },

    #[error("image has zero width or height")]
    EmptyImage,

    #[error("expected image in {expected:?}, found {actual:?}")]
    WrongColorSpace {
        expected: ColorSpace,
        actual: ColorSpace,
    },

    #[error("displacement field is {field}x{field}, image is {width}x{height}")]
    FieldSize {
        field: usize,
        width: usize,
        height: usize,
    },
}

/// Error type for parsing hex color strings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseColorError {
    /// Hex string has invalid length (must be 3 or 6 characters after stripping '#')
    #[error("invalid hex color length (expected 3 or 6 characters)")]
    InvalidLength,
    /// Invalid hexadecimal character encountered
    #[error("invalid hex character: {0}")]
    InvalidHex(#[from] ParseIntError),
}
