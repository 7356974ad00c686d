//! Chrominance rotation in a luminance/chrominance space.
//!
//! Every pixel's `(a, b)` pair is rotated around the lightness axis:
//!
//! ```text
//! | a' |   | cos θ  -sin θ | | a |
//! | b' | = | sin θ   cos θ | | b |
//! ```
//!
//! `L` is never read or written. Inversion is the 180° case, done as a
//! direct negation.
//!
//! [`rotate_chroma`] and [`invert_chroma`] work on an [`Image`] already in
//! CIELAB or Oklab. [`ChromaRotator`] wraps the full 8-bit round trip.

mod rotator;

pub use rotator::{ChromaOp, ChromaRotator};

use crate::api::DataError;
use crate::color::ColorSpace;
use crate::image::Image;

fn check_chroma_space(image: &Image) -> Result<(), DataError> {
    match image.space() {
        ColorSpace::CieLab | ColorSpace::Oklab => Ok(()),
        actual => Err(DataError::WrongColorSpace {
            expected: ColorSpace::CieLab,
            actual,
        }),
    }
}

/// Rotate the chrominance channels of `image` by `degrees`, in place.
///
/// # Errors
///
/// [`DataError::WrongColorSpace`] unless `image` is in CIELAB or Oklab.
pub fn rotate_chroma(image: &mut Image, degrees: f32) -> Result<(), DataError> {
    check_chroma_space(image)?;
    let (sin, cos) = (degrees as f64).to_radians().sin_cos();
    let (sin, cos) = (sin as f32, cos as f32);
    for px in image.pixels_mut() {
        let [_, a, b] = *px;
        px[1] = cos * a - sin * b;
        px[2] = sin * a + cos * b;
    }
    Ok(())
}

/// Negate both chrominance channels of `image`, in place.
///
/// # Errors
///
/// [`DataError::WrongColorSpace`] unless `image` is in CIELAB or Oklab.
pub fn invert_chroma(image: &mut Image) -> Result<(), DataError> {
    check_chroma_space(image)?;
    for px in image.pixels_mut() {
        px[1] = -px[1];
        px[2] = -px[2];
    }
    Ok(())
}
