//! Raster containers.
//!
//! - [`Raster`]: 8-bit sRGB, three interleaved channels. The I/O and
//!   warping representation.
//! - [`Image`]: `f32` triples tagged with a [`ColorSpace`](crate::ColorSpace).
//!   The color-manipulation representation; conversions between spaces are
//!   pure functions that return a new buffer.

mod float_image;
mod raster;

pub use float_image::Image;
pub use raster::Raster;
