//! Color types and conversion utilities
//!
//! Every color manipulation in this crate follows the same route:
//!
//! ```text
//! Srgb  <->  LinearRgb  <->  CieLab | Oklab
//! ```
//!
//! - [`Srgb`]: gamma-encoded values as stored in image files. Use for I/O.
//! - [`LinearRgb`]: linear light. Hub for all conversions.
//! - [`CieLab`], [`Oklab`]: lightness plus two opponent chrominance axes.
//!   Rotating `(a, b)` changes hue and leaves lightness alone.
//!
//! # Example
//!
//! ```
//! use stim_transform::{CieLab, LinearRgb, Srgb};
//!
//! let srgb = Srgb::from_u8(128, 64, 32);
//! let lab = CieLab::from(LinearRgb::from(srgb));
//! let back = Srgb::from(LinearRgb::from(lab)).to_bytes();
//! for (got, want) in back.iter().zip([128u8, 64, 32]) {
//!     assert!(got.abs_diff(want) <= 1);
//! }
//! ```

mod cielab;
mod linear_rgb;
mod oklab;
mod space;
mod srgb;

pub use cielab::CieLab;
pub use linear_rgb::LinearRgb;
pub use oklab::Oklab;
pub use space::{ChromaSpace, ColorSpace, UnknownChromaSpace};
pub use srgb::Srgb;
