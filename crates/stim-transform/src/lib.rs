#![allow(
    clippy::excessive_precision,
    clippy::needless_range_loop,
    clippy::manual_range_contains
)]

//! stim-transform: controlled image transformations for vision-science stimuli
//!
//! This library implements the two numerical transformations used to build
//! matched stimulus sets:
//!
//! - **Diffeomorphic scrambling**: a smooth random displacement field is
//!   applied repeatedly to an image, destroying object shape while keeping
//!   local texture continuous.
//! - **Chrominance rotation**: the two opponent color channels of a
//!   perceptually uniform space are rotated around the lightness axis,
//!   changing hue without touching lightness. A 180° inversion of a rotated
//!   target yields its foil.
//!
//! The crate performs no file I/O and owns no global state. Every random
//! draw comes from an RNG passed in by the caller, so results are
//! reproducible for a fixed seed.
//!
//! # Quick Start
//!
//! ```
//! use rand::{rngs::StdRng, SeedableRng};
//! use stim_transform::{ChromaRotator, ChromaSpace, Raster, ScrambleOptions, Scrambler};
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let source = Raster::filled(40, 20, [200, 40, 40]);
//!
//! let scrambler = Scrambler::new(
//!     ScrambleOptions::new().canvas_size(64).steps(4).max_distortion(6.0),
//! )
//! .unwrap();
//! let scrambled = scrambler.scramble(&source, &mut rng);
//! assert_eq!((scrambled.width(), scrambled.height()), (64, 64));
//!
//! let rotator = ChromaRotator::new(ChromaSpace::CieLab);
//! let target = rotator.rotate(&scrambled, 90.0);
//! let foil = rotator.invert(&target);
//! assert_eq!(foil.width(), 64);
//! ```
//!
//! # Pipeline Overview
//!
//! ```text
//! Raster (8-bit sRGB, any size)
//!     |
//!     v
//! fit_to_canvas            (area resample into fit_fraction * canvas,
//!     |                     paste centered on background)
//!     v
//! DisplacementField        (one field per image: 6x6 cosine basis,
//!     |                     zero mean, unit RMS, / steps)
//!     v
//! ╔═════════════════════════════════════════╗
//! ║  for step in 0..steps                   ║
//! ║    out(x, y) = bilinear(in, x+dx, y+dy) ║
//! ║    reflect border, 8-bit requantize     ║
//! ╚═════════════════════════════════════════╝
//!     |
//!     v
//! Raster (canvas x canvas) -----> file system handoff
//!
//! Raster
//!     |
//!     v
//! Image<Srgb> -> Image<LinearRgb> -> Image<CieLab | Oklab>
//!     |
//!     v
//! (a, b) <- R(theta) * (a, b)       L untouched
//!     |
//!     v
//! Image<Srgb> -> clip [0, 1] -> Raster
//! ```
//!
//! # Angle Allocation
//!
//! [`AngleSpec`] partitions a circular domain into `count` sub-ranges and
//! draws one value per sub-range, pushing each lower bound past the previous
//! value plus `min_gap`. The values are shuffled before use. [`AngleQueue`]
//! hands them out one at a time and refills when empty.

pub mod angles;
pub mod api;
pub mod chroma;
pub mod color;
pub mod image;
pub mod warp;

#[cfg(test)]
mod domain_tests;

pub use angles::{distinct_angles, AngleQueue, AngleSpec};
pub use api::{ConfigError, DataError, ParseColorError, TransformError};
pub use chroma::{invert_chroma, rotate_chroma, ChromaOp, ChromaRotator};
pub use color::{
    ChromaSpace, CieLab, ColorSpace, LinearRgb, Oklab, Srgb, UnknownChromaSpace,
};
pub use image::{Image, Raster};
pub use warp::{
    remap_reflect, resize_area, DisplacementField, ScrambleOptions, Scrambler, WarpParams,
};
