//! Diffeomorphic scrambling.
//!
//! The pipeline for one image:
//!
//! 1. **Fit** ([`Scrambler::fit_to_canvas`]): area-resample the source so
//!    its longer side fills `fit_fraction` of the canvas, paste it centered
//!    on the background color. The margin gives warped content room to move.
//! 2. **Field** ([`DisplacementField::synthesize`]): one smooth random field
//!    per image, zero mean, unit RMS, scaled to `max_distortion / steps`.
//! 3. **Warp** ([`remap_reflect`]): resample `steps` times through the *same*
//!    field. Reusing the field is what makes the result a smooth,
//!    topology-preserving flow instead of accumulated noise.
//!
//! # Example
//!
//! ```
//! use rand::{rngs::StdRng, SeedableRng};
//! use stim_transform::{Raster, ScrambleOptions, Scrambler};
//!
//! let scrambler = Scrambler::new(ScrambleOptions::new().canvas_size(32).steps(3)).unwrap();
//! let source = Raster::filled(10, 30, [0, 0, 0]);
//!
//! let a = scrambler.scramble(&source, &mut StdRng::seed_from_u64(1));
//! let b = scrambler.scramble(&source, &mut StdRng::seed_from_u64(1));
//! assert_eq!(a, b);
//! ```

mod field;
mod options;
mod resample;
mod resize;
mod scramble;

pub use field::{DisplacementField, WarpParams, BASIS_COMPONENTS};
pub use options::ScrambleOptions;
pub use resample::{reflect_index, remap_reflect};
pub use resize::resize_area;
pub use scramble::Scrambler;
