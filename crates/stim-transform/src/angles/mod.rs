//! Constrained-random rotation angles.
//!
//! [`AngleSpec`] describes one batch: how many angles, over which domain,
//! and how far apart. [`distinct_angles`] draws a shuffled batch and
//! [`AngleQueue`] hands batches out one angle at a time.
//!
//! # Separation
//!
//! The domain `[minimum, maximum)` is split into `count` sub-ranges of width
//! `span`. Sub-range `i` draws from `[lower, minimum + span * (i + 1))`,
//! where `lower` starts at `minimum` and is advanced after every draw to
//! `max(lower + span, value + min_gap)`. Consecutive values in draw order
//! are therefore at least `min_gap` apart and strictly increasing.
//!
//! Separation is linear, not circular: the first and last values of a
//! batch may sit closer than `min_gap` across the wrap point.

mod queue;

pub use queue::AngleQueue;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::api::ConfigError;

/// Parameters of one angle batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleSpec {
    count: usize,
    minimum: f32,
    maximum: f32,
    min_gap: f32,
}

impl Default for AngleSpec {
    /// Four angles over `[0, 360)`, at least 30° apart.
    fn default() -> Self {
        Self {
            count: 4,
            minimum: 0.0,
            maximum: 360.0,
            min_gap: 30.0,
        }
    }
}

impl AngleSpec {
    /// # Errors
    ///
    /// - [`ConfigError::EmptyAngleCount`] if `count` is zero
    /// - [`ConfigError::EmptyAngleDomain`] unless `minimum < maximum`
    /// - [`ConfigError::NegativeGap`] if `min_gap` is negative or NaN
    /// - [`ConfigError::ImpossibleSeparation`] if
    ///   `min_gap * count > maximum - minimum`
    ///
    /// ```
    /// use stim_transform::{AngleSpec, ConfigError};
    ///
    /// assert!(AngleSpec::new(4, 0.0, 360.0, 90.0).is_ok());
    /// assert!(matches!(
    ///     AngleSpec::new(4, 0.0, 360.0, 91.0),
    ///     Err(ConfigError::ImpossibleSeparation { .. })
    /// ));
    /// ```
    pub fn new(count: usize, minimum: f32, maximum: f32, min_gap: f32) -> Result<Self, ConfigError> {
        if count == 0 {
            return Err(ConfigError::EmptyAngleCount);
        }
        if !(minimum < maximum) || !minimum.is_finite() || !maximum.is_finite() {
            return Err(ConfigError::EmptyAngleDomain { minimum, maximum });
        }
        if !(min_gap >= 0.0) {
            return Err(ConfigError::NegativeGap(min_gap));
        }
        let range = maximum - minimum;
        if min_gap * count as f32 > range {
            return Err(ConfigError::ImpossibleSeparation {
                count,
                min_gap,
                range,
            });
        }
        Ok(Self {
            count,
            minimum,
            maximum,
            min_gap,
        })
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn minimum(&self) -> f32 {
        self.minimum
    }

    pub fn maximum(&self) -> f32 {
        self.maximum
    }

    pub fn min_gap(&self) -> f32 {
        self.min_gap
    }

    /// Width of each sub-range.
    pub fn span(&self) -> f32 {
        (self.maximum - self.minimum) / self.count as f32
    }

    /// Draw one batch in construction order (strictly increasing).
    pub fn draw_ordered<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<f32> {
        let span = self.span();
        let mut lower = self.minimum;
        let mut values = Vec::with_capacity(self.count);

        for i in 0..self.count {
            let upper = if i + 1 == self.count {
                self.maximum
            } else {
                self.minimum + span * (i + 1) as f32
            };
            let value = if lower < upper {
                rng.gen_range(lower..upper)
            } else {
                lower
            };
            values.push(value);
            lower = (lower + span).max(value + self.min_gap);
        }
        values
    }
}

/// Draw one batch and shuffle its consumption order.
pub fn distinct_angles<R: Rng + ?Sized>(spec: &AngleSpec, rng: &mut R) -> Vec<f32> {
    let mut values = spec.draw_ordered(rng);
    values.shuffle(rng);
    values
}
