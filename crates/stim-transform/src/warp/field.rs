//! Smooth random displacement fields from a truncated cosine basis.

use std::f64::consts::TAU;

use rand::Rng;

use crate::api::{ConfigError, DataError};

/// Frequencies per axis in the cosine basis (components `1..=6`).
pub const BASIS_COMPONENTS: usize = 6;

/// Validated inputs for field synthesis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WarpParams {
    image_size: usize,
    max_distortion: f32,
    steps: u32,
}

impl WarpParams {
    /// # Errors
    ///
    /// [`ConfigError::ZeroImageSize`], [`ConfigError::NonPositiveDistortion`]
    /// or [`ConfigError::ZeroSteps`] for the corresponding invalid input.
    pub fn new(image_size: usize, max_distortion: f32, steps: u32) -> Result<Self, ConfigError> {
        if image_size == 0 {
            return Err(ConfigError::ZeroImageSize);
        }
        if !(max_distortion > 0.0) || !max_distortion.is_finite() {
            return Err(ConfigError::NonPositiveDistortion(max_distortion));
        }
        if steps == 0 {
            return Err(ConfigError::ZeroSteps);
        }
        Ok(Self {
            image_size,
            max_distortion,
            steps,
        })
    }

    pub fn image_size(&self) -> usize {
        self.image_size
    }

    pub fn max_distortion(&self) -> f32 {
        self.max_distortion
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Per-step displacement amplitude: `max_distortion / steps`.
    pub fn step_scale(&self) -> f32 {
        self.max_distortion / self.steps as f32
    }
}

/// Per-pixel `(dx, dy)` offsets for one resampling step over a square grid.
///
/// Row-major, `size * size` entries per component. A pixel at `(x, y)` in
/// the output is read from `(x + dx, y + dy)` in the input.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplacementField {
    size: usize,
    dx: Vec<f32>,
    dy: Vec<f32>,
}

impl DisplacementField {
    /// Draw a new field and scale it to `max_distortion / steps`.
    ///
    /// Every call consumes fresh randomness; fields are never cached.
    pub fn synthesize<R: Rng + ?Sized>(params: &WarpParams, rng: &mut R) -> Self {
        Self::unit(params.image_size, rng).scaled(params.step_scale())
    }

    /// Draw a field with zero spatial mean and unit RMS per component.
    ///
    /// For each frequency pair `(xc, yc)` in `1..=6` x `1..=6` an amplitude
    /// and four phases are drawn uniformly from `[0, 2π)`:
    ///
    /// ```text
    /// dx += a * cos(2π·xc·x/N + φ0) * cos(2π·yc·y/N + φ1)
    /// dy += a * cos(2π·xc·x/N + φ2) * cos(2π·yc·y/N + φ3)
    /// ```
    ///
    /// A component that is constant after centering (only possible on
    /// degenerate grids such as `size == 1`) stays at zero.
    pub fn unit<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Self {
        let n = size as f64;
        let mut xn = vec![0.0f64; size * size];
        let mut yn = vec![0.0f64; size * size];

        let basis = |freq: usize, phase: f64| -> Vec<f64> {
            (0..size)
                .map(|i| (TAU * freq as f64 * i as f64 / n + phase).cos())
                .collect()
        };

        for xc in 1..=BASIS_COMPONENTS {
            for yc in 1..=BASIS_COMPONENTS {
                let amplitude = rng.gen::<f64>() * TAU;
                let phases: [f64; 4] = std::array::from_fn(|_| rng.gen::<f64>() * TAU);

                let x_of_dx = basis(xc, phases[0]);
                let y_of_dx = basis(yc, phases[1]);
                let x_of_dy = basis(xc, phases[2]);
                let y_of_dy = basis(yc, phases[3]);

                for y in 0..size {
                    let row = y * size;
                    let wx = amplitude * y_of_dx[y];
                    let wy = amplitude * y_of_dy[y];
                    for x in 0..size {
                        xn[row + x] += wx * x_of_dx[x];
                        yn[row + x] += wy * x_of_dy[x];
                    }
                }
            }
        }

        normalize(&mut xn);
        normalize(&mut yn);

        Self {
            size,
            dx: xn.into_iter().map(|v| v as f32).collect(),
            dy: yn.into_iter().map(|v| v as f32).collect(),
        }
    }

    /// Wrap precomputed offsets, e.g. a field saved from an earlier run.
    ///
    /// # Errors
    ///
    /// [`DataError::BufferLength`] unless both components hold
    /// `size * size` values.
    pub fn from_components(size: usize, dx: Vec<f32>, dy: Vec<f32>) -> Result<Self, DataError> {
        let expected = size * size;
        for actual in [dx.len(), dy.len()] {
            if actual != expected {
                return Err(DataError::BufferLength { expected, actual });
            }
        }
        Ok(Self { size, dx, dy })
    }

    /// Multiply both components by `factor`.
    pub fn scaled(mut self, factor: f32) -> Self {
        self.dx.iter_mut().for_each(|v| *v *= factor);
        self.dy.iter_mut().for_each(|v| *v *= factor);
        self
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn dx(&self) -> &[f32] {
        &self.dx
    }

    #[inline]
    pub fn dy(&self) -> &[f32] {
        &self.dy
    }

    /// Offset at column `x`, row `y`.
    #[inline]
    pub fn at(&self, x: usize, y: usize) -> (f32, f32) {
        let i = y * self.size + x;
        (self.dx[i], self.dy[i])
    }

    /// Spatial mean of `(dx, dy)`.
    pub fn mean(&self) -> (f64, f64) {
        (mean(&self.dx), mean(&self.dy))
    }

    /// Root-mean-square magnitude of `(dx, dy)`.
    pub fn rms(&self) -> (f64, f64) {
        (rms(&self.dx), rms(&self.dy))
    }
}

fn normalize(values: &mut [f64]) {
    if values.is_empty() {
        return;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    values.iter_mut().for_each(|v| *v -= mean);

    let rms = (values.iter().map(|v| v * v).sum::<f64>() / n).sqrt();
    if rms > f64::EPSILON {
        values.iter_mut().for_each(|v| *v /= rms);
    } else {
        values.iter_mut().for_each(|v| *v = 0.0);
    }
}

fn mean(values: &[f32]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|&v| v as f64).sum::<f64>() / values.len() as f64
}

fn rms(values: &[f32]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    (values.iter().map(|&v| (v as f64) * (v as f64)).sum::<f64>() / values.len() as f64).sqrt()
}
