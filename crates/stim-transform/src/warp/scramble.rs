//! The scrambling driver: fit, synthesize, warp.

use rand::Rng;

use super::field::{DisplacementField, WarpParams};
use super::options::ScrambleOptions;
use super::resample::{remap_reflect, remap_unchecked};
use super::resize::resize_area;
use crate::api::{ConfigError, DataError};
use crate::image::Raster;

/// Applies diffeomorphic scrambling to rasters.
///
/// Validated once at construction; [`scramble`](Self::scramble) takes
/// `&self` so one scrambler serves a whole batch.
#[derive(Debug, Clone)]
pub struct Scrambler {
    options: ScrambleOptions,
    params: WarpParams,
}

impl Scrambler {
    /// # Errors
    ///
    /// Any [`ConfigError`] from [`WarpParams::new`], or
    /// [`ConfigError::InvalidFitFraction`] unless `0 < fit_fraction <= 1`.
    pub fn new(options: ScrambleOptions) -> Result<Self, ConfigError> {
        let params = WarpParams::new(options.canvas_size, options.max_distortion, options.steps)?;
        if !(options.fit_fraction > 0.0 && options.fit_fraction <= 1.0) {
            return Err(ConfigError::InvalidFitFraction(options.fit_fraction));
        }
        Ok(Self { options, params })
    }

    pub fn options(&self) -> &ScrambleOptions {
        &self.options
    }

    pub fn params(&self) -> &WarpParams {
        &self.params
    }

    /// Scramble one image with a freshly drawn field.
    pub fn scramble<R: Rng + ?Sized>(&self, source: &Raster, rng: &mut R) -> Raster {
        let canvas = self.fit_to_canvas(source);
        let field = self.synthesize_field(rng);
        self.warp_canvas(canvas, &field)
    }

    /// Draw the field [`scramble`](Self::scramble) would use next.
    pub fn synthesize_field<R: Rng + ?Sized>(&self, rng: &mut R) -> DisplacementField {
        DisplacementField::synthesize(&self.params, rng)
    }

    /// Fit `source` onto the canvas and apply `field` `steps` times.
    ///
    /// # Errors
    ///
    /// [`DataError::FieldSize`] if `field` is not canvas-sized.
    pub fn scramble_with_field(
        &self,
        source: &Raster,
        field: &DisplacementField,
    ) -> Result<Raster, DataError> {
        let canvas = self.fit_to_canvas(source);
        // Validate once; the loop reuses the same geometry.
        let first = remap_reflect(&canvas, field)?;
        Ok((1..self.params.steps()).fold(first, |img, _| remap_unchecked(&img, field)))
    }

    /// Area-resample `source` so its longer side fills the fit zone, then
    /// paste it centered on a background canvas.
    ///
    /// Aspect ratio is kept; each side is truncated to whole pixels and
    /// kept within `1..=zone`.
    pub fn fit_to_canvas(&self, source: &Raster) -> Raster {
        let size = self.options.canvas_size;
        let mut canvas = Raster::filled(size, size, self.options.background);
        let (w, h) = (source.width(), source.height());
        if w == 0 || h == 0 {
            return canvas;
        }

        let zone = self.options.fit_zone().min(size);
        let scale = (zone as f64 / h as f64).min(zone as f64 / w as f64);
        let new_w = ((w as f64 * scale) as usize).clamp(1, zone);
        let new_h = ((h as f64 * scale) as usize).clamp(1, zone);

        let resized = resize_area(source, new_w, new_h);
        canvas.paste(&resized, (size - new_w) / 2, (size - new_h) / 2);
        canvas
    }

    fn warp_canvas(&self, canvas: Raster, field: &DisplacementField) -> Raster {
        (0..self.params.steps()).fold(canvas, |img, _| remap_unchecked(&img, field))
    }
}
