//! 8-bit RGB raster.

use crate::api::DataError;

/// An 8-bit sRGB raster, row-major, three channels per pixel.
///
/// Alpha is never stored: [`Raster::from_interleaved`] strips it on the way
/// in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: usize,
    height: usize,
    pixels: Vec<[u8; 3]>,
}

impl Raster {
    /// Channels per pixel.
    pub const CHANNELS: usize = 3;

    /// Create a raster filled with a single color.
    pub fn filled(width: usize, height: usize, color: [u8; 3]) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width * height],
        }
    }

    /// Build a raster from interleaved bytes with 3 (RGB) or 4 (RGBA)
    /// channels. Alpha is dropped.
    ///
    /// ```
    /// use stim_transform::Raster;
    ///
    /// let rgba = [10, 20, 30, 255, 40, 50, 60, 0];
    /// let raster = Raster::from_interleaved(2, 1, 4, &rgba).unwrap();
    /// assert_eq!(raster.pixel(1, 0), [40, 50, 60]);
    /// ```
    pub fn from_interleaved(
        width: usize,
        height: usize,
        channels: usize,
        bytes: &[u8],
    ) -> Result<Self, DataError> {
        if channels != 3 && channels != 4 {
            return Err(DataError::UnsupportedChannels(channels));
        }
        if width == 0 || height == 0 {
            return Err(DataError::EmptyImage);
        }
        let expected = width * height * channels;
        if bytes.len() != expected {
            return Err(DataError::BufferLength {
                expected,
                actual: bytes.len(),
            });
        }

        let pixels = bytes
            .chunks_exact(channels)
            .map(|px| [px[0], px[1], px[2]])
            .collect();

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build a raster from one `[R, G, B]` triple per pixel.
    pub fn from_pixels(
        width: usize,
        height: usize,
        pixels: Vec<[u8; 3]>,
    ) -> Result<Self, DataError> {
        if width == 0 || height == 0 {
            return Err(DataError::EmptyImage);
        }
        if pixels.len() != width * height {
            return Err(DataError::BufferLength {
                expected: width * height * Self::CHANNELS,
                actual: pixels.len() * Self::CHANNELS,
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Assemble a raster whose dimensions the caller already guarantees.
    #[inline]
    pub(crate) fn from_parts(width: usize, height: usize, pixels: Vec<[u8; 3]>) -> Self {
        debug_assert_eq!(pixels.len(), width * height);
        Self {
            width,
            height,
            pixels,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn channels(&self) -> usize {
        Self::CHANNELS
    }

    #[inline]
    pub fn pixels(&self) -> &[[u8; 3]] {
        &self.pixels
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [[u8; 3]] {
        &mut self.pixels
    }

    /// Pixel at column `x`, row `y`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the raster.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        self.pixels[y * self.width + x]
    }

    /// Interleaved `RGBRGB...` bytes, e.g. for handing to an encoder.
    pub fn to_interleaved(&self) -> Vec<u8> {
        self.pixels.iter().flatten().copied().collect()
    }

    /// Copy `src` into this raster with its top-left corner at `(x0, y0)`.
    /// Parts of `src` falling outside are discarded.
    pub fn paste(&mut self, src: &Raster, x0: usize, y0: usize) {
        let cols = src.width.min(self.width.saturating_sub(x0));
        let rows = src.height.min(self.height.saturating_sub(y0));
        if cols == 0 || rows == 0 {
            return;
        }
        for row in 0..rows {
            let dst_start = (y0 + row) * self.width + x0;
            let src_start = row * src.width;
            self.pixels[dst_start..dst_start + cols]
                .copy_from_slice(&src.pixels[src_start..src_start + cols]);
        }
    }
}
