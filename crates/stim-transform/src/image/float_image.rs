//! Floating-point image tagged with its color space.

use super::raster::Raster;
use crate::api::DataError;
use crate::color::{CieLab, ColorSpace, LinearRgb, Oklab, Srgb};

/// A three-channel `f32` image with an explicit [`ColorSpace`] tag.
///
/// Channel meaning follows the tag: `(r, g, b)` for the RGB spaces,
/// `(L, a, b)` for the opponent spaces. Conversions never clip; clipping
/// happens once in [`Image::to_raster`].
///
/// ```
/// use stim_transform::{ColorSpace, Image, Raster};
///
/// let raster = Raster::filled(2, 2, [90, 140, 200]);
/// let lab = Image::from_raster(&raster).convert(ColorSpace::CieLab);
/// assert_eq!(lab.space(), ColorSpace::CieLab);
///
/// let back = lab.to_raster();
/// for (got, want) in back.pixel(0, 0).iter().zip([90u8, 140, 200]) {
///     assert!(got.abs_diff(want) <= 1);
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    width: usize,
    height: usize,
    space: ColorSpace,
    data: Vec<[f32; 3]>,
}

impl Image {
    /// Channels per pixel.
    pub const CHANNELS: usize = 3;

    pub fn new(
        width: usize,
        height: usize,
        space: ColorSpace,
        data: Vec<[f32; 3]>,
    ) -> Result<Self, DataError> {
        if width == 0 || height == 0 {
            return Err(DataError::EmptyImage);
        }
        if data.len() != width * height {
            return Err(DataError::BufferLength {
                expected: width * height * Self::CHANNELS,
                actual: data.len() * Self::CHANNELS,
            });
        }
        Ok(Self {
            width,
            height,
            space,
            data,
        })
    }

    /// Normalize an 8-bit raster to `0.0..=1.0` sRGB.
    pub fn from_raster(raster: &Raster) -> Self {
        let data = raster
            .pixels()
            .iter()
            .map(|&px| {
                let c = Srgb::from_bytes(px);
                [c.r, c.g, c.b]
            })
            .collect();
        Self {
            width: raster.width(),
            height: raster.height(),
            space: ColorSpace::Srgb,
            data,
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
    pub fn space(&self) -> ColorSpace {
        self.space
    }

    #[inline]
    pub fn pixels(&self) -> &[[f32; 3]] {
        &self.data
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [[f32; 3]] {
        &mut self.data
    }

    /// Return a copy of this image expressed in `target`.
    pub fn convert(&self, target: ColorSpace) -> Image {
        self.clone().into_space(target)
    }

    /// Convert in place of `self`, reusing the buffer.
    pub fn into_space(mut self, target: ColorSpace) -> Image {
        if self.space == target {
            return self;
        }
        let source = self.space;
        for px in self.data.iter_mut() {
            *px = from_linear(to_linear(*px, source), target);
        }
        self.space = target;
        self
    }

    /// Encode to 8-bit sRGB, clipping to the displayable range.
    pub fn to_raster(&self) -> Raster {
        let srgb = self.convert(ColorSpace::Srgb);
        let pixels = srgb
            .data
            .iter()
            .map(|&[r, g, b]| Srgb::new(r, g, b).to_bytes())
            .collect();
        Raster::from_parts(self.width, self.height, pixels)
    }
}

#[inline]
fn to_linear(px: [f32; 3], space: ColorSpace) -> LinearRgb {
    let [c0, c1, c2] = px;
    match space {
        ColorSpace::Srgb => LinearRgb::from(Srgb::new(c0, c1, c2)),
        ColorSpace::LinearRgb => LinearRgb::new(c0, c1, c2),
        ColorSpace::CieLab => LinearRgb::from(CieLab::new(c0, c1, c2)),
        ColorSpace::Oklab => LinearRgb::from(Oklab::new(c0, c1, c2)),
    }
}

#[inline]
fn from_linear(linear: LinearRgb, space: ColorSpace) -> [f32; 3] {
    match space {
        ColorSpace::Srgb => {
            let c = Srgb::from(linear);
            [c.r, c.g, c.b]
        }
        ColorSpace::LinearRgb => [linear.r, linear.g, linear.b],
        ColorSpace::CieLab => {
            let c = CieLab::from(linear);
            [c.l, c.a, c.b]
        }
        ColorSpace::Oklab => {
            let c = Oklab::from(linear);
            [c.l, c.a, c.b]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient() -> Raster {
        let pixels = (0..16u8)
            .map(|i| [i * 16, 255 - i * 15, (i * 37) % 251])
            .collect();
        Raster::from_pixels(4, 4, pixels).unwrap()
    }

    #[test]
    fn test_new_validates_length() {
        assert!(Image::new(2, 2, ColorSpace::Srgb, vec![[0.0; 3]; 4]).is_ok());
        assert_eq!(
            Image::new(2, 2, ColorSpace::Srgb, vec![[0.0; 3]; 3]),
            Err(DataError::BufferLength {
                expected: 12,
                actual: 9
            })
        );
        assert_eq!(
            Image::new(0, 2, ColorSpace::Srgb, vec![]),
            Err(DataError::EmptyImage)
        );
    }

    #[test]
    fn test_round_trip_through_every_space() {
        let raster = gradient();
        for space in [ColorSpace::LinearRgb, ColorSpace::CieLab, ColorSpace::Oklab] {
            let back = Image::from_raster(&raster).into_space(space).to_raster();
            for (a, b) in raster.pixels().iter().zip(back.pixels()) {
                for c in 0..3 {
                    assert!(
                        a[c].abs_diff(b[c]) <= 1,
                        "{space:?}: {a:?} came back as {b:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_same_space_conversion_is_identity() {
        let image = Image::from_raster(&gradient());
        assert_eq!(image.convert(ColorSpace::Srgb), image);
    }

    #[test]
    fn test_to_raster_clips() {
        let image = Image::new(1, 1, ColorSpace::Srgb, vec![[1.5, -0.2, 0.5]]).unwrap();
        assert_eq!(image.to_raster().pixel(0, 0), [255, 0, 128]);
    }

    #[test]
    fn test_lab_tag_and_values() {
        let image = Image::from_raster(&Raster::filled(1, 1, [255, 255, 255]))
            .into_space(ColorSpace::CieLab);
        let [l, a, b] = image.pixels()[0];
        assert!((l - 100.0).abs() < 0.01);
        assert!(a.abs() < 0.01 && b.abs() < 0.01);
    }
}
