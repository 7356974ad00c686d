//! Bilinear resampling through a displacement field.

use super::field::DisplacementField;
use crate::api::DataError;
use crate::image::Raster;

/// Fold an out-of-range index back into `0..len` by mirror reflection that
/// repeats the edge sample (`fedcba|abcdef`): `-1 -> 0`, `len -> len - 1`.
///
/// ```
/// use stim_transform::warp::reflect_index;
///
/// assert_eq!(reflect_index(-1, 5), 0);
/// assert_eq!(reflect_index(-3, 5), 2);
/// assert_eq!(reflect_index(5, 5), 4);
/// assert_eq!(reflect_index(11, 5), 1);
/// ```
#[inline]
pub fn reflect_index(i: i64, len: usize) -> usize {
    let len = len as i64;
    let period = 2 * len;
    let m = i.rem_euclid(period);
    (if m < len { m } else { period - 1 - m }) as usize
}

/// One resampling step: `out(x, y) = src(x + dx, y + dy)`.
///
/// Samples are bilinearly interpolated, positions outside the raster are
/// reflected back in, and the result is rounded to 8 bits.
///
/// # Errors
///
/// [`DataError::FieldSize`] if the field does not match the raster.
pub fn remap_reflect(src: &Raster, field: &DisplacementField) -> Result<Raster, DataError> {
    if src.width() != field.size() || src.height() != field.size() {
        return Err(DataError::FieldSize {
            field: field.size(),
            width: src.width(),
            height: src.height(),
        });
    }
    Ok(remap_unchecked(src, field))
}

/// Caller guarantees `src` is `field.size()` square.
pub(crate) fn remap_unchecked(src: &Raster, field: &DisplacementField) -> Raster {
    let (w, h) = (src.width(), src.height());
    let mut out = Vec::with_capacity(w * h);
    for y in 0..h {
        for x in 0..w {
            let (dx, dy) = field.at(x, y);
            out.push(sample(src, x as f32 + dx, y as f32 + dy));
        }
    }
    Raster::from_parts(w, h, out)
}

#[inline]
fn sample(src: &Raster, sx: f32, sy: f32) -> [u8; 3] {
    let (w, h) = (src.width(), src.height());
    let x0f = sx.floor();
    let y0f = sy.floor();
    let fx = sx - x0f;
    let fy = sy - y0f;
    let (x0, y0) = (x0f as i64, y0f as i64);

    let xa = reflect_index(x0, w);
    let xb = reflect_index(x0 + 1, w);
    let ya = reflect_index(y0, h);
    let yb = reflect_index(y0 + 1, h);

    let p00 = src.pixel(xa, ya);
    let p10 = src.pixel(xb, ya);
    let p01 = src.pixel(xa, yb);
    let p11 = src.pixel(xb, yb);

    let w00 = (1.0 - fx) * (1.0 - fy);
    let w10 = fx * (1.0 - fy);
    let w01 = (1.0 - fx) * fy;
    let w11 = fx * fy;

    std::array::from_fn(|c| {
        let v = p00[c] as f32 * w00 + p10[c] as f32 * w10 + p01[c] as f32 * w01 + p11[c] as f32 * w11;
        v.round().clamp(0.0, 255.0) as u8
    })
}
