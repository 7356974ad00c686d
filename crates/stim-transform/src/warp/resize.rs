//! Area-averaging resize.

use crate::image::Raster;

/// Resize by pixel-area averaging: each output pixel is the coverage-weighted
/// mean of the source pixels its footprint overlaps.
///
/// Works for both shrinking and enlarging. Target dimensions of zero are
/// raised to one.
///
/// ```
/// use stim_transform::{resize_area, Raster};
///
/// let mut src = Raster::filled(2, 1, [0, 0, 0]);
/// src.pixels_mut()[1] = [200, 100, 50];
/// let out = resize_area(&src, 1, 1);
/// assert_eq!(out.pixel(0, 0), [100, 50, 25]);
/// ```
pub fn resize_area(src: &Raster, width: usize, height: usize) -> Raster {
    let (width, height) = (width.max(1), height.max(1));
    let (sw, sh) = (src.width(), src.height());
    if sw == 0 || sh == 0 {
        return Raster::filled(width, height, [0, 0, 0]);
    }
    if (sw, sh) == (width, height) {
        return src.clone();
    }

    let cols = area_weights(sw, width);
    let rows = area_weights(sh, height);

    // Horizontal pass: sh rows of `width` samples.
    let mut tmp = vec![[0.0f32; 3]; width * sh];
    for y in 0..sh {
        let src_row = &src.pixels()[y * sw..(y + 1) * sw];
        for (ox, taps) in cols.iter().enumerate() {
            let acc = &mut tmp[y * width + ox];
            for &(sx, w) in taps {
                let p = src_row[sx];
                for c in 0..3 {
                    acc[c] += p[c] as f32 * w;
                }
            }
        }
    }

    // Vertical pass.
    let mut out = Vec::with_capacity(width * height);
    for taps in &rows {
        for ox in 0..width {
            let mut acc = [0.0f32; 3];
            for &(sy, w) in taps {
                let p = tmp[sy * width + ox];
                for c in 0..3 {
                    acc[c] += p[c] * w;
                }
            }
            out.push(acc.map(|v| v.round().clamp(0.0, 255.0) as u8));
        }
    }

    Raster::from_parts(width, height, out)
}

/// Per output index, the overlapped source indices and their normalized
/// coverage.
fn area_weights(src_len: usize, dst_len: usize) -> Vec<Vec<(usize, f32)>> {
    let scale = src_len as f64 / dst_len as f64;
    (0..dst_len)
        .map(|i| {
            let start = i as f64 * scale;
            let end = start + scale;
            let first = (start.floor() as usize).min(src_len - 1);
            let last = (end.ceil() as usize).clamp(first + 1, src_len);

            let mut taps: Vec<(usize, f64)> = (first..last)
                .filter_map(|s| {
                    let overlap = end.min(s as f64 + 1.0) - start.max(s as f64);
                    (overlap > 1e-12).then_some((s, overlap))
                })
                .collect();
            if taps.is_empty() {
                taps.push((first, 1.0));
            }
            let total: f64 = taps.iter().map(|&(_, w)| w).sum();
            taps.into_iter().map(|(s, w)| (s, (w / total) as f32)).collect()
        })
        .collect()
}
