//! CIE 1976 L*a*b* color space (D65 white point, sRGB primaries)
//!
//! The default opponent space for chrominance rotation. `L` runs 0..100 and
//! the chrominance axes are roughly -128..128, matching the values most
//! vision-science toolkits report.

use super::linear_rgb::LinearRgb;

// D65 reference white point (standard daylight)
const D65_XN: f32 = 0.95047;
const D65_YN: f32 = 1.00000;
const D65_ZN: f32 = 1.08883;

const DELTA: f32 = 6.0 / 29.0;

/// A color in CIELAB.
///
/// - `l`: Lightness (0 = black, 100 = white)
/// - `a`: Green-red axis
/// - `b`: Blue-yellow axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CieLab {
    pub l: f32,
    pub a: f32,
    pub b: f32,
}

impl CieLab {
    #[inline]
    pub fn new(l: f32, a: f32, b: f32) -> Self {
        Self { l, a, b }
    }
}

/// Lab transfer function
#[inline]
fn lab_f(t: f32) -> f32 {
    if t > DELTA * DELTA * DELTA {
        t.cbrt()
    } else {
        t / (3.0 * DELTA * DELTA) + 4.0 / 29.0
    }
}

#[inline]
fn lab_f_inv(t: f32) -> f32 {
    if t > DELTA {
        t * t * t
    } else {
        3.0 * DELTA * DELTA * (t - 4.0 / 29.0)
    }
}

impl From<LinearRgb> for CieLab {
    fn from(rgb: LinearRgb) -> Self {
        let x = rgb.r * 0.4124564 + rgb.g * 0.3575761 + rgb.b * 0.1804375;
        let y = rgb.r * 0.2126729 + rgb.g * 0.7151522 + rgb.b * 0.0721750;
        let z = rgb.r * 0.0193339 + rgb.g * 0.1191920 + rgb.b * 0.9503041;

        let fx = lab_f(x / D65_XN);
        let fy = lab_f(y / D65_YN);
        let fz = lab_f(z / D65_ZN);

        CieLab {
            l: 116.0 * fy - 16.0,
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }
}

impl From<CieLab> for LinearRgb {
    /// Convert from CIELAB to linear RGB. The result is not clamped.
    ///
    /// Negative Z (reachable by rotating a strongly yellow color toward
    /// blue) is floored at zero before the matrix, as skimage and most
    /// reference implementations do.
    fn from(lab: CieLab) -> Self {
        let fy = (lab.l + 16.0) / 116.0;
        let fx = fy + lab.a / 500.0;
        let fz = (fy - lab.b / 200.0).max(0.0);

        let x = D65_XN * lab_f_inv(fx);
        let y = D65_YN * lab_f_inv(fy);
        let z = D65_ZN * lab_f_inv(fz);

        LinearRgb {
            r: 3.2404542 * x - 1.5371385 * y - 0.4985314 * z,
            g: -0.9692660 * x + 1.8760108 * y + 0.0415560 * z,
            b: 0.0556434 * x - 0.2040259 * y + 1.0572252 * z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROUND_TRIP_TOLERANCE: f32 = 1e-4;

    #[test]
    fn test_cielab_matches_palette_crate() {
        use palette::{IntoColor, Lab, LinSrgb};

        let test_colors = [
            (1.0, 0.0, 0.0),
            (0.0, 1.0, 0.0),
            (0.0, 0.0, 1.0),
            (0.2, 0.5, 0.8),
            (1.0, 1.0, 1.0),
        ];

        for (r, g, b) in test_colors {
            let ours = CieLab::from(LinearRgb::new(r, g, b));
            let theirs: Lab = LinSrgb::new(r, g, b).into_color();

            // palette derives its matrix from the primaries, so allow a
            // small difference in the last printed digit.
            assert!(
                (ours.l - theirs.l).abs() < 0.05
                    && (ours.a - theirs.a).abs() < 0.1
                    && (ours.b - theirs.b).abs() < 0.1,
                "mismatch for ({r}, {g}, {b}): ours={ours:?}, palette={theirs:?}"
            );
        }
    }

    #[test]
    fn test_white_and_black() {
        let white = CieLab::from(LinearRgb::new(1.0, 1.0, 1.0));
        assert!((white.l - 100.0).abs() < 0.01, "White L = {}", white.l);
        assert!(white.a.abs() < 0.01 && white.b.abs() < 0.01);

        let black = CieLab::from(LinearRgb::new(0.0, 0.0, 0.0));
        assert!(black.l.abs() < 1e-4);
        assert!(black.a.abs() < 1e-4 && black.b.abs() < 1e-4);
    }

    #[test]
    fn test_known_red() {
        // sRGB red is L* 53.24, a* 80.09, b* 67.20
        let red = CieLab::from(LinearRgb::new(1.0, 0.0, 0.0));
        assert!((red.l - 53.24).abs() < 0.05, "L = {}", red.l);
        assert!((red.a - 80.09).abs() < 0.1, "a = {}", red.a);
        assert!((red.b - 67.20).abs() < 0.1, "b = {}", red.b);
    }

    #[test]
    fn test_round_trip() {
        let colors = [
            LinearRgb::new(0.9, 0.1, 0.3),
            LinearRgb::new(0.01, 0.002, 0.004),
            LinearRgb::new(0.5, 0.5, 0.5),
            LinearRgb::new(0.0, 1.0, 1.0),
        ];
        for original in colors {
            let back = LinearRgb::from(CieLab::from(original));
            assert!(
                (original.r - back.r).abs() < ROUND_TRIP_TOLERANCE
                    && (original.g - back.g).abs() < ROUND_TRIP_TOLERANCE
                    && (original.b - back.b).abs() < ROUND_TRIP_TOLERANCE,
                "round trip failed: {original:?} -> {back:?}"
            );
        }
    }
}
