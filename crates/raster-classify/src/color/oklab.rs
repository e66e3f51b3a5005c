//! Oklab perceptual color space
//!
//! Oklab separates lightness (`l`) from the two chroma axes (`a`, `b`), so
//! contrast enhancement can work on `l` without shifting hue. This is the
//! luminance/chrominance split the preprocessor equalizes in.
//!
//! # References
//!
//! Björn Ottosson, "A perceptual color space for image processing"
//! <https://bottosson.github.io/posts/oklab/>

use super::linear_rgb::LinearRgb;

/// A color in Oklab.
///
/// - `l`: lightness, 0.0 (black) to 1.0 (white) for in-gamut colors
/// - `a`: green-red axis
/// - `b`: blue-yellow axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oklab {
    pub l: f32,
    pub a: f32,
    pub b: f32,
}

impl Oklab {
    #[inline]
    pub fn new(l: f32, a: f32, b: f32) -> Self {
        Self { l, a, b }
    }

    /// Same chroma, different lightness.
    #[inline]
    pub fn with_lightness(self, l: f32) -> Self {
        Self { l, ..self }
    }
}

impl From<LinearRgb> for Oklab {
    /// Forward transform with the 2021-01-25 matrices.
    fn from(rgb: LinearRgb) -> Self {
        // linear sRGB -> LMS
        let l = 0.4122214708 * rgb.r + 0.5363325363 * rgb.g + 0.0514459929 * rgb.b;
        let m = 0.2119034982 * rgb.r + 0.6806995451 * rgb.g + 0.1073969566 * rgb.b;
        let s = 0.0883024619 * rgb.r + 0.2817188376 * rgb.g + 0.6299787005 * rgb.b;

        let l_ = l.cbrt();
        let m_ = m.cbrt();
        let s_ = s.cbrt();

        Oklab {
            l: 0.2104542553 * l_ + 0.7936177850 * m_ - 0.0040720468 * s_,
            a: 1.9779984951 * l_ - 2.4285922050 * m_ + 0.4505937099 * s_,
            b: 0.0259040371 * l_ + 0.7827717662 * m_ - 0.8086757660 * s_,
        }
    }
}

impl From<Oklab> for LinearRgb {
    /// Inverse transform. The result is not clamped.
    fn from(lab: Oklab) -> Self {
        let l_ = lab.l + 0.3963377774 * lab.a + 0.2158037573 * lab.b;
        let m_ = lab.l - 0.1055613458 * lab.a - 0.0638541728 * lab.b;
        let s_ = lab.l - 0.0894841775 * lab.a - 1.2914855480 * lab.b;

        let l = l_ * l_ * l_;
        let m = m_ * m_ * m_;
        let s = s_ * s_ * s_;

        LinearRgb {
            r: 4.0767416621 * l - 3.3077115913 * m + 0.2309699292 * s,
            g: -1.2684380046 * l + 2.6097574011 * m - 0.3413193965 * s,
            b: -0.0041960863 * l - 0.7034186147 * m + 1.7076147010 * s,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32, tol: f32) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_white_and_black_lightness() {
        let white = Oklab::from(LinearRgb::new(1.0, 1.0, 1.0));
        assert!(approx_eq(white.l, 1.0, 1e-4));
        assert!(approx_eq(white.a, 0.0, 1e-4));
        assert!(approx_eq(white.b, 0.0, 1e-4));

        let black = Oklab::from(LinearRgb::new(0.0, 0.0, 0.0));
        assert!(approx_eq(black.l, 0.0, 1e-6));
    }

    #[test]
    fn test_round_trip() {
        let colors = [
            LinearRgb::new(0.8, 0.1, 0.05),
            LinearRgb::new(0.1, 0.6, 0.2),
            LinearRgb::new(0.05, 0.1, 0.9),
            LinearRgb::new(0.3, 0.3, 0.3),
        ];
        for c in colors {
            let back = LinearRgb::from(Oklab::from(c));
            assert!(approx_eq(back.r, c.r, 1e-4), "{c:?} -> {back:?}");
            assert!(approx_eq(back.g, c.g, 1e-4), "{c:?} -> {back:?}");
            assert!(approx_eq(back.b, c.b, 1e-4), "{c:?} -> {back:?}");
        }
    }

    #[test]
    fn test_with_lightness_keeps_chroma() {
        let lab = Oklab::new(0.4, 0.1, -0.05).with_lightness(0.7);
        assert_eq!(lab, Oklab::new(0.7, 0.1, -0.05));
    }
}
