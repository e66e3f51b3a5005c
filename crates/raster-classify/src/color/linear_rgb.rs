//! Linear-light RGB color type
//!
//! The bridge between gamma-encoded raster samples and Oklab: the Oklab
//! matrices are defined on linear light, not on sRGB.

use super::lut::srgb_to_linear;
use super::srgb::Srgb;

/// A color in linear RGB (light intensity, nominally 0.0..=1.0).
///
/// Values may leave the nominal range after an Oklab round trip with a
/// modified lightness; use [`LinearRgb::clamped`] before encoding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl LinearRgb {
    #[inline]
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Clamp every channel into 0.0..=1.0.
    #[inline]
    pub fn clamped(self) -> Self {
        Self {
            r: self.r.clamp(0.0, 1.0),
            g: self.g.clamp(0.0, 1.0),
            b: self.b.clamp(0.0, 1.0),
        }
    }
}

impl From<Srgb> for LinearRgb {
    fn from(srgb: Srgb) -> Self {
        Self {
            r: srgb_to_linear(srgb.r),
            g: srgb_to_linear(srgb.g),
            b: srgb_to_linear(srgb.b),
        }
    }
}
