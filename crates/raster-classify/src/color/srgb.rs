//! sRGB color type
//!
//! Raster samples and color-ramp stops are stored gamma-encoded. This type
//! carries them as floats in 0.0..=1.0 and converts to and from bytes.

use std::str::FromStr;

use super::linear_rgb::LinearRgb;
use super::lut::linear_to_srgb;
use crate::palette::ParseColorError;

/// A gamma-encoded sRGB color, channels in 0.0..=1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Srgb {
    #[inline]
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create an Srgb color from 8-bit channel values.
    ///
    /// # Example
    /// ```
    /// use raster_classify::Srgb;
    /// let red = Srgb::from_u8(255, 0, 0);
    /// assert_eq!(red.r, 1.0);
    /// ```
    #[inline]
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    #[inline]
    pub fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::from_u8(bytes[0], bytes[1], bytes[2])
    }

    /// Round and clamp each channel to a byte.
    #[inline]
    pub fn to_bytes(self) -> [u8; 3] {
        [
            (self.r * 255.0).round().clamp(0.0, 255.0) as u8,
            (self.g * 255.0).round().clamp(0.0, 255.0) as u8,
            (self.b * 255.0).round().clamp(0.0, 255.0) as u8,
        ]
    }
}

impl From<LinearRgb> for Srgb {
    fn from(linear: LinearRgb) -> Self {
        Self {
            r: linear_to_srgb(linear.r),
            g: linear_to_srgb(linear.g),
            b: linear_to_srgb(linear.b),
        }
    }
}

impl FromStr for Srgb {
    type Err = ParseColorError;

    /// Parse `#RRGGBB`, `RRGGBB`, `#RGB` or `RGB` (case-insensitive,
    /// surrounding whitespace ignored).
    ///
    /// ```
    /// use raster_classify::Srgb;
    ///
    /// let purple: Srgb = "#440154".parse().unwrap();
    /// assert_eq!(purple.to_bytes(), [0x44, 0x01, 0x54]);
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        if !s.is_ascii() {
            return Err(ParseColorError::InvalidLength);
        }

        match s.len() {
            3 => {
                // #RGB expands each digit: 0xF -> 0xFF
                let r = u8::from_str_radix(&s[0..1], 16)? * 17;
                let g = u8::from_str_radix(&s[1..2], 16)? * 17;
                let b = u8::from_str_radix(&s[2..3], 16)? * 17;
                Ok(Self::from_u8(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&s[0..2], 16)?;
                let g = u8::from_str_radix(&s[2..4], 16)?;
                let b = u8::from_str_radix(&s[4..6], 16)?;
                Ok(Self::from_u8(r, g, b))
            }
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}
