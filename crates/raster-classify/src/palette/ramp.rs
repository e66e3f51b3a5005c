//! Sequential color ramps and per-class color tables.
//!
//! A [`ColorRamp`] is an ordered list of reference stops. Class colors are
//! sampled from it at evenly spaced positions, so the table for a given
//! class count never depends on image content:
//!
//! ```text
//! position(i) = i / (n - 1) * (stops - 1)        n >= 2
//! position(0) = 0                                 n == 1
//! ```
//!
//! Non-integral positions interpolate linearly between the two nearest
//! stops, channel by channel, in 8-bit sRGB (the same space the stops are
//! written in).

use std::str::FromStr;

use super::error::RampError;
use crate::color::Srgb;

/// The reference ramp: 10 Viridis stops, dark purple to yellow.
pub const VIRIDIS: [&str; 10] = [
    "#440154", "#482878", "#3e4989", "#31688e", "#26828e", "#1f9e89", "#35b779", "#6ece58",
    "#b5de2b", "#fde725",
];

/// One color per class, index-aligned with label ids.
///
/// Shared by the map overlay and chart legends so both show the same
/// colors for the same class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassColorTable {
    colors: Vec<[u8; 3]>,
}

impl ClassColorTable {
    pub fn new(colors: Vec<[u8; 3]>) -> Self {
        Self { colors }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color for a class id.
    ///
    /// # Panics
    ///
    /// Panics if `class >= self.len()`.
    #[inline]
    pub fn color(&self, class: usize) -> [u8; 3] {
        self.colors[class]
    }

    pub fn colors(&self) -> &[[u8; 3]] {
        &self.colors
    }

    /// `#rrggbb` strings, the form chart legends consume.
    pub fn to_hex(&self) -> Vec<String> {
        self.colors
            .iter()
            .map(|[r, g, b]| format!("#{r:02x}{g:02x}{b:02x}"))
            .collect()
    }

    pub fn into_inner(self) -> Vec<[u8; 3]> {
        self.colors
    }
}

/// An ordered list of reference colors.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorRamp {
    stops: Vec<[u8; 3]>,
}

impl ColorRamp {
    /// Build a ramp from hex-coded stops.
    ///
    /// ```
    /// use raster_classify::ColorRamp;
    ///
    /// let ramp = ColorRamp::from_hex(&["#000000", "#ffffff"]).unwrap();
    /// assert_eq!(ramp.len(), 2);
    /// ```
    pub fn from_hex(stops: &[&str]) -> Result<Self, RampError> {
        if stops.is_empty() {
            return Err(RampError::Empty);
        }
        let stops = stops
            .iter()
            .enumerate()
            .map(|(index, s)| {
                Srgb::from_str(s)
                    .map(Srgb::to_bytes)
                    .map_err(|source| RampError::InvalidStop { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { stops })
    }

    /// The fixed Viridis reference ramp.
    pub fn viridis() -> Self {
        Self {
            stops: VIRIDIS
                .iter()
                .map(|s| {
                    Srgb::from_str(s)
                        .map(Srgb::to_bytes)
                        .unwrap_or([0, 0, 0])
                })
                .collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn stops(&self) -> &[[u8; 3]] {
        &self.stops
    }

    /// Color at a fractional stop index, clamped to `[0, len - 1]`.
    pub fn sample(&self, position: f64) -> [u8; 3] {
        let last = self.stops.len() - 1;
        let position = position.clamp(0.0, last as f64);
        let lower = position.floor() as usize;
        let upper = (lower + 1).min(last);
        let t = position - lower as f64;

        let a = self.stops[lower];
        let b = self.stops[upper];
        let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * t).round() as u8;
        [mix(a[0], b[0]), mix(a[1], b[1]), mix(a[2], b[2])]
    }

    /// `n_classes` colors sampled at evenly spaced positions.
    ///
    /// A single class gets the first stop; zero classes give an empty table.
    pub fn class_colors(&self, n_classes: usize) -> ClassColorTable {
        let last = (self.stops.len() - 1) as f64;
        let colors = (0..n_classes)
            .map(|i| {
                let position = if n_classes > 1 {
                    i as f64 / (n_classes - 1) as f64 * last
                } else {
                    0.0
                };
                self.sample(position)
            })
            .collect();
        ClassColorTable::new(colors)
    }
}

impl Default for ColorRamp {
    fn default() -> Self {
        Self::viridis()
    }
}
