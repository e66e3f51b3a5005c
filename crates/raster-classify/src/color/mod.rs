//! Color types and conversions
//!
//! - [`Srgb`]: gamma-encoded, what raster bytes and ramp stops hold
//! - [`LinearRgb`]: linear light, the input to the Oklab matrices
//! - [`Oklab`]: lightness separated from chroma, used for contrast enhancement
//!
//! ```
//! use raster_classify::{LinearRgb, Oklab, Srgb};
//!
//! let pixel = Srgb::from_u8(96, 120, 64);
//! let lab = Oklab::from(LinearRgb::from(pixel));
//! let back = Srgb::from(LinearRgb::from(lab).clamped()).to_bytes();
//! assert!((back[1] as i32 - 120).abs() <= 1);
//! ```

mod linear_rgb;
mod lut;
mod oklab;
mod srgb;

pub use linear_rgb::LinearRgb;
pub use oklab::Oklab;
pub use srgb::Srgb;
