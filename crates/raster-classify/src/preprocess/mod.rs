//! Image preprocessing before clustering.
//!
//! Satellite captures are often hazy and flat. [`Preprocessor::enhance`]
//! restores local contrast with tiled, contrast-limited histogram
//! equalization of Oklab lightness; [`Preprocessor::normalize`] brings the
//! result to the classifier's working size and float range.
//!
//! # Processing Order
//!
//! Enhancement runs at the source resolution, before resizing, so the
//! tile grid covers the same ground area regardless of target size.

mod clahe;
mod options;
mod preprocessor;
mod resize;

pub use options::PreprocessOptions;
pub use preprocessor::{normalize, NormalizedImage, Preprocessor};
pub use resize::resize_bilinear;
