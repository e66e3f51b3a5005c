#![allow(clippy::excessive_precision, clippy::needless_range_loop)]

//! raster-classify: unsupervised land-cover classification of RGB rasters.
//!
//! The crate turns a raw satellite image into a per-pixel class
//! assignment, a color-coded mask, and per-class area proportions.
//!
//! # Quick Start
//!
//! The [`Classifier`] builder is the primary entry point:
//!
//! ```
//! use raster_classify::{Classifier, RasterImage};
//!
//! let image = RasterImage::from_rgb(8, 8, vec![120; 8 * 8 * 3]).unwrap();
//! let result = Classifier::new().classify(&image, 4).unwrap();
//!
//! assert_eq!(result.labels.width(), 256);
//! assert_eq!(result.colors.len(), 4);
//! assert!((result.proportions.sum() - 1.0).abs() <= 0.01);
//! ```
//!
//! # Pipeline
//!
//! ```text
//! RasterImage (RGB/RGBA bytes)
//!     |
//!     v
//! enhance          sRGB -> LinearRgb -> Oklab, CLAHE on L, back to sRGB
//!     |
//!     v
//! normalize        triangle-filter resize to the target size, bytes -> 0.0..=1.0
//!     |
//!     v
//! band(0)          first channel only
//!     |
//!     v
//! KMeans           linfa k-means (k-means++ seeding, Lloyd) -> LabelGrid
//!     |
//!     +----> proportions   ClassProportions (thousandths, sum = 1.000)
//!     |
//!     +----> render        ClassColorTable (Viridis samples) + ColoredMask
//! ```
//!
//! Each stage is also usable on its own: [`Preprocessor`], [`KMeans`] /
//! [`cluster()`], [`proportions()`], [`render()`].
//!
//! # Color Spaces
//!
//! Contrast enhancement works on Oklab lightness so that equalization
//! changes brightness without shifting hue. Conversions go through
//! [`LinearRgb`] because the Oklab matrices are defined on linear light;
//! the sRGB transfer function is a build-time lookup table.
//!
//! # Label Identity
//!
//! Label ids are centroid indices. Unless a seed is supplied, centroid
//! seeding is random, so the same image can come back with the same
//! clusters under different ids. Colors and proportions are always
//! consistent with the labels of the same run.

pub mod api;
pub mod cluster;
pub mod color;
pub mod output;
pub mod palette;
pub mod preprocess;
pub mod raster;
pub mod stats;


pub use api::{Classification, Classifier, ClassifyError};
pub use cluster::{cluster, KMeans, LabelGrid, MAX_CLUSTERS};
pub use color::{LinearRgb, Oklab, Srgb};
pub use output::{render, render_with, ColoredMask};
pub use palette::{ClassColorTable, ColorRamp, ParseColorError, RampError, VIRIDIS};
pub use preprocess::{normalize, resize_bilinear, NormalizedImage, PreprocessOptions, Preprocessor};
pub use raster::{Band, RasterImage};
pub use stats::{proportions, ClassProportions};
