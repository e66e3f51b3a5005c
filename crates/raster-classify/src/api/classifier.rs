//! Classifier builder, the primary entry point for the crate.
//!
//! [`Classifier`] wires the full pipeline behind a fluent builder:
//! enhance → normalize → band 0 → k-means → proportions + colored mask.

use crate::cluster::{validate_n_clusters, KMeans, LabelGrid};
use crate::output::{render_with, ColoredMask};
use crate::palette::{ClassColorTable, ColorRamp};
use crate::preprocess::{PreprocessOptions, Preprocessor};
use crate::raster::RasterImage;
use crate::stats::{proportions, ClassProportions};

use super::ClassifyError;

/// Everything one classification run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Per-pixel class ids at the normalized target size.
    pub labels: LabelGrid,
    pub proportions: ClassProportions,
    pub mask: ColoredMask,
    pub colors: ClassColorTable,
}

/// Unsupervised land-cover classifier.
///
/// Configuration methods consume and return `self`;
/// [`classify()`](Self::classify) takes `&self`, so one classifier can be
/// shared across requests.
///
/// # Example
///
/// ```
/// use raster_classify::{Classifier, RasterImage};
///
/// let data: Vec<u8> = (0..16 * 16)
///     .flat_map(|i| if i % 16 < 8 { [30, 90, 40] } else { [200, 190, 150] })
///     .collect();
/// let image = RasterImage::from_rgb(16, 16, data).unwrap();
///
/// let result = Classifier::new()
///     .target_size(32, 32)
///     .seed(3)
///     .classify(&image, 2)
///     .unwrap();
///
/// assert_eq!(result.proportions.len(), 2);
/// assert_eq!(result.colors.len(), 2);
/// assert_eq!((result.mask.width(), result.mask.height()), (32, 32));
/// ```
#[derive(Debug, Clone)]
pub struct Classifier {
    preprocess: PreprocessOptions,
    max_iter: usize,
    tolerance: f32,
    seed: Option<u64>,
    ramp: ColorRamp,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier {
    pub fn new() -> Self {
        Self {
            preprocess: PreprocessOptions::default(),
            max_iter: 100,
            tolerance: 1e-4,
            seed: None,
            ramp: ColorRamp::viridis(),
        }
    }

    /// Replace all preprocessing options at once.
    #[inline]
    pub fn preprocess(mut self, options: PreprocessOptions) -> Self {
        self.preprocess = options;
        self
    }

    /// CLAHE clip limit.
    #[inline]
    pub fn clip_limit(mut self, limit: f32) -> Self {
        self.preprocess = self.preprocess.clip_limit(limit);
        self
    }

    /// CLAHE tiles per side.
    #[inline]
    pub fn tile_grid(mut self, tiles: usize) -> Self {
        self.preprocess = self.preprocess.tile_grid(tiles);
        self
    }

    /// Working size the label grid is computed at.
    #[inline]
    pub fn target_size(mut self, width: usize, height: usize) -> Self {
        self.preprocess = self.preprocess.target_size(width, height);
        self
    }

    #[inline]
    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    #[inline]
    pub fn tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Fix the k-means seed. Label ids are only repeatable with a seed.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[inline]
    pub fn maybe_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Ramp the class colors are sampled from (Viridis by default).
    #[inline]
    pub fn ramp(mut self, ramp: ColorRamp) -> Self {
        self.ramp = ramp;
        self
    }

    #[inline]
    pub fn options(&self) -> &PreprocessOptions {
        &self.preprocess
    }

    /// Run the full pipeline on `image`.
    ///
    /// `n_clusters` is checked before any pixel work, so an invalid count
    /// fails fast with [`ClassifyError::InvalidParameter`].
    pub fn classify(
        &self,
        image: &RasterImage,
        n_clusters: i64,
    ) -> Result<Classification, ClassifyError> {
        let k = validate_n_clusters(n_clusters)?;

        let preprocessor = Preprocessor::new(self.preprocess.clone());
        let enhanced = preprocessor.enhance(image)?;
        let normalized = preprocessor.normalize(&enhanced)?;
        let band = normalized.band(0)?;

        let labels = KMeans::new(n_clusters)?
            .max_iter(self.max_iter)
            .tolerance(self.tolerance)
            .maybe_seed(self.seed)
            .fit(&band)?;

        let proportions = proportions(&labels, k);
        let (mask, colors) = render_with(&self.ramp, &labels, k)?;

        Ok(Classification {
            labels,
            proportions,
            mask,
            colors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn halves() -> RasterImage {
        let data = (0..20 * 20)
            .flat_map(|i| if i % 20 < 10 { [20, 60, 30] } else { [220, 210, 180] })
            .collect();
        RasterImage::from_rgb(20, 20, data).unwrap()
    }

    #[test]
    fn test_classify_shapes() {
        let result = Classifier::new()
            .target_size(16, 12)
            .seed(1)
            .classify(&halves(), 4)
            .unwrap();
        assert_eq!((result.labels.width(), result.labels.height()), (16, 12));
        assert_eq!(result.labels.n_classes(), 4);
        assert_eq!(result.proportions.len(), 4);
        assert_eq!(result.colors.len(), 4);
        assert_eq!((result.mask.width(), result.mask.height()), (16, 12));
    }

    #[test]
    fn test_classify_splits_halves() {
        // One tile: 2x2 tiles would clip every histogram flat
        let result = Classifier::new()
            .tile_grid(1)
            .target_size(20, 20)
            .seed(9)
            .classify(&halves(), 2)
            .unwrap();
        let left = result.labels.get(0, 0);
        let right = result.labels.get(19, 0);
        assert_ne!(left, right);
        assert_eq!(result.proportions.values(), vec![0.5, 0.5]);
    }

    #[test]
    fn test_invalid_clusters_fail_before_pixels() {
        let gray = RasterImage::new(2, 2, 1, vec![0; 4]).unwrap();
        // n_clusters is reported even though the image is also unusable
        assert!(matches!(
            Classifier::new().classify(&gray, 0),
            Err(ClassifyError::InvalidParameter(_))
        ));
        assert!(matches!(
            Classifier::new().classify(&gray, 3),
            Err(ClassifyError::InvalidImage(_))
        ));
    }

    #[test]
    fn test_seeded_classifier_repeats() {
        let classifier = Classifier::new().tile_grid(1).target_size(24, 24).seed(42);
        let a = classifier.classify(&halves(), 3).unwrap();
        let b = classifier.classify(&halves(), 3).unwrap();
        assert_eq!(a, b);
    }
}
