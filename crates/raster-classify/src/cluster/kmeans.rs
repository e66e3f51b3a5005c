//! K-means on scalar intensities.
//!
//! The clustering itself is `linfa-clustering`: k-means++ seeding followed
//! by Lloyd iterations until the inertia change drops below the tolerance
//! or `max_iter` is reached. Bands with no more distinct values than
//! clusters skip the fit and give each value its own label.
//!
//! Label ids follow centroid order, which depends on the random seeding.
//! Two runs on the same band can therefore number the same physical
//! cluster differently; callers must not rely on label ids across runs.

use linfa::traits::{Fit, Predict};
use linfa::DatasetBase;
use linfa_clustering::KMeans as LinfaKMeans;
use linfa_nn::distance::L2Dist;
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::labels::LabelGrid;
use crate::api::ClassifyError;
use crate::raster::Band;

/// Largest supported class count (labels are stored as `u8`).
pub const MAX_CLUSTERS: usize = 256;

/// Check a requested class count and convert it to `usize`.
pub fn validate_n_clusters(n_clusters: i64) -> Result<usize, ClassifyError> {
    if n_clusters < 1 {
        return Err(ClassifyError::InvalidParameter(format!(
            "n_clusters must be at least 1, got {n_clusters}"
        )));
    }
    if n_clusters as u64 > MAX_CLUSTERS as u64 {
        return Err(ClassifyError::InvalidParameter(format!(
            "n_clusters must be at most {MAX_CLUSTERS}, got {n_clusters}"
        )));
    }
    Ok(n_clusters as usize)
}

/// K-means configuration.
///
/// # Example
///
/// ```
/// use raster_classify::{Band, KMeans};
///
/// let band = Band::new(4, 1, vec![0.1, 0.12, 0.9, 0.88]);
/// let labels = KMeans::new(2).unwrap().seed(7).fit(&band).unwrap();
///
/// assert_eq!(labels.get(0, 0), labels.get(1, 0));
/// assert_ne!(labels.get(0, 0), labels.get(2, 0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct KMeans {
    n_clusters: usize,
    max_iter: usize,
    tolerance: f32,
    seed: Option<u64>,
}

impl KMeans {
    /// Create a k-means run with `n_clusters` centroids.
    ///
    /// Fails with [`ClassifyError::InvalidParameter`] unless
    /// `1 <= n_clusters <= 256`.
    pub fn new(n_clusters: i64) -> Result<Self, ClassifyError> {
        Ok(Self {
            n_clusters: validate_n_clusters(n_clusters)?,
            max_iter: 100,
            tolerance: 1e-4,
            seed: None,
        })
    }

    #[inline]
    pub fn n_clusters(&self) -> usize {
        self.n_clusters
    }

    #[inline]
    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter.max(1);
        self
    }

    #[inline]
    pub fn tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Seed centroid initialization. Unseeded runs draw from OS entropy.
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

    /// Cluster every value in `band` and return the labels in its shape.
    pub fn fit(&self, band: &Band) -> Result<LabelGrid, ClassifyError> {
        if band.is_empty() {
            return Err(ClassifyError::InvalidParameter(
                "cannot cluster an empty band".to_string(),
            ));
        }

        let values = band.values();
        let labels = match distinct_labels(values, self.n_clusters) {
            Some(labels) => labels,
            None => self.lloyd(values)?,
        };

        LabelGrid::new(band.width(), band.height(), self.n_clusters, labels)
    }

    fn lloyd(&self, values: &[f32]) -> Result<Vec<u8>, ClassifyError> {
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let observations = Array2::from_shape_vec((values.len(), 1), values.to_vec())
            .map_err(|e| ClassifyError::Clustering(e.to_string()))?;
        let dataset = DatasetBase::from(observations);

        // linfa rejects a non-positive tolerance
        let tolerance = if self.tolerance > 0.0 {
            self.tolerance
        } else {
            f32::EPSILON
        };

        let model: LinfaKMeans<f32, L2Dist> = LinfaKMeans::params_with_rng(self.n_clusters, rng)
            .n_runs(1)
            .max_n_iterations(self.max_iter as u64)
            .tolerance(tolerance)
            .fit(&dataset)
            .map_err(|e| ClassifyError::Clustering(e.to_string()))?;

        let assigned = model.predict(dataset.records());
        Ok(assigned.iter().map(|&label| label as u8).collect())
    }
}

/// Labels by rank of value when the band has at most `n_clusters`
/// distinct values; `None` otherwise.
fn distinct_labels(values: &[f32], n_clusters: usize) -> Option<Vec<u8>> {
    let mut distinct = values.to_vec();
    distinct.sort_by(|a, b| a.total_cmp(b));
    distinct.dedup();
    if distinct.len() > n_clusters {
        return None;
    }

    values
        .iter()
        .map(|v| {
            distinct
                .binary_search_by(|d| d.total_cmp(v))
                .ok()
                .map(|rank| rank as u8)
        })
        .collect()
}

/// Cluster `band` into `n_clusters` classes with default settings.
pub fn cluster(band: &Band, n_clusters: i64) -> Result<LabelGrid, ClassifyError> {
    KMeans::new(n_clusters)?.fit(band)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn band(values: Vec<f32>) -> Band {
        let width = values.len();
        Band::new(width, 1, values)
    }

    #[test]
    fn test_validate_n_clusters() {
        assert_eq!(validate_n_clusters(1).unwrap(), 1);
        assert_eq!(validate_n_clusters(256).unwrap(), 256);
        assert!(matches!(
            validate_n_clusters(0),
            Err(ClassifyError::InvalidParameter(_))
        ));
        assert!(matches!(
            validate_n_clusters(-3),
            Err(ClassifyError::InvalidParameter(_))
        ));
        assert!(matches!(
            validate_n_clusters(257),
            Err(ClassifyError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_constant_band_single_cluster() {
        let labels = cluster(&Band::new(8, 8, vec![0.42; 64]), 1).unwrap();
        assert!(labels.labels().iter().all(|&l| l == 0));
        assert_eq!((labels.width(), labels.height()), (8, 8));
    }

    #[test]
    fn test_constant_band_many_clusters() {
        let labels = cluster(&band(vec![0.5; 20]), 5).unwrap();
        let first = labels.labels()[0];
        assert!(labels.labels().iter().all(|&l| l == first));
        assert_eq!(labels.n_classes(), 5);
    }

    #[test]
    fn test_separates_three_groups() {
        let mut values = vec![0.1; 30];
        values.extend(vec![0.5; 30]);
        values.extend(vec![0.9; 30]);
        for seed in 0..10 {
            let labels = KMeans::new(3).unwrap().seed(seed).fit(&band(values.clone())).unwrap();
            let l = labels.labels();
            assert!(l[..30].iter().all(|&x| x == l[0]), "seed {seed}");
            assert!(l[30..60].iter().all(|&x| x == l[30]), "seed {seed}");
            assert!(l[60..].iter().all(|&x| x == l[60]), "seed {seed}");
            assert_ne!(l[0], l[30]);
            assert_ne!(l[30], l[60]);
            assert_ne!(l[0], l[60]);
        }
    }

    #[test]
    fn test_labels_below_n_clusters() {
        let values: Vec<f32> = (0..500).map(|i| ((i * 7919) % 1000) as f32 / 1000.0).collect();
        let labels = cluster(&band(values), 7).unwrap();
        assert!(labels.labels().iter().all(|&l| l < 7));
    }

    #[test]
    fn test_more_clusters_than_values() {
        let labels = cluster(&band(vec![0.2, 0.8]), 4).unwrap();
        assert_eq!(labels.len(), 2);
        assert!(labels.labels().iter().all(|&l| l < 4));
        assert_ne!(labels.labels()[0], labels.labels()[1]);
    }

    #[test]
    fn test_seeded_runs_repeat() {
        let values: Vec<f32> = (0..300).map(|i| ((i * 31) % 97) as f32 / 97.0).collect();
        let a = KMeans::new(4).unwrap().seed(11).fit(&band(values.clone())).unwrap();
        let b = KMeans::new(4).unwrap().seed(11).fit(&band(values)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_few_distinct_values_rank_in_order() {
        let labels = cluster(&band(vec![0.7, 0.1, 0.7, 0.4]), 5).unwrap();
        assert_eq!(labels.labels(), &[2, 0, 2, 1]);
        assert_eq!(labels.n_classes(), 5);
    }

    #[test]
    fn test_zero_tolerance_still_converges() {
        let values: Vec<f32> = (0..200).map(|i| (i % 50) as f32 / 50.0).collect();
        let labels = KMeans::new(3)
            .unwrap()
            .tolerance(0.0)
            .max_iter(20)
            .seed(3)
            .fit(&band(values))
            .unwrap();
        assert!(labels.labels().iter().all(|&l| l < 3));
    }

    #[test]
    fn test_empty_band_rejected() {
        assert!(matches!(
            cluster(&Band::new(0, 0, vec![]), 2),
            Err(ClassifyError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_invalid_n_clusters_rejected() {
        assert!(cluster(&band(vec![0.1, 0.2]), 0).is_err());
    }
}
