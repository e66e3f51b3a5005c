//! Unsupervised clustering of a single band into class labels.

mod kmeans;
mod labels;

pub use kmeans::{cluster, validate_n_clusters, KMeans, MAX_CLUSTERS};
pub use labels::LabelGrid;
