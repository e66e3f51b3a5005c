//! Unified error type for the classification pipeline.

use thiserror::Error;

/// Errors raised by the preprocessing and clustering stages.
///
/// Every stage fails fast: no partial output is produced once an error is
/// returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClassifyError {
    /// The input cannot be interpreted as an RGB raster.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// A classification parameter is out of range (class count, target size).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The clustering backend failed on otherwise valid input.
    #[error("clustering failed: {0}")]
    Clustering(String),
}
