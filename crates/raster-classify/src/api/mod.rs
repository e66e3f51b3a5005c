//! Public API for the raster-classify crate.
//!
//! This module provides the high-level API: the [`Classifier`] builder,
//! its [`Classification`] result and the [`ClassifyError`] error type.

mod classifier;
mod error;

pub use classifier::{Classification, Classifier};
pub use error::ClassifyError;
