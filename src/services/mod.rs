pub mod classification;
pub mod image_cache;
pub mod keys;
pub mod result_store;

pub use classification::{ClassificationService, ClassifyOutcome};
pub use image_cache::{CacheError, ImageCache, InMemoryCache};
pub use result_store::{ClassificationResult, ResultStore};
