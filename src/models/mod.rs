pub mod config;
pub mod image_record;
pub mod model;

pub use config::AppConfig;
pub use image_record::{ImageRecord, DEFAULT_DIM};
pub use model::{ClassificationModel, KMEANS_ID};
