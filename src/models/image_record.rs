use chrono::NaiveDate;
use raster_classify::ClassProportions;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ClassificationModel;

/// Default ground extent of a scene, in degrees.
pub const DEFAULT_DIM: f64 = 0.1;

/// Metadata stored alongside a raw raster.
///
/// The classification fields stay `None` until a run succeeds and are
/// replaced wholesale by every later run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ImageRecord {
    /// Image identity, also the cache key of the raw raster
    pub id: String,
    /// Optional display name
    #[serde(default)]
    pub name: Option<String>,
    /// Capture date
    pub date: NaiveDate,
    pub lat: f64,
    pub lon: f64,
    /// Scene width and height in degrees
    pub dim: f64,
    /// Model of the last successful classification
    #[serde(default)]
    pub classified: Option<String>,
    /// Class count of the last successful classification
    #[serde(default)]
    pub n_classes: Option<usize>,
    /// Per-class proportions of the last successful classification
    #[serde(default)]
    pub class_distribution: Option<Vec<f64>>,
}

impl ImageRecord {
    pub fn new(id: impl Into<String>, date: NaiveDate, lat: f64, lon: f64, dim: f64) -> Self {
        Self {
            id: id.into(),
            name: None,
            date,
            lat,
            lon,
            dim,
            classified: None,
            n_classes: None,
            class_distribution: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn is_classified(&self) -> bool {
        self.classified.is_some()
    }

    /// Record a successful classification run.
    pub fn mark_classified(&mut self, model: &ClassificationModel, proportions: &ClassProportions) {
        self.classified = Some(model.to_string());
        self.n_classes = Some(proportions.len());
        self.class_distribution = Some(proportions.values());
    }

    /// Back to the unclassified state.
    pub fn clear_classification(&mut self) {
        self.classified = None;
        self.n_classes = None;
        self.class_distribution = None;
    }
}
