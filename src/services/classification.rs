//! Classification orchestrator.
//!
//! Loads a raw raster from the cache, runs the classifier and persists the
//! result. Every call runs synchronously on the calling thread; async
//! callers should move it onto a blocking task.

use std::sync::Arc;
use std::time::{Duration, Instant};

use raster_classify::{ClassColorTable, ClassProportions, Classifier};
use serde::Serialize;
use utoipa::ToSchema;

use super::image_cache::ImageCache;
use super::keys;
use super::result_store::{ClassificationResult, ResultStore};
use crate::error::ClassificationError;
use crate::models::{AppConfig, ClassificationModel, ImageRecord};
use crate::rendering::png_codec;

/// What a classify call did.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ClassifyOutcome {
    /// Human-readable summary
    pub status_message: String,
    /// Whether a result was produced and stored
    pub classified: bool,
}

/// Runs classifications against images held in an [`ImageCache`].
pub struct ClassificationService {
    cache: Arc<dyn ImageCache>,
    store: ResultStore,
    classifier: Classifier,
    ttl: Option<Duration>,
}

impl ClassificationService {
    pub fn new(cache: Arc<dyn ImageCache>, config: &AppConfig) -> Self {
        Self::with_classifier(cache, config.classifier(), config.cache_ttl())
    }

    pub fn with_classifier(
        cache: Arc<dyn ImageCache>,
        classifier: Classifier,
        ttl: Option<Duration>,
    ) -> Self {
        Self {
            store: ResultStore::new(cache.clone(), ttl),
            cache,
            classifier,
            ttl,
        }
    }

    /// Store a raw PNG raster and a fresh, unclassified record for it.
    ///
    /// Any classification of a previous raster under the same id is dropped.
    pub fn ingest(
        &self,
        record: ImageRecord,
        png_bytes: &[u8],
    ) -> Result<ImageRecord, ClassificationError> {
        keys::validate_id(&record.id)?;
        let image = png_codec::decode(png_bytes)?;

        let mut record = record;
        record.clear_classification();

        // Unclassified record first, so a failure further down never leaves
        // the old classification describing the new raster
        self.store.save_record(&record)?;
        self.store.clear_artifacts(&record.id)?;
        self.cache
            .set(&keys::raw(&record.id), png_bytes.to_vec(), self.ttl)?;

        tracing::info!(
            image_id = %record.id,
            width = image.width(),
            height = image.height(),
            "Ingested image"
        );
        Ok(record)
    }

    /// Classify the cached raster `image_id` into `n_clusters` classes.
    ///
    /// An unsupported model is not an error: the outcome says so and
    /// nothing is written.
    pub fn classify(
        &self,
        image_id: &str,
        model: &ClassificationModel,
        n_clusters: i64,
    ) -> Result<ClassifyOutcome, ClassificationError> {
        let start = Instant::now();
        keys::validate_id(image_id)?;

        let raw = self
            .cache
            .get(&keys::raw(image_id))?
            .ok_or_else(|| ClassificationError::NotFound(image_id.to_string()))?;

        if !model.is_supported() {
            tracing::warn!(image_id, model = %model, "Unsupported classification model");
            return Ok(ClassifyOutcome {
                status_message: format!("Model '{model}' is not supported yet"),
                classified: false,
            });
        }

        let record = self
            .store
            .load_record(image_id)?
            .ok_or_else(|| ClassificationError::NotFound(keys::metadata(image_id)))?;

        let image = png_codec::decode(&raw)?;
        let classification = self.classifier.classify(&image, n_clusters)?;
        tracing::debug!(
            image_id,
            n_clusters,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Classification computed"
        );

        let result = ClassificationResult {
            image_id: image_id.to_string(),
            model: model.clone(),
            n_classes: classification.proportions.len(),
            mask: classification.mask,
            proportions: classification.proportions,
            colors: classification.colors,
        };
        self.store.persist(&record, &result)?;

        // Keep the raster alive as long as the artifacts derived from it
        if let Some(ttl) = self.ttl {
            if let Err(e) = self.cache.expire(&keys::raw(image_id), ttl) {
                tracing::warn!(image_id, error = %e, "Failed to refresh raster TTL");
            }
        }

        tracing::info!(
            image_id,
            model = %model,
            n_clusters,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Image classified"
        );

        Ok(ClassifyOutcome {
            status_message: format!(
                "Classified '{image_id}' with {model} into {} classes",
                result.n_classes
            ),
            classified: true,
        })
    }

    /// Class proportions of the last classification.
    pub fn get_proportions(&self, image_id: &str) -> Result<ClassProportions, ClassificationError> {
        let record = self.get_record(image_id)?;
        record
            .class_distribution
            .as_deref()
            .map(ClassProportions::from_values)
            .ok_or_else(|| not_classified(image_id))
    }

    /// Color table of the last classification.
    pub fn get_color_table(&self, image_id: &str) -> Result<ClassColorTable, ClassificationError> {
        self.classified_record(image_id)?;
        self.store
            .load_colors(image_id)?
            .ok_or_else(|| not_classified(image_id))
    }

    /// Colored mask of the last classification, PNG encoded.
    pub fn get_classified_png(&self, image_id: &str) -> Result<Vec<u8>, ClassificationError> {
        self.classified_record(image_id)?;
        self.store
            .load_mask_png(image_id)?
            .ok_or_else(|| not_classified(image_id))
    }

    pub fn get_record(&self, image_id: &str) -> Result<ImageRecord, ClassificationError> {
        keys::validate_id(image_id)?;
        self.store
            .load_record(image_id)?
            .ok_or_else(|| ClassificationError::NotFound(image_id.to_string()))
    }

    /// Remove the raster and everything derived from it.
    pub fn delete(&self, image_id: &str) -> Result<(), ClassificationError> {
        keys::validate_id(image_id)?;
        let known = self.cache.exists(&keys::raw(image_id))?
            || self.cache.exists(&keys::metadata(image_id))?;
        if !known {
            return Err(ClassificationError::NotFound(image_id.to_string()));
        }

        // Metadata first, so a partial delete never leaves a classified
        // record without its artifacts
        for key in keys::all(image_id) {
            self.cache.delete(&key)?;
        }

        tracing::info!(image_id, "Deleted image");
        Ok(())
    }

    fn classified_record(&self, image_id: &str) -> Result<ImageRecord, ClassificationError> {
        let record = self.get_record(image_id)?;
        if record.is_classified() {
            Ok(record)
        } else {
            Err(not_classified(image_id))
        }
    }
}

fn not_classified(image_id: &str) -> ClassificationError {
    ClassificationError::NotFound(format!("no classification for {image_id}"))
}
