//! Persistence of classification results.
//!
//! A result spans three cache entries. They are written in a fixed order:
//!
//! 1. `{id}_classified`   colored mask, PNG
//! 2. `{id}_class_colors` color table, JSON
//! 3. `{id}_metadata`     image record with the classification fields set
//!
//! The record goes last, so a reader that sees `classified` set can rely on
//! the artifacts being present. A failure part-way leaves stale or extra
//! artifacts behind but never a record pointing at missing ones.

use std::sync::Arc;
use std::time::Duration;

use raster_classify::{ClassColorTable, ClassProportions, ColoredMask};

use super::image_cache::ImageCache;
use super::keys;
use crate::error::ClassificationError;
use crate::models::{ClassificationModel, ImageRecord};
use crate::rendering::png_codec;

/// Output of one successful classification run for one image.
#[derive(Debug, Clone)]
pub struct ClassificationResult {
    pub image_id: String,
    pub model: ClassificationModel,
    pub n_classes: usize,
    pub mask: ColoredMask,
    pub proportions: ClassProportions,
    pub colors: ClassColorTable,
}

/// Reads and writes classification artifacts through the cache.
pub struct ResultStore {
    cache: Arc<dyn ImageCache>,
    ttl: Option<Duration>,
}

impl ResultStore {
    pub fn new(cache: Arc<dyn ImageCache>, ttl: Option<Duration>) -> Self {
        Self { cache, ttl }
    }

    /// Write `result` and the updated metadata of `record`, metadata last.
    ///
    /// Returns the record as stored.
    pub fn persist(
        &self,
        record: &ImageRecord,
        result: &ClassificationResult,
    ) -> Result<ImageRecord, ClassificationError> {
        let id = &result.image_id;

        let mask_png = png_codec::encode(result.mask.as_image())?;
        let colors_json = serde_json::to_vec(result.colors.colors()).map_err(|source| {
            ClassificationError::Corrupt {
                key: keys::class_colors(id),
                source,
            }
        })?;

        let mut updated = record.clone();
        updated.mark_classified(&result.model, &result.proportions);
        let record_json = self.encode_record(&updated)?;

        self.cache.set(&keys::classified(id), mask_png, self.ttl)?;
        self.cache.set(&keys::class_colors(id), colors_json, self.ttl)?;
        self.cache.set(&keys::metadata(id), record_json, self.ttl)?;

        tracing::debug!(image_id = %id, n_classes = result.n_classes, "Persisted classification result");
        Ok(updated)
    }

    /// Metadata record, `None` if absent.
    pub fn load_record(&self, image_id: &str) -> Result<Option<ImageRecord>, ClassificationError> {
        let key = keys::metadata(image_id);
        match self.cache.get(&key)? {
            Some(bytes) => serde_json::from_slice(&bytes)
                .map(Some)
                .map_err(|source| ClassificationError::Corrupt { key, source }),
            None => Ok(None),
        }
    }

    /// Store a metadata record on its own (ingest, reset).
    pub fn save_record(&self, record: &ImageRecord) -> Result<(), ClassificationError> {
        let json = self.encode_record(record)?;
        self.cache.set(&keys::metadata(&record.id), json, self.ttl)?;
        Ok(())
    }

    pub fn load_colors(&self, image_id: &str) -> Result<Option<ClassColorTable>, ClassificationError> {
        let key = keys::class_colors(image_id);
        match self.cache.get(&key)? {
            Some(bytes) => serde_json::from_slice::<Vec<[u8; 3]>>(&bytes)
                .map(|colors| Some(ClassColorTable::new(colors)))
                .map_err(|source| ClassificationError::Corrupt { key, source }),
            None => Ok(None),
        }
    }

    pub fn load_mask_png(&self, image_id: &str) -> Result<Option<Vec<u8>>, ClassificationError> {
        Ok(self.cache.get(&keys::classified(image_id))?)
    }

    /// Remove the derived artifacts, leaving raw raster and metadata alone.
    pub fn clear_artifacts(&self, image_id: &str) -> Result<(), ClassificationError> {
        self.cache.delete(&keys::classified(image_id))?;
        self.cache.delete(&keys::class_colors(image_id))?;
        Ok(())
    }

    fn encode_record(&self, record: &ImageRecord) -> Result<Vec<u8>, ClassificationError> {
        serde_json::to_vec(record).map_err(|source| ClassificationError::Corrupt {
            key: keys::metadata(&record.id),
            source,
        })
    }
}
