//! Cache key layout for one image identity.

use crate::error::ClassificationError;

/// Suffixes that derived keys append to an image id.
pub const RESERVED_SUFFIXES: [&str; 3] = ["_metadata", "_classified", "_class_colors"];

/// Reject ids whose raw key would collide with another image's derived key.
pub fn validate_id(image_id: &str) -> Result<(), ClassificationError> {
    if image_id.is_empty() {
        return Err(ClassificationError::InvalidParameter(
            "image id must not be empty".to_string(),
        ));
    }
    if let Some(suffix) = RESERVED_SUFFIXES
        .iter()
        .find(|suffix| image_id.ends_with(*suffix))
    {
        return Err(ClassificationError::InvalidParameter(format!(
            "image id '{image_id}' must not end with '{suffix}'"
        )));
    }
    Ok(())
}

/// Raw raster (PNG bytes).
pub fn raw(image_id: &str) -> String {
    image_id.to_string()
}

/// [`ImageRecord`](crate::models::ImageRecord) as JSON.
pub fn metadata(image_id: &str) -> String {
    format!("{image_id}_metadata")
}

/// Colored class mask (PNG bytes).
pub fn classified(image_id: &str) -> String {
    format!("{image_id}_classified")
}

/// Class color table as JSON.
pub fn class_colors(image_id: &str) -> String {
    format!("{image_id}_class_colors")
}

/// Every key belonging to `image_id`, metadata first.
pub fn all(image_id: &str) -> [String; 4] {
    [
        metadata(image_id),
        classified(image_id),
        class_colors(image_id),
        raw(image_id),
    ]
}
