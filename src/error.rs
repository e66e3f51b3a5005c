use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use raster_classify::ClassifyError;
use serde_json::json;
use thiserror::Error;

use crate::rendering::CodecError;
use crate::services::CacheError;

/// Errors surfaced by [`ClassificationService`](crate::services::ClassificationService).
#[derive(Debug, Error)]
pub enum ClassificationError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("Corrupt cache entry {key}: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Encode error: {0}")]
    Encode(String),

    #[error("Clustering error: {0}")]
    Clustering(String),
}

impl From<ClassifyError> for ClassificationError {
    fn from(e: ClassifyError) -> Self {
        match e {
            ClassifyError::InvalidImage(msg) => ClassificationError::InvalidImage(msg),
            ClassifyError::InvalidParameter(msg) => ClassificationError::InvalidParameter(msg),
            ClassifyError::Clustering(msg) => ClassificationError::Clustering(msg),
        }
    }
}

impl From<CodecError> for ClassificationError {
    fn from(e: CodecError) -> Self {
        match e {
            CodecError::Encode(msg) => ClassificationError::Encode(msg),
            CodecError::Raster(inner) => inner.into(),
            other => ClassificationError::InvalidImage(other.to_string()),
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ClassificationError> for ApiError {
    fn from(e: ClassificationError) -> Self {
        match e {
            ClassificationError::NotFound(id) => ApiError::NotFound(id),
            ClassificationError::InvalidImage(_) | ClassificationError::InvalidParameter(_) => {
                ApiError::BadRequest(e.to_string())
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = Json(json!({
            "status": status.as_u16(),
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_error_not_found() {
        let error = ClassificationError::NotFound("scene-1".to_string());
        assert_eq!(error.to_string(), "Not found: scene-1");
    }

    #[test]
    fn test_classification_error_from_classify_error() {
        let error: ClassificationError =
            ClassifyError::InvalidParameter("n_clusters must be at least 1, got 0".into()).into();
        assert_eq!(
            error.to_string(),
            "Invalid parameter: n_clusters must be at least 1, got 0"
        );

        let error: ClassificationError = ClassifyError::InvalidImage("gray".into()).into();
        assert!(matches!(error, ClassificationError::InvalidImage(_)));

        let error: ClassificationError = ClassifyError::Clustering("no rows".into()).into();
        assert!(matches!(ApiError::from(error), ApiError::Internal(_)));
    }

    #[test]
    fn test_classification_error_from_codec_error() {
        let error: ClassificationError = CodecError::Decode("bad signature".into()).into();
        assert_eq!(
            error.to_string(),
            "Invalid image: PNG decode error: bad signature"
        );

        let error: ClassificationError = CodecError::Encode("disk full".into()).into();
        assert!(matches!(error, ClassificationError::Encode(_)));
    }

    #[test]
    fn test_classification_error_cache() {
        let error: ClassificationError = CacheError::Poisoned.into();
        assert_eq!(error.to_string(), "Cache error: Cache lock poisoned");
    }

    #[test]
    fn test_api_error_display() {
        assert_eq!(
            ApiError::NotFound("scene-1".into()).to_string(),
            "Not found: scene-1"
        );
        assert_eq!(
            ApiError::BadRequest("empty body".into()).to_string(),
            "Bad request: empty body"
        );
        assert_eq!(
            ApiError::Internal("boom".into()).to_string(),
            "Internal error: boom"
        );
    }

    #[test]
    fn test_api_error_from_classification_error() {
        let api: ApiError = ClassificationError::NotFound("x".into()).into();
        assert!(matches!(api, ApiError::NotFound(_)));

        let api: ApiError = ClassificationError::InvalidParameter("k".into()).into();
        assert!(matches!(api, ApiError::BadRequest(_)));

        let api: ApiError = ClassificationError::Encode("e".into()).into();
        assert!(matches!(api, ApiError::Internal(_)));
    }

    #[test]
    fn test_api_error_into_response_status_codes() {
        let response = ApiError::NotFound("x".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = ApiError::BadRequest("x".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError::Internal("x".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
