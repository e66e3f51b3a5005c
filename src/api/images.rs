use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use crate::error::{ApiError, ClassificationError};
use crate::models::{ClassificationModel, ImageRecord, DEFAULT_DIM, KMEANS_ID};
use crate::services::{ClassificationService, ClassifyOutcome};

/// Scene metadata supplied when uploading a raster
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IngestQuery {
    /// Scene center latitude
    pub lat: f64,
    /// Scene center longitude
    pub lon: f64,
    /// Capture date (YYYY-MM-DD)
    pub date: NaiveDate,
    /// Scene width and height in degrees (default 0.1)
    #[serde(default)]
    pub dim: Option<f64>,
    /// Optional display name
    #[serde(default)]
    pub name: Option<String>,
}

/// Request body for a classification run
#[derive(Debug, Deserialize, ToSchema)]
pub struct ClassifyRequest {
    /// Model identifier ("k-means")
    #[serde(default = "default_model")]
    pub model: String,
    /// Number of classes, 1 to 256
    pub n_classes: i64,
}

fn default_model() -> String {
    KMEANS_ID.to_string()
}

/// Class proportions of the last classification
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProportionsResponse {
    pub image_id: String,
    /// Fraction of pixels per class id, three decimals
    pub proportions: Vec<f64>,
}

/// Class color table of the last classification
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ColorsResponse {
    pub image_id: String,
    /// `#rrggbb` per class id
    pub hex: Vec<String>,
    /// RGB triple per class id
    #[schema(value_type = Vec<Vec<u8>>)]
    pub rgb: Vec<[u8; 3]>,
}

/// Run blocking service work off the async runtime.
async fn blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ClassificationError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Internal(format!("worker task failed: {e}")))?
        .map_err(ApiError::from)
}

/// Upload a raw satellite image
///
/// Stores the PNG body under the given id together with a fresh,
/// unclassified metadata record. Replaces any previous image and its
/// classification.
#[utoipa::path(
    put,
    path = "/api/images/{id}",
    request_body(content = Vec<u8>, content_type = "image/png", description = "Raw RGB(A) PNG"),
    params(
        ("id" = String, Path, description = "Image identity"),
        IngestQuery,
    ),
    responses(
        (status = 201, description = "Image stored", body = ImageRecord),
        (status = 400, description = "Body is not a usable PNG"),
    ),
    tag = "Images"
)]
pub async fn handle_put_image(
    State(service): State<Arc<ClassificationService>>,
    Path(id): Path<String>,
    Query(query): Query<IngestQuery>,
    body: Bytes,
) -> Result<Response, ApiError> {
    if body.is_empty() {
        return Err(ApiError::BadRequest("empty image body".to_string()));
    }

    let mut record = ImageRecord::new(
        id,
        query.date,
        query.lat,
        query.lon,
        query.dim.unwrap_or(DEFAULT_DIM),
    );
    record.name = query.name;

    let stored = blocking(move || service.ingest(record, &body)).await?;
    Ok((StatusCode::CREATED, Json(stored)).into_response())
}

/// Get image metadata
#[utoipa::path(
    get,
    path = "/api/images/{id}",
    params(("id" = String, Path, description = "Image identity")),
    responses(
        (status = 200, description = "Metadata record", body = ImageRecord),
        (status = 404, description = "Unknown image"),
    ),
    tag = "Images"
)]
pub async fn handle_get_image(
    State(service): State<Arc<ClassificationService>>,
    Path(id): Path<String>,
) -> Result<Json<ImageRecord>, ApiError> {
    let record = blocking(move || service.get_record(&id)).await?;
    Ok(Json(record))
}

/// Delete an image and all derived artifacts
#[utoipa::path(
    delete,
    path = "/api/images/{id}",
    params(("id" = String, Path, description = "Image identity")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Unknown image"),
    ),
    tag = "Images"
)]
pub async fn handle_delete_image(
    State(service): State<Arc<ClassificationService>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    blocking(move || service.delete(&id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Classify an image
///
/// Unsupported models are answered with `classified: false` and a status
/// message; nothing is stored in that case.
#[utoipa::path(
    post,
    path = "/api/images/{id}/classify",
    request_body = ClassifyRequest,
    params(("id" = String, Path, description = "Image identity")),
    responses(
        (status = 200, description = "Classification outcome", body = ClassifyOutcome),
        (status = 400, description = "Invalid class count or unusable image"),
        (status = 404, description = "Unknown image"),
    ),
    tag = "Classification"
)]
pub async fn handle_classify(
    State(service): State<Arc<ClassificationService>>,
    Path(id): Path<String>,
    Json(request): Json<ClassifyRequest>,
) -> Result<Json<ClassifyOutcome>, ApiError> {
    let model = ClassificationModel::from(request.model.as_str());
    let outcome =
        blocking(move || service.classify(&id, &model, request.n_classes)).await?;
    Ok(Json(outcome))
}

/// Get class proportions
#[utoipa::path(
    get,
    path = "/api/images/{id}/proportions",
    params(("id" = String, Path, description = "Image identity")),
    responses(
        (status = 200, description = "Proportions per class", body = ProportionsResponse),
        (status = 404, description = "Unknown or unclassified image"),
    ),
    tag = "Classification"
)]
pub async fn handle_get_proportions(
    State(service): State<Arc<ClassificationService>>,
    Path(id): Path<String>,
) -> Result<Json<ProportionsResponse>, ApiError> {
    let lookup = id.clone();
    let proportions = blocking(move || service.get_proportions(&lookup)).await?;
    Ok(Json(ProportionsResponse {
        image_id: id,
        proportions: proportions.values(),
    }))
}

/// Get the class color table
#[utoipa::path(
    get,
    path = "/api/images/{id}/colors",
    params(("id" = String, Path, description = "Image identity")),
    responses(
        (status = 200, description = "Color per class", body = ColorsResponse),
        (status = 404, description = "Unknown or unclassified image"),
    ),
    tag = "Classification"
)]
pub async fn handle_get_colors(
    State(service): State<Arc<ClassificationService>>,
    Path(id): Path<String>,
) -> Result<Json<ColorsResponse>, ApiError> {
    let lookup = id.clone();
    let table = blocking(move || service.get_color_table(&lookup)).await?;
    Ok(Json(ColorsResponse {
        image_id: id,
        hex: table.to_hex(),
        rgb: table.into_inner(),
    }))
}

/// Get the colored class mask
#[utoipa::path(
    get,
    path = "/api/images/{id}/classified",
    params(("id" = String, Path, description = "Image identity")),
    responses(
        (status = 200, description = "PNG image", content_type = "image/png"),
        (status = 404, description = "Unknown or unclassified image"),
    ),
    tag = "Classification"
)]
pub async fn handle_get_classified(
    State(service): State<Arc<ClassificationService>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let png_bytes = blocking(move || service.get_classified_png(&id)).await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "image/png"),
            (header::CONTENT_LENGTH, &png_bytes.len().to_string()),
        ],
        Bytes::from(png_bytes),
    )
        .into_response())
}
