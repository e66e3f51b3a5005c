//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Json, Response},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::api::{self, ClassifyRequest, ColorsResponse, IngestQuery, ProportionsResponse};
use crate::error::ApiError;
use crate::models::{AppConfig, ImageRecord};
use crate::services::{ClassificationService, ClassifyOutcome, ImageCache, InMemoryCache};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ClassificationService>,
}

/// Create application state backed by an in-process cache.
pub fn create_app_state(config: AppConfig) -> AppState {
    create_app_state_with_cache(config, Arc::new(InMemoryCache::new()))
}

/// Create application state on top of an existing cache.
pub fn create_app_state_with_cache(config: AppConfig, cache: Arc<dyn ImageCache>) -> AppState {
    AppState {
        service: Arc::new(ClassificationService::new(cache, &config)),
    }
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/images/:id",
            get(handle_get_image)
                .put(handle_put_image)
                .delete(handle_delete_image),
        )
        .route("/api/images/:id/classify", post(handle_classify))
        .route("/api/images/:id/proportions", get(handle_get_proportions))
        .route("/api/images/:id/colors", get(handle_get_colors))
        .route("/api/images/:id/classified", get(handle_get_classified))
        // Health check
        .route("/health", get(|| async { "OK" }))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

// Wrapper handlers to extract state components for the underlying API handlers

async fn handle_put_image(
    State(state): State<AppState>,
    path: Path<String>,
    query: Query<IngestQuery>,
    body: Bytes,
) -> Result<Response, ApiError> {
    api::handle_put_image(State(state.service), path, query, body).await
}

async fn handle_get_image(
    State(state): State<AppState>,
    path: Path<String>,
) -> Result<Json<ImageRecord>, ApiError> {
    api::handle_get_image(State(state.service), path).await
}

async fn handle_delete_image(
    State(state): State<AppState>,
    path: Path<String>,
) -> Result<StatusCode, ApiError> {
    api::handle_delete_image(State(state.service), path).await
}

async fn handle_classify(
    State(state): State<AppState>,
    path: Path<String>,
    body: Json<ClassifyRequest>,
) -> Result<Json<ClassifyOutcome>, ApiError> {
    api::handle_classify(State(state.service), path, body).await
}

async fn handle_get_proportions(
    State(state): State<AppState>,
    path: Path<String>,
) -> Result<Json<ProportionsResponse>, ApiError> {
    api::handle_get_proportions(State(state.service), path).await
}

async fn handle_get_colors(
    State(state): State<AppState>,
    path: Path<String>,
) -> Result<Json<ColorsResponse>, ApiError> {
    api::handle_get_colors(State(state.service), path).await
}

async fn handle_get_classified(
    State(state): State<AppState>,
    path: Path<String>,
) -> Result<Response, ApiError> {
    api::handle_get_classified(State(state.service), path).await
}
