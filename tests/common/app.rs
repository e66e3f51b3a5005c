//! Test application factory for integration tests.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

use landcover::models::AppConfig;
use landcover::server::{build_router, create_app_state_with_cache};
use landcover::services::{ClassificationService, InMemoryCache};

use super::fixtures;

/// Test application with router and direct access to the cache
pub struct TestApp {
    router: axum::Router,
    pub cache: Arc<InMemoryCache>,
    pub service: Arc<ClassificationService>,
}

impl TestApp {
    /// Create a new test application with a small, seeded pipeline
    pub fn new() -> Self {
        Self::with_config(fixtures::test_config())
    }

    pub fn with_config(config: AppConfig) -> Self {
        let cache = Arc::new(InMemoryCache::new());
        let state = create_app_state_with_cache(config, cache.clone());
        let service = state.service.clone();

        // Build router using shared server module (same as production)
        let router = build_router(state);

        Self {
            router,
            cache,
            service,
        }
    }

    /// Make a GET request to the given path
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    /// Make a DELETE request to the given path
    pub async fn delete(&self, path: &str) -> TestResponse {
        self.request(Request::delete(path).body(Body::empty()).unwrap())
            .await
    }

    /// Make a PUT request with a PNG body
    pub async fn put_png(&self, path: &str, png: Vec<u8>) -> TestResponse {
        let request = Request::put(path)
            .header("Content-Type", "image/png")
            .body(Body::from(png))
            .unwrap();
        self.request(request).await
    }

    /// Make a POST request with JSON body
    pub async fn post_json(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::post(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.request(request).await
    }

    /// Send a request to the router
    async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Upload the two-region fixture scene under `id`
    pub async fn ingest(&self, id: &str) -> TestResponse {
        let path = format!("/api/images/{id}?lat=46.5&lon=7.9&date=2014-02-04");
        let response = self.put_png(&path, fixtures::two_region_png(64, 64)).await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.text());
        response
    }

    /// Classify `id` with k-means into `n_classes`
    pub async fn classify(&self, id: &str, n_classes: i64) -> TestResponse {
        let body = format!(r#"{{"model":"k-means","n_classes":{n_classes}}}"#);
        self.post_json(&format!("/api/images/{id}/classify"), &body)
            .await
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Test response with convenience methods
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Get body as string
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Get raw body bytes
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Check if response is a PNG image
    pub fn is_png(&self) -> bool {
        self.body.len() >= 8 && &self.body[0..8] == b"\x89PNG\r\n\x1a\n"
    }
}
