//! Landcover - land-cover classification for satellite imagery
//!
//! Stores raw scene rasters in a key-value cache, classifies them with
//! [`raster_classify`] and serves the colored masks and class statistics
//! over HTTP. This library exposes modules for integration testing.

pub mod api;
pub mod error;
pub mod models;
pub mod rendering;
pub mod server;
pub mod services;
