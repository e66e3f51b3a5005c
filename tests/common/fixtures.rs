//! Test fixtures and constants.

use chrono::NaiveDate;
use landcover::models::{AppConfig, ImageRecord};
use landcover::rendering::png_codec;
use raster_classify::RasterImage;

/// Scene ids used across tests
pub mod ids {
    pub const SCENE: &str = "LC08_196027_20140204";
    pub const OTHER: &str = "LC08_196028_20140204";
    pub const UNKNOWN: &str = "no-such-scene";
}

/// Small, seeded pipeline so results are reproducible and fast
pub fn test_config() -> AppConfig {
    AppConfig {
        cache_ttl_secs: 0,
        target_size: 64,
        tile_grid: 1,
        seed: Some(42),
        ..AppConfig::default()
    }
}

pub fn capture_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2014, 2, 4).unwrap()
}

/// Unclassified record with fixed coordinates
pub fn record(id: &str) -> ImageRecord {
    ImageRecord::new(id, capture_date(), 46.5, 7.9, 0.1)
}

/// Left half dark vegetation, right half bright bare soil
pub fn two_region_png(width: usize, height: usize) -> Vec<u8> {
    let data = (0..width * height)
        .flat_map(|i| {
            if i % width < width / 2 {
                [34, 80, 40]
            } else {
                [210, 190, 160]
            }
        })
        .collect();
    encode(RasterImage::from_rgb(width, height, data).unwrap())
}

/// Horizontal intensity gradient, enough distinct values for many classes
pub fn gradient_png(width: usize, height: usize) -> Vec<u8> {
    let data = (0..width * height)
        .flat_map(|i| {
            let v = ((i % width) * 255 / (width - 1).max(1)) as u8;
            [v, v / 2 + 40, 255 - v]
        })
        .collect();
    encode(RasterImage::from_rgb(width, height, data).unwrap())
}

/// Single-channel PNG, which the pipeline rejects
pub fn grayscale_png(width: usize, height: usize) -> Vec<u8> {
    let data = (0..width * height).map(|i| (i % 256) as u8).collect();
    encode(RasterImage::new(width, height, 1, data).unwrap())
}

fn encode(image: RasterImage) -> Vec<u8> {
    png_codec::encode(&image).expect("fixture PNG encodes")
}
