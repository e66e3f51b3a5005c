use raster_classify::{Classifier, PreprocessOptions};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Application configuration loaded from a YAML file.
///
/// Every field is optional in the file; missing fields take their defaults.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Lifetime of cached rasters and artifacts in seconds (0 = no expiry)
    pub cache_ttl_secs: u64,

    /// Side length of the square working grid labels are computed at
    pub target_size: usize,

    /// CLAHE clip limit
    pub clip_limit: f32,

    /// CLAHE tiles per side
    pub tile_grid: usize,

    /// K-means iteration cap
    pub max_iter: usize,

    /// K-means convergence threshold on the change in inertia
    pub tolerance: f32,

    /// Fixed k-means seed; unset draws a fresh seed per run
    pub seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cache_ttl_secs: 2 * 60 * 60,
            target_size: 256,
            clip_limit: 3.1,
            tile_grid: 10,
            max_iter: 100,
            tolerance: 1e-4,
            seed: None,
        }
    }
}

impl AppConfig {
    /// Load from `path`, falling back to defaults when the file is absent,
    /// unreadable, or invalid.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            tracing::debug!("No config file given, using defaults");
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str::<Self>(&content) {
                Ok(config) => {
                    let config = config.validated();
                    tracing::info!(
                        path = %path.display(),
                        target_size = config.target_size,
                        cache_ttl_secs = config.cache_ttl_secs,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, path = %path.display(), "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Replace values the pipeline cannot run with by their defaults.
    fn validated(mut self) -> Self {
        let defaults = Self::default();
        if self.target_size == 0 {
            tracing::warn!("target_size must be positive, using {}", defaults.target_size);
            self.target_size = defaults.target_size;
        }
        if self.tile_grid == 0 {
            tracing::warn!("tile_grid must be positive, using {}", defaults.tile_grid);
            self.tile_grid = defaults.tile_grid;
        }
        if self.clip_limit.is_nan() || self.clip_limit <= 0.0 {
            tracing::warn!("clip_limit must be positive, using {}", defaults.clip_limit);
            self.clip_limit = defaults.clip_limit;
        }
        if self.max_iter == 0 {
            tracing::warn!("max_iter must be positive, using {}", defaults.max_iter);
            self.max_iter = defaults.max_iter;
        }
        self
    }

    /// TTL applied to every cache write, `None` when expiry is disabled.
    pub fn cache_ttl(&self) -> Option<Duration> {
        (self.cache_ttl_secs > 0).then(|| Duration::from_secs(self.cache_ttl_secs))
    }

    pub fn preprocess_options(&self) -> PreprocessOptions {
        PreprocessOptions::new()
            .clip_limit(self.clip_limit)
            .tile_grid(self.tile_grid)
            .target_size(self.target_size, self.target_size)
    }

    /// Classifier configured from this file.
    pub fn classifier(&self) -> Classifier {
        Classifier::new()
            .preprocess(self.preprocess_options())
            .max_iter(self.max_iter)
            .tolerance(self.tolerance)
            .maybe_seed(self.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.cache_ttl_secs, 7200);
        assert_eq!(config.target_size, 256);
        assert_eq!(config.clip_limit, 3.1);
        assert_eq!(config.tile_grid, 10);
        assert_eq!(config.max_iter, 100);
        assert_eq!(config.seed, None);
        assert_eq!(config.cache_ttl(), Some(Duration::from_secs(7200)));
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: AppConfig = serde_yaml::from_str("target_size: 128\nseed: 42\n").unwrap();
        assert_eq!(config.target_size, 128);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.tile_grid, 10);
        assert_eq!(config.cache_ttl_secs, 7200);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "cache_ttl_secs: 0\nclip_limit: 2.0\ntile_grid: 8").unwrap();

        let config = AppConfig::load(Some(file.path()));
        assert_eq!(config.cache_ttl(), None);
        assert_eq!(config.clip_limit, 2.0);
        assert_eq!(config.tile_grid, 8);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = AppConfig::load(Some(Path::new("/nonexistent/landcover.yaml")));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_invalid_yaml_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "target_size: [not, a, number]").unwrap();
        assert_eq!(AppConfig::load(Some(file.path())), AppConfig::default());
    }

    #[test]
    fn test_invalid_values_replaced() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "target_size: 0\ntile_grid: 0\nmax_iter: 0").unwrap();

        let config = AppConfig::load(Some(file.path()));
        assert_eq!(config.target_size, 256);
        assert_eq!(config.tile_grid, 10);
        assert_eq!(config.max_iter, 100);
    }

    #[test]
    fn test_classifier_uses_target_size() {
        let config = AppConfig {
            target_size: 64,
            ..AppConfig::default()
        };
        let options = config.classifier().options().clone();
        assert_eq!((options.target_width, options.target_height), (64, 64));
    }
}
