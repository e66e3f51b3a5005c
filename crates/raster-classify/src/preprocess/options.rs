//! Preprocessing configuration.

/// Options for [`Preprocessor`](super::Preprocessor).
///
/// # Defaults
///
/// - Clip limit: 3.1 (relative to the mean histogram bin height)
/// - Tile grid: 10×10
/// - Target size: 256×256
///
/// # Example
///
/// ```
/// use raster_classify::PreprocessOptions;
///
/// let options = PreprocessOptions::new()
///     .clip_limit(2.0)
///     .tile_grid(8)
///     .target_size(128, 128);
/// assert_eq!(options.target_width, 128);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PreprocessOptions {
    /// Histogram clip limit for contrast-limited equalization.
    ///
    /// Each tile histogram is clipped at `clip_limit * tile_pixels / 256`
    /// before its CDF is built. Larger values allow stronger contrast.
    pub clip_limit: f32,

    /// Number of tiles along each axis for local equalization.
    pub tile_grid: usize,

    /// Width the classifier works at.
    pub target_width: usize,

    /// Height the classifier works at.
    pub target_height: usize,
}

impl Default for PreprocessOptions {
    fn default() -> Self {
        Self {
            clip_limit: 3.1,
            tile_grid: 10,
            target_width: 256,
            target_height: 256,
        }
    }
}

impl PreprocessOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn clip_limit(mut self, limit: f32) -> Self {
        self.clip_limit = limit;
        self
    }

    #[inline]
    pub fn tile_grid(mut self, tiles: usize) -> Self {
        self.tile_grid = tiles;
        self
    }

    #[inline]
    pub fn target_size(mut self, width: usize, height: usize) -> Self {
        self.target_width = width;
        self.target_height = height;
        self
    }
}
