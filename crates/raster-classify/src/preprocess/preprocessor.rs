//! Enhancement and normalization of raw rasters.
//!
//! # Pipeline
//!
//! 1. **Enhance** (`RasterImage -> RasterImage`)
//!    - sRGB → linear RGB → Oklab
//!    - CLAHE on the Oklab lightness plane only; `a`/`b` are untouched
//!    - Oklab → linear RGB (clamped) → sRGB bytes
//!
//! 2. **Normalize** (`RasterImage -> NormalizedImage`)
//!    - Bilinear resize to the target size
//!    - Bytes scaled to `f32` in 0.0..=1.0, no contrast change
//!
//! Both steps are pure: the input raster is left as it was.

use crate::api::ClassifyError;
use crate::color::{LinearRgb, Oklab, Srgb};
use crate::preprocess::PreprocessOptions;
use crate::raster::{Band, RasterImage};

use super::clahe::equalize;
use super::resize::resize_bilinear;

/// A resized raster with samples as floats in 0.0..=1.0.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedImage {
    pub width: usize,
    pub height: usize,
    pub channels: usize,
    /// Interleaved samples, row-major.
    pub data: Vec<f32>,
}

impl NormalizedImage {
    /// Extract one channel as a [`Band`].
    ///
    /// Fails with [`ClassifyError::InvalidParameter`] if `channel` does not exist.
    pub fn band(&self, channel: usize) -> Result<Band, ClassifyError> {
        if channel >= self.channels {
            return Err(ClassifyError::InvalidParameter(format!(
                "channel {channel} out of range for {}-channel image",
                self.channels
            )));
        }
        let values = self
            .data
            .iter()
            .skip(channel)
            .step_by(self.channels)
            .copied()
            .collect();
        Ok(Band::new(self.width, self.height, values))
    }
}

/// Stateless image preprocessor.
///
/// # Example
///
/// ```
/// use raster_classify::{PreprocessOptions, Preprocessor, RasterImage};
///
/// let preprocessor = Preprocessor::new(PreprocessOptions::new().target_size(8, 8));
/// let raw = RasterImage::from_rgb(4, 4, vec![90; 48]).unwrap();
///
/// let enhanced = preprocessor.enhance(&raw).unwrap();
/// let normalized = preprocessor.normalize(&enhanced).unwrap();
/// assert_eq!((normalized.width, normalized.height), (8, 8));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Preprocessor {
    options: PreprocessOptions,
}

impl Preprocessor {
    #[inline]
    pub fn new(options: PreprocessOptions) -> Self {
        Self { options }
    }

    #[inline]
    pub fn options(&self) -> &PreprocessOptions {
        &self.options
    }

    /// Equalize local contrast on lightness only.
    ///
    /// RGBA input loses its alpha channel; anything else that is not RGB
    /// fails with [`ClassifyError::InvalidImage`].
    pub fn enhance(&self, image: &RasterImage) -> Result<RasterImage, ClassifyError> {
        let rgb = image.to_rgb()?;
        let (width, height) = (rgb.width(), rgb.height());

        let lab: Vec<Oklab> = rgb
            .data()
            .chunks_exact(3)
            .map(|px| Oklab::from(LinearRgb::from(Srgb::from_u8(px[0], px[1], px[2]))))
            .collect();
        let lightness: Vec<f32> = lab.iter().map(|c| c.l).collect();

        let equalized = equalize(
            &lightness,
            width,
            height,
            self.options.clip_limit,
            self.options.tile_grid,
        );

        let data = lab
            .iter()
            .zip(equalized)
            .flat_map(|(c, l)| Srgb::from(LinearRgb::from(c.with_lightness(l)).clamped()).to_bytes())
            .collect();

        RasterImage::from_rgb(width, height, data)
    }

    /// Resize to the configured target size and scale to 0.0..=1.0.
    pub fn normalize(&self, image: &RasterImage) -> Result<NormalizedImage, ClassifyError> {
        normalize(
            image,
            self.options.target_width,
            self.options.target_height,
        )
    }
}

/// Resize `image` to `width × height` and scale samples to 0.0..=1.0.
pub fn normalize(
    image: &RasterImage,
    width: usize,
    height: usize,
) -> Result<NormalizedImage, ClassifyError> {
    let resized = resize_bilinear(image, width, height)?;
    Ok(NormalizedImage {
        width,
        height,
        channels: resized.channels(),
        data: resized.data().iter().map(|&v| v as f32 / 255.0).collect(),
    })
}
