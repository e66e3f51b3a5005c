//! Decoded rasters and single-channel bands.
//!
//! [`RasterImage`] holds interleaved 8-bit samples in row-major order.
//! It is never mutated after construction: every preprocessing step
//! returns a new raster.

use crate::api::ClassifyError;

/// A decoded image: `width × height × channels` bytes, row-major,
/// channels interleaved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: usize,
    height: usize,
    channels: usize,
    data: Vec<u8>,
}

impl RasterImage {
    /// Wrap a sample buffer.
    ///
    /// Fails with [`ClassifyError::InvalidImage`] if a dimension is zero,
    /// `channels` is not 1..=4, or the buffer length does not match.
    ///
    /// ```
    /// use raster_classify::RasterImage;
    ///
    /// let image = RasterImage::new(2, 1, 3, vec![255, 0, 0, 0, 0, 255]).unwrap();
    /// assert_eq!(image.pixel(1, 0), &[0, 0, 255]);
    /// ```
    pub fn new(
        width: usize,
        height: usize,
        channels: usize,
        data: Vec<u8>,
    ) -> Result<Self, ClassifyError> {
        if width == 0 || height == 0 {
            return Err(ClassifyError::InvalidImage(format!(
                "empty raster ({width}x{height})"
            )));
        }
        if !(1..=4).contains(&channels) {
            return Err(ClassifyError::InvalidImage(format!(
                "unsupported channel count {channels}"
            )));
        }
        let expected = width * height * channels;
        if data.len() != expected {
            return Err(ClassifyError::InvalidImage(format!(
                "buffer holds {} bytes, {width}x{height}x{channels} needs {expected}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Wrap an interleaved RGB buffer.
    pub fn from_rgb(width: usize, height: usize, data: Vec<u8>) -> Result<Self, ClassifyError> {
        Self::new(width, height, 3, data)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Samples of the pixel at column `x`, row `y`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> &[u8] {
        let start = (y * self.width + x) * self.channels;
        &self.data[start..start + self.channels]
    }

    /// View this raster as RGB.
    ///
    /// RGB passes through, RGBA drops its alpha channel. Gray rasters are
    /// rejected: they carry no chroma to separate from luminance.
    pub fn to_rgb(&self) -> Result<RasterImage, ClassifyError> {
        match self.channels {
            3 => Ok(self.clone()),
            4 => Ok(RasterImage {
                width: self.width,
                height: self.height,
                channels: 3,
                data: self
                    .data
                    .chunks_exact(4)
                    .flat_map(|px| [px[0], px[1], px[2]])
                    .collect(),
            }),
            n => Err(ClassifyError::InvalidImage(format!(
                "expected an RGB raster, got {n} channel(s)"
            ))),
        }
    }
}

/// A single 2D channel of floating-point intensities, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Band {
    width: usize,
    height: usize,
    values: Vec<f32>,
}

impl Band {
    /// # Panics (debug only)
    ///
    /// Debug-asserts that `values.len() == width * height`.
    pub fn new(width: usize, height: usize, values: Vec<f32>) -> Self {
        debug_assert_eq!(
            values.len(),
            width * height,
            "band length ({}) must match {}x{}",
            values.len(),
            width,
            height
        );
        Self {
            width,
            height,
            values,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates_buffer() {
        assert!(RasterImage::new(2, 2, 3, vec![0; 12]).is_ok());
        assert!(matches!(
            RasterImage::new(2, 2, 3, vec![0; 11]),
            Err(ClassifyError::InvalidImage(_))
        ));
        assert!(matches!(
            RasterImage::new(0, 2, 3, vec![]),
            Err(ClassifyError::InvalidImage(_))
        ));
        assert!(matches!(
            RasterImage::new(1, 1, 5, vec![0; 5]),
            Err(ClassifyError::InvalidImage(_))
        ));
    }

    #[test]
    fn test_pixel_access() {
        let image = RasterImage::from_rgb(2, 2, (0..12).collect()).unwrap();
        assert_eq!(image.pixel(0, 0), &[0, 1, 2]);
        assert_eq!(image.pixel(1, 1), &[9, 10, 11]);
    }

    #[test]
    fn test_rgba_drops_alpha() {
        let image = RasterImage::new(2, 1, 4, vec![1, 2, 3, 255, 4, 5, 6, 0]).unwrap();
        let rgb = image.to_rgb().unwrap();
        assert_eq!(rgb.channels(), 3);
        assert_eq!(rgb.data(), &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_gray_is_not_rgb() {
        let image = RasterImage::new(2, 2, 1, vec![0; 4]).unwrap();
        assert!(matches!(image.to_rgb(), Err(ClassifyError::InvalidImage(_))));
    }
}
