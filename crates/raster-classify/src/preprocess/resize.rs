//! Resampling to the working grid.
//!
//! Thin wrapper over `image::imageops::resize` with the triangle (bilinear)
//! filter. The raster is viewed in place as an `ImageBuffer` of the matching
//! pixel type, so no copy is made before resampling.

use image::imageops::{self, FilterType};
use image::{ImageBuffer, Luma, LumaA, Pixel, Rgb, Rgba};

use crate::api::ClassifyError;
use crate::raster::RasterImage;

fn dimension(value: usize) -> Result<u32, ClassifyError> {
    u32::try_from(value)
        .map_err(|_| ClassifyError::InvalidParameter(format!("dimension {value} is too large")))
}

fn resample<P>(image: &RasterImage, width: u32, height: u32) -> Result<Vec<u8>, ClassifyError>
where
    P: Pixel<Subpixel = u8> + 'static,
{
    let source: ImageBuffer<P, &[u8]> = ImageBuffer::from_raw(
        dimension(image.width())?,
        dimension(image.height())?,
        image.data(),
    )
    .ok_or_else(|| ClassifyError::InvalidImage("raster buffer does not match its size".into()))?;

    Ok(imageops::resize(&source, width, height, FilterType::Triangle).into_raw())
}

/// Resize to `new_width × new_height`, keeping the channel count.
///
/// Same-size requests return an identical copy.
pub fn resize_bilinear(
    image: &RasterImage,
    new_width: usize,
    new_height: usize,
) -> Result<RasterImage, ClassifyError> {
    if new_width == 0 || new_height == 0 {
        return Err(ClassifyError::InvalidParameter(format!(
            "target size must be non-zero, got {new_width}x{new_height}"
        )));
    }
    if new_width == image.width() && new_height == image.height() {
        return Ok(image.clone());
    }

    let (width, height) = (dimension(new_width)?, dimension(new_height)?);
    let data = match image.channels() {
        1 => resample::<Luma<u8>>(image, width, height)?,
        2 => resample::<LumaA<u8>>(image, width, height)?,
        3 => resample::<Rgb<u8>>(image, width, height)?,
        4 => resample::<Rgba<u8>>(image, width, height)?,
        n => {
            return Err(ClassifyError::InvalidImage(format!(
                "unsupported channel count {n}"
            )))
        }
    };

    RasterImage::new(new_width, new_height, image.channels(), data)
}
