//! PNG decoding into rasters and encoding of rasters.

use std::io::Cursor;

use raster_classify::{ClassifyError, RasterImage};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("PNG decode error: {0}")]
    Decode(String),

    #[error("Unsupported PNG color type: {0}")]
    UnsupportedColor(String),

    #[error("PNG encode error: {0}")]
    Encode(String),

    #[error(transparent)]
    Raster(#[from] ClassifyError),
}

/// Decode PNG bytes into an 8-bit raster.
///
/// Palette, low-bit-depth and 16-bit images are normalized to 8 bits per
/// sample; the channel count follows the PNG color type (1–4).
pub fn decode(bytes: &[u8]) -> Result<RasterImage, CodecError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::normalize_to_color8());

    let mut reader = decoder
        .read_info()
        .map_err(|e| CodecError::Decode(e.to_string()))?;
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| CodecError::Decode(e.to_string()))?;
    buf.truncate(info.buffer_size());

    let channels = match info.color_type {
        png::ColorType::Grayscale => 1,
        png::ColorType::GrayscaleAlpha => 2,
        png::ColorType::Rgb => 3,
        png::ColorType::Rgba => 4,
        other => return Err(CodecError::UnsupportedColor(format!("{other:?}"))),
    };

    tracing::debug!(
        width = info.width,
        height = info.height,
        channels,
        "Decoded PNG"
    );

    Ok(RasterImage::new(
        info.width as usize,
        info.height as usize,
        channels,
        buf,
    )?)
}

/// Encode a raster as an 8-bit PNG.
pub fn encode(image: &RasterImage) -> Result<Vec<u8>, CodecError> {
    let color_type = match image.channels() {
        1 => png::ColorType::Grayscale,
        2 => png::ColorType::GrayscaleAlpha,
        3 => png::ColorType::Rgb,
        4 => png::ColorType::Rgba,
        n => return Err(CodecError::UnsupportedColor(format!("{n} channels"))),
    };
    let width = u32::try_from(image.width()).map_err(|e| CodecError::Encode(e.to_string()))?;
    let height = u32::try_from(image.height()).map_err(|e| CodecError::Encode(e.to_string()))?;

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(color_type);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        let mut writer = encoder
            .write_header()
            .map_err(|e| CodecError::Encode(e.to_string()))?;
        writer
            .write_image_data(image.data())
            .map_err(|e| CodecError::Encode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}
