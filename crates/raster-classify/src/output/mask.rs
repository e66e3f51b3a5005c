//! Colored class masks.

use crate::api::ClassifyError;
use crate::cluster::LabelGrid;
use crate::palette::{ClassColorTable, ColorRamp};
use crate::raster::RasterImage;

/// An RGB raster where every pixel carries its class color.
///
/// Same dimensions as the [`LabelGrid`] it was painted from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColoredMask {
    image: RasterImage,
}

impl ColoredMask {
    /// Paint `labels` with `table`.
    ///
    /// Fails with [`ClassifyError::InvalidParameter`] if a label has no
    /// entry in the table.
    pub fn paint(labels: &LabelGrid, table: &ClassColorTable) -> Result<Self, ClassifyError> {
        let mut data = Vec::with_capacity(labels.len() * 3);
        for &label in labels.labels() {
            let color = table.colors().get(label as usize).ok_or_else(|| {
                ClassifyError::InvalidParameter(format!(
                    "label {label} has no color in a {}-entry table",
                    table.len()
                ))
            })?;
            data.extend_from_slice(color);
        }
        Ok(Self {
            image: RasterImage::from_rgb(labels.width(), labels.height(), data)?,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.image.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.image.height()
    }

    /// RGB color at column `x`, row `y`.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let px = self.image.pixel(x, y);
        [px[0], px[1], px[2]]
    }

    /// Interleaved RGB bytes, row-major.
    #[inline]
    pub fn data(&self) -> &[u8] {
        self.image.data()
    }

    pub fn as_image(&self) -> &RasterImage {
        &self.image
    }

    pub fn into_image(self) -> RasterImage {
        self.image
    }
}

/// Color table for `n_classes` from the default ramp, and the mask
/// painted with it.
///
/// ```
/// use raster_classify::{render, LabelGrid};
///
/// let labels = LabelGrid::new(2, 1, 2, vec![1, 0]).unwrap();
/// let (mask, table) = render(&labels, 2).unwrap();
///
/// assert_eq!(table.to_hex(), vec!["#440154", "#fde725"]);
/// assert_eq!(mask.pixel(0, 0), table.color(1));
/// ```
pub fn render(
    labels: &LabelGrid,
    n_classes: usize,
) -> Result<(ColoredMask, ClassColorTable), ClassifyError> {
    render_with(&ColorRamp::default(), labels, n_classes)
}

/// [`render`] with an explicit ramp.
pub fn render_with(
    ramp: &ColorRamp,
    labels: &LabelGrid,
    n_classes: usize,
) -> Result<(ColoredMask, ClassColorTable), ClassifyError> {
    let table = ramp.class_colors(n_classes);
    let mask = ColoredMask::paint(labels, &table)?;
    Ok((mask, table))
}
