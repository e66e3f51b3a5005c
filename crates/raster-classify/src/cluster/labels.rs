//! Per-pixel class assignments.

use crate::api::ClassifyError;

/// A `width × height` grid of class ids, row-major, each `< n_classes`.
///
/// Not every class needs to be present: k-means can leave a centroid
/// without members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelGrid {
    width: usize,
    height: usize,
    n_classes: usize,
    labels: Vec<u8>,
}

impl LabelGrid {
    /// Wrap a label buffer, checking its length and that every label is
    /// below `n_classes`.
    ///
    /// ```
    /// use raster_classify::LabelGrid;
    ///
    /// let grid = LabelGrid::new(2, 2, 3, vec![0, 2, 2, 1]).unwrap();
    /// assert_eq!(grid.get(1, 0), 2);
    /// assert!(LabelGrid::new(2, 2, 2, vec![0, 2, 2, 1]).is_err());
    /// ```
    pub fn new(
        width: usize,
        height: usize,
        n_classes: usize,
        labels: Vec<u8>,
    ) -> Result<Self, ClassifyError> {
        if labels.len() != width * height {
            return Err(ClassifyError::InvalidParameter(format!(
                "{} labels for a {width}x{height} grid",
                labels.len()
            )));
        }
        if let Some(&bad) = labels.iter().find(|&&l| l as usize >= n_classes) {
            return Err(ClassifyError::InvalidParameter(format!(
                "label {bad} out of range for {n_classes} classes"
            )));
        }
        Ok(Self {
            width,
            height,
            n_classes,
            labels,
        })
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
    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    #[inline]
    pub fn labels(&self) -> &[u8] {
        &self.labels
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Label at column `x`, row `y`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.labels[y * self.width + x]
    }

    /// Pixel count per class id, `n_classes` entries.
    pub fn counts(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.n_classes];
        for &label in &self.labels {
            counts[label as usize] += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_include_absent_classes() {
        let grid = LabelGrid::new(3, 1, 4, vec![3, 0, 3]).unwrap();
        assert_eq!(grid.counts(), vec![1, 0, 0, 2]);
    }

    #[test]
    fn test_length_mismatch() {
        assert!(matches!(
            LabelGrid::new(2, 2, 2, vec![0; 3]),
            Err(ClassifyError::InvalidParameter(_))
        ));
    }
}
