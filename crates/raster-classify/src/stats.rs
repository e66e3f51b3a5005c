//! Per-class area proportions.
//!
//! Proportions are reported in thousandths. Plain per-value rounding can
//! drift from 1.0 by up to `n_classes / 2000`, which breaks the sum
//! tolerance for large class counts, so the rounding uses the
//! largest-remainder method: floor every share, then hand the missing
//! thousandths to the classes with the largest remainders (lower class id
//! first on ties). Any non-empty grid sums to exactly 1.000.

use crate::cluster::LabelGrid;

const SCALE: u64 = 1000;

/// Fraction of cells per class id, rounded to three decimals.
///
/// Always holds exactly `n_classes` entries; absent classes are `0.0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassProportions {
    thousandths: Vec<u32>,
}

impl ClassProportions {
    /// Build from per-class pixel counts.
    ///
    /// ```
    /// use raster_classify::ClassProportions;
    ///
    /// let p = ClassProportions::from_counts(&[1, 1, 1]);
    /// assert_eq!(p.values(), vec![0.334, 0.333, 0.333]);
    /// ```
    pub fn from_counts(counts: &[usize]) -> Self {
        let total: u64 = counts.iter().map(|&c| c as u64).sum();
        if total == 0 {
            return Self {
                thousandths: vec![0; counts.len()],
            };
        }

        let mut thousandths: Vec<u32> = Vec::with_capacity(counts.len());
        let mut remainders: Vec<(u64, usize)> = Vec::with_capacity(counts.len());
        for (class, &count) in counts.iter().enumerate() {
            let scaled = count as u64 * SCALE;
            thousandths.push((scaled / total) as u32);
            remainders.push((scaled % total, class));
        }

        let assigned: u64 = thousandths.iter().map(|&t| t as u64).sum();
        let missing = (SCALE - assigned) as usize;

        remainders.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        for &(_, class) in remainders.iter().take(missing) {
            thousandths[class] += 1;
        }

        Self { thousandths }
    }

    /// Rebuild from previously reported values, e.g. a stored distribution.
    ///
    /// Each value is clamped to `0.0..=1.0` and rounded to the nearest
    /// thousandth; the sum is not re-balanced.
    pub fn from_values(values: &[f64]) -> Self {
        Self {
            thousandths: values
                .iter()
                .map(|v| (v.clamp(0.0, 1.0) * SCALE as f64).round() as u32)
                .collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.thousandths.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.thousandths.is_empty()
    }

    /// Proportion of class `class` in `0.0..=1.0`.
    #[inline]
    pub fn get(&self, class: usize) -> f64 {
        self.thousandths[class] as f64 / SCALE as f64
    }

    /// Proportions in class order.
    pub fn values(&self) -> Vec<f64> {
        (0..self.len()).map(|i| self.get(i)).collect()
    }

    /// Integer thousandths in class order; these sum to 1000 for a
    /// non-empty grid.
    #[inline]
    pub fn thousandths(&self) -> &[u32] {
        &self.thousandths
    }

    pub fn sum(&self) -> f64 {
        self.thousandths.iter().map(|&t| t as u64).sum::<u64>() as f64 / SCALE as f64
    }
}

/// Proportions of each class id `0..n_classes` in `labels`.
///
/// Labels at or above `n_classes` are not counted.
pub fn proportions(labels: &LabelGrid, n_classes: usize) -> ClassProportions {
    let mut counts = vec![0usize; n_classes];
    for &label in labels.labels() {
        if let Some(count) = counts.get_mut(label as usize) {
            *count += 1;
        }
    }
    ClassProportions::from_counts(&counts)
}
