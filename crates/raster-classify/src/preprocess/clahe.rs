//! Contrast-limited adaptive histogram equalization on one plane.
//!
//! The plane is split into a grid of tiles. Each tile gets a 256-bin
//! histogram, clipped at `clip_limit × tile_pixels / 256` with the excess
//! spread evenly over all bins, and turned into a lookup table (its CDF).
//! A pixel's output is its bin's LUT value, bilinearly interpolated
//! between the four nearest tile centers so tile seams do not show.

const BINS: usize = 256;

#[inline]
fn bin_of(value: f32) -> usize {
    (value.clamp(0.0, 1.0) * (BINS - 1) as f32).round() as usize
}

/// Build the clipped, normalized CDF for one tile.
fn tile_lut(
    plane: &[f32],
    width: usize,
    rows: std::ops::Range<usize>,
    cols: std::ops::Range<usize>,
    clip_limit: f32,
) -> [f32; BINS] {
    let mut hist = [0u32; BINS];
    for y in rows.clone() {
        for x in cols.clone() {
            hist[bin_of(plane[y * width + x])] += 1;
        }
    }

    let pixels = (rows.len() * cols.len()) as u32;
    let threshold = ((clip_limit * pixels as f32 / BINS as f32) as u32).max(1);

    let mut excess = 0u32;
    for h in hist.iter_mut() {
        if *h > threshold {
            excess += *h - threshold;
            *h = threshold;
        }
    }

    let per_bin = excess / BINS as u32;
    for h in hist.iter_mut() {
        *h += per_bin;
    }
    // Leftover counts go to evenly spaced bins
    let remainder = (excess % BINS as u32) as usize;
    if remainder > 0 {
        let step = (BINS / remainder).max(1);
        for h in hist.iter_mut().step_by(step).take(remainder) {
            *h += 1;
        }
    }

    let mut lut = [0f32; BINS];
    let mut acc = 0u32;
    for (slot, &h) in lut.iter_mut().zip(hist.iter()) {
        acc += h;
        *slot = acc as f32 / pixels as f32;
    }
    lut
}

/// Equalize `plane` (values in 0.0..=1.0) and return a new plane.
///
/// The grid shrinks to the plane size when the plane has fewer pixels
/// along an axis than `grid` asks for.
pub(crate) fn equalize(
    plane: &[f32],
    width: usize,
    height: usize,
    clip_limit: f32,
    grid: usize,
) -> Vec<f32> {
    debug_assert_eq!(plane.len(), width * height);
    if plane.is_empty() {
        return Vec::new();
    }

    let tile_w = width.div_ceil(grid.clamp(1, width));
    let tile_h = height.div_ceil(grid.clamp(1, height));
    let tiles_x = width.div_ceil(tile_w);
    let tiles_y = height.div_ceil(tile_h);

    let mut luts = Vec::with_capacity(tiles_x * tiles_y);
    for ty in 0..tiles_y {
        let rows = ty * tile_h..((ty + 1) * tile_h).min(height);
        for tx in 0..tiles_x {
            let cols = tx * tile_w..((tx + 1) * tile_w).min(width);
            luts.push(tile_lut(plane, width, rows.clone(), cols, clip_limit));
        }
    }

    // Neighbouring tile indices and the weight of the second one
    let neighbours = |pos: usize, tile: usize, tiles: usize| -> (usize, usize, f32) {
        let f = (pos as f32 + 0.5) / tile as f32 - 0.5;
        let i0 = (f.floor().max(0.0) as usize).min(tiles - 1);
        let i1 = (i0 + 1).min(tiles - 1);
        (i0, i1, (f - i0 as f32).clamp(0.0, 1.0))
    };

    let mut out = Vec::with_capacity(plane.len());
    for y in 0..height {
        let (y0, y1, wy) = neighbours(y, tile_h, tiles_y);
        for x in 0..width {
            let (x0, x1, wx) = neighbours(x, tile_w, tiles_x);
            let bin = bin_of(plane[y * width + x]);

            let top = luts[y0 * tiles_x + x0][bin] * (1.0 - wx) + luts[y0 * tiles_x + x1][bin] * wx;
            let bottom =
                luts[y1 * tiles_x + x0][bin] * (1.0 - wx) + luts[y1 * tiles_x + x1][bin] * wx;
            out.push((top * (1.0 - wy) + bottom * wy).clamp(0.0, 1.0));
        }
    }
    out
}
