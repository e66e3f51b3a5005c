//! Gamma conversion through tables generated by `build.rs`.

include!(concat!(env!("OUT_DIR"), "/gamma_lut.rs"));

/// Sample a 4096-entry table at `x` (clamped to 0.0..=1.0), interpolating
/// linearly between neighbouring entries.
#[inline]
fn sample(table: &[f32; 4096], x: f32) -> f32 {
    let scaled = x.clamp(0.0, 1.0) * 4095.0;
    let index = scaled as usize;
    if index >= 4095 {
        return table[4095];
    }
    let frac = scaled - index as f32;
    table[index] + (table[index + 1] - table[index]) * frac
}

/// Gamma-encoded sRGB component to linear light.
#[inline]
pub fn srgb_to_linear(srgb: f32) -> f32 {
    sample(&SRGB_TO_LINEAR, srgb)
}

/// Linear light component to gamma-encoded sRGB.
///
/// Out-of-range input is clamped, which is what callers want after an
/// Oklab round trip pushed a channel slightly out of gamut.
#[inline]
pub fn linear_to_srgb(linear: f32) -> f32 {
    sample(&LINEAR_TO_SRGB, linear)
}
