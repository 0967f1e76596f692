use crate::foundation::math::fract;

/// Lattice offset of the second tap used to build a triangular (TPDF) sample.
pub(crate) const TPDF_TAP: [f32; 2] = [47.0, 17.0];

/// Per-channel lattice offsets for non-monochrome grain (R, G, B).
pub(crate) const CHANNEL_TAPS: [[f32; 2]; 3] = [[0.0, 0.0], [113.0, 71.0], [199.0, 29.0]];

/// Interleaved gradient noise: a cheap spatial hash with values in `[0, 1)`.
///
/// Coordinates are integer pixel indices expressed as `f32`; the GPU path evaluates the same
/// expression with the same constants.
#[inline]
pub fn ign(x: f32, y: f32) -> f32 {
    fract(52.982_918_9 * fract(0.067_110_56 * x + 0.005_837_15 * y))
}

/// Triangular-distribution noise in `(-1, 1)` from two decorrelated IGN taps.
#[inline]
pub fn tpdf_ign(x: f32, y: f32) -> f32 {
    ign(x, y) + ign(x + TPDF_TAP[0], y + TPDF_TAP[1]) - 1.0
}

/// Map a grain seed to a deterministic lattice offset in `[0, 1024)²`.
///
/// Offsets stay small so the `f32` hash keeps its precision on large canvases.
pub fn seed_offset(seed: u32) -> [f32; 2] {
    let hx = seed.wrapping_mul(0x9E37_79B9) >> 22;
    let hy = (seed ^ 0x5BD1_E995).wrapping_mul(0x85EB_CA6B) >> 22;
    [hx as f32, hy as f32]
}

#[cfg(test)]
#[path = "../../tests/unit/noise/ign.rs"]
mod tests;
