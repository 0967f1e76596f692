use std::sync::OnceLock;

use crate::foundation::error::{GradiaError, GradiaResult};

/// Side length of the tiling blue-noise texture.
pub const BLUE_NOISE_SIZE: usize = 64;

const CELLS: usize = BLUE_NOISE_SIZE * BLUE_NOISE_SIZE;
const SIGMA: f32 = 1.9;
const KERNEL_RADIUS: i32 = 6;

/// Toroidal offset of the second tap used for TPDF blue-noise dithering.
pub(crate) const BLUE_TPDF_TAP: [u32; 2] = [32, 21];

static SHARED: OnceLock<BlueNoise> = OnceLock::new();

/// A 64×64 tiling threshold map produced by void-and-cluster placement.
///
/// Each cell holds `round(rank / (N - 1) * 255)`, where `rank` is the order in which the cell was
/// chosen as the emptiest remaining void.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlueNoise {
    thresholds: Vec<u8>,
}

impl BlueNoise {
    /// Process-wide texture, generated on first use and shared read-only afterwards.
    pub fn shared() -> &'static BlueNoise {
        SHARED.get_or_init(|| {
            tracing::debug!(size = BLUE_NOISE_SIZE, "generating shared blue-noise texture");
            Self::generate()
        })
    }

    /// Run void-and-cluster from scratch. Deterministic; prefer [`BlueNoise::shared`].
    pub fn generate() -> Self {
        let kernel = gaussian_kernel();
        let mut energy = vec![0.0f32; CELLS];
        let mut placed = vec![false; CELLS];
        let mut thresholds = vec![0u8; CELLS];

        let mut cell = 0usize;
        for rank in 0..CELLS {
            if rank > 0 {
                cell = emptiest_void(&energy, &placed);
            }
            placed[cell] = true;
            thresholds[cell] = rank_to_threshold(rank);
            splat(&mut energy, cell, &kernel);
        }

        Self { thresholds }
    }

    /// Substitute a precomputed threshold map (row-major, 64×64).
    pub fn from_thresholds(thresholds: Vec<u8>) -> GradiaResult<Self> {
        if thresholds.len() != CELLS {
            return Err(GradiaError::validation(format!(
                "blue-noise texture needs {CELLS} thresholds, got {}",
                thresholds.len()
            )));
        }
        Ok(Self { thresholds })
    }

    /// Threshold at pixel `(x, y)`, wrapping toroidally.
    #[inline]
    pub fn threshold(&self, x: u32, y: u32) -> u8 {
        let size = BLUE_NOISE_SIZE as u32;
        let idx = (y % size) as usize * BLUE_NOISE_SIZE + (x % size) as usize;
        self.thresholds[idx]
    }

    /// Triangular-distribution noise in `[-1, 1]` from two widely separated taps.
    #[inline]
    pub fn tpdf(&self, x: u32, y: u32) -> f32 {
        let u1 = f32::from(self.threshold(x, y)) / 255.0;
        let u2 = f32::from(self.threshold(
            x.wrapping_add(BLUE_TPDF_TAP[0]),
            y.wrapping_add(BLUE_TPDF_TAP[1]),
        )) / 255.0;
        u1 + u2 - 1.0
    }

    /// Row-major threshold bytes, suitable for an `R8Unorm` texture upload.
    pub fn as_bytes(&self) -> &[u8] {
        &self.thresholds
    }
}

fn rank_to_threshold(rank: usize) -> u8 {
    let v = rank as f32 / (CELLS - 1) as f32 * 255.0;
    v.round().clamp(0.0, 255.0) as u8
}

fn gaussian_kernel() -> Vec<f32> {
    let side = (2 * KERNEL_RADIUS + 1) as usize;
    let denom = 2.0 * SIGMA * SIGMA;
    let mut k = Vec::with_capacity(side * side);
    for dy in -KERNEL_RADIUS..=KERNEL_RADIUS {
        for dx in -KERNEL_RADIUS..=KERNEL_RADIUS {
            let d2 = (dx * dx + dy * dy) as f32;
            k.push((-d2 / denom).exp());
        }
    }
    k
}

/// Unplaced cell with the least accumulated influence; ties resolve to the lowest index.
fn emptiest_void(energy: &[f32], placed: &[bool]) -> usize {
    let mut best = usize::MAX;
    let mut best_energy = f32::INFINITY;
    for (i, (&e, &p)) in energy.iter().zip(placed).enumerate() {
        if !p && e < best_energy {
            best = i;
            best_energy = e;
        }
    }
    best
}

fn splat(energy: &mut [f32], cell: usize, kernel: &[f32]) {
    let size = BLUE_NOISE_SIZE as i32;
    let cx = (cell % BLUE_NOISE_SIZE) as i32;
    let cy = (cell / BLUE_NOISE_SIZE) as i32;
    let side = 2 * KERNEL_RADIUS + 1;
    for dy in -KERNEL_RADIUS..=KERNEL_RADIUS {
        let y = (cy + dy).rem_euclid(size);
        for dx in -KERNEL_RADIUS..=KERNEL_RADIUS {
            let x = (cx + dx).rem_euclid(size);
            let k = kernel[((dy + KERNEL_RADIUS) * side + (dx + KERNEL_RADIUS)) as usize];
            energy[(y * size + x) as usize] += k;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/noise/blue.rs"]
mod tests;
