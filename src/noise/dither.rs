use crate::config::model::DitherMode;
use crate::noise::blue::BlueNoise;
use crate::noise::ign::tpdf_ign;

/// Resolved dither settings: pattern plus amplitude in LSB units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DitherSampler {
    /// Pattern.
    pub mode: DitherMode,
    /// Amplitude (>= 0).
    pub amplitude: f32,
}

impl DitherSampler {
    /// Build a sampler; non-finite or negative amplitudes collapse to zero.
    pub fn new(mode: DitherMode, amplitude: f32) -> Self {
        let amplitude = crate::foundation::math::finite_or(amplitude, 0.0).max(0.0);
        Self { mode, amplitude }
    }

    /// Whether sampling can produce a non-zero offset.
    pub fn is_active(self) -> bool {
        self.mode != DitherMode::None && self.amplitude > 0.0
    }

    /// Offset in sRGB LSB units for physical pixel `(x, y)`, within `[-amplitude, amplitude]`.
    #[inline]
    pub fn sample(self, x: u32, y: u32, blue: &BlueNoise) -> f32 {
        match self.mode {
            DitherMode::None => 0.0,
            DitherMode::InterleavedGradient => tpdf_ign(x as f32, y as f32) * self.amplitude,
            DitherMode::BlueNoise => blue.tpdf(x, y) * self.amplitude,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/noise/dither.rs"]
mod tests;
