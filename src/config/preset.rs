use crate::config::model::{BlendMode, ColorSpace, DitherMode, Preset};

/// Defaults a [`Preset`] supplies to layer resolution and final quantization.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PresetDefaults {
    /// Dither pattern when the configuration does not override it.
    pub dither_mode: DitherMode,
    /// Dither amplitude in LSB units.
    pub dither_amplitude: f32,
    /// Grain cell size in physical pixels.
    pub grain_scale: f32,
    /// Whether grain shares one sample across R/G/B.
    pub grain_monochrome: bool,
    /// Stop interpolation space.
    pub color_space: ColorSpace,
    /// Layer blend mode.
    pub blend: BlendMode,
    /// Layer opacity.
    pub opacity: f32,
}

impl Preset {
    /// Defaults for this preset.
    pub fn defaults(self) -> PresetDefaults {
        match self {
            Preset::Still => PresetDefaults {
                dither_mode: DitherMode::BlueNoise,
                dither_amplitude: 1.0,
                grain_scale: 1.0,
                grain_monochrome: false,
                color_space: ColorSpace::Oklab,
                blend: BlendMode::Normal,
                opacity: 1.0,
            },
            // Video encoders smear sub-LSB noise and chroma grain, so dither harder and keep
            // grain monochrome.
            Preset::Video => PresetDefaults {
                dither_mode: DitherMode::InterleavedGradient,
                dither_amplitude: 1.5,
                grain_scale: 1.5,
                grain_monochrome: true,
                color_space: ColorSpace::LinearRgb,
                blend: BlendMode::Normal,
                opacity: 1.0,
            },
        }
    }
}
