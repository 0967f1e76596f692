use crate::color::hex::parse_color;
use crate::color::space::LinearRgba;
use crate::config::model::{
    BlendMode, ColorSpace, GradientConfig, Grain, Layer, LayerPaint, Shadow,
};
use crate::config::preset::PresetDefaults;
use crate::foundation::core::RenderSize;
use crate::foundation::error::GradiaResult;
use crate::foundation::math::{MIN_EXPONENT, clamp01, finite_or, lerp, safe_pow};
use crate::geometry::{BoxGeometry, Geometry, LinearGeometry, RadialGeometry};
use crate::noise::dither::DitherSampler;
use crate::noise::ign::{CHANNEL_TAPS, seed_offset, tpdf_ign};
use crate::resolve::stops::{StopList, resolve_stops};

/// Clamped shadow parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedShadow {
    /// Darkening at progress 0.
    pub start: f32,
    /// Darkening at progress 1.
    pub end: f32,
    /// Progress exponent (> 0).
    pub curve: f32,
}

impl ResolvedShadow {
    fn resolve(shadow: &Shadow) -> Self {
        Self {
            start: clamp01(finite_or(shadow.start_intensity, 0.0)),
            end: clamp01(finite_or(shadow.end_intensity, 0.0)),
            curve: finite_or(shadow.curve, 1.0).max(MIN_EXPONENT),
        }
    }

    /// Multiplier for the layer's RGB at progress `t`.
    #[inline]
    pub fn factor(&self, t: f32) -> f32 {
        1.0 - lerp(self.start, self.end, safe_pow(t, self.curve))
    }
}

/// Grain with preset defaults applied. Only built when the amount is positive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedGrain {
    /// Strength in `(0, 1]`.
    pub amount: f32,
    /// Cell size in physical pixels (>= 1).
    pub scale: f32,
    /// Share one sample across R/G/B.
    pub monochrome: bool,
    /// Lattice offset derived from the seed.
    pub offset: [f32; 2],
}

impl ResolvedGrain {
    pub(crate) fn resolve(grain: Option<&Grain>, defaults: &PresetDefaults) -> Option<Self> {
        let grain = grain?;
        let amount = clamp01(finite_or(grain.amount, 0.0));
        if amount <= 0.0 {
            return None;
        }
        let scale = grain.scale.unwrap_or(defaults.grain_scale);
        Some(Self {
            amount,
            scale: finite_or(scale, defaults.grain_scale).max(1.0),
            monochrome: grain.monochrome.unwrap_or(defaults.grain_monochrome),
            offset: seed_offset(grain.seed),
        })
    }

    /// Lattice coordinate of physical pixel `(x, y)`.
    #[inline]
    pub fn cell(&self, x: u32, y: u32) -> [f32; 2] {
        [
            (x as f32 / self.scale).floor() + self.offset[0],
            (y as f32 / self.scale).floor() + self.offset[1],
        ]
    }

    /// TPDF noise for R/G/B at physical pixel `(x, y)`, each in `(-1, 1)`, not yet scaled by
    /// the amount.
    #[inline]
    pub fn noise(&self, x: u32, y: u32) -> [f32; 3] {
        let [cx, cy] = self.cell(x, y);
        if self.monochrome {
            return [tpdf_ign(cx, cy); 3];
        }
        CHANNEL_TAPS.map(|[tx, ty]| tpdf_ign(cx + tx, cy + ty))
    }
}

/// One layer with every optional field settled.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedLayer {
    /// Progress sampler.
    pub geometry: Geometry,
    /// Opacity in `[0, 1]`.
    pub opacity: f32,
    /// Blend mode.
    pub blend: BlendMode,
    /// Interpolation space.
    pub color_space: ColorSpace,
    /// Sorted stops (at least two).
    pub stops: StopList,
    /// Optional darkening.
    pub shadow: Option<ResolvedShadow>,
    /// Optional linear-light grain.
    pub grain: Option<ResolvedGrain>,
}

impl ResolvedLayer {
    /// Resolve `layer` against a design canvas of `design` units.
    pub fn resolve(
        layer: &Layer,
        design: [f32; 2],
        defaults: &PresetDefaults,
    ) -> GradiaResult<Self> {
        let geometry = match layer {
            Layer::Linear(l) => Geometry::Linear(LinearGeometry::resolve(l, design)),
            Layer::Radial(l) => Geometry::Radial(RadialGeometry::resolve(l, design)),
            Layer::Box(l) => Geometry::Box(BoxGeometry::resolve(l, design)),
        };
        let paint: &LayerPaint = layer.paint();
        let opacity = paint.opacity.unwrap_or(defaults.opacity);
        Ok(Self {
            geometry,
            opacity: clamp01(finite_or(opacity, defaults.opacity)),
            blend: paint.blend.unwrap_or(defaults.blend),
            color_space: paint.color_space.unwrap_or(defaults.color_space),
            stops: resolve_stops(paint)?,
            shadow: paint.shadow.as_ref().map(ResolvedShadow::resolve),
            grain: ResolvedGrain::resolve(paint.grain.as_ref(), defaults),
        })
    }
}

/// A configuration ready to composite: colors parsed, presets applied, geometry in design units.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedConfig {
    /// Accumulator start color.
    pub base: LinearRgba,
    /// Layers in composite order.
    pub layers: Vec<ResolvedLayer>,
    /// Global sRGB-space grain.
    pub grain: Option<ResolvedGrain>,
    /// Quantization dither.
    pub dither: DitherSampler,
    /// Force alpha to 255.
    pub opaque: bool,
    /// Design canvas the geometry was resolved against.
    pub design: [f32; 2],
}

impl ResolvedConfig {
    /// Resolve `config` for a render of `size`.
    ///
    /// Layer geometry depends on the design canvas (default centers, box sizes, linear axis
    /// length), so resolution is tied to a design size. The physical size only matters later.
    #[tracing::instrument(skip(config), fields(layers = config.layers.len()))]
    pub fn resolve(config: &GradientConfig, size: RenderSize) -> GradiaResult<Self> {
        let defaults = config.preset.defaults();
        let design = size.design();
        let base = parse_color(&config.base_color)?;
        let layers = config
            .layers
            .iter()
            .map(|layer| ResolvedLayer::resolve(layer, design, &defaults))
            .collect::<GradiaResult<Vec<_>>>()?;

        let dither = config.dither.unwrap_or_default();
        let dither = DitherSampler::new(
            dither.mode.unwrap_or(defaults.dither_mode),
            dither.amplitude.unwrap_or(defaults.dither_amplitude),
        );

        tracing::debug!(preset = ?config.preset, dither = ?dither.mode, "resolved configuration");
        Ok(Self {
            base,
            layers,
            grain: ResolvedGrain::resolve(config.grain.as_ref(), &defaults),
            dither,
            opaque: config.opaque,
            design,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/resolve/layer.rs"]
mod tests;
