use std::sync::Arc;

use rayon::prelude::*;

use crate::color::space::{LinearRgba, linear_to_srgb};
use crate::config::model::GradientConfig;
use crate::foundation::core::RenderSize;
use crate::foundation::error::GradiaResult;
use crate::noise::blue::BlueNoise;
use crate::render::backend::{BackendKind, FrameRGBA, RenderBackend};
use crate::render::blend::composite;
use crate::resolve::layer::{ResolvedConfig, ResolvedLayer};
use crate::resolve::stops::interpolate;

/// Grain in near-black regions is faded out below this linear luminance.
const GRAIN_DAMPING_LUMINANCE: f32 = 0.18;

/// Options for the CPU compositor.
#[derive(Clone, Debug, Default)]
pub struct CpuRenderOpts {
    /// Rasterize scanlines in parallel on the rayon global pool.
    pub parallel: bool,
    /// Blue-noise texture to dither with. `None` uses [`BlueNoise::shared`].
    pub blue_noise: Option<Arc<BlueNoise>>,
}

/// Render `config` on the CPU with default options.
///
/// Returns straight-alpha sRGB RGBA8 pixels, row-major, `physical_width * physical_height * 4`
/// bytes.
pub fn render_pixels(config: &GradientConfig, size: RenderSize) -> GradiaResult<FrameRGBA> {
    render_pixels_with(config, size, &CpuRenderOpts::default())
}

/// Render `config` on the CPU.
#[tracing::instrument(
    skip(config, opts),
    fields(layers = config.layers.len(), parallel = opts.parallel)
)]
pub fn render_pixels_with(
    config: &GradientConfig,
    size: RenderSize,
    opts: &CpuRenderOpts,
) -> GradiaResult<FrameRGBA> {
    size.validate()?;
    let resolved = ResolvedConfig::resolve(config, size)?;
    let blue = opts.blue_noise.as_deref().unwrap_or_else(|| BlueNoise::shared());
    render_resolved(&resolved, size, blue, opts.parallel)
}

pub(crate) fn render_resolved(
    cfg: &ResolvedConfig,
    size: RenderSize,
    blue: &BlueNoise,
    parallel: bool,
) -> GradiaResult<FrameRGBA> {
    let mut data = vec![0u8; size.byte_len()?];
    let row_bytes = size.physical_width as usize * 4;

    let shade_row = |(y, row): (usize, &mut [u8])| {
        for (x, px) in row.chunks_exact_mut(4).enumerate() {
            px.copy_from_slice(&shade_pixel(cfg, size, blue, x as u32, y as u32));
        }
    };
    if parallel {
        data.par_chunks_mut(row_bytes).enumerate().for_each(shade_row);
    } else {
        data.chunks_mut(row_bytes).enumerate().for_each(shade_row);
    }

    Ok(FrameRGBA {
        width: size.physical_width,
        height: size.physical_height,
        data,
        premultiplied: false,
    })
}

/// Full per-pixel pipeline: accumulate layers, then grain, dither and quantize.
#[inline]
pub(crate) fn shade_pixel(
    cfg: &ResolvedConfig,
    size: RenderSize,
    blue: &BlueNoise,
    x: u32,
    y: u32,
) -> [u8; 4] {
    let p = size.design_point(x, y);
    let mut acc = cfg.base;
    for layer in &cfg.layers {
        if let Some(src) = shade_layer(layer, p, x, y) {
            acc = composite(acc, src, layer.blend);
        }
    }
    quantize(cfg, acc.clamped(), blue, x, y)
}

/// Straight-alpha color a layer contributes at design point `p`, or `None` when it is masked out.
pub(crate) fn shade_layer(
    layer: &ResolvedLayer,
    p: [f32; 2],
    x: u32,
    y: u32,
) -> Option<LinearRgba> {
    let sample = layer.geometry.sample(p);
    if sample.mask <= 0.0 {
        return None;
    }

    let mut c = interpolate(&layer.stops, sample.t, layer.color_space);
    if let Some(shadow) = &layer.shadow {
        let k = shadow.factor(sample.t);
        c.r *= k;
        c.g *= k;
        c.b *= k;
    }
    if let Some(grain) = &layer.grain {
        let damping = (c.luminance().max(0.0) / GRAIN_DAMPING_LUMINANCE).sqrt().min(1.0);
        let strength = grain.amount * damping;
        let [nr, ng, nb] = grain.noise(x, y);
        c.r += nr * strength;
        c.g += ng * strength;
        c.b += nb * strength;
        c = c.clamped();
    }
    c.a *= layer.opacity * sample.mask;
    (c.a > 0.0).then_some(c)
}

/// Gamma-encode, add sRGB-space grain and dither, round to bytes.
#[inline]
pub(crate) fn quantize(
    cfg: &ResolvedConfig,
    c: LinearRgba,
    blue: &BlueNoise,
    x: u32,
    y: u32,
) -> [u8; 4] {
    let grain = match &cfg.grain {
        Some(g) => g.noise(x, y).map(|n| n * g.amount * 255.0),
        None => [0.0; 3],
    };
    let dither = cfg.dither.sample(x, y, blue);
    let encode =
        |v: f32, g: f32| (linear_to_srgb(v) + g + dither).round().clamp(0.0, 255.0) as u8;

    let alpha = if cfg.opaque {
        255
    } else {
        (c.a * 255.0).round().clamp(0.0, 255.0) as u8
    };
    [
        encode(c.r, grain[0]),
        encode(c.g, grain[1]),
        encode(c.b, grain[2]),
        alpha,
    ]
}

/// The CPU compositor behind the [`RenderBackend`] trait.
#[derive(Clone, Debug, Default)]
pub struct CpuBackend {
    opts: CpuRenderOpts,
}

impl CpuBackend {
    /// Backend using `opts` for every render.
    pub fn new(opts: CpuRenderOpts) -> Self {
        Self { opts }
    }
}

impl RenderBackend for CpuBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Cpu
    }

    fn render(&mut self, config: &GradientConfig, size: RenderSize) -> GradiaResult<FrameRGBA> {
        render_pixels_with(config, size, &self.opts)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
