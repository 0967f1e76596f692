use crate::config::model::{BlendMode, ColorSpace, DitherMode, GradientConfig};
use crate::foundation::core::RenderSize;
use crate::foundation::error::{GradiaError, GradiaResult};
use crate::geometry::Geometry;
use crate::resolve::layer::{ResolvedConfig, ResolvedGrain, ResolvedLayer};

/// `vec4`s before the first layer record.
pub(crate) const HEADER_VEC4S: usize = 5;
/// `vec4`s per layer record.
pub(crate) const LAYER_VEC4S: usize = 6;
/// `vec4`s per stop record.
pub(crate) const STOP_VEC4S: usize = 2;

/// Capacity of the GPU uniform arrays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GpuLimits {
    /// Layers per configuration.
    pub max_layers: usize,
    /// Color stops per layer.
    pub max_stops: usize,
}

impl Default for GpuLimits {
    fn default() -> Self {
        Self {
            max_layers: 6,
            max_stops: 4,
        }
    }
}

impl GpuLimits {
    /// Whether `config` fits these limits, with the reason when it does not.
    ///
    /// Layer indices in the reason are zero-based.
    pub fn check(&self, config: &GradientConfig) -> GpuSupport {
        let layers = config.layers.len();
        if layers > self.max_layers {
            return GpuSupport::Unsupported {
                reason: format!(
                    "configuration has {layers} layers; the GPU path supports at most {} layers",
                    self.max_layers
                ),
            };
        }
        for (i, layer) in config.layers.iter().enumerate() {
            let stops = layer.stop_count();
            if stops > self.max_stops {
                return GpuSupport::Unsupported {
                    reason: format!(
                        "layer {i} has {stops} color stops; the GPU path supports at most {} \
                         stops per layer",
                        self.max_stops
                    ),
                };
            }
        }
        GpuSupport::Supported
    }

    /// Total `vec4` slots of the uniform array.
    pub fn uniform_vec4s(&self) -> usize {
        HEADER_VEC4S + self.max_layers * LAYER_VEC4S + self.max_layers * self.max_stops * STOP_VEC4S
    }

    fn layer_base(&self, layer: usize) -> usize {
        HEADER_VEC4S + layer * LAYER_VEC4S
    }

    fn stop_base(&self, layer: usize, stop: usize) -> usize {
        HEADER_VEC4S
            + self.max_layers * LAYER_VEC4S
            + (layer * self.max_stops + stop) * STOP_VEC4S
    }
}

/// Answer of [`check_gpu_support`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GpuSupport {
    /// The GPU path can render the configuration.
    Supported,
    /// The configuration must be rendered on the CPU.
    Unsupported {
        /// Human-readable explanation naming the exceeded limit.
        reason: String,
    },
}

impl GpuSupport {
    /// `true` for [`GpuSupport::Supported`].
    pub fn is_supported(&self) -> bool {
        matches!(self, GpuSupport::Supported)
    }

    /// Convert into an [`GradiaError::UnsupportedByGpuPath`] on failure.
    pub fn into_result(self) -> GradiaResult<()> {
        match self {
            GpuSupport::Supported => Ok(()),
            GpuSupport::Unsupported { reason } => Err(GradiaError::unsupported_by_gpu(reason)),
        }
    }
}

/// Check `config` against the default [`GpuLimits`].
///
/// Pure and cheap: nothing is resolved and no device is touched.
pub fn check_gpu_support(config: &GradientConfig) -> GpuSupport {
    GpuLimits::default().check(config)
}

/// The uniform image handed to the shader: a flat `array<vec4<f32>, N>`.
///
/// Layout (slot indices):
/// - `0`: design w, design h, physical w, physical h
/// - `1`: base color, linear RGBA
/// - `2`: layer count, dither mode, dither amplitude, opaque
/// - `3`: global grain enabled, amount, scale, monochrome
/// - `4`: global grain offset x, y
/// - per layer, [`LAYER_VEC4S`] slots: kind/blend/space/stop count; opacity and shadow;
///   shadow curve and grain; grain offset; two geometry slots
/// - per stop, [`STOP_VEC4S`] slots: linear RGBA; Oklab L/a/b and position
#[derive(Clone, Debug, PartialEq)]
pub struct GpuPacket {
    /// Uniform slots, always [`GpuLimits::uniform_vec4s`] long.
    pub uniforms: Vec<[f32; 4]>,
    /// Limits the packet was laid out for.
    pub limits: GpuLimits,
}

impl GpuPacket {
    /// Pack a resolved configuration. Unused slots stay zero.
    pub fn pack(cfg: &ResolvedConfig, size: RenderSize, limits: &GpuLimits) -> GradiaResult<Self> {
        if cfg.layers.len() > limits.max_layers {
            return Err(GradiaError::unsupported_by_gpu(format!(
                "configuration has {} layers; the GPU path supports at most {} layers",
                cfg.layers.len(),
                limits.max_layers
            )));
        }

        let mut u = vec![[0.0f32; 4]; limits.uniform_vec4s()];
        u[0] = [
            size.design_width as f32,
            size.design_height as f32,
            size.physical_width as f32,
            size.physical_height as f32,
        ];
        u[1] = cfg.base.to_array();
        u[2] = [
            cfg.layers.len() as f32,
            dither_code(cfg.dither.mode),
            cfg.dither.amplitude,
            flag(cfg.opaque),
        ];
        (u[3], u[4]) = pack_grain(cfg.grain.as_ref());

        for (i, layer) in cfg.layers.iter().enumerate() {
            if layer.stops.len() > limits.max_stops {
                return Err(GradiaError::unsupported_by_gpu(format!(
                    "layer {i} has {} color stops; the GPU path supports at most {} stops per \
                     layer",
                    layer.stops.len(),
                    limits.max_stops
                )));
            }
            let base = limits.layer_base(i);
            u[base..base + LAYER_VEC4S].copy_from_slice(&pack_layer(layer));
            for (j, stop) in layer.stops.iter().enumerate() {
                let s = limits.stop_base(i, j);
                u[s] = stop.linear.to_array();
                u[s + 1] = [stop.oklab.l, stop.oklab.a, stop.oklab.b, stop.position];
            }
        }

        Ok(Self {
            uniforms: u,
            limits: *limits,
        })
    }

    /// Raw bytes for `Queue::write_buffer`.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.uniforms)
    }
}

fn pack_layer(layer: &ResolvedLayer) -> [[f32; 4]; LAYER_VEC4S] {
    let (kind, geom0, geom1) = match &layer.geometry {
        Geometry::Linear(g) => (
            0.0,
            [g.origin[0], g.origin[1], g.axis[0], g.axis[1]],
            [g.easing, 0.0, 0.0, 0.0],
        ),
        Geometry::Radial(g) => (
            1.0,
            [g.center[0], g.center[1], g.radii[0], g.radii[1]],
            [g.power, g.inner, g.outer, g.falloff],
        ),
        Geometry::Box(g) => (
            2.0,
            [g.center[0], g.center[1], g.half[0], g.half[1]],
            [g.radius, g.spread, g.sigma, flag(g.inset)],
        ),
    };
    let (shadow_on, shadow) = match &layer.shadow {
        Some(s) => (1.0, [s.start, s.end, s.curve]),
        None => (0.0, [0.0, 0.0, 1.0]),
    };
    let (grain_a, grain_b) = pack_grain(layer.grain.as_ref());

    [
        [
            kind,
            blend_code(layer.blend),
            space_code(layer.color_space),
            layer.stops.len() as f32,
        ],
        [layer.opacity, shadow_on, shadow[0], shadow[1]],
        [shadow[2], grain_a[0], grain_a[1], grain_a[2]],
        [grain_a[3], grain_b[0], grain_b[1], 0.0],
        geom0,
        geom1,
    ]
}

/// `([enabled, amount, scale, monochrome], [offset x, offset y, 0, 0])`.
fn pack_grain(grain: Option<&ResolvedGrain>) -> ([f32; 4], [f32; 4]) {
    match grain {
        Some(g) => (
            [1.0, g.amount, g.scale, flag(g.monochrome)],
            [g.offset[0], g.offset[1], 0.0, 0.0],
        ),
        None => ([0.0, 0.0, 1.0, 0.0], [0.0; 4]),
    }
}

fn flag(b: bool) -> f32 {
    if b { 1.0 } else { 0.0 }
}

fn dither_code(mode: DitherMode) -> f32 {
    match mode {
        DitherMode::None => 0.0,
        DitherMode::InterleavedGradient => 1.0,
        DitherMode::BlueNoise => 2.0,
    }
}

fn blend_code(mode: BlendMode) -> f32 {
    match mode {
        BlendMode::Normal => 0.0,
        BlendMode::Add => 1.0,
        BlendMode::Multiply => 2.0,
        BlendMode::Screen => 3.0,
    }
}

fn space_code(space: ColorSpace) -> f32 {
    match space {
        ColorSpace::LinearRgb => 0.0,
        ColorSpace::Oklab => 1.0,
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/render/gpu_pack.rs"]
mod tests;
