//! gradia synthesizes band-free, multi-layer gradient images.
//!
//! A [`GradientConfig`] describes a base color and an ordered stack of layers (linear, radial or
//! squircle, and rounded-box shadows). Rendering turns it into straight-alpha sRGB RGBA8 pixels
//! ([`FrameRGBA`]) so that smooth ramps survive 8-bit output without visible steps.
//!
//! # Pipeline overview
//!
//! 1. **Resolve**: `GradientConfig -> ResolvedConfig` (colors parsed, stops sorted and cached in
//!    linear RGB and Oklab, preset defaults applied)
//! 2. **Composite**: per pixel, sample every layer's progress and coverage, interpolate stops,
//!    shade, and blend source-over into a linear-light accumulator
//! 3. **Quantize**: gamma-encode, add sRGB grain and dither, round to bytes
//!
//! The CPU path ([`render_pixels`]) is the reference. With the `gpu` feature the same pipeline
//! runs in a fragment shader over fixed-capacity uniform arrays; [`check_gpu_support`] tells
//! callers up front whether a configuration fits.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: identical input produces identical bytes; grain seeds only move noise.
//! - **Read-only during rasterization**: resolution happens once per call and the compositors
//!   only read the resolved form.
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod color;
mod config;
mod foundation;
mod geometry;
mod noise;
mod render;
mod resolve;

pub use color::hex::{Rgba8, parse_color};
pub use color::space::{
    LinearRgba, Oklab, linear_to_oklab, linear_to_srgb, oklab_to_linear, srgb_to_linear,
};
pub use config::model::{
    BlendMode, BoxLayer, ColorSpace, ColorStop, Dither, DitherMode, GradientConfig, Grain, Layer,
    LayerPaint, LinearLayer, Preset, RadialLayer, Shadow,
};
pub use config::preset::PresetDefaults;
pub use foundation::core::{Point, RenderSize, Size};
pub use foundation::error::{GradiaError, GradiaResult};
pub use geometry::{BoxGeometry, Geometry, LinearGeometry, RadialGeometry, Sample};
pub use noise::blue::{BLUE_NOISE_SIZE, BlueNoise};
pub use noise::dither::DitherSampler;
pub use noise::ign::{ign, seed_offset, tpdf_ign};
pub use render::backend::{BackendKind, FrameRGBA, RenderBackend, create_backend};
pub use render::blend::{blend_channel, composite};
pub use render::cpu::{CpuBackend, CpuRenderOpts, render_pixels, render_pixels_with};
#[cfg(feature = "gpu")]
#[cfg_attr(docsrs, doc(cfg(feature = "gpu")))]
pub use render::gpu::backend::GpuBackend;
pub use render::gpu::pack::{GpuLimits, GpuPacket, GpuSupport, check_gpu_support};
pub use render::gpu::shader::shader_source;
pub use resolve::layer::{ResolvedConfig, ResolvedGrain, ResolvedLayer, ResolvedShadow};
pub use resolve::stops::{ResolvedStop, StopList, interpolate};
