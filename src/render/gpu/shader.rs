use crate::noise::blue::BLUE_NOISE_SIZE;
use crate::render::gpu::pack::{GpuLimits, HEADER_VEC4S, LAYER_VEC4S, STOP_VEC4S};

const TEMPLATE: &str = include_str!("shader.wgsl");

/// WGSL source of the compositor, sized for `limits`.
pub fn shader_source(limits: &GpuLimits) -> String {
    TEMPLATE
        .replace("{{MAX_LAYERS}}", &limits.max_layers.to_string())
        .replace("{{MAX_STOPS}}", &limits.max_stops.to_string())
        .replace("{{HEADER_VEC4S}}", &HEADER_VEC4S.to_string())
        .replace("{{LAYER_VEC4S}}", &LAYER_VEC4S.to_string())
        .replace("{{STOP_VEC4S}}", &STOP_VEC4S.to_string())
        .replace("{{BLUE_NOISE_SIZE}}", &BLUE_NOISE_SIZE.to_string())
        .replace("{{UNIFORM_VEC4S}}", &limits.uniform_vec4s().to_string())
}
