use crate::color::space::LinearRgba;
use crate::config::model::BlendMode;

/// Blend function `B(d, s)` for one straight-alpha channel.
#[inline]
pub fn blend_channel(mode: BlendMode, d: f32, s: f32) -> f32 {
    match mode {
        BlendMode::Normal => s,
        BlendMode::Add => (d + s).min(1.0),
        BlendMode::Multiply => d * s,
        BlendMode::Screen => 1.0 - (1.0 - d) * (1.0 - s),
    }
}

/// Composite straight-alpha `src` over `dst` with `mode`.
///
/// Where the destination is opaque the blended color replaces the source color; where it is
/// transparent the source shows unchanged. The result is straight alpha again.
#[inline]
pub fn composite(dst: LinearRgba, src: LinearRgba, mode: BlendMode) -> LinearRgba {
    let sa = src.a;
    if sa <= 0.0 {
        return dst;
    }
    let da = dst.a;
    let ao = sa + da * (1.0 - sa);
    if ao <= 0.0 {
        return LinearRgba::TRANSPARENT;
    }

    let channel = |d: f32, s: f32| {
        let mixed = (1.0 - da) * s + da * blend_channel(mode, d, s);
        (sa * mixed + da * d * (1.0 - sa)) / ao
    };
    LinearRgba::rgba(
        channel(dst.r, src.r),
        channel(dst.g, src.g),
        channel(dst.b, src.b),
        ao,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/render/blend.rs"]
mod tests;
