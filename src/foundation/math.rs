//! Scalar helpers shared by the CPU compositor and mirrored line-for-line in the WGSL shader.

/// Smallest exponent accepted by `pow`-shaped parameters (easing, falloff, shadow curve).
pub(crate) const MIN_EXPONENT: f32 = 1e-4;

#[inline]
pub(crate) fn fract(x: f32) -> f32 {
    x - x.floor()
}

#[inline]
pub(crate) fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub(crate) fn clamp01(x: f32) -> f32 {
    if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) }
}

/// `x^e` with `0^e == 0` and negative bases treated as zero.
#[inline]
pub(crate) fn safe_pow(x: f32, e: f32) -> f32 {
    if x <= 0.0 { 0.0 } else { x.powf(e) }
}

/// Replace non-finite values with `fallback`.
#[inline]
pub(crate) fn finite_or(x: f32, fallback: f32) -> f32 {
    if x.is_finite() { x } else { fallback }
}

/// Abramowitz & Stegun 7.1.26 rational approximation of `erf` (|error| < 1.5e-7).
pub(crate) fn erf(x: f32) -> f32 {
    const A1: f32 = 0.254_829_6;
    const A2: f32 = -0.284_496_74;
    const A3: f32 = 1.421_413_7;
    const A4: f32 = -1.453_152;
    const A5: f32 = 1.061_405_4;
    const P: f32 = 0.327_591_1;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();
    let t = 1.0 / (1.0 + P * x);
    let poly = ((((A5 * t + A4) * t + A3) * t + A2) * t + A1) * t;
    sign * (1.0 - poly * (-x * x).exp())
}

/// Standard normal CDF of `d / sigma`.
#[inline]
pub(crate) fn gaussian_cdf(d: f32, sigma: f32) -> f32 {
    0.5 * (1.0 + erf(d / (sigma * std::f32::consts::SQRT_2)))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
