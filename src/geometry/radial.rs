use crate::config::model::RadialLayer;
use crate::foundation::math::{clamp01, finite_or, safe_pow};
use crate::geometry::{Sample, exponent_or_one, point_or};

const MIN_RADIUS: f32 = 1e-3;
const MIN_POWER: f32 = 1.0;
const MAX_POWER: f32 = 32.0;

/// Radial gradient over an Lp-norm distance field.
///
/// `power == 2` is an ellipse; larger powers approach the enclosing rectangle while keeping the
/// corners round, which avoids the diagonal seams of a max-norm field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadialGeometry {
    /// Center in design space.
    pub center: [f32; 2],
    /// Per-axis radii (> 0).
    pub radii: [f32; 2],
    /// Lp exponent in `[1, 32]`.
    pub power: f32,
    /// Normalized distance mapped to progress 0.
    pub inner: f32,
    /// Normalized distance mapped to progress 1.
    pub outer: f32,
    /// Exponent applied to progress.
    pub falloff: f32,
}

impl RadialGeometry {
    /// Resolve against a design-space canvas size.
    pub fn resolve(layer: &RadialLayer, design: [f32; 2]) -> Self {
        let [w, h] = design;
        let radius = |axis: Option<f32>, fallback: f32| {
            finite_or(axis.or(layer.radius).unwrap_or(fallback), fallback).max(MIN_RADIUS)
        };
        let power = finite_or(layer.power.unwrap_or(2.0), 2.0).clamp(MIN_POWER, MAX_POWER);
        let inner = finite_or(layer.inner.unwrap_or(0.0), 0.0).max(0.0);
        let outer = finite_or(layer.outer.unwrap_or(1.0), 1.0).max(0.0);

        Self {
            center: point_or(layer.center, [w * 0.5, h * 0.5]),
            radii: [radius(layer.radius_x, w * 0.5), radius(layer.radius_y, h * 0.5)],
            power,
            inner,
            outer,
            falloff: exponent_or_one(layer.falloff),
        }
    }

    /// Lp distance of `p` from the center in units of the radii.
    #[inline]
    pub fn distance(&self, p: [f32; 2]) -> f32 {
        let nx = ((p[0] - self.center[0]) / self.radii[0]).abs();
        let ny = ((p[1] - self.center[1]) / self.radii[1]).abs();
        let sum = safe_pow(nx, self.power) + safe_pow(ny, self.power);
        safe_pow(sum, 1.0 / self.power)
    }

    /// Progress at design-space point `p`; the mask is always 1.
    #[inline]
    pub fn sample(&self, p: [f32; 2]) -> Sample {
        let d = self.distance(p);
        let span = self.outer - self.inner;
        let t = if span <= 1e-6 {
            if d >= self.inner { 1.0 } else { 0.0 }
        } else {
            clamp01((d - self.inner) / span)
        };
        Sample::visible(safe_pow(t, self.falloff))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/radial.rs"]
mod tests;
