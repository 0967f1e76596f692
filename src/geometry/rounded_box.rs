use crate::config::model::BoxLayer;
use crate::foundation::math::{finite_or, gaussian_cdf};
use crate::geometry::{Sample, point_or};

/// Shadow weights below this are treated as no coverage.
const MIN_WEIGHT: f32 = 0.001;
const MIN_SIGMA: f32 = 1e-4;

/// Rounded-rectangle shadow evaluated through a signed distance field.
///
/// Blur follows the CSS box-shadow convention: a Gaussian with `sigma = blur / 2`, integrated
/// across the edge (the normal CDF of the signed distance).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxGeometry {
    /// Box center in design space.
    pub center: [f32; 2],
    /// Half extents (>= 0).
    pub half: [f32; 2],
    /// Corner radius, clamped to the smaller half extent.
    pub radius: f32,
    /// Spread (>= 0).
    pub spread: f32,
    /// Gaussian sigma; `0` means a hard edge.
    pub sigma: f32,
    /// Inner shadow instead of a drop shadow.
    pub inset: bool,
}

impl BoxGeometry {
    /// Resolve against a design-space canvas size.
    pub fn resolve(layer: &BoxLayer, design: [f32; 2]) -> Self {
        let [w, h] = design;
        let size = layer
            .size
            .filter(|s| s.width.is_finite() && s.height.is_finite())
            .map(|s| [s.width.abs() as f32, s.height.abs() as f32])
            .unwrap_or([w, h]);
        let half = [size[0] * 0.5, size[1] * 0.5];
        let radius = finite_or(layer.corner_radius, 0.0).clamp(0.0, half[0].min(half[1]));
        let blur = finite_or(layer.blur, 0.0).max(0.0);

        Self {
            center: point_or(layer.center, [w * 0.5, h * 0.5]),
            half,
            radius,
            spread: finite_or(layer.spread, 0.0).max(0.0),
            sigma: blur * 0.5,
            inset: layer.inset,
        }
    }

    /// Signed distance from `p` to the box itself (negative inside).
    #[inline]
    pub fn box_distance(&self, p: [f32; 2]) -> f32 {
        sd_rounded_box(p, self.center, self.half, self.radius)
    }

    /// Progress and coverage at design-space point `p`.
    ///
    /// Inset: `t` is 1 deep inside the box and falls towards 0 at its edges; everything outside
    /// the box is masked. Outer: `t` is 0 against the box and rises to 1 far away; the inside of
    /// the box and fully faded pixels are masked.
    #[inline]
    pub fn sample(&self, p: [f32; 2]) -> Sample {
        let outer = self.box_distance(p);
        if self.inset {
            if outer > 0.0 {
                return Sample::HIDDEN;
            }
            let half = [
                (self.half[0] - self.spread).max(0.0),
                (self.half[1] - self.spread).max(0.0),
            ];
            let radius = (self.radius - self.spread).max(0.0).min(half[0].min(half[1]));
            let d = sd_rounded_box(p, self.center, half, radius);
            let t = if self.sigma <= MIN_SIGMA {
                if d <= 0.0 { 1.0 } else { 0.0 }
            } else {
                1.0 - gaussian_cdf(d, self.sigma)
            };
            Sample::visible(t)
        } else {
            if outer <= 0.0 {
                return Sample::HIDDEN;
            }
            let half = [self.half[0] + self.spread, self.half[1] + self.spread];
            let radius = if self.radius > 0.0 {
                self.radius + self.spread
            } else {
                0.0
            };
            let d = sd_rounded_box(p, self.center, half, radius);
            let t = if self.sigma <= MIN_SIGMA {
                if d <= 0.0 { 0.0 } else { 1.0 }
            } else {
                gaussian_cdf(d, self.sigma)
            };
            if 1.0 - t < MIN_WEIGHT {
                return Sample::HIDDEN;
            }
            Sample::visible(t)
        }
    }
}

/// Signed distance to a rounded rectangle (negative inside).
#[inline]
pub(crate) fn sd_rounded_box(p: [f32; 2], center: [f32; 2], half: [f32; 2], radius: f32) -> f32 {
    let qx = (p[0] - center[0]).abs() - half[0] + radius;
    let qy = (p[1] - center[1]).abs() - half[1] + radius;
    let ox = qx.max(0.0);
    let oy = qy.max(0.0);
    let outside = (ox * ox + oy * oy).sqrt();
    let inside = qx.max(qy).min(0.0);
    outside + inside - radius
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/rounded_box.rs"]
mod tests;
