use crate::config::model::LinearLayer;
use crate::foundation::math::{clamp01, finite_or, safe_pow};
use crate::geometry::{Sample, exponent_or_one, point_or};

/// Linear gradient reduced to `t = dot(p - origin, axis)`.
///
/// `axis` is the direction divided by the squared gradient-line length, so both the explicit
/// `from`/`to` form and the CSS angle form collapse to one dot product per pixel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearGeometry {
    /// Point where progress is 0.
    pub origin: [f32; 2],
    /// Scaled direction: `(to - from) / |to - from|²`.
    pub axis: [f32; 2],
    /// Exponent applied to progress.
    pub easing: f32,
}

impl LinearGeometry {
    /// Resolve against a design-space canvas size.
    pub fn resolve(layer: &LinearLayer, design: [f32; 2]) -> Self {
        let [w, h] = design;
        let (origin, dir) = match (layer.from, layer.to) {
            (Some(_), Some(_)) => {
                let from = point_or(layer.from, [0.0, 0.0]);
                let to = point_or(layer.to, from);
                (from, [to[0] - from[0], to[1] - from[1]])
            }
            _ => {
                // CSS: 0deg points up, angles run clockwise, and the gradient line is long
                // enough that the corners land exactly on 0 and 1.
                let rad = finite_or(layer.angle.unwrap_or(180.0), 180.0).to_radians();
                let (sin, cos) = rad.sin_cos();
                let len = (w * sin).abs() + (h * cos).abs();
                let d = [sin * len, -cos * len];
                let center = [w * 0.5, h * 0.5];
                ([center[0] - d[0] * 0.5, center[1] - d[1] * 0.5], d)
            }
        };

        let len2 = dir[0] * dir[0] + dir[1] * dir[1];
        let axis = if len2 > 1e-12 {
            [dir[0] / len2, dir[1] / len2]
        } else {
            [0.0, 0.0]
        };

        Self {
            origin,
            axis,
            easing: exponent_or_one(layer.easing),
        }
    }

    /// Progress at design-space point `p`; the plane is unbounded so the mask is always 1.
    #[inline]
    pub fn sample(&self, p: [f32; 2]) -> Sample {
        let dx = p[0] - self.origin[0];
        let dy = p[1] - self.origin[1];
        let t = clamp01(dx * self.axis[0] + dy * self.axis[1]);
        Sample::visible(safe_pow(t, self.easing))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/linear.rs"]
mod tests;
