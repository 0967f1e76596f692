//! Progress samplers: map a design-space point to `(t, mask)` for each layer shape.

pub(crate) mod linear;
pub(crate) mod radial;
pub(crate) mod rounded_box;

pub use linear::LinearGeometry;
pub use radial::RadialGeometry;
pub use rounded_box::BoxGeometry;

/// Result of sampling a layer's geometry at one point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    /// Progress along the layer's gradient, in `[0, 1]`.
    pub t: f32,
    /// Coverage in `[0, 1]`; `0` means the layer does not touch this pixel.
    pub mask: f32,
}

impl Sample {
    pub(crate) const HIDDEN: Self = Self { t: 0.0, mask: 0.0 };

    #[inline]
    pub(crate) fn visible(t: f32) -> Self {
        Self { t, mask: 1.0 }
    }
}

/// Resolved, render-ready geometry of a layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Geometry {
    /// See [`LinearGeometry`].
    Linear(LinearGeometry),
    /// See [`RadialGeometry`].
    Radial(RadialGeometry),
    /// See [`BoxGeometry`].
    Box(BoxGeometry),
}

impl Geometry {
    /// Sample at design-space point `p`.
    #[inline]
    pub fn sample(&self, p: [f32; 2]) -> Sample {
        match self {
            Geometry::Linear(g) => g.sample(p),
            Geometry::Radial(g) => g.sample(p),
            Geometry::Box(g) => g.sample(p),
        }
    }
}

/// Design-space center, or `fallback` when the point is unset or non-finite.
pub(crate) fn point_or(p: Option<kurbo::Point>, fallback: [f32; 2]) -> [f32; 2] {
    match p {
        Some(p) if p.x.is_finite() && p.y.is_finite() => [p.x as f32, p.y as f32],
        _ => fallback,
    }
}

/// Sanitize a user exponent: unset → 1, non-finite → 1, tiny → floored.
pub(crate) fn exponent_or_one(e: Option<f32>) -> f32 {
    use crate::foundation::math::{MIN_EXPONENT, finite_or};
    finite_or(e.unwrap_or(1.0), 1.0).max(MIN_EXPONENT)
}
