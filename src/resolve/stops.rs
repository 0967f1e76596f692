use smallvec::SmallVec;

use crate::color::hex::parse_color;
use crate::color::space::{LinearRgba, Oklab};
use crate::config::model::{ColorSpace, LayerPaint};
use crate::foundation::error::GradiaResult;
use crate::foundation::math::{clamp01, finite_or, lerp};

const DEFAULT_START: &str = "#000000";
const DEFAULT_END: &str = "#ffffff";

/// A color stop with its color cached in both interpolation spaces.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedStop {
    /// Position in `[0, 1]`.
    pub position: f32,
    /// Color in linear RGBA.
    pub linear: LinearRgba,
    /// The same color in Oklab.
    pub oklab: Oklab,
}

impl ResolvedStop {
    fn new(position: f32, color: &str) -> GradiaResult<Self> {
        let linear = parse_color(color)?;
        Ok(Self {
            position: clamp01(finite_or(position, 0.0)),
            linear,
            oklab: linear.to_oklab(),
        })
    }
}

/// Sorted stops; four fit inline, which covers every configuration the GPU path accepts.
pub type StopList = SmallVec<[ResolvedStop; 4]>;

/// Build the stop list for a layer: explicit stops win, otherwise `start`/`mid`/`end`.
pub(crate) fn resolve_stops(paint: &LayerPaint) -> GradiaResult<StopList> {
    let mut stops = StopList::new();
    if !paint.stops.is_empty() {
        for stop in &paint.stops {
            stops.push(ResolvedStop::new(stop.position, &stop.color)?);
        }
        // Stable, so equal positions keep their authored order.
        stops.sort_by(|a, b| a.position.total_cmp(&b.position));
        return Ok(stops);
    }

    let start = paint.start.as_deref().unwrap_or(DEFAULT_START);
    let end = paint.end.as_deref().unwrap_or(DEFAULT_END);
    stops.push(ResolvedStop::new(0.0, start)?);
    if let Some(mid) = paint.mid.as_deref() {
        let midpoint = paint.midpoint.unwrap_or(0.5);
        stops.push(ResolvedStop::new(finite_or(midpoint, 0.5), mid)?);
    }
    stops.push(ResolvedStop::new(1.0, end)?);
    Ok(stops)
}

/// Color at progress `t`.
///
/// The segment is the last stop at or before `t` and the first stop after it; outside the stop
/// range the nearest end stop is returned unchanged.
pub fn interpolate(stops: &[ResolvedStop], t: f32, space: ColorSpace) -> LinearRgba {
    let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
        return LinearRgba::TRANSPARENT;
    };
    let idx = stops.partition_point(|s| s.position <= t);
    if idx == 0 {
        return first.linear;
    }
    if idx == stops.len() {
        return last.linear;
    }

    let a = &stops[idx - 1];
    let b = &stops[idx];
    let f = (t - a.position) / (b.position - a.position);
    let alpha = lerp(a.linear.a, b.linear.a, f);
    match space {
        ColorSpace::LinearRgb => LinearRgba::rgba(
            lerp(a.linear.r, b.linear.r, f),
            lerp(a.linear.g, b.linear.g, f),
            lerp(a.linear.b, b.linear.b, f),
            alpha,
        ),
        ColorSpace::Oklab => Oklab {
            l: lerp(a.oklab.l, b.oklab.l, f),
            a: lerp(a.oklab.a, b.oklab.a, f),
            b: lerp(a.oklab.b, b.oklab.b, f),
        }
        .to_linear(alpha)
        .clamped(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/resolve/stops.rs"]
mod tests;
