use std::str::FromStr;

use crate::foundation::core::{Point, Size};
use crate::foundation::error::{GradiaError, GradiaResult};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Root of a gradient render request.
///
/// A configuration is immutable for the duration of a render call. Layers are composited in
/// order: later layers paint over the accumulated result of earlier ones.
pub struct GradientConfig {
    /// Preset supplying dither, grain and color-space defaults.
    #[serde(default)]
    pub preset: Preset,
    /// Color the accumulator starts from (hex string).
    #[serde(default = "default_base_color")]
    pub base_color: String,
    /// Layers in composite order.
    #[serde(default)]
    pub layers: Vec<Layer>,
    /// Film grain applied after gamma encoding, in sRGB units.
    #[serde(default)]
    pub grain: Option<Grain>,
    /// Override of the preset's dither settings.
    #[serde(default)]
    pub dither: Option<Dither>,
    /// Force the output alpha channel to 255.
    #[serde(default = "default_true")]
    pub opaque: bool,
}

impl Default for GradientConfig {
    fn default() -> Self {
        Self {
            preset: Preset::default(),
            base_color: default_base_color(),
            layers: Vec::new(),
            grain: None,
            dither: None,
            opaque: true,
        }
    }
}

impl GradientConfig {
    /// Decode a configuration from a JSON string. The payload must be a JSON object.
    pub fn from_json(json: &str) -> GradiaResult<Self> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| GradiaError::config_parse(format!("invalid JSON: {e}")))?;
        Self::from_value(value)
    }

    /// Decode a configuration from an already-parsed JSON value.
    pub fn from_value(value: serde_json::Value) -> GradiaResult<Self> {
        if !value.is_object() {
            return Err(GradiaError::config_parse(
                "configuration must be a JSON object",
            ));
        }
        serde_json::from_value(value).map_err(|e| GradiaError::config_parse(e.to_string()))
    }

    /// Serialize back to a JSON string.
    pub fn to_json(&self) -> GradiaResult<String> {
        serde_json::to_string(self).map_err(|e| GradiaError::Other(e.into()))
    }
}

impl FromStr for GradientConfig {
    type Err = GradiaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_json(s)
    }
}

fn default_base_color() -> String {
    "#000000".to_owned()
}

fn default_true() -> bool {
    true
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Named default profiles.
pub enum Preset {
    /// Stronger IGN dither and monochrome grain; survives video encoders.
    Video,
    /// Blue-noise dither and Oklab interpolation for still images.
    #[default]
    Still,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// How a layer's color combines with what is underneath.
pub enum BlendMode {
    /// Replace.
    #[default]
    Normal,
    /// Saturating sum.
    Add,
    /// Channel product.
    Multiply,
    /// `1 - (1 - d)(1 - s)`.
    Screen,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Space in which color stops are interpolated.
pub enum ColorSpace {
    /// Piecewise-linear in linear-light RGB.
    #[default]
    #[serde(alias = "linear")]
    LinearRgb,
    /// Piecewise-linear in Oklab, converted back to linear RGB.
    Oklab,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Quantization dither pattern.
pub enum DitherMode {
    /// Plain rounding.
    None,
    /// Interleaved gradient noise (no texture needed).
    #[serde(alias = "ign")]
    InterleavedGradient,
    /// 64×64 void-and-cluster texture.
    BlueNoise,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// A color at a position along a layer's progress axis.
pub struct ColorStop {
    /// Position in `[0, 1]`; out-of-range values are clamped.
    pub position: f32,
    /// Hex color.
    pub color: String,
}

impl ColorStop {
    /// Convenience constructor.
    pub fn new(position: f32, color: impl Into<String>) -> Self {
        Self {
            position,
            color: color.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Progress-driven darkening of a layer's RGB.
pub struct Shadow {
    /// Darkening at progress 0, in `[0, 1]`.
    #[serde(default)]
    pub start_intensity: f32,
    /// Darkening at progress 1, in `[0, 1]`.
    #[serde(default = "default_end_intensity")]
    pub end_intensity: f32,
    /// Exponent applied to progress before interpolating intensity.
    #[serde(default = "default_one")]
    pub curve: f32,
}

impl Default for Shadow {
    fn default() -> Self {
        Self {
            start_intensity: 0.0,
            end_intensity: default_end_intensity(),
            curve: 1.0,
        }
    }
}

fn default_end_intensity() -> f32 {
    0.5
}

fn default_one() -> f32 {
    1.0
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Procedural film grain.
pub struct Grain {
    /// Strength in `[0, 1]`; `<= 0` disables grain.
    pub amount: f32,
    /// Grain cell size in physical pixels (preset default when unset).
    #[serde(default)]
    pub scale: Option<f32>,
    /// Selects a deterministic noise offset.
    #[serde(default)]
    pub seed: u32,
    /// One shared sample for R/G/B instead of per-channel noise (preset default when unset).
    #[serde(default)]
    pub monochrome: Option<bool>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Dither override; unset fields fall back to the preset.
pub struct Dither {
    /// Pattern.
    #[serde(default)]
    pub mode: Option<DitherMode>,
    /// Amplitude in least-significant-bit units.
    #[serde(default)]
    pub amplitude: Option<f32>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Paint attributes shared by every layer shape.
pub struct LayerPaint {
    /// Layer opacity in `[0, 1]`.
    #[serde(default)]
    pub opacity: Option<f32>,
    /// Blend mode.
    #[serde(default)]
    pub blend: Option<BlendMode>,
    /// Interpolation space for the stops.
    #[serde(default)]
    pub color_space: Option<ColorSpace>,
    /// Explicit stops; when non-empty they take precedence over `start`/`mid`/`end`.
    #[serde(default)]
    pub stops: Vec<ColorStop>,
    /// Shorthand color at progress 0.
    #[serde(default)]
    pub start: Option<String>,
    /// Shorthand color at `midpoint`.
    #[serde(default)]
    pub mid: Option<String>,
    /// Shorthand color at progress 1.
    #[serde(default)]
    pub end: Option<String>,
    /// Position of `mid` (default 0.5).
    #[serde(default)]
    pub midpoint: Option<f32>,
    /// Progress-driven darkening.
    #[serde(default)]
    pub shadow: Option<Shadow>,
    /// Grain applied in linear light before blending.
    #[serde(default)]
    pub grain: Option<Grain>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
/// A layer shape and its paint.
pub enum Layer {
    /// Gradient along a direction.
    Linear(LinearLayer),
    /// Elliptical or squircle gradient around a center.
    Radial(RadialLayer),
    /// Rounded-rectangle shadow.
    Box(BoxLayer),
}

impl Layer {
    /// Shared paint attributes.
    pub fn paint(&self) -> &LayerPaint {
        match self {
            Layer::Linear(l) => &l.paint,
            Layer::Radial(l) => &l.paint,
            Layer::Box(l) => &l.paint,
        }
    }

    /// Number of color stops the layer resolves to.
    pub fn stop_count(&self) -> usize {
        let paint = self.paint();
        if !paint.stops.is_empty() {
            paint.stops.len()
        } else if paint.mid.is_some() {
            3
        } else {
            2
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Linear gradient geometry.
pub struct LinearLayer {
    /// Paint.
    #[serde(flatten)]
    pub paint: LayerPaint,
    /// CSS angle in degrees (0 = towards the top, clockwise). Used when `from`/`to` are unset.
    #[serde(default)]
    pub angle: Option<f32>,
    /// Explicit start point in design space.
    #[serde(default)]
    pub from: Option<Point>,
    /// Explicit end point in design space.
    #[serde(default)]
    pub to: Option<Point>,
    /// Exponent applied to progress.
    #[serde(default)]
    pub easing: Option<f32>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Radial / squircle gradient geometry.
pub struct RadialLayer {
    /// Paint.
    #[serde(flatten)]
    pub paint: LayerPaint,
    /// Center in design space (canvas center when unset).
    #[serde(default)]
    pub center: Option<Point>,
    /// Radius applied to both axes unless `radius_x`/`radius_y` are given.
    #[serde(default)]
    pub radius: Option<f32>,
    /// Horizontal radius.
    #[serde(default)]
    pub radius_x: Option<f32>,
    /// Vertical radius.
    #[serde(default)]
    pub radius_y: Option<f32>,
    /// Lp-norm exponent: 2 for an ellipse, larger for a squircle.
    #[serde(default)]
    pub power: Option<f32>,
    /// Normalized distance where progress starts rising.
    #[serde(default)]
    pub inner: Option<f32>,
    /// Normalized distance where progress reaches 1.
    #[serde(default)]
    pub outer: Option<f32>,
    /// Exponent applied to progress.
    #[serde(default)]
    pub falloff: Option<f32>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Rounded-box signed-distance shadow geometry.
pub struct BoxLayer {
    /// Paint.
    #[serde(flatten)]
    pub paint: LayerPaint,
    /// Box center in design space (canvas center when unset).
    #[serde(default)]
    pub center: Option<Point>,
    /// Box size in design space (whole canvas when unset).
    #[serde(default)]
    pub size: Option<Size>,
    /// Corner radius.
    #[serde(default)]
    pub corner_radius: f32,
    /// Shadow spread: contracts (inset) or inflates (outer) the box.
    #[serde(default)]
    pub spread: f32,
    /// CSS blur radius; the Gaussian sigma is `blur / 2`.
    #[serde(default)]
    pub blur: f32,
    /// Inner shadow instead of a drop shadow.
    #[serde(default)]
    pub inset: bool,
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
