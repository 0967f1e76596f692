/// Straight-alpha color with linear-light RGB channels in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LinearRgba {
    /// Linear red.
    pub r: f32,
    /// Linear green.
    pub g: f32,
    /// Linear blue.
    pub b: f32,
    /// Alpha (straight, not premultiplied).
    pub a: f32,
}

impl LinearRgba {
    /// Opaque black.
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    /// Construct from components.
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Rec. 709 relative luminance of the linear RGB channels.
    pub fn luminance(self) -> f32 {
        0.2126 * self.r + 0.7152 * self.g + 0.0722 * self.b
    }

    /// Convert the color channels to Oklab (alpha is dropped).
    pub fn to_oklab(self) -> Oklab {
        linear_to_oklab(self)
    }

    pub(crate) fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub(crate) fn clamped(self) -> Self {
        use crate::foundation::math::clamp01;
        Self::rgba(clamp01(self.r), clamp01(self.g), clamp01(self.b), clamp01(self.a))
    }
}

/// A color in the Oklab perceptual space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Oklab {
    /// Perceived lightness.
    pub l: f32,
    /// Green/red axis.
    pub a: f32,
    /// Blue/yellow axis.
    pub b: f32,
}

impl Oklab {
    /// Convert back to linear RGB with the given alpha. Channels are not gamut-clamped.
    pub fn to_linear(self, alpha: f32) -> LinearRgba {
        oklab_to_linear(self, alpha)
    }
}

/// Decode an 8-bit sRGB channel into linear light.
pub fn srgb_to_linear(v: u8) -> f32 {
    let c = f32::from(v) / 255.0;
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Encode linear light into the sRGB range `[0, 255]`.
///
/// The result is deliberately left unrounded so dither and grain can be added below one LSB
/// before quantization.
pub fn linear_to_srgb(x: f32) -> f32 {
    let x = crate::foundation::math::clamp01(x);
    let c = if x <= 0.003_130_8 {
        x * 12.92
    } else {
        1.055 * x.powf(1.0 / 2.4) - 0.055
    };
    c * 255.0
}

/// Linear sRGB → Oklab using Ottosson's LMS matrices.
pub fn linear_to_oklab(c: LinearRgba) -> Oklab {
    let l = 0.412_221_47 * c.r + 0.536_332_55 * c.g + 0.051_445_995 * c.b;
    let m = 0.211_903_5 * c.r + 0.680_699_5 * c.g + 0.107_396_96 * c.b;
    let s = 0.088_302_46 * c.r + 0.281_718_85 * c.g + 0.629_978_7 * c.b;

    let l_ = l.cbrt();
    let m_ = m.cbrt();
    let s_ = s.cbrt();

    Oklab {
        l: 0.210_454_26 * l_ + 0.793_617_8 * m_ - 0.004_072_047 * s_,
        a: 1.977_998_5 * l_ - 2.428_592_2 * m_ + 0.450_593_7 * s_,
        b: 0.025_904_037 * l_ + 0.782_771_77 * m_ - 0.808_675_77 * s_,
    }
}

/// Oklab → linear sRGB; the inverse of [`linear_to_oklab`].
pub fn oklab_to_linear(c: Oklab, alpha: f32) -> LinearRgba {
    let l_ = c.l + 0.396_337_78 * c.a + 0.215_803_76 * c.b;
    let m_ = c.l - 0.105_561_346 * c.a - 0.063_854_17 * c.b;
    let s_ = c.l - 0.089_484_18 * c.a - 1.291_485_5 * c.b;

    let l = l_ * l_ * l_;
    let m = m_ * m_ * m_;
    let s = s_ * s_ * s_;

    LinearRgba {
        r: 4.076_741_7 * l - 3.307_711_6 * m + 0.230_969_94 * s,
        g: -1.268_438 * l + 2.609_757_4 * m - 0.341_319_38 * s,
        b: -0.004_196_086_3 * l - 0.703_418_6 * m + 1.707_614_7 * s,
        a: alpha,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/color/space.rs"]
mod tests;
