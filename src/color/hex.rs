use crate::color::space::{LinearRgba, srgb_to_linear};
use crate::foundation::error::{GradiaError, GradiaResult};

/// Straight-alpha 8-bit sRGB color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Rgba8 {
    /// Construct from components.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa` (the `#` is optional, case-insensitive).
    pub fn parse_hex(s: &str) -> GradiaResult<Self> {
        parse_hex(s)
    }

    /// Format as `#rrggbb`, or `#rrggbbaa` when the color is not fully opaque.
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Decode to linear light; alpha is mapped to `[0, 1]` without a transfer curve.
    pub fn to_linear(self) -> LinearRgba {
        LinearRgba {
            r: srgb_to_linear(self.r),
            g: srgb_to_linear(self.g),
            b: srgb_to_linear(self.b),
            a: f32::from(self.a) / 255.0,
        }
    }
}

impl std::str::FromStr for Rgba8 {
    type Err = GradiaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex(s)
    }
}

/// Parse a hex color string directly into linear RGBA.
pub fn parse_color(s: &str) -> GradiaResult<LinearRgba> {
    parse_hex(s).map(Rgba8::to_linear)
}

fn parse_hex(input: &str) -> GradiaResult<Rgba8> {
    let s = input.trim();
    let s = s.strip_prefix('#').unwrap_or(s);

    if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(GradiaError::invalid_color(format!(
            "\"{input}\" contains non-hex characters"
        )));
    }

    let nibble = |i: usize| -> u8 {
        let v = u8::from_str_radix(&s[i..i + 1], 16).unwrap_or(0);
        v * 17
    };
    let byte = |i: usize| -> u8 { u8::from_str_radix(&s[i..i + 2], 16).unwrap_or(0) };

    match s.len() {
        3 => Ok(Rgba8::new(nibble(0), nibble(1), nibble(2), 255)),
        4 => Ok(Rgba8::new(nibble(0), nibble(1), nibble(2), nibble(3))),
        6 => Ok(Rgba8::new(byte(0), byte(2), byte(4), 255)),
        8 => Ok(Rgba8::new(byte(0), byte(2), byte(4), byte(6))),
        n => Err(GradiaError::invalid_color(format!(
            "\"{input}\" has {n} hex digits; expected 3, 4, 6 or 8"
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/color/hex.rs"]
mod tests;
