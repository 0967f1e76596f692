//! Color math: sRGB transfer curve, Oklab, and hex strings.

pub(crate) mod hex;
pub(crate) mod space;
