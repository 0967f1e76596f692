//! Deterministic noise sources for dithering and grain.

pub(crate) mod blue;
pub(crate) mod dither;
pub(crate) mod ign;
