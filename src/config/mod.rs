//! Serde configuration schema and preset defaults.

pub(crate) mod model;
pub(crate) mod preset;
