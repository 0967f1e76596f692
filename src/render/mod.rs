//! Compositors: the CPU reference path and the fixed-capacity GPU path.

pub(crate) mod backend;
pub(crate) mod blend;
pub(crate) mod cpu;
pub(crate) mod gpu;
