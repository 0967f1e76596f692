//! Turn a user [`GradientConfig`](crate::GradientConfig) into the read-only form the
//! compositors consume.

pub(crate) mod layer;
pub(crate) mod stops;
