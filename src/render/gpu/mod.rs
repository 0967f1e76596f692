//! Fixed-capacity GPU compositor.
//!
//! The uniform layout, capability checks and shader text are plain Rust and always compiled, so
//! callers can route configurations without the `gpu` feature. Only [`backend`] touches wgpu.

#[cfg(feature = "gpu")]
pub(crate) mod backend;
pub(crate) mod pack;
pub(crate) mod shader;
