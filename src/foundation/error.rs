/// Convenience result type used across gradia.
pub type GradiaResult<T> = Result<T, GradiaError>;

/// Top-level error taxonomy used by the rendering APIs.
#[derive(thiserror::Error, Debug)]
pub enum GradiaError {
    /// A color string could not be parsed as `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`.
    #[error("invalid color format: {0}")]
    InvalidColorFormat(String),

    /// A configuration payload could not be decoded.
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// The configuration does not fit the fixed-capacity GPU path.
    ///
    /// Callers are expected to check [`crate::check_gpu_support`] first and render on the CPU.
    #[error("unsupported by gpu path: {0}")]
    UnsupportedByGpuPath(String),

    /// Invalid render parameters (sizes, buffer shapes).
    #[error("validation error: {0}")]
    Validation(String),

    /// GPU adapter, device, shader or readback failure.
    #[error("gpu error: {0}")]
    Gpu(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GradiaError {
    /// Build a [`GradiaError::InvalidColorFormat`] value.
    pub fn invalid_color(msg: impl Into<String>) -> Self {
        Self::InvalidColorFormat(msg.into())
    }

    /// Build a [`GradiaError::ConfigParse`] value.
    pub fn config_parse(msg: impl Into<String>) -> Self {
        Self::ConfigParse(msg.into())
    }

    /// Build a [`GradiaError::UnsupportedByGpuPath`] value.
    pub fn unsupported_by_gpu(msg: impl Into<String>) -> Self {
        Self::UnsupportedByGpuPath(msg.into())
    }

    /// Build a [`GradiaError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`GradiaError::Gpu`] value.
    pub fn gpu(msg: impl Into<String>) -> Self {
        Self::Gpu(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
