use crate::foundation::error::{GradiaError, GradiaResult};

pub use kurbo::{Point, Size};

/// Output dimensions of a render call.
///
/// Geometry is authored in *design* space; pixels are produced in *physical* space. The two
/// differ on HiDPI targets, where the physical buffer is a multiple of the design size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RenderSize {
    /// Design-space width.
    pub design_width: u32,
    /// Design-space height.
    pub design_height: u32,
    /// Output buffer width in pixels.
    pub physical_width: u32,
    /// Output buffer height in pixels.
    pub physical_height: u32,
}

impl RenderSize {
    /// A render where design and physical sizes coincide.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            design_width: width,
            design_height: height,
            physical_width: width,
            physical_height: height,
        }
    }

    /// Override the physical output size.
    pub fn with_physical(mut self, width: u32, height: u32) -> Self {
        self.physical_width = width;
        self.physical_height = height;
        self
    }

    /// Reject empty or overflowing sizes.
    pub fn validate(self) -> GradiaResult<()> {
        if self.design_width == 0 || self.design_height == 0 {
            return Err(GradiaError::validation("design size must be non-zero"));
        }
        if self.physical_width == 0 || self.physical_height == 0 {
            return Err(GradiaError::validation("physical size must be non-zero"));
        }
        self.byte_len().map(|_| ())
    }

    pub(crate) fn byte_len(self) -> GradiaResult<usize> {
        (self.physical_width as usize)
            .checked_mul(self.physical_height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| GradiaError::validation("render buffer size overflow"))
    }

    pub(crate) fn design(self) -> [f32; 2] {
        [self.design_width as f32, self.design_height as f32]
    }

    /// Design-space units per physical pixel along each axis.
    pub(crate) fn design_per_pixel(self) -> [f32; 2] {
        [
            self.design_width as f32 / self.physical_width as f32,
            self.design_height as f32 / self.physical_height as f32,
        ]
    }

    /// Design-space position of the center of physical pixel `(px, py)`.
    #[inline]
    pub(crate) fn design_point(self, px: u32, py: u32) -> [f32; 2] {
        let [sx, sy] = self.design_per_pixel();
        [(px as f32 + 0.5) * sx, (py as f32 + 0.5) * sy]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
