use crate::config::model::GradientConfig;
use crate::foundation::core::RenderSize;
use crate::foundation::error::{GradiaError, GradiaResult};
use crate::render::cpu::CpuBackend;
use crate::render::gpu::pack::check_gpu_support;

/// A rendered frame: row-major sRGB RGBA8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Width in physical pixels.
    pub width: u32,
    /// Height in physical pixels.
    pub height: u32,
    /// `width * height * 4` bytes.
    pub data: Vec<u8>,
    /// Whether color channels are premultiplied by alpha. Always `false` for gradia output.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// RGBA bytes of pixel `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Copy into an [`image::RgbaImage`] for encoding or inspection.
    pub fn to_rgba_image(&self) -> GradiaResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.data.clone()).ok_or_else(|| {
            GradiaError::validation(format!(
                "frame buffer of {} bytes does not match {}x{}",
                self.data.len(),
                self.width,
                self.height
            ))
        })
    }
}

/// Something that turns a configuration into pixels.
pub trait RenderBackend {
    /// Which implementation this is.
    fn kind(&self) -> BackendKind;

    /// Render one frame.
    fn render(&mut self, config: &GradientConfig, size: RenderSize) -> GradiaResult<FrameRGBA>;
}

/// Backend selector for [`create_backend`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// CPU compositor; always available.
    Cpu,
    /// wgpu fragment-shader compositor (`gpu` feature).
    Gpu,
    /// GPU when the configuration fits and an adapter exists, otherwise CPU.
    Auto,
}

/// Construct a backend.
///
/// GPU initialization is deferred to the first render, so requesting [`BackendKind::Gpu`] only
/// fails here when the crate was built without the `gpu` feature.
pub fn create_backend(kind: BackendKind) -> GradiaResult<Box<dyn RenderBackend>> {
    match kind {
        BackendKind::Cpu => Ok(Box::new(CpuBackend::default())),
        #[cfg(feature = "gpu")]
        BackendKind::Gpu => Ok(Box::new(crate::render::gpu::backend::GpuBackend::new())),
        #[cfg(not(feature = "gpu"))]
        BackendKind::Gpu => Err(GradiaError::gpu(
            "gradia was built without the `gpu` feature",
        )),
        BackendKind::Auto => Ok(Box::new(AutoBackend::default())),
    }
}

/// Routes each render to the GPU when possible and falls back to the CPU.
///
/// After the first GPU failure the GPU is not tried again for the lifetime of the backend.
#[derive(Default)]
struct AutoBackend {
    cpu: CpuBackend,
    #[cfg(feature = "gpu")]
    gpu: crate::render::gpu::backend::GpuBackend,
    gpu_disabled: bool,
}

impl AutoBackend {
    #[cfg(feature = "gpu")]
    fn try_gpu(
        &mut self,
        config: &GradientConfig,
        size: RenderSize,
    ) -> Option<GradiaResult<FrameRGBA>> {
        if self.gpu_disabled {
            return None;
        }
        match self.gpu.render(config, size) {
            Ok(frame) => Some(Ok(frame)),
            // Bad input fails the same way on either path.
            Err(e @ (GradiaError::InvalidColorFormat(_) | GradiaError::Validation(_))) => {
                Some(Err(e))
            }
            Err(e) => {
                tracing::warn!(error = %e, "gpu render failed; falling back to cpu");
                self.gpu_disabled = true;
                None
            }
        }
    }

    #[cfg(not(feature = "gpu"))]
    fn try_gpu(&mut self, _: &GradientConfig, _: RenderSize) -> Option<GradiaResult<FrameRGBA>> {
        self.gpu_disabled = true;
        None
    }
}

impl RenderBackend for AutoBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Auto
    }

    fn render(&mut self, config: &GradientConfig, size: RenderSize) -> GradiaResult<FrameRGBA> {
        let support = check_gpu_support(config);
        if support.is_supported() {
            if let Some(result) = self.try_gpu(config, size) {
                return result;
            }
        } else {
            tracing::debug!(?support, "configuration exceeds gpu limits; rendering on cpu");
        }
        self.cpu.render(config, size)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
