use std::sync::Arc;

use crate::config::model::GradientConfig;
use crate::foundation::core::RenderSize;
use crate::foundation::error::{GradiaError, GradiaResult};
use crate::noise::blue::{BLUE_NOISE_SIZE, BlueNoise};
use crate::render::backend::{BackendKind, FrameRGBA, RenderBackend};
use crate::render::gpu::pack::{GpuLimits, GpuPacket};
use crate::render::gpu::shader::shader_source;
use crate::resolve::layer::ResolvedConfig;

struct Context {
    device: wgpu::Device,
    queue: wgpu::Queue,
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    params: wgpu::Buffer,
}

struct Target {
    width: u32,
    height: u32,
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    readback: wgpu::Buffer,
    bytes_per_row: u32,
}

/// Fragment-shader compositor on wgpu.
///
/// The device, pipeline and blue-noise texture are created on the first render; the render
/// target is recreated whenever the physical size changes.
#[derive(Default)]
pub struct GpuBackend {
    limits: GpuLimits,
    blue_noise: Option<Arc<BlueNoise>>,
    ctx: Option<Context>,
    target: Option<Target>,
}

impl GpuBackend {
    /// Backend with the default [`GpuLimits`] and the shared blue-noise texture.
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend compiled for custom uniform-array capacities.
    pub fn with_limits(limits: GpuLimits) -> Self {
        Self {
            limits,
            ..Self::default()
        }
    }

    /// Dither with `blue` instead of [`BlueNoise::shared`]. Must be called before the first render.
    pub fn with_blue_noise(mut self, blue: Arc<BlueNoise>) -> Self {
        self.blue_noise = Some(blue);
        self
    }

    /// Limits this backend accepts.
    pub fn limits(&self) -> GpuLimits {
        self.limits
    }

    fn ensure_init(&mut self) -> GradiaResult<()> {
        if self.ctx.is_some() {
            return Ok(());
        }

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: None,
            force_fallback_adapter: false,
        }))
        .map_err(|e| match e {
            wgpu::RequestAdapterError::NotFound { .. } => {
                GradiaError::gpu("no gpu adapter available")
            }
            other => GradiaError::gpu(format!("wgpu request_adapter failed: {other:?}")),
        })?;

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("gradia_device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            experimental_features: wgpu::ExperimentalFeatures::default(),
            memory_hints: wgpu::MemoryHints::Performance,
            trace: wgpu::Trace::Off,
        }))
        .map_err(|e| GradiaError::gpu(format!("wgpu request_device failed: {e:?}")))?;
        tracing::debug!(adapter = ?adapter.get_info().name, "gpu device ready");

        let blue = self.blue_noise.as_deref().unwrap_or_else(|| BlueNoise::shared());
        let blue_view = upload_blue_noise(&device, &queue, blue);

        let params = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("gradia_params"),
            size: (self.limits.uniform_vec4s() * 16) as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("gradia_bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: false },
                    },
                    count: None,
                },
            ],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("gradia_bg"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: params.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&blue_view),
                },
            ],
        });

        // Shader and pipeline errors would otherwise reach wgpu's uncaptured-error handler.
        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("gradia_shader"),
            source: wgpu::ShaderSource::Wgsl(shader_source(&self.limits).into()),
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("gradia_pl"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("gradia_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: wgpu::PipelineCompilationOptions::default(),
                buffers: &[],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: wgpu::PipelineCompilationOptions::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: wgpu::TextureFormat::Rgba8Unorm,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });
        if let Some(err) = pollster::block_on(device.pop_error_scope()) {
            tracing::warn!(error = %err, "gradient shader failed validation");
            return Err(GradiaError::gpu(format!("shader compilation failed: {err}")));
        }

        self.ctx = Some(Context {
            device,
            queue,
            pipeline,
            bind_group,
            params,
        });
        self.target = None;
        Ok(())
    }

    fn ensure_target(&mut self, width: u32, height: u32) -> GradiaResult<()> {
        if self
            .target
            .as_ref()
            .is_some_and(|t| t.width == width && t.height == height)
        {
            return Ok(());
        }
        let ctx = self
            .ctx
            .as_ref()
            .ok_or_else(|| GradiaError::gpu("gpu backend not initialized"))?;

        let max = ctx.device.limits().max_texture_dimension_2d;
        if width > max || height > max {
            return Err(GradiaError::gpu(format!(
                "render target {width}x{height} exceeds the device limit of {max}"
            )));
        }

        let bytes_per_row_unpadded = width
            .checked_mul(4)
            .ok_or_else(|| GradiaError::validation("render target width overflow"))?;
        let bytes_per_row = align_to(bytes_per_row_unpadded, wgpu::COPY_BYTES_PER_ROW_ALIGNMENT);
        let buffer_size = u64::from(bytes_per_row)
            .checked_mul(u64::from(height))
            .ok_or_else(|| GradiaError::validation("readback buffer size overflow"))?;

        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("gradia_target"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let readback = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("gradia_readback"),
            size: buffer_size,
            usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        self.target = Some(Target {
            width,
            height,
            texture,
            view,
            readback,
            bytes_per_row,
        });
        Ok(())
    }

    fn draw(&self, packet: &GpuPacket) -> GradiaResult<FrameRGBA> {
        let (Some(ctx), Some(target)) = (self.ctx.as_ref(), self.target.as_ref()) else {
            return Err(GradiaError::gpu("gpu backend not initialized"));
        };
        ctx.queue.write_buffer(&ctx.params, 0, packet.as_bytes());

        let mut encoder = ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("gradia_encoder"),
            });
        {
            let mut rp = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("gradia_rp"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &target.view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rp.set_pipeline(&ctx.pipeline);
            rp.set_bind_group(0, &ctx.bind_group, &[]);
            rp.draw(0..3, 0..1);
        }
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: &target.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &target.readback,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(target.bytes_per_row),
                    rows_per_image: Some(target.height),
                },
            },
            wgpu::Extent3d {
                width: target.width,
                height: target.height,
                depth_or_array_layers: 1,
            },
        );
        ctx.queue.submit(Some(encoder.finish()));

        let slice = target.readback.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |res| {
            let _ = tx.send(res);
        });
        ctx.device
            .poll(wgpu::PollType::wait_indefinitely())
            .map_err(|e| GradiaError::gpu(format!("wgpu poll failed: {e:?}")))?;
        rx.recv()
            .map_err(|_| GradiaError::gpu("readback channel closed"))?
            .map_err(|e| GradiaError::gpu(format!("readback map failed: {e:?}")))?;

        let mapped = slice.get_mapped_range();
        let row_bytes = target.width as usize * 4;
        let padded = target.bytes_per_row as usize;
        let mut data = Vec::with_capacity(row_bytes * target.height as usize);
        for row in 0..target.height as usize {
            let start = row * padded;
            data.extend_from_slice(&mapped[start..start + row_bytes]);
        }
        drop(mapped);
        target.readback.unmap();

        Ok(FrameRGBA {
            width: target.width,
            height: target.height,
            data,
            premultiplied: false,
        })
    }
}

impl RenderBackend for GpuBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Gpu
    }

    #[tracing::instrument(skip(self, config), fields(layers = config.layers.len()))]
    fn render(&mut self, config: &GradientConfig, size: RenderSize) -> GradiaResult<FrameRGBA> {
        size.validate()?;
        self.limits.check(config).into_result()?;
        let resolved = ResolvedConfig::resolve(config, size)?;
        let packet = GpuPacket::pack(&resolved, size, &self.limits)?;

        self.ensure_init()?;
        self.ensure_target(size.physical_width, size.physical_height)?;
        self.draw(&packet)
    }
}

fn upload_blue_noise(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    blue: &BlueNoise,
) -> wgpu::TextureView {
    let side = BLUE_NOISE_SIZE as u32;
    let extent = wgpu::Extent3d {
        width: side,
        height: side,
        depth_or_array_layers: 1,
    };
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("gradia_blue_noise"),
        size: extent,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::R8Unorm,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        blue.as_bytes(),
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(side),
            rows_per_image: Some(side),
        },
        extent,
    );
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

fn align_to(value: u32, alignment: u32) -> u32 {
    let mask = alignment - 1;
    (value + mask) & !mask
}
