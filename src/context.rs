//! The wgpu render backend bound to a winit window.
//!
//! [`Context`] owns the device, queue, surface, the museum pipeline and the
//! frame-wide uniforms. Between [`RenderBackend::clear`] and
//! [`RenderBackend::present`] it records draw calls; `present` replays them in
//! one render pass that clears colour and depth, submits and swaps.

use std::sync::Arc;

use anyhow::Context as _;
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::{
    config::EngineConfig,
    data_structures::{
        mesh::{CubeNormal, CubeVertex},
        texture::{Texture, create_default_sampler},
    },
    math::{self, Matrix4},
    pipelines::{
        basic::{frame_layout, image_texture_layout, mk_museum_pipeline, model_layout},
        light::{self, LightUniform},
    },
    render::{ClearColour, IMAGE_TEXTURE_UNIT, RenderBackend, Uniform},
};

/// Vertex and normal buffers plus the per-object `model` uniform.
#[derive(Clone, Debug)]
pub struct GpuGeometry {
    vertex_buffer: wgpu::Buffer,
    normal_buffer: wgpu::Buffer,
    model_buffer: wgpu::Buffer,
    model_bind_group: wgpu::BindGroup,
}

/// An uploaded image and the bind group that exposes it as `imageTexture`.
#[derive(Clone, Debug)]
pub struct GpuTexture {
    #[allow(unused)]
    texture: Texture,
    bind_group: wgpu::BindGroup,
}

#[derive(Debug)]
struct DrawCall {
    geometry: GpuGeometry,
    texture: wgpu::BindGroup,
    vertex_count: u32,
}

/// A minimised window reports zero size and cannot back a surface.
fn can_back_surface(width: u32, height: u32) -> bool {
    width > 0 && height > 0
}

#[derive(Debug)]
pub struct Context {
    pub(crate) window: Arc<Window>,
    pub(crate) depth_texture: Texture,
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    model_layout: wgpu::BindGroupLayout,
    image_texture_layout: wgpu::BindGroupLayout,
    projection_buffer: wgpu::Buffer,
    light_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    clear_colour: wgpu::Color,
    bound_textures: Vec<Option<wgpu::BindGroup>>,
    draws: Vec<DrawCall>,
    is_surface_configured: bool,
}

impl Context {
    pub async fn new(window: Arc<Window>, engine: &EngineConfig) -> anyhow::Result<Self> {
        let size = window.inner_size();

        // All backends, so GL-only machines still get a context
        log::info!("WGPU setup");
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..wgpu::InstanceDescriptor::new_without_display_handle()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("creating the window surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no graphics adapter can present to this window")?;
        log::info!("using adapter {:?}", adapter.get_info());

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                    .using_resolution(adapter.limits()),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: Default::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .context("requesting a device")?;

        let surface_caps = surface.get_capabilities(&adapter);
        // Textures upload as sRGB, so prefer an sRGB surface to keep colours as authored
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .context("the surface reports no texture formats")?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let frame_layout = frame_layout(&device);
        let model_layout = model_layout(&device);
        let image_texture_layout = image_texture_layout(&device);
        let pipeline = mk_museum_pipeline(
            &device,
            config.format,
            &frame_layout,
            &model_layout,
            &image_texture_layout,
        );
        log::info!("museum pipeline ready ({:?})", config.format);

        let projection_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(Uniform::Projection.name()),
            contents: bytemuck::cast_slice(&[math::identity()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let light_buffer = light::mk_buffer(&device, LightUniform::new(engine.light_position));

        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &frame_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: projection_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: light_buffer.as_entire_binding(),
                },
            ],
            label: Some("frame_bind_group"),
        });

        let depth_texture =
            Texture::create_depth_texture(&device, [config.width, config.height], "depth_texture");

        Ok(Self {
            window,
            depth_texture,
            surface,
            device,
            queue,
            config,
            pipeline,
            model_layout,
            image_texture_layout,
            projection_buffer,
            light_buffer,
            frame_bind_group,
            clear_colour: engine.clear_colour.into(),
            bound_textures: vec![None; IMAGE_TEXTURE_UNIT as usize + 1],
            draws: Vec::new(),
            is_surface_configured: true,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub(crate) fn resize(&mut self, width: u32, height: u32) {
        self.is_surface_configured = can_back_surface(width, height);
        if self.is_surface_configured {
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.depth_texture = Texture::create_depth_texture(
                &self.device,
                [self.config.width, self.config.height],
                "depth_texture",
            );
        }
    }

    fn encode_frame(&self, view: &wgpu::TextureView, draws: &[DrawCall]) -> wgpu::CommandBuffer {
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_colour),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
                multiview_mask: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, &self.frame_bind_group, &[]);
            for draw in draws {
                render_pass.set_bind_group(1, &draw.geometry.model_bind_group, &[]);
                render_pass.set_bind_group(2, &draw.texture, &[]);
                render_pass.set_vertex_buffer(0, draw.geometry.vertex_buffer.slice(..));
                render_pass.set_vertex_buffer(1, draw.geometry.normal_buffer.slice(..));
                render_pass.draw(0..draw.vertex_count, 0..1);
            }
        }
        encoder.finish()
    }
}

impl RenderBackend for Context {
    type Geometry = GpuGeometry;
    type Texture = GpuTexture;

    fn upload_geometry(
        &mut self,
        label: &str,
        vertices: &[CubeVertex],
        normals: &[CubeNormal],
    ) -> GpuGeometry {
        let vertex_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Vertex Buffer")),
                contents: bytemuck::cast_slice(vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let normal_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Normal Buffer")),
                contents: bytemuck::cast_slice(normals),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let model_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} {}", Uniform::Model.name())),
                contents: bytemuck::cast_slice(&[math::identity()]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
        let model_bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &self.model_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: model_buffer.as_entire_binding(),
            }],
            label: Some("model_bind_group"),
        });

        GpuGeometry {
            vertex_buffer,
            normal_buffer,
            model_buffer,
            model_bind_group,
        }
    }

    fn upload_texture(&mut self, label: &str, image: &image::RgbaImage) -> GpuTexture {
        let texture = Texture::from_rgba(&self.device, &self.queue, image, Some(label));
        let sampler = texture
            .sampler
            .clone()
            .unwrap_or_else(|| create_default_sampler(&self.device));
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &self.image_texture_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
            label: Some(&format!("{label} {}", Uniform::ImageTexture.name())),
        });
        GpuTexture {
            texture,
            bind_group,
        }
    }

    fn write_model(&mut self, geometry: &GpuGeometry, model: &Matrix4) {
        self.queue
            .write_buffer(&geometry.model_buffer, 0, bytemuck::cast_slice(&[*model]));
    }

    fn write_projection(&mut self, projection: &Matrix4) {
        self.queue
            .write_buffer(&self.projection_buffer, 0, bytemuck::cast_slice(&[*projection]));
    }

    fn write_light_position(&mut self, position: [f32; 3]) {
        self.queue.write_buffer(
            &self.light_buffer,
            0,
            bytemuck::cast_slice(&[LightUniform::new(position)]),
        );
    }

    fn bind_texture(&mut self, unit: u32, texture: &GpuTexture) {
        let unit = unit as usize;
        if unit >= self.bound_textures.len() {
            self.bound_textures.resize(unit + 1, None);
        }
        self.bound_textures[unit] = Some(texture.bind_group.clone());
    }

    fn clear(&mut self, colour: ClearColour) {
        self.clear_colour = colour.into();
        self.draws.clear();
    }

    fn draw(&mut self, geometry: &GpuGeometry, vertex_count: u32) {
        match &self.bound_textures[IMAGE_TEXTURE_UNIT as usize] {
            Some(texture) => self.draws.push(DrawCall {
                geometry: geometry.clone(),
                texture: texture.clone(),
                vertex_count,
            }),
            None => log::warn!("skipping a draw with no texture bound to unit {IMAGE_TEXTURE_UNIT}"),
        }
    }

    fn present(&mut self) -> anyhow::Result<()> {
        let draws = std::mem::take(&mut self.draws);

        // Rendering requires the surface to be configured
        if !self.is_surface_configured {
            return Ok(());
        }

        let output = match self.surface.get_current_texture() {
            wgpu::CurrentSurfaceTexture::Success(output)
            | wgpu::CurrentSurfaceTexture::Suboptimal(output) => output,
            // Reconfigure the surface if it's lost or outdated
            wgpu::CurrentSurfaceTexture::Lost | wgpu::CurrentSurfaceTexture::Outdated => {
                let size = self.window.inner_size();
                self.resize(size.width, size.height);
                return Ok(());
            }
            e => {
                log::error!("Unable to render {:?}", e);
                return Ok(());
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let commands = self.encode_frame(&view, &draws);
        self.queue.submit(std::iter::once(commands));
        self.window.pre_present_notify();
        output.present();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sized_window_leaves_the_surface_unconfigured() {
        assert!(can_back_surface(800, 600));
        assert!(!can_back_surface(0, 600));
        assert!(!can_back_surface(800, 0));
        assert!(!can_back_surface(0, 0));
    }
}
