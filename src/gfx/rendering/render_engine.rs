//! WGPU-based renderer for a single static model
//!
//! Owns the surface, the depth buffer and one pipeline; the model is
//! uploaded once and drawn with one indexed call per material chunk.

use std::{iter, sync::Arc};

use anyhow::{Context, Result};
use cgmath::Matrix4;
use log::info;
use wgpu::TextureFormat;

use super::{
    gpu_model::{vertex_attributes, vertex_stride, DrawModel, GpuModel},
    uniforms::{GlobalUniform, MaterialUniform},
};
use crate::{
    gfx::{
        camera::CameraUniform,
        resources::{DepthTexture, UniformBuffer},
    },
    model::Model,
};

const GLOBAL_GROUP: u32 = 0;
const MATERIAL_GROUP: u32 = 1;

pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: DepthTexture,
    format: TextureFormat,

    pipeline: wgpu::RenderPipeline,

    global_ubo: UniformBuffer<GlobalUniform>,
    global_bind_group: wgpu::BindGroup,
    model_transform: Matrix4<f32>,
    model: GpuModel,
}

impl RenderEngine {
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        model: &Model,
        model_scale: f32,
    ) -> Result<RenderEngine> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance
            .create_surface(window)
            .context("Failed to create surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("Failed to request adapter")?;
        info!("Using adapter: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits::downlevel_defaults(),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .context("Failed to request a device")?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_capabilities.formats.first().copied())
            .context("Surface reports no texture formats")?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_capabilities
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        let depth_texture = DepthTexture::new(&device, &config, "depth_texture");

        let model_transform = Matrix4::from_scale(model_scale);
        let global_ubo = UniformBuffer::new_with_data(
            &device,
            &GlobalUniform::new(CameraUniform::default(), model_transform),
        );
        let global_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Globals Bind Group Layout"),
            entries: &[UniformBuffer::<GlobalUniform>::layout_entry(0)],
        });
        let global_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Global Bind Group"),
            layout: &global_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: global_ubo.binding_resource(),
            }],
        });

        let material_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Material Bind Group Layout"),
            entries: &[UniformBuffer::<MaterialUniform>::layout_entry(0)],
        });
        let model = GpuModel::new(&device, model, &material_layout)?;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Model Pipeline Layout"),
            bind_group_layouts: &[&global_layout, &material_layout],
            push_constant_ranges: &[],
        });

        let attributes = vertex_attributes(model.layout);
        let vertex_entry_point = if model.layout.has_normal() {
            "vs_main"
        } else {
            "vs_position_only"
        };

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Model Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some(vertex_entry_point),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: vertex_stride(model.layout),
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &attributes,
                }],
                compilation_options: Default::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
                unclipped_depth: false,
            },
            depth_stencil: Some(DepthTexture::depth_stencil_state()),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            multiview: None,
            cache: None,
        });

        Ok(RenderEngine {
            device: device.into(),
            config,
            format,
            surface,
            queue: queue.into(),
            pipeline,
            depth_texture,

            global_ubo,
            global_bind_group,
            model_transform,
            model,
        })
    }

    pub fn render_frame(&self) -> Result<(), wgpu::SurfaceError> {
        let surface_texture = self.surface.get_current_texture()?;

        let surface_texture_view =
            surface_texture
                .texture
                .create_view(&wgpu::TextureViewDescriptor {
                    format: Some(self.format),
                    ..Default::default()
                });
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.1,
                            g: 0.2,
                            b: 0.3,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
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
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(GLOBAL_GROUP, &self.global_bind_group, &[]);
            render_pass.draw_model(&self.model, MATERIAL_GROUP);
        }

        self.queue.submit(iter::once(encoder.finish()));
        surface_texture.present();
        Ok(())
    }

    pub fn update(&mut self, camera_uniform: CameraUniform) {
        self.global_ubo.update_content(
            &self.queue,
            GlobalUniform::new(camera_uniform, self.model_transform),
        );
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);

        self.depth_texture = DepthTexture::new(&self.device, &self.config, "depth_texture");
    }

    /// Reconfigures the surface at its current size, after it was lost.
    pub fn reconfigure(&mut self) {
        self.resize(self.config.width, self.config.height);
    }
}
