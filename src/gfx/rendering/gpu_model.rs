use std::ops::Range;

use log::debug;
use wgpu::util::DeviceExt;

use super::uniforms::MaterialUniform;
use crate::{
    error::Result,
    gfx::resources::UniformBuffer,
    model::Model,
    schema::VertexLayout,
};

const FLOAT_SIZE: wgpu::BufferAddress = std::mem::size_of::<f32>() as wgpu::BufferAddress;

/// Shader attributes for an interleaved buffer in `layout`: position at
/// location 0 and, when present, the normal at location 1.
pub fn vertex_attributes(layout: VertexLayout) -> Vec<wgpu::VertexAttribute> {
    let mut attributes = vec![wgpu::VertexAttribute {
        offset: 0,
        shader_location: 0,
        format: wgpu::VertexFormat::Float32x3,
    }];
    if let Some(normal_offset) = layout.normal_offset() {
        attributes.push(wgpu::VertexAttribute {
            offset: normal_offset as wgpu::BufferAddress * FLOAT_SIZE,
            shader_location: 1,
            format: wgpu::VertexFormat::Float32x3,
        });
    }
    attributes
}

pub fn vertex_stride(layout: VertexLayout) -> wgpu::BufferAddress {
    layout.stride() as wgpu::BufferAddress * FLOAT_SIZE
}

/// One draw call: a run of the index buffer and its material binding.
pub struct ChunkDraw {
    pub indices: Range<u32>,
    pub bind_group: wgpu::BindGroup,
    _material: UniformBuffer<MaterialUniform>,
}

/// Vertex/index buffers for a [`Model`] plus one material bind group per
/// chunk, uploaded once.
pub struct GpuModel {
    pub layout: VertexLayout,
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub chunks: Vec<ChunkDraw>,
}

impl GpuModel {
    pub fn new(
        device: &wgpu::Device,
        model: &Model,
        material_layout: &wgpu::BindGroupLayout,
    ) -> Result<Self> {
        let mesh = model.mesh();

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Model Vertex Buffer"),
            contents: bytemuck::cast_slice(mesh.vertices()),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Model Index Buffer"),
            contents: bytemuck::cast_slice(mesh.face_indices()),
            usage: wgpu::BufferUsages::INDEX,
        });

        let chunks = model
            .chunk_materials()?
            .into_iter()
            .map(|(chunk, material)| {
                let uniform =
                    UniformBuffer::new_with_data(device, &MaterialUniform::opaque(material.diffuse_color));
                let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some(&format!("Material Bind Group: {}", material.name)),
                    layout: material_layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: uniform.binding_resource(),
                    }],
                });

                ChunkDraw {
                    indices: chunk.offset..chunk.offset + chunk.count,
                    bind_group,
                    _material: uniform,
                }
            })
            .collect::<Vec<_>>();

        debug!(
            "Uploaded model: {} vertices, {} indices, {} draw(s)",
            mesh.vertex_count(),
            mesh.face_indices().len(),
            chunks.len()
        );

        Ok(Self {
            layout: mesh.layout(),
            vertex_buffer,
            index_buffer,
            chunks,
        })
    }
}

pub trait DrawModel {
    /// Issues one indexed draw per material chunk. The material bind group
    /// goes to `material_slot`.
    fn draw_model(&mut self, model: &GpuModel, material_slot: u32);
}

impl DrawModel for wgpu::RenderPass<'_> {
    fn draw_model(&mut self, model: &GpuModel, material_slot: u32) {
        // Empty buffers cannot be sliced.
        if model.chunks.iter().all(|chunk| chunk.indices.is_empty()) {
            return;
        }

        self.set_vertex_buffer(0, model.vertex_buffer.slice(..));
        self.set_index_buffer(model.index_buffer.slice(..), wgpu::IndexFormat::Uint32);

        for chunk in &model.chunks {
            if chunk.indices.is_empty() {
                continue;
            }
            self.set_bind_group(material_slot, &chunk.bind_group, &[]);
            self.draw_indexed(chunk.indices.clone(), 0, 0..1);
        }
    }
}
