//! Uniform block layouts shared with `shader.wgsl`

use cgmath::Matrix4;

use crate::gfx::camera::CameraUniform;

/// Group 0: per-frame camera data and the model transform.
/// MUST match `GlobalUniform` in the shader.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUniform {
    pub view_position: [f32; 4],
    pub view_proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
}

impl GlobalUniform {
    pub fn new(camera: CameraUniform, model: Matrix4<f32>) -> Self {
        Self {
            view_position: camera.view_position,
            view_proj: camera.view_proj,
            model: model.into(),
        }
    }
}

/// Group 1: one per material chunk.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    pub diffuse_color: [f32; 4],
}

impl MaterialUniform {
    pub fn opaque(diffuse_color: [f32; 3]) -> Self {
        let [r, g, b] = diffuse_color;
        Self {
            diffuse_color: [r, g, b, 1.0],
        }
    }
}
