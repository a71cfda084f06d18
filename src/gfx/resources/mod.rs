//! GPU resource helpers
//!
//! Typed uniform buffers and the depth attachment.

pub mod depth_texture;
pub mod uniform_buffer;

pub use depth_texture::DepthTexture;
pub use uniform_buffer::UniformBuffer;
