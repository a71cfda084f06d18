//! Core rendering functionality
//!
//! Pipeline setup, GPU model upload and frame rendering.

pub mod gpu_model;
pub mod render_engine;
pub mod uniforms;

// Re-export main types
pub use gpu_model::{DrawModel, GpuModel};
pub use render_engine::RenderEngine;
