//! # Graphics Module
//!
//! Everything between the decoded [`Model`](crate::model::Model) and the
//! window: the orbit camera and its input, the wgpu renderer, and the
//! fixed-rate frame timer.
//!
//! - **Camera System** ([`camera`]) - Damped quaternion orbit camera driven by mouse, touch and keys
//! - **Rendering** ([`rendering`]) - One pipeline, one indexed draw per material chunk
//! - **Resources** ([`resources`]) - Uniform buffers and the depth attachment
//! - **Timer** ([`timer`]) - Frame pacing and delta time

pub mod camera;
pub mod rendering;
pub mod resources;
pub mod timer;

// Re-export commonly used types
pub use camera::{CameraController, OrbitCamera, OrbitCameraConfig};
pub use rendering::RenderEngine;
pub use timer::FixedRateTimer;
