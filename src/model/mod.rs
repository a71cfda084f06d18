//! # Decoded Models
//!
//! Render-ready geometry and materials built from the structured-text
//! schemas: a flat vertex buffer, a 0-based index buffer partitioned into
//! material chunks, and the material library those chunks name.

pub mod material_library;
pub mod mesh_data;
#[allow(clippy::module_inception)]
pub mod model;

pub use material_library::{MaterialDefinition, MaterialLibrary};
pub use mesh_data::{MaterialChunk, MeshData};
pub use model::Model;
