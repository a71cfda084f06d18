//! Concrete schemas for the mesh and material-library text formats

pub mod material;
pub mod object;

pub use material::{MaterialDefinitionRecord, MaterialLibrarySchema};
pub use object::{ObjectRecord, ObjectSchema, UseMaterialDirective, VertexLayout};
