//! # Asset Conversion
//!
//! Offline pipeline from source scenes to the mesh/material text read by
//! [`crate::model::Model`]: import into the `Cto*` types, then serialize.

pub mod cto;
pub mod format;
pub mod scene;

pub use cto::{CtoFace, CtoMaterialDefinition, CtoMaterialLibrary, CtoMesh, CtoVertex};
pub use format::format_meshes;
pub use scene::{convert_file, import_scene, output_paths, ConvertedScene, ImportOptions};
