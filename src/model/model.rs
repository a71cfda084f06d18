use std::{fs, path::Path};

use log::info;

use super::{
    material_library::{MaterialDefinition, MaterialLibrary},
    mesh_data::{MaterialChunk, MeshData},
};
use crate::{
    error::{AssetError, Result},
    schema::VertexLayout,
};

/// Converted Rubik's cube geometry, embedded at compile time.
pub const RUBIKS_CUBE_OBJ: &str = include_str!("../../assets/rubiks_cube.cto.obj");
/// Materials referenced by [`RUBIKS_CUBE_OBJ`].
pub const RUBIKS_CUBE_MTL: &str = include_str!("../../assets/rubiks_cube.cto.mtl");

/// A decoded mesh together with the materials its chunks reference.
///
/// Construction checks every chunk against the library, so drawing never
/// has to handle a missing material.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    mesh: MeshData,
    material_library: MaterialLibrary,
}

impl Model {
    pub fn new(mesh: MeshData, material_library: MaterialLibrary) -> Result<Self> {
        let model = Self {
            mesh,
            material_library,
        };
        model.validate()?;
        Ok(model)
    }

    /// Parses mesh and material text. The vertex layout is taken from the
    /// first vertex line and defaults to plain `v` lines.
    pub fn parse(mesh_source: &str, material_source: &str) -> Result<Self> {
        let layout = VertexLayout::detect(mesh_source).unwrap_or(VertexLayout::Wavefront);
        let mesh = MeshData::parse(mesh_source, layout)?;
        let material_library = MaterialLibrary::parse(material_source)?;
        Self::new(mesh, material_library)
    }

    /// The embedded cube.
    pub fn rubiks_cube() -> Result<Self> {
        Self::parse(RUBIKS_CUBE_OBJ, RUBIKS_CUBE_MTL)
    }

    /// Reads a converted mesh file and its material library from disk.
    pub fn load(mesh_path: &Path, material_path: &Path) -> Result<Self> {
        let mesh_source =
            fs::read_to_string(mesh_path).map_err(|e| AssetError::io(mesh_path, e))?;
        let material_source =
            fs::read_to_string(material_path).map_err(|e| AssetError::io(material_path, e))?;

        let model = Self::parse(&mesh_source, &material_source)?;
        info!(
            "Loaded {} ({} vertices, {} materials)",
            mesh_path.display(),
            model.mesh.vertex_count(),
            model.material_library.len()
        );
        Ok(model)
    }

    /// Resolves every material chunk against the library.
    pub fn validate(&self) -> Result<()> {
        self.chunk_materials().map(|_| ())
    }

    /// Each chunk paired with its material definition, in draw order.
    pub fn chunk_materials(&self) -> Result<Vec<(&MaterialChunk, &MaterialDefinition)>> {
        self.mesh
            .material_chunks()
            .iter()
            .map(|chunk| Ok((chunk, self.material_library.find(&chunk.name)?)))
            .collect()
    }

    pub fn mesh(&self) -> &MeshData {
        &self.mesh
    }

    pub fn material_library(&self) -> &MaterialLibrary {
        &self.material_library
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rubiks_cube_assets_decode() {
        let model = Model::rubiks_cube().unwrap();
        let mesh = model.mesh();

        assert_eq!(mesh.layout(), VertexLayout::PositionNormal);
        assert!(mesh.vertex_count() > 0);
        assert!(!mesh.material_chunks().is_empty());
        assert_eq!(mesh.face_indices().len() % 3, 0);

        let indexed: u32 = mesh.material_chunks().iter().map(|chunk| chunk.count).sum();
        assert_eq!(indexed as usize, mesh.face_indices().len());
    }

    #[test]
    fn test_unknown_chunk_material_fails_at_load() {
        let error = Model::parse("o A\nv 0 0 0\nusemtl Gold\nf 1 1 1\n", "newmtl Red\nKd 1 0 0\n")
            .unwrap_err();
        assert!(matches!(error, AssetError::MissingMaterial(ref name) if name == "Gold"));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let mesh_path = dir.path().join("tri.cto.obj");
        let material_path = dir.path().join("tri.cto.mtl");
        fs::write(&mesh_path, "o Tri\nvp 0 0 0\nvp 1 0 0\nvp 0 1 0\nusemtl Red\nf 1 2 3").unwrap();
        fs::write(&material_path, "newmtl Red\nKd 1 0 0").unwrap();

        let model = Model::load(&mesh_path, &material_path).unwrap();
        assert_eq!(model.mesh().layout(), VertexLayout::Position);
        assert_eq!(model.chunk_materials().unwrap()[0].1.name, "Red");
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let error = Model::load(&dir.path().join("nope.obj"), &dir.path().join("nope.mtl"))
            .unwrap_err();
        assert!(matches!(error, AssetError::Io { .. }));
    }
}
