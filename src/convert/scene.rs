//! Scene import and conversion to mesh/material text files

use std::{
    fs,
    path::{Path, PathBuf},
};

use cgmath::{InnerSpace, Vector3, Zero};
use log::{info, warn};

use super::{
    cto::{CtoFace, CtoMaterialLibrary, CtoMesh, CtoVertex},
    format::format_meshes,
};
use crate::error::{AssetError, Result};

/// Material assigned to meshes the source scene leaves unmaterialed.
pub const DEFAULT_MATERIAL_NAME: &str = "DefaultMaterial";
pub const DEFAULT_DIFFUSE_COLOR: [f32; 3] = [0.6, 0.6, 0.6];

pub const MESH_EXTENSION: &str = "cto.obj";
pub const MATERIAL_EXTENSION: &str = "cto.mtl";

#[derive(Debug, Clone, Copy)]
pub struct ImportOptions {
    /// Split polygons into triangles while importing. When off, any
    /// non-triangular face is an error.
    pub triangulate: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self { triangulate: true }
    }
}

/// Everything extracted from one source scene.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConvertedScene {
    pub meshes: Vec<CtoMesh>,
    pub materials: CtoMaterialLibrary,
}

impl ConvertedScene {
    pub fn mesh_text(&self) -> Result<String> {
        format_meshes(&self.meshes)
    }

    pub fn material_text(&self) -> String {
        self.materials.to_string()
    }
}

/// Reads a Wavefront OBJ scene (and the MTL libraries it references).
pub fn import_scene(path: &Path, options: ImportOptions) -> Result<ConvertedScene> {
    let (models, materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            triangulate: options.triangulate,
            single_index: true,
            ..Default::default()
        },
    )
    .map_err(|e| AssetError::SceneImport {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let materials = materials.unwrap_or_else(|e| {
        warn!("No material library for {}: {e}", path.display());
        Vec::new()
    });

    let mut library = CtoMaterialLibrary::default();
    for (i, material) in materials.iter().enumerate() {
        let name = if material.name.is_empty() {
            format!("material_{i}")
        } else {
            material.name.clone()
        };
        library.push(name, material.diffuse.unwrap_or(DEFAULT_DIFFUSE_COLOR));
    }

    let mut meshes = Vec::with_capacity(models.len());
    for (i, model) in models.iter().enumerate() {
        let name = if model.name.is_empty() {
            format!("mesh_{i}")
        } else {
            model.name.clone()
        };

        let material_name = match model.mesh.material_id.and_then(|id| library.definitions.get(id)) {
            Some(definition) => definition.name.clone(),
            None => DEFAULT_MATERIAL_NAME.to_string(),
        };

        meshes.push(convert_mesh(name, material_name, &model.mesh)?);
    }

    if meshes.iter().any(|mesh| mesh.material_name == DEFAULT_MATERIAL_NAME)
        && !library.contains(DEFAULT_MATERIAL_NAME)
    {
        library.push(DEFAULT_MATERIAL_NAME, DEFAULT_DIFFUSE_COLOR);
    }

    info!(
        "Imported {}: {} mesh(es), {} material(s)",
        path.display(),
        meshes.len(),
        library.definitions.len()
    );

    Ok(ConvertedScene {
        meshes,
        materials: library,
    })
}

fn convert_mesh(name: String, material_name: String, mesh: &tobj::Mesh) -> Result<CtoMesh> {
    if let Some(&arity) = mesh.face_arities.iter().find(|&&arity| arity != 3) {
        return Err(AssetError::NonTriangularFace { mesh: name, arity });
    }

    let normals = if !mesh.normals.is_empty() && mesh.normals.len() == mesh.positions.len() {
        mesh.normals.clone()
    } else {
        calculate_vertex_normals(&mesh.positions, &mesh.indices)
    };

    let vertices = mesh
        .positions
        .chunks_exact(3)
        .zip(normals.chunks_exact(3))
        .map(|(p, n)| CtoVertex::new([p[0], p[1], p[2]]).with_normal([n[0], n[1], n[2]]))
        .collect();

    let faces = mesh
        .indices
        .chunks_exact(3)
        .map(|t| CtoFace::new([t[0], t[1], t[2]]))
        .collect();

    Ok(CtoMesh {
        name,
        material_name,
        vertices,
        faces,
    })
}

/// Area-weighted average of the normals of the faces around each vertex.
/// Vertices no face touches keep a zero normal.
pub fn calculate_vertex_normals(positions: &[f32], indices: &[u32]) -> Vec<f32> {
    let position = |i: u32| {
        let i = i as usize * 3;
        Vector3::new(positions[i], positions[i + 1], positions[i + 2])
    };

    let mut sums = vec![Vector3::<f32>::zero(); positions.len() / 3];
    for triangle in indices.chunks_exact(3) {
        let v0 = position(triangle[0]);
        let edge1 = position(triangle[1]) - v0;
        let edge2 = position(triangle[2]) - v0;
        let face_normal = edge1.cross(edge2);

        for &i in triangle {
            sums[i as usize] += face_normal;
        }
    }

    sums.into_iter()
        .flat_map(|sum| {
            let n = if sum.magnitude2() > 0.0 { sum.normalize() } else { sum };
            [n.x, n.y, n.z]
        })
        .collect()
}

/// `<output_dir>/<input stem>.cto.obj` and `.cto.mtl`
pub fn output_paths(input: &Path, output_dir: &Path) -> (PathBuf, PathBuf) {
    let file_name = input.file_name().map(PathBuf::from).unwrap_or_default();
    let base = output_dir.join(file_name);
    (
        base.with_extension(MESH_EXTENSION),
        base.with_extension(MATERIAL_EXTENSION),
    )
}

/// Imports `input` and writes its mesh and material text into `output_dir`.
/// Returns the written paths, mesh file first.
pub fn convert_file(input: &Path, output_dir: &Path, options: ImportOptions) -> Result<[PathBuf; 2]> {
    let scene = import_scene(input, options)?;
    let (mesh_path, material_path) = output_paths(input, output_dir);

    write_text(&mesh_path, scene.mesh_text()?)?;
    write_text(&material_path, scene.material_text())?;

    info!("Converted {} into {}", input.display(), output_dir.display());
    Ok([mesh_path, material_path])
}

fn write_text(path: &Path, mut text: String) -> Result<()> {
    text.push('\n');
    fs::write(path, text).map_err(|e| AssetError::io(path, e))
}
