//! Text serialization of the intermediate scene representation
//!
//! Values are space separated and records newline separated, with no leading
//! or trailing blank line. Face indices are written 1-based.

use std::fmt::{self, Display, Formatter};

use super::cto::{CtoFace, CtoMaterialLibrary, CtoMesh, CtoVertex};
use crate::{
    error::{AssetError, Result},
    schema::{
        material::{DIFFUSE_COLOR_MARKER, NEW_MATERIAL_MARKER},
        object::{FACE_MARKER, OBJECT_MARKER, USE_MATERIAL_MARKER},
    },
};

impl Display for CtoVertex {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.layout().marker())?;
        write_values(f, &self.position)?;
        if let Some(texture) = &self.texture {
            write_values(f, texture)?;
        }
        if let Some(normal) = &self.normal {
            write_values(f, normal)?;
        }
        Ok(())
    }
}

/// A face whose vertex indices are shifted by the vertices of the meshes
/// written before it. Texture indices are written unshifted.
struct OffsetFace<'a> {
    face: &'a CtoFace,
    base: u32,
}

impl Display for OffsetFace<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{FACE_MARKER}")?;
        for corner in 0..3 {
            write!(f, " {}", self.face.vertex_indices[corner] + self.base + 1)?;
            if let Some(texture_indices) = &self.face.texture_indices {
                write!(f, "/{}", texture_indices[corner] + 1)?;
            }
        }
        Ok(())
    }
}

impl Display for CtoFace {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        OffsetFace { face: self, base: 0 }.fmt(f)
    }
}

/// A mesh written as if `base` vertices precede it in the same file.
struct OffsetMesh<'a> {
    mesh: &'a CtoMesh,
    base: u32,
}

impl Display for OffsetMesh<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mesh = self.mesh;
        write!(f, "{OBJECT_MARKER} {}", mesh.name)?;
        for vertex in &mesh.vertices {
            write!(f, "\n{vertex}")?;
        }
        write!(f, "\n{USE_MATERIAL_MARKER} {}", mesh.material_name)?;
        for face in &mesh.faces {
            let face = OffsetFace {
                face,
                base: self.base,
            };
            write!(f, "\n{face}")?;
        }
        Ok(())
    }
}

impl Display for CtoMesh {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        OffsetMesh { mesh: self, base: 0 }.fmt(f)
    }
}

impl Display for CtoMaterialLibrary {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, definition) in self.definitions.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{NEW_MATERIAL_MARKER} {}\n{DIFFUSE_COLOR_MARKER}", definition.name)?;
            write_values(f, &definition.diffuse_color)?;
        }
        Ok(())
    }
}

/// Writes all meshes into one mesh text. Face indices of each mesh are
/// offset by the vertex counts of the meshes before it, since a reader
/// concatenates every vertex in the file.
///
/// A reader also decodes every vertex line with a single layout, so all
/// meshes with vertices must share one. The first mesh whose layout differs
/// is reported as `InconsistentVertexAttributes`.
pub fn format_meshes(meshes: &[CtoMesh]) -> Result<String> {
    let mut shared_layout = None;
    let mut base = 0u32;
    let mut blocks = Vec::with_capacity(meshes.len());

    for mesh in meshes {
        let layout = mesh.layout()?;
        if !mesh.vertices.is_empty() {
            match shared_layout {
                None => shared_layout = Some(layout),
                Some(shared) if shared != layout => {
                    return Err(AssetError::InconsistentVertexAttributes {
                        mesh: mesh.name.clone(),
                    });
                }
                Some(_) => {}
            }
        }

        blocks.push(OffsetMesh { mesh, base }.to_string());
        base += mesh.vertices.len() as u32;
    }
    Ok(blocks.join("\n"))
}

fn write_values<T: Display>(f: &mut Formatter<'_>, values: &[T]) -> fmt::Result {
    for value in values {
        write!(f, " {value}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::{
        convert::cto::CtoMaterialDefinition,
        model::{MaterialChunk, MaterialLibrary, MeshData, Model},
        schema::VertexLayout,
    };

    fn triangle(name: &str, material: &str, origin: f32) -> CtoMesh {
        let normal = [0.0, 0.0, 1.0];
        CtoMesh {
            name: name.into(),
            material_name: material.into(),
            vertices: vec![
                CtoVertex::new([origin, 0.0, 0.0]).with_normal(normal),
                CtoVertex::new([origin + 1.0, 0.0, 0.0]).with_normal(normal),
                CtoVertex::new([origin, 1.0, 0.0]).with_normal(normal),
            ],
            faces: vec![CtoFace::new([0, 1, 2])],
        }
    }

    #[test]
    fn test_vertex_markers_name_attributes() {
        assert_eq!(CtoVertex::new([1.0, 2.0, 3.0]).to_string(), "vp 1 2 3");
        assert_eq!(
            CtoVertex::new([0.5, -1.0, 0.0])
                .with_texture([0.25, 0.75])
                .with_normal([0.0, 1.0, 0.0])
                .to_string(),
            "vptn 0.5 -1 0 0.25 0.75 0 1 0"
        );
    }

    #[test]
    fn test_face_is_one_based_with_optional_texture() {
        assert_eq!(CtoFace::new([0, 1, 2]).to_string(), "f 1 2 3");

        let face = CtoFace {
            vertex_indices: [0, 1, 2],
            texture_indices: Some([3, 4, 5]),
        };
        assert_eq!(face.to_string(), "f 1/4 2/5 3/6");
    }

    #[test]
    fn test_mesh_layout() {
        let text = triangle("Tri", "Red", 0.0).to_string();
        assert_eq!(
            text,
            "o Tri\nvpn 0 0 0 0 0 1\nvpn 1 0 0 0 0 1\nvpn 0 1 0 0 0 1\nusemtl Red\nf 1 2 3"
        );
    }

    #[test]
    fn test_material_library_layout() {
        let library = CtoMaterialLibrary {
            definitions: vec![
                CtoMaterialDefinition { name: "Red".into(), diffuse_color: [1.0, 0.0, 0.0] },
                CtoMaterialDefinition { name: "Grey".into(), diffuse_color: [0.6, 0.6, 0.6] },
            ],
        };
        assert_eq!(library.to_string(), "newmtl Red\nKd 1 0 0\nnewmtl Grey\nKd 0.6 0.6 0.6");
        assert_eq!(CtoMaterialLibrary::default().to_string(), "");
    }

    #[test]
    fn test_later_meshes_use_global_indices() {
        let text = format_meshes(&[triangle("A", "Red", 0.0), triangle("B", "Blue", 5.0)]).unwrap();
        assert!(text.contains("usemtl Red\nf 1 2 3\no B"));
        assert!(text.ends_with("usemtl Blue\nf 4 5 6"));
    }

    #[test]
    fn test_serialized_meshes_parse_back() {
        let meshes = [triangle("A", "Red", 0.0), triangle("B", "Blue", 0.1)];
        let text = format_meshes(&meshes).unwrap();

        let mesh = MeshData::parse(&text, VertexLayout::PositionNormal).unwrap();
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.face_indices(), &[0, 1, 2, 3, 4, 5]);
        assert_eq!(mesh.material_chunks()[1].name, "Blue");
        assert_relative_eq!(mesh.position(4)[0], 1.1);
    }

    #[test]
    fn test_texture_indices_are_not_offset() {
        let mut first = triangle("A", "Red", 0.0);
        let mut second = triangle("B", "Blue", 5.0);
        for mesh in [&mut first, &mut second] {
            mesh.faces[0].texture_indices = Some([0, 1, 2]);
        }

        let text = format_meshes(&[first, second]).unwrap();
        assert!(text.contains("usemtl Red\nf 1/1 2/2 3/3\no B"));
        assert!(text.ends_with("usemtl Blue\nf 4/1 5/2 6/3"));
    }

    #[test]
    fn test_serialized_model_parses_back_exactly() {
        let up = [-0.33333334, 0.0, 1.0];
        let side = [0.0, 1e-7, -1.0];
        let meshes = [
            CtoMesh {
                name: "A".into(),
                material_name: "Red".into(),
                vertices: vec![
                    CtoVertex::new([-0.33333334, 1e-7, 3.4028235e38]).with_normal(up),
                    CtoVertex::new([1.0, 0.0, 0.0]).with_normal(up),
                    CtoVertex::new([0.0, 1.0, -1e-7]).with_normal(up),
                ],
                faces: vec![CtoFace::new([0, 1, 2]), CtoFace::new([2, 1, 0])],
            },
            CtoMesh {
                name: "B".into(),
                material_name: "Blue".into(),
                vertices: vec![
                    CtoVertex::new([0.1, 0.2, 0.3]).with_normal(side),
                    CtoVertex::new([-2.5, 1e-7, 0.0]).with_normal(side),
                    CtoVertex::new([3.4028235e38, -3.4028235e38, 0.5]).with_normal(side),
                    CtoVertex::new([0.0, 0.0, -0.33333334]).with_normal(side),
                ],
                faces: vec![CtoFace::new([0, 1, 2]), CtoFace::new([0, 2, 3])],
            },
        ];
        let mut library = CtoMaterialLibrary::default();
        library.push("Red", [1.0, 0.0, 0.0]);
        library.push("Blue", [0.0, 0.27, 0.68]);

        let model = Model::parse(&format_meshes(&meshes).unwrap(), &library.to_string()).unwrap();
        let mesh = model.mesh();

        let expected_vertices: Vec<f32> = meshes
            .iter()
            .flat_map(|mesh| &mesh.vertices)
            .flat_map(|vertex| vertex.position.into_iter().chain(vertex.normal.unwrap()))
            .collect();
        assert_eq!(mesh.layout(), VertexLayout::PositionNormal);
        assert_eq!(mesh.vertices(), expected_vertices.as_slice());

        let mut expected_indices = Vec::new();
        let mut base = 0;
        for source in &meshes {
            for face in &source.faces {
                expected_indices.extend(face.vertex_indices.map(|index| index + base));
            }
            base += source.vertices.len() as u32;
        }
        assert_eq!(mesh.face_indices(), expected_indices.as_slice());
        assert_eq!(
            mesh.material_chunks(),
            &[
                MaterialChunk { name: "Red".into(), offset: 0, count: 6 },
                MaterialChunk { name: "Blue".into(), offset: 6, count: 6 },
            ]
        );
    }

    #[test]
    fn test_meshes_with_different_layouts_are_not_written() {
        let mut positions_only = triangle("A", "Red", 0.0);
        for vertex in &mut positions_only.vertices {
            vertex.normal = None;
        }
        let with_normals = triangle("B", "Red", 5.0);

        let error = format_meshes(&[positions_only, with_normals]).unwrap_err();
        assert!(matches!(error, AssetError::InconsistentVertexAttributes { ref mesh } if mesh == "B"));
    }

    #[test]
    fn test_empty_mesh_does_not_fix_the_layout() {
        let empty = CtoMesh {
            name: "Empty".into(),
            material_name: "Red".into(),
            ..Default::default()
        };
        let text = format_meshes(&[empty, triangle("A", "Red", 0.0)]).unwrap();

        let model = Model::parse(&text, "newmtl Red\nKd 1 0 0").unwrap();
        assert_eq!(model.mesh().face_indices(), &[0, 1, 2]);
    }

    #[test]
    fn test_serialized_library_parses_back() {
        let mut library = CtoMaterialLibrary::default();
        library.push("Orange", [1.0, 0.35, 0.0]);
        library.push("Blue", [0.0, 0.27, 0.68]);

        let parsed = MaterialLibrary::parse(&library.to_string()).unwrap();
        let orange = parsed.find("Orange").unwrap();
        assert_relative_eq!(orange.diffuse_color[1], 0.35);
        assert_eq!(parsed.find("Blue").unwrap().diffuse_color, [0.0, 0.27, 0.68]);
    }

    #[test]
    fn test_inconsistent_mesh_is_not_written() {
        let mut mesh = triangle("Bad", "Red", 0.0);
        mesh.vertices[1].normal = None;
        assert!(format_meshes(&[mesh]).is_err());
    }
}
