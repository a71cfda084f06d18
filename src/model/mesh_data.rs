//! Flattened, render-ready mesh geometry

use log::debug;

use crate::{
    error::{AssetError, Result},
    parsing::parse_schema,
    schema::{
        object::{FACE_ARITY, FACE_MARKER},
        ObjectRecord, ObjectSchema, VertexLayout,
    },
};

/// A run of the index buffer drawn with one material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialChunk {
    pub name: String,
    /// First index of the run inside `MeshData::face_indices`
    pub offset: u32,
    /// Number of indices in the run (three per face)
    pub count: u32,
}

/// Interleaved vertex buffer, 0-based index buffer and the material chunks
/// partitioning the index buffer, in the order the `usemtl` blocks appear.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    layout: VertexLayout,
    vertices: Vec<f32>,
    face_indices: Vec<u32>,
    material_chunks: Vec<MaterialChunk>,
}

impl MeshData {
    /// Parses mesh text written with `layout` and flattens every object in it.
    pub fn parse(source: &str, layout: VertexLayout) -> Result<Self> {
        let objects = parse_schema(&ObjectSchema::new(layout), source)?;
        Self::from_objects(objects, layout)
    }

    /// Concatenates the vertices of all objects and the faces of all their
    /// material directives. Every directive gets its own chunk, even when
    /// the same material was used by an earlier one.
    pub fn from_objects(objects: Vec<ObjectRecord>, layout: VertexLayout) -> Result<Self> {
        let stride = layout.stride();
        let vertex_count: usize = objects.iter().map(|object| object.vertices.len()).sum();

        let mut vertices = Vec::with_capacity(vertex_count * stride);
        let mut face_indices = Vec::new();
        let mut material_chunks = Vec::new();

        for object in objects {
            for vertex in object.vertices {
                vertices.extend(vertex);
            }

            for directive in object.use_material_directives {
                let offset = face_indices.len();
                for face in &directive.faces {
                    for &index in face {
                        face_indices.push(to_zero_based(index, vertex_count, face)?);
                    }
                }

                material_chunks.push(MaterialChunk {
                    name: directive.id,
                    offset: offset as u32,
                    count: (directive.faces.len() * FACE_ARITY) as u32,
                });
            }
        }

        debug!(
            "Flattened mesh: {} vertices, {} faces, {} material chunk(s)",
            vertex_count,
            face_indices.len() / FACE_ARITY,
            material_chunks.len()
        );

        Ok(Self {
            layout,
            vertices,
            face_indices,
            material_chunks,
        })
    }

    pub fn layout(&self) -> VertexLayout {
        self.layout
    }

    /// Floats per vertex
    pub fn stride(&self) -> usize {
        self.layout.stride()
    }

    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / self.stride()
    }

    pub fn face_indices(&self) -> &[u32] {
        &self.face_indices
    }

    pub fn material_chunks(&self) -> &[MaterialChunk] {
        &self.material_chunks
    }

    /// Position of vertex `index`
    pub fn position(&self, index: usize) -> [f32; 3] {
        let base = index * self.stride();
        [
            self.vertices[base],
            self.vertices[base + 1],
            self.vertices[base + 2],
        ]
    }
}

fn to_zero_based(index: u32, vertex_count: usize, face: &[u32; FACE_ARITY]) -> Result<u32> {
    let describe = || format!("{} {} {}", face[0], face[1], face[2]);

    let zero_based = index
        .checked_sub(1)
        .ok_or_else(|| AssetError::malformed(FACE_MARKER, "face indices are 1-based", &describe()))?;

    if zero_based as usize >= vertex_count {
        return Err(AssetError::malformed(
            FACE_MARKER,
            format!("index {index} exceeds the {vertex_count} vertices"),
            &describe(),
        ));
    }
    Ok(zero_based)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_MATERIALS: &str = "\
o Cube
v 0 0 0
v 1 0 0
v 0 1 0
v 1 1 0
usemtl A
f 1 2 3
f 2 4 3
usemtl B
f 1 2 4
usemtl A
f 3 2 1
";

    #[test]
    fn test_chunks_follow_directive_order_without_merging() {
        let mesh = MeshData::parse(TWO_MATERIALS, VertexLayout::Wavefront).unwrap();

        assert_eq!(
            mesh.material_chunks(),
            &[
                MaterialChunk { name: "A".into(), offset: 0, count: 6 },
                MaterialChunk { name: "B".into(), offset: 6, count: 3 },
                MaterialChunk { name: "A".into(), offset: 9, count: 3 },
            ]
        );
        assert_eq!(mesh.face_indices().len(), 12);
    }

    #[test]
    fn test_face_indices_become_zero_based() {
        let mesh = MeshData::parse(TWO_MATERIALS, VertexLayout::Wavefront).unwrap();
        assert_eq!(&mesh.face_indices()[..6], &[0, 1, 2, 1, 3, 2]);
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.position(3), [1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_objects_share_one_vertex_buffer() {
        let source = "\
o First
v 0 0 0
v 1 0 0
v 0 1 0
usemtl A
f 1 2 3
o Second
v 5 5 5
v 6 5 5
v 5 6 5
usemtl B
f 4 5 6
";
        let mesh = MeshData::parse(source, VertexLayout::Wavefront).unwrap();
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.face_indices(), &[0, 1, 2, 3, 4, 5]);
        assert_eq!(mesh.material_chunks()[1].offset, 3);
    }

    #[test]
    fn test_zero_index_is_rejected() {
        let error = MeshData::parse("o A\nv 0 0 0\nusemtl M\nf 0 1 1\n", VertexLayout::Wavefront)
            .unwrap_err();
        assert!(matches!(error, AssetError::Malformed { ref marker, .. } if marker == "f"));
    }

    #[test]
    fn test_out_of_range_index_is_rejected() {
        let result = MeshData::parse("o A\nv 0 0 0\nusemtl M\nf 1 1 2\n", VertexLayout::Wavefront);
        assert!(result.is_err());
    }

    #[test]
    fn test_interleaved_layout_keeps_stride() {
        let source = "o A\nvpn 0 0 0 0 0 1\nvpn 1 0 0 0 0 1\nvpn 0 1 0 0 0 1\nusemtl M\nf 1 2 3\n";
        let mesh = MeshData::parse(source, VertexLayout::PositionNormal).unwrap();
        assert_eq!(mesh.stride(), 6);
        assert_eq!(mesh.vertices().len(), 18);
        assert_eq!(mesh.position(1), [1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_empty_source_is_an_empty_mesh() {
        let mesh = MeshData::parse("", VertexLayout::Wavefront).unwrap();
        assert!(mesh.vertices().is_empty());
        assert!(mesh.material_chunks().is_empty());
    }
}
