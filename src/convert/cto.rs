//! Intermediate scene representation produced by the importer and consumed
//! by the text serializer.

use crate::{
    error::{AssetError, Result},
    schema::VertexLayout,
};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CtoVertex {
    pub position: [f32; 3],
    pub texture: Option<[f32; 2]>,
    pub normal: Option<[f32; 3]>,
}

impl CtoVertex {
    pub fn new(position: [f32; 3]) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn with_normal(mut self, normal: [f32; 3]) -> Self {
        self.normal = Some(normal);
        self
    }

    pub fn with_texture(mut self, texture: [f32; 2]) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn layout(&self) -> VertexLayout {
        VertexLayout::for_attributes(self.texture.is_some(), self.normal.is_some())
    }
}

/// A triangle; indices are 0-based into the owning mesh's vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CtoFace {
    pub vertex_indices: [u32; 3],
    pub texture_indices: Option<[u32; 3]>,
}

impl CtoFace {
    pub fn new(vertex_indices: [u32; 3]) -> Self {
        Self {
            vertex_indices,
            texture_indices: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CtoMesh {
    pub name: String,
    pub material_name: String,
    pub vertices: Vec<CtoVertex>,
    pub faces: Vec<CtoFace>,
}

impl CtoMesh {
    /// The layout shared by every vertex. A mesh without vertices is
    /// position-only.
    pub fn layout(&self) -> Result<VertexLayout> {
        let Some(first) = self.vertices.first() else {
            return Ok(VertexLayout::Position);
        };

        let layout = first.layout();
        if self.vertices.iter().any(|vertex| vertex.layout() != layout) {
            return Err(AssetError::InconsistentVertexAttributes {
                mesh: self.name.clone(),
            });
        }
        Ok(layout)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CtoMaterialDefinition {
    pub name: String,
    pub diffuse_color: [f32; 3],
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CtoMaterialLibrary {
    pub definitions: Vec<CtoMaterialDefinition>,
}

impl CtoMaterialLibrary {
    pub fn contains(&self, name: &str) -> bool {
        self.definitions.iter().any(|definition| definition.name == name)
    }

    pub fn push(&mut self, name: impl Into<String>, diffuse_color: [f32; 3]) {
        self.definitions.push(CtoMaterialDefinition {
            name: name.into(),
            diffuse_color,
        });
    }
}
