//! Object (mesh geometry) schema
//!
//! ```text
//! o <name>
//! v <x> <y> <z>            (or vp / vpt / vpn / vptn, see VertexLayout)
//! usemtl <material>
//! f <i1> <i2> <i3>         (1-based vertex indices)
//! ```

use crate::{
    error::Result,
    parsing::{FromRecord, Record, Rule, Schema, Structure},
};

pub const OBJECT_MARKER: &str = "o";
pub const USE_MATERIAL_MARKER: &str = "usemtl";
pub const FACE_MARKER: &str = "f";

/// Vertices per face; faces are always triangles.
pub const FACE_ARITY: usize = 3;

/// Which attributes every vertex line carries, in the order they appear.
///
/// `Wavefront` is the plain `v x y z` form; the other layouts are written by
/// the asset converter and name their attributes in the marker
/// (`p`osition, `t`exture, `n`ormal).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexLayout {
    Wavefront,
    Position,
    PositionTexture,
    PositionNormal,
    PositionTextureNormal,
}

impl VertexLayout {
    pub const POSITION_SIZE: usize = 3;
    pub const TEXTURE_SIZE: usize = 2;
    pub const NORMAL_SIZE: usize = 3;

    pub const ALL: [VertexLayout; 5] = [
        VertexLayout::Wavefront,
        VertexLayout::Position,
        VertexLayout::PositionTexture,
        VertexLayout::PositionNormal,
        VertexLayout::PositionTextureNormal,
    ];

    /// Layout of the first vertex line in `source`, if any.
    pub fn detect(source: &str) -> Option<Self> {
        source.lines().find_map(|line| {
            let marker = line.split(' ').next()?;
            Self::ALL.into_iter().find(|layout| layout.marker() == marker)
        })
    }

    /// Picks the converter layout matching the attributes a vertex carries.
    pub fn for_attributes(has_texture: bool, has_normal: bool) -> Self {
        match (has_texture, has_normal) {
            (true, true) => VertexLayout::PositionTextureNormal,
            (true, false) => VertexLayout::PositionTexture,
            (false, true) => VertexLayout::PositionNormal,
            (false, false) => VertexLayout::Position,
        }
    }

    pub fn marker(self) -> &'static str {
        match self {
            VertexLayout::Wavefront => "v",
            VertexLayout::Position => "vp",
            VertexLayout::PositionTexture => "vpt",
            VertexLayout::PositionNormal => "vpn",
            VertexLayout::PositionTextureNormal => "vptn",
        }
    }

    pub fn has_texture(self) -> bool {
        matches!(
            self,
            VertexLayout::PositionTexture | VertexLayout::PositionTextureNormal
        )
    }

    pub fn has_normal(self) -> bool {
        matches!(
            self,
            VertexLayout::PositionNormal | VertexLayout::PositionTextureNormal
        )
    }

    /// Floats per vertex
    pub fn stride(self) -> usize {
        let mut stride = Self::POSITION_SIZE;
        if self.has_texture() {
            stride += Self::TEXTURE_SIZE;
        }
        if self.has_normal() {
            stride += Self::NORMAL_SIZE;
        }
        stride
    }

    /// Float offset of the texture coordinates inside a vertex
    pub fn texture_offset(self) -> Option<usize> {
        self.has_texture().then_some(Self::POSITION_SIZE)
    }

    /// Float offset of the normal inside a vertex
    pub fn normal_offset(self) -> Option<usize> {
        self.has_normal()
            .then(|| self.texture_offset().map_or(Self::POSITION_SIZE, |t| t + Self::TEXTURE_SIZE))
    }
}

/// One `usemtl` block: a material name and the faces drawn with it.
#[derive(Debug, Clone, PartialEq)]
pub struct UseMaterialDirective {
    pub id: String,
    /// 1-based vertex indices, exactly as written
    pub faces: Vec<[u32; FACE_ARITY]>,
}

impl FromRecord for UseMaterialDirective {
    fn from_record(record: Record) -> Result<Self> {
        let mut structure = Structure::from_record(record)?;
        Ok(Self {
            faces: structure.take_child(0)?,
            id: structure.id,
        })
    }
}

/// One `o` block.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectRecord {
    pub id: String,
    /// One entry per vertex line; every entry has `layout.stride()` floats.
    pub vertices: Vec<Vec<f32>>,
    pub use_material_directives: Vec<UseMaterialDirective>,
}

impl FromRecord for ObjectRecord {
    fn from_record(record: Record) -> Result<Self> {
        let mut structure = Structure::from_record(record)?;
        Ok(Self {
            vertices: structure.take_child(0)?,
            use_material_directives: structure.take_child(1)?,
            id: structure.id,
        })
    }
}

/// Object schema for one vertex layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectSchema {
    pub layout: VertexLayout,
}

impl ObjectSchema {
    pub fn new(layout: VertexLayout) -> Self {
        Self { layout }
    }
}

impl Default for ObjectSchema {
    fn default() -> Self {
        Self::new(VertexLayout::Wavefront)
    }
}

impl Schema for ObjectSchema {
    type Output = ObjectRecord;

    fn rule(&self) -> Rule {
        Rule::structure(
            OBJECT_MARKER,
            vec![
                Rule::floats(self.layout.marker(), self.layout.stride()),
                Rule::structure(
                    USE_MATERIAL_MARKER,
                    vec![Rule::unsigned(FACE_MARKER, FACE_ARITY)],
                ),
            ],
        )
    }
}
