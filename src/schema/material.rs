//! Material library schema
//!
//! ```text
//! newmtl <name>
//! Kd <r> <g> <b>
//! ```

use crate::{
    error::Result,
    parsing::{FromRecord, Record, Rule, Schema, Structure},
};

pub const NEW_MATERIAL_MARKER: &str = "newmtl";
pub const DIFFUSE_COLOR_MARKER: &str = "Kd";

/// One `newmtl` block. Every `Kd` line of the block is kept; consumers use
/// the first.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialDefinitionRecord {
    pub id: String,
    pub diffuse_colors: Vec<[f32; 3]>,
}

impl FromRecord for MaterialDefinitionRecord {
    fn from_record(record: Record) -> Result<Self> {
        let mut structure = Structure::from_record(record)?;
        Ok(Self {
            diffuse_colors: structure.take_child(0)?,
            id: structure.id,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaterialLibrarySchema;

impl Schema for MaterialLibrarySchema {
    type Output = MaterialDefinitionRecord;

    fn rule(&self) -> Rule {
        Rule::structure(NEW_MATERIAL_MARKER, vec![Rule::floats(DIFFUSE_COLOR_MARKER, 3)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::parse_schema;

    #[test]
    fn test_parse_material_library() {
        let source = "newmtl Red\nKd 1 0 0\nnewmtl Blue\nKd 0 0 1\n";
        let definitions = parse_schema(&MaterialLibrarySchema, source).unwrap();

        assert_eq!(definitions.len(), 2);
        assert_eq!(definitions[0].id, "Red");
        assert_eq!(definitions[0].diffuse_colors, vec![[1.0, 0.0, 0.0]]);
        assert_eq!(definitions[1].id, "Blue");
    }

    #[test]
    fn test_definition_without_diffuse_has_no_colors() {
        let definitions = parse_schema(&MaterialLibrarySchema, "newmtl Bare\nNs 10\n").unwrap();
        assert!(definitions[0].diffuse_colors.is_empty());
    }
}
