use crate::{
    error::{AssetError, Result},
    parsing::parse_schema,
    schema::{material::DIFFUSE_COLOR_MARKER, MaterialDefinitionRecord, MaterialLibrarySchema},
};

/// A named diffuse colour.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialDefinition {
    pub name: String,
    pub diffuse_color: [f32; 3],
}

impl TryFrom<MaterialDefinitionRecord> for MaterialDefinition {
    type Error = AssetError;

    fn try_from(record: MaterialDefinitionRecord) -> Result<Self> {
        let diffuse_color = record.diffuse_colors.first().copied().ok_or_else(|| {
            AssetError::malformed(
                DIFFUSE_COLOR_MARKER,
                format!("material `{}` has no diffuse colour", record.id),
                &record.id,
            )
        })?;

        Ok(Self {
            name: record.id,
            diffuse_color,
        })
    }
}

/// Ordered material definitions with lookup by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialLibrary {
    definitions: Vec<MaterialDefinition>,
}

impl MaterialLibrary {
    pub fn new(definitions: Vec<MaterialDefinition>) -> Self {
        Self { definitions }
    }

    pub fn parse(source: &str) -> Result<Self> {
        let definitions = parse_schema(&MaterialLibrarySchema, source)?
            .into_iter()
            .map(MaterialDefinition::try_from)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { definitions })
    }

    /// First definition named exactly `name`.
    pub fn find(&self, name: &str) -> Result<&MaterialDefinition> {
        self.definitions
            .iter()
            .find(|definition| definition.name == name)
            .ok_or_else(|| AssetError::MissingMaterial(name.to_string()))
    }

    pub fn definitions(&self) -> &[MaterialDefinition] {
        &self.definitions
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIBRARY: &str = "newmtl Red\nKd 1 0 0\nnewmtl Blue\nKd 0 0 1\n";

    #[test]
    fn test_find_by_exact_name() {
        let library = MaterialLibrary::parse(LIBRARY).unwrap();
        assert_eq!(library.len(), 2);
        assert_eq!(library.find("Blue").unwrap().diffuse_color, [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_missing_material_names_the_material() {
        let library = MaterialLibrary::parse(LIBRARY).unwrap();
        for _ in 0..2 {
            let error = library.find("red").unwrap_err();
            assert!(matches!(error, AssetError::MissingMaterial(ref name) if name == "red"));
            assert_eq!(error.to_string(), "Cannot find material: red");
        }
    }

    #[test]
    fn test_first_diffuse_colour_wins() {
        let library = MaterialLibrary::parse("newmtl Twice\nKd 0.5 0.5 0.5\nKd 1 1 1\n").unwrap();
        assert_eq!(library.find("Twice").unwrap().diffuse_color, [0.5, 0.5, 0.5]);
    }

    #[test]
    fn test_definition_without_diffuse_is_malformed() {
        let error = MaterialLibrary::parse("newmtl Bare\n").unwrap_err();
        assert!(matches!(error, AssetError::Malformed { .. }));
    }

    #[test]
    fn test_empty_library() {
        let library = MaterialLibrary::parse("").unwrap();
        assert!(library.is_empty());
        assert!(library.find("Anything").is_err());
    }
}
