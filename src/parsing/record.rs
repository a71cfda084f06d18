//! Decoded records and their conversion into typed schema results

use crate::error::{AssetError, Result};

/// One decoded rule instance.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Floats(Vec<f32>),
    Unsigned(Vec<u32>),
    Structure(Structure),
}

/// A structural record: the identifier from its introducing line and one
/// record list per child rule, in rule declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Structure {
    pub marker: String,
    pub id: String,
    pub children: Vec<Vec<Record>>,
}

impl Structure {
    /// Takes the records of child `index` and converts each one.
    pub fn take_child<T: FromRecord>(&mut self, index: usize) -> Result<Vec<T>> {
        if index >= self.children.len() {
            return Err(AssetError::malformed(
                &self.marker,
                format!("rule has no child #{index}"),
                &self.id,
            ));
        }

        std::mem::take(&mut self.children[index])
            .into_iter()
            .map(T::from_record)
            .collect()
    }
}

impl Record {
    fn describe(&self) -> &'static str {
        match self {
            Record::Floats(_) => "float values",
            Record::Unsigned(_) => "unsigned values",
            Record::Structure(_) => "a structure",
        }
    }

    fn mismatch(&self, expected: &str) -> AssetError {
        let marker = match self {
            Record::Structure(structure) => structure.marker.as_str(),
            _ => "",
        };
        AssetError::malformed(
            marker,
            format!("expected {expected}, found {}", self.describe()),
            "",
        )
    }
}

/// Builds a typed value from a decoded record; this is the result
/// constructor of a schema rule.
pub trait FromRecord: Sized {
    fn from_record(record: Record) -> Result<Self>;
}

impl FromRecord for Record {
    fn from_record(record: Record) -> Result<Self> {
        Ok(record)
    }
}

impl FromRecord for Vec<f32> {
    fn from_record(record: Record) -> Result<Self> {
        match record {
            Record::Floats(values) => Ok(values),
            other => Err(other.mismatch("float values")),
        }
    }
}

impl<const N: usize> FromRecord for [f32; N] {
    fn from_record(record: Record) -> Result<Self> {
        let values = Vec::<f32>::from_record(record)?;
        let found = values.len();
        values
            .try_into()
            .map_err(|_| AssetError::malformed("", format!("expected {N} floats, found {found}"), ""))
    }
}

impl<const N: usize> FromRecord for [u32; N] {
    fn from_record(record: Record) -> Result<Self> {
        match record {
            Record::Unsigned(values) => {
                let found = values.len();
                values.try_into().map_err(|_| {
                    AssetError::malformed("", format!("expected {N} indices, found {found}"), "")
                })
            }
            other => Err(other.mismatch("unsigned values")),
        }
    }
}

impl FromRecord for Structure {
    fn from_record(record: Record) -> Result<Self> {
        match record {
            Record::Structure(structure) => Ok(structure),
            other => Err(other.mismatch("a structure")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_arrays_from_leaf_records() {
        let position = <[f32; 3]>::from_record(Record::Floats(vec![1.0, 2.0, 3.0])).unwrap();
        assert_eq!(position, [1.0, 2.0, 3.0]);

        let face = <[u32; 3]>::from_record(Record::Unsigned(vec![1, 2, 3])).unwrap();
        assert_eq!(face, [1, 2, 3]);
    }

    #[test]
    fn test_wrong_width_is_rejected() {
        assert!(<[f32; 3]>::from_record(Record::Floats(vec![1.0, 2.0])).is_err());
    }

    #[test]
    fn test_wrong_kind_is_rejected() {
        assert!(<[u32; 3]>::from_record(Record::Floats(vec![1.0, 2.0, 3.0])).is_err());
        assert!(Structure::from_record(Record::Unsigned(vec![1])).is_err());
    }

    #[test]
    fn test_take_child_out_of_range() {
        let mut structure = Structure {
            marker: "o".to_string(),
            id: "Cube".to_string(),
            children: vec![vec![]],
        };
        assert!(structure.take_child::<Vec<f32>>(0).unwrap().is_empty());
        assert!(structure.take_child::<Vec<f32>>(1).is_err());
    }
}
