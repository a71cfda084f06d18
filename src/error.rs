//! Error types for asset parsing and conversion

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while decoding or producing structured-text assets.
///
/// None of these are recoverable: an asset is either fully parsed or
/// converted, or the operation stops with one of these.
#[derive(Error, Debug)]
pub enum AssetError {
    /// The text under a marker does not have the shape the rule expects.
    #[error("Malformed `{marker}` record: {message}\n\tin: {line:?}")]
    Malformed {
        marker: String,
        message: String,
        line: String,
    },

    #[error("Cannot find material: {0}")]
    MissingMaterial(String),

    #[error("Unable to load scene for file: {path}\nImport Error:\n\t{message}")]
    SceneImport { path: PathBuf, message: String },

    #[error("Mesh `{mesh}` contains a face with {arity} vertices; only triangles are supported")]
    NonTriangularFace { mesh: String, arity: u32 },

    #[error("Mesh `{mesh}` mixes vertices with and without optional attributes")]
    InconsistentVertexAttributes { mesh: String },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AssetError {
    pub(crate) fn malformed(marker: &str, message: impl Into<String>, line: &str) -> Self {
        AssetError::Malformed {
            marker: marker.to_string(),
            message: message.into(),
            line: line.to_string(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AssetError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for asset operations
pub type Result<T> = std::result::Result<T, AssetError>;
