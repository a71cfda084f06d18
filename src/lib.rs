//! Cubist
//!
//! A schema-driven parser for a compact line-oriented mesh/material text
//! format, an offline converter that produces it from scene files, and a
//! wgpu viewer that orbits the decoded model.
//!
//! ```
//! use cubist::model::Model;
//!
//! let model = Model::parse(
//!     "o Tri\nv 0 0 0\nv 1 0 0\nv 0 1 0\nusemtl Red\nf 1 2 3\n",
//!     "newmtl Red\nKd 1 0 0\n",
//! )
//! .unwrap();
//! assert_eq!(model.mesh().face_indices(), &[0, 1, 2]);
//! ```

pub mod app;
pub mod convert;
pub mod error;
pub mod gfx;
pub mod model;
pub mod parsing;
pub mod schema;

// Re-export main types for convenience
pub use app::{CubistApp, ViewerConfig};
pub use error::{AssetError, Result};
pub use model::Model;
