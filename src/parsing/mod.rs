//! # Structured-Text Parsing
//!
//! A schema-driven parser for line-oriented text where every line starts
//! with a record marker (`o`, `v`, `usemtl`, `newmtl`, ...).
//!
//! A schema is a tree of [`Rule`]s. Structural rules own a block of text that
//! runs from their marker to the next occurrence of the same marker; leaf
//! rules decode each of their lines into a fixed-width numeric tuple.
//!
//! ```
//! use cubist::parsing::{parse, Record, Rule};
//!
//! let rule = Rule::structure("newmtl", vec![Rule::floats("Kd", 3)]);
//! let records = parse(&rule, "newmtl Red\nKd 1 0 0\n").unwrap();
//!
//! let Record::Structure(material) = &records[0] else { unreachable!() };
//! assert_eq!(material.id, "Red");
//! assert_eq!(material.children[0], vec![Record::Floats(vec![1.0, 0.0, 0.0])]);
//! ```

pub mod block;
pub mod numeric;
pub mod parser;
pub mod record;
pub mod rule;
pub mod sequence;

pub use block::{partition, BlockRange};
pub use parser::{parse, parse_schema, Schema, StructuredTextParser};
pub use record::{FromRecord, Record, Structure};
pub use rule::{Rule, RuleKind, ValueKind};
pub use sequence::Sequence;
