//! Recursive interpreter for schema rule trees
//!
//! The parser walks a [`Rule`] tree over one source string. A structural
//! rule partitions its block into one sub-block per occurrence of its marker
//! and decodes every child rule over each sub-block; a leaf rule decodes each
//! of its matched lines into a fixed number of values. Sibling rules of
//! different kinds may interleave freely in the text: only occurrences of the
//! same marker delimit blocks.

use log::debug;

use super::{
    block::{partition, BlockRange},
    numeric::{parse_float, parse_unsigned},
    record::{FromRecord, Record, Structure},
    rule::{Rule, RuleKind, ValueKind},
    sequence::MARKER_SEPARATOR,
};
use crate::error::{AssetError, Result};

/// A rule tree paired with the typed result its top-level records build.
pub trait Schema {
    type Output: FromRecord;

    fn rule(&self) -> Rule;
}

/// Decodes `source` against `rule`, returning one record per top-level
/// occurrence. A source with no occurrence yields an empty list.
pub fn parse(rule: &Rule, source: &str) -> Result<Vec<Record>> {
    StructuredTextParser::new(source).decode(rule, BlockRange::whole(source))
}

/// Decodes `source` with a schema and builds its typed results.
pub fn parse_schema<S: Schema>(schema: &S, source: &str) -> Result<Vec<S::Output>> {
    let rule = schema.rule();
    let records = parse(&rule, source)?;
    debug!(
        "Parsed {} `{}` record(s) from {} bytes",
        records.len(),
        rule.marker(),
        source.len()
    );

    records.into_iter().map(S::Output::from_record).collect()
}

/// Borrowing parser over one source string.
pub struct StructuredTextParser<'a> {
    source: &'a str,
}

impl<'a> StructuredTextParser<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source }
    }

    /// Decodes every occurrence of `rule` inside `range`.
    pub fn decode(&self, rule: &Rule, range: BlockRange) -> Result<Vec<Record>> {
        match rule.kind() {
            RuleKind::Leaf { value, arity } => self.decode_leaves(rule, *value, *arity, range),
            RuleKind::Structure(children) => partition(self.source, range, rule.sequence())
                .into_iter()
                .map(|block| self.assemble(rule, children, block))
                .collect(),
        }
    }

    fn assemble(&self, rule: &Rule, children: &[Rule], block: BlockRange) -> Result<Record> {
        let id = self.line_body(rule, block.start, block).to_string();

        let children = children
            .iter()
            .map(|child| self.decode(child, block))
            .collect::<Result<Vec<_>>>()?;

        Ok(Record::Structure(Structure {
            marker: rule.marker().to_string(),
            id,
            children,
        }))
    }

    fn decode_leaves(
        &self,
        rule: &Rule,
        value: ValueKind,
        arity: usize,
        range: BlockRange,
    ) -> Result<Vec<Record>> {
        rule.sequence()
            .occurrences(self.source, range)
            .map(|offset| {
                let body = self.line_body(rule, offset, range);
                let tokens = take_tokens(rule, body, arity)?;
                Ok(match value {
                    ValueKind::Float => Record::Floats(tokens.iter().map(|t| parse_float(t)).collect()),
                    ValueKind::Unsigned => {
                        Record::Unsigned(tokens.iter().map(|t| parse_unsigned(t)).collect())
                    }
                })
            })
            .collect()
    }

    /// Text after the marker sequence at `offset`, up to the end of the line
    /// or of `range`, without a trailing carriage return.
    fn line_body(&self, rule: &Rule, offset: usize, range: BlockRange) -> &'a str {
        let begin = (offset + rule.sequence().len()).min(range.end());
        let rest = &self.source[begin..range.end()];
        let line = rest.split('\n').next().unwrap_or_default();
        line.strip_suffix('\r').unwrap_or(line)
    }
}

fn take_tokens<'a>(rule: &Rule, body: &'a str, arity: usize) -> Result<Vec<&'a str>> {
    let tokens: Vec<&str> = body.split(MARKER_SEPARATOR).take(arity).collect();
    if tokens.len() < arity {
        return Err(AssetError::malformed(
            rule.marker(),
            format!("expected {arity} values, found {}", tokens.len()),
            body,
        ));
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object_rule() -> Rule {
        Rule::structure(
            "o",
            vec![
                Rule::floats("v", 3),
                Rule::structure("usemtl", vec![Rule::unsigned("f", 3)]),
            ],
        )
    }

    fn structure(record: &Record) -> &Structure {
        match record {
            Record::Structure(structure) => structure,
            other => panic!("expected structure, got {other:?}"),
        }
    }

    #[test]
    fn test_nested_blocks_are_attributed_to_their_owner() {
        let source = "o Cube\nv 0 0 0\nusemtl Red\nf 1 2 3\nv 1 1 1\nusemtl Blue\nf 3 2 1\nf 1 1 1\n";
        let records = parse(&object_rule(), source).unwrap();
        assert_eq!(records.len(), 1);

        let object = structure(&records[0]);
        assert_eq!(object.id, "Cube");
        // The "v" after "usemtl Red" still belongs to the object.
        assert_eq!(
            object.children[0],
            vec![
                Record::Floats(vec![0.0, 0.0, 0.0]),
                Record::Floats(vec![1.0, 1.0, 1.0]),
            ]
        );

        let directives = &object.children[1];
        assert_eq!(directives.len(), 2);
        assert_eq!(structure(&directives[0]).id, "Red");
        assert_eq!(structure(&directives[0]).children[0].len(), 1);
        assert_eq!(structure(&directives[1]).id, "Blue");
        assert_eq!(
            structure(&directives[1]).children[0],
            vec![Record::Unsigned(vec![3, 2, 1]), Record::Unsigned(vec![1, 1, 1])]
        );
    }

    #[test]
    fn test_vn_lines_are_not_vertices() {
        let source = "o A\nv 1 2 3\nvn 0 0 1\nvt 0.5 0.5\n";
        let records = parse(&object_rule(), source).unwrap();
        assert_eq!(structure(&records[0]).children[0].len(), 1);
    }

    #[test]
    fn test_leaf_without_occurrences_is_empty() {
        let source = "o Empty\nusemtl Red\nf 1 2 3\n";
        let records = parse(&object_rule(), source).unwrap();
        let object = structure(&records[0]);
        assert!(object.children[0].is_empty());
        assert_eq!(object.children[1].len(), 1);
    }

    #[test]
    fn test_source_without_top_level_marker_is_empty() {
        assert!(parse(&object_rule(), "").unwrap().is_empty());
        assert!(parse(&object_rule(), "v 1 2 3\n").unwrap().is_empty());
    }

    #[test]
    fn test_short_line_is_malformed() {
        let error = parse(&object_rule(), "o A\nv 1 2\n").unwrap_err();
        match error {
            AssetError::Malformed { marker, line, .. } => {
                assert_eq!(marker, "v");
                assert_eq!(line, "1 2");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_crlf_and_missing_final_newline() {
        let source = "o Cube\r\nv -0.5 3 2.25\r\nusemtl Red\r\nf 1 2 3";
        let records = parse(&object_rule(), source).unwrap();
        let object = structure(&records[0]);
        assert_eq!(object.id, "Cube");
        assert_eq!(object.children[0], vec![Record::Floats(vec![-0.5, 3.0, 2.25])]);
        assert_eq!(structure(&object.children[1][0]).id, "Red");
        assert_eq!(
            structure(&object.children[1][0]).children[0],
            vec![Record::Unsigned(vec![1, 2, 3])]
        );
    }

    #[test]
    fn test_extra_tokens_are_ignored() {
        let rule = Rule::structure("newmtl", vec![Rule::floats("Kd", 3)]);
        let records = parse(&rule, "newmtl A\nKd 0.1 0.2 0.3 0.4\n").unwrap();
        assert_eq!(
            structure(&records[0]).children[0],
            vec![Record::Floats(vec![0.1, 0.2, 0.3])]
        );
    }

    #[test]
    fn test_texture_suffixes_decode_vertex_index() {
        let rule = Rule::structure("usemtl", vec![Rule::unsigned("f", 3)]);
        let records = parse(&rule, "usemtl A\nf 1/4 2/5 3/6\n").unwrap();
        assert_eq!(
            structure(&records[0]).children[0],
            vec![Record::Unsigned(vec![1, 2, 3])]
        );
    }
}
