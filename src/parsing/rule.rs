//! Declarative schema rules

use super::sequence::Sequence;

/// Numeric type of the values in a leaf record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Float,
    Unsigned,
}

/// What a rule does with the block it owns.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleKind {
    /// Every matched line decodes into `arity` values of `value` kind.
    Leaf { value: ValueKind, arity: usize },
    /// Every match opens a block that is decoded by each child in order.
    Structure(Vec<Rule>),
}

/// One node of a schema: a record marker plus either a leaf shape or a list
/// of child rules.
///
/// ```
/// use cubist::parsing::Rule;
///
/// let rule = Rule::structure("newmtl", vec![Rule::floats("Kd", 3)]);
/// assert!(!rule.is_leaf());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    marker: String,
    sequence: Sequence,
    kind: RuleKind,
}

impl Rule {
    pub fn leaf(marker: &str, value: ValueKind, arity: usize) -> Self {
        Self::new(marker, RuleKind::Leaf { value, arity })
    }

    /// Leaf rule decoding `arity` floats per line
    pub fn floats(marker: &str, arity: usize) -> Self {
        Self::leaf(marker, ValueKind::Float, arity)
    }

    /// Leaf rule decoding `arity` unsigned integers per line
    pub fn unsigned(marker: &str, arity: usize) -> Self {
        Self::leaf(marker, ValueKind::Unsigned, arity)
    }

    /// Structural rule. A structure with no children would carry nothing but
    /// its identifier, so `children` is expected to be non-empty.
    pub fn structure(marker: &str, children: Vec<Rule>) -> Self {
        debug_assert!(!children.is_empty(), "structural rule `{marker}` has no children");
        Self::new(marker, RuleKind::Structure(children))
    }

    fn new(marker: &str, kind: RuleKind) -> Self {
        Self {
            marker: marker.to_string(),
            sequence: Sequence::new(marker),
            kind,
        }
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    pub fn kind(&self) -> &RuleKind {
        &self.kind
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, RuleKind::Leaf { .. })
    }

    pub fn children(&self) -> &[Rule] {
        match &self.kind {
            RuleKind::Structure(children) => children,
            RuleKind::Leaf { .. } => &[],
        }
    }
}
