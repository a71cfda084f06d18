//! Logical block ranges and partitioning of a parent block by marker

use super::sequence::Sequence;

/// Half-open span `[start, start + len)` of the source text owned by one
/// rule instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockRange {
    pub start: usize,
    pub len: usize,
}

impl BlockRange {
    pub fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// Range covering all of `source`
    pub fn whole(source: &str) -> Self {
        Self::new(0, source.len())
    }

    pub fn end(&self) -> usize {
        self.start + self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end()]
    }
}

/// Splits `parent` into one child range per occurrence of `sequence`.
///
/// Each child starts at its own match and stops right before the next match
/// of the same sequence; the last child runs to the end of `parent`. Text
/// before the first match belongs to no child.
pub fn partition(source: &str, parent: BlockRange, sequence: &Sequence) -> Vec<BlockRange> {
    let mut ranges = Vec::new();
    let mut previous: Option<usize> = None;

    for offset in sequence.occurrences(source, parent) {
        if let Some(start) = previous {
            ranges.push(BlockRange::new(start, offset - start));
        }
        previous = Some(offset);
    }

    if let Some(start) = previous {
        ranges.push(BlockRange::new(start, parent.end() - start));
    }

    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_splits_on_same_marker_only() {
        let source = "o A\nv 0 0 0\nusemtl Red\nf 1 1 1\no B\nv 1 1 1\n";
        let ranges = partition(source, BlockRange::whole(source), &Sequence::new("o"));

        assert_eq!(ranges.len(), 2);
        assert_eq!(
            ranges[0].slice(source),
            "o A\nv 0 0 0\nusemtl Red\nf 1 1 1\n"
        );
        assert_eq!(ranges[1].slice(source), "o B\nv 1 1 1\n");
    }

    #[test]
    fn test_partition_matches_nth_range() {
        let source = "newmtl A\nKd 1 0 0\nnewmtl B\nKd 0 1 0\nnewmtl C\nKd 0 0 1";
        let whole = BlockRange::whole(source);
        let sequence = Sequence::new("newmtl");

        let ranges = partition(source, whole, &sequence);
        assert_eq!(ranges.len(), 3);
        for (n, range) in ranges.iter().enumerate() {
            assert_eq!(Some(*range), sequence.nth_range(source, whole, n));
        }
    }

    #[test]
    fn test_partition_without_matches_is_empty() {
        let source = "v 1 2 3\n";
        let ranges = partition(source, BlockRange::whole(source), &Sequence::new("o"));
        assert!(ranges.is_empty());
    }

    #[test]
    fn test_partition_respects_parent_bounds() {
        let source = "usemtl A\nf 1 2 3\nusemtl B\nf 4 5 6\n";
        let parent = BlockRange::new(0, source.find("usemtl B").unwrap());
        let ranges = partition(source, parent, &Sequence::new("usemtl"));

        assert_eq!(ranges, vec![parent]);
    }
}
