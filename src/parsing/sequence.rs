//! Marker sequences and their occurrences inside a block of text

use super::block::BlockRange;

/// Separator that must directly follow a marker for it to match.
pub const MARKER_SEPARATOR: char = ' ';

/// A record marker together with its trailing separator.
///
/// Searching for `"v "` instead of `"v"` keeps the marker from matching the
/// start of longer tokens such as `vn` or `vpn`. Matches are also anchored to
/// line starts, so a marker that appears inside an identifier
/// (`usemtl leaf white`) is never counted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    text: String,
}

impl Sequence {
    pub fn new(marker: &str) -> Self {
        let mut text = String::with_capacity(marker.len() + 1);
        text.push_str(marker);
        text.push(MARKER_SEPARATOR);
        Self { text }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length in bytes, separator included
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Absolute offsets of every line-anchored match inside `range`, in order.
    pub fn occurrences<'a>(
        &'a self,
        source: &'a str,
        range: BlockRange,
    ) -> impl Iterator<Item = usize> + 'a {
        let block = range.slice(source);
        block
            .match_indices(self.text.as_str())
            .map(move |(offset, _)| range.start + offset)
            .filter(move |&offset| is_line_start(source, offset))
    }

    /// Number of matches inside `range`.
    pub fn count(&self, source: &str, range: BlockRange) -> usize {
        self.occurrences(source, range).count()
    }

    /// Range owned by the `n`th match: from the match up to the next match
    /// of this sequence, or to the end of `range`.
    pub fn nth_range(&self, source: &str, range: BlockRange, n: usize) -> Option<BlockRange> {
        let mut occurrences = self.occurrences(source, range).skip(n);
        let start = occurrences.next()?;
        let end = occurrences.next().unwrap_or(range.end());
        Some(BlockRange::new(start, end - start))
    }
}

fn is_line_start(source: &str, offset: usize) -> bool {
    offset == 0 || source.as_bytes()[offset - 1] == b'\n'
}
