//! Line bookkeeping
//!
//! The highlighter is line-oriented: a document is split into lines and each
//! line is scanned on its own, with only the lexical state carried across the
//! boundary. [`LineIndex`] records where every line's content starts and ends
//! so the split and the offset lookups share one scan.

use crate::syntax::{TextRange, TextSize};

/// Content ranges of every line in a text, terminators excluded.
///
/// `\n`, `\r\n` and a lone `\r` all end a line. A text that ends with a
/// terminator has a trailing empty line, matching how editors count lines.
#[derive(Debug, Clone)]
pub struct LineIndex {
    lines: Vec<TextRange>,
    text_len: TextSize,
}

impl LineIndex {
    /// Build the index with a single pass over `text`.
    ///
    /// ```rust
    /// use celltail_mode::syntax::line_col::LineIndex;
    ///
    /// let index = LineIndex::new("a\r\nbc\n");
    /// assert_eq!(index.line_count(), 3);
    /// assert_eq!(index.line_text("a\r\nbc\n", 1), Some("bc"));
    /// ```
    #[must_use]
    pub fn new(text: &str) -> Self {
        let bytes = text.as_bytes();
        let mut lines = Vec::new();
        let mut start = 0;

        while let Some(rel) = memchr::memchr2(b'\n', b'\r', &bytes[start..]) {
            let end = start + rel;
            lines.push(TextRange::from_usize(start..end));
            start = if bytes[end] == b'\r' && bytes.get(end + 1) == Some(&b'\n') {
                end + 2
            } else {
                end + 1
            };
        }
        lines.push(TextRange::from_usize(start..text.len()));

        Self {
            lines,
            text_len: TextSize::of(text.len()),
        }
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Content range of `line`, or `None` past the last line.
    #[must_use]
    pub fn line_range(&self, line: usize) -> Option<TextRange> {
        self.lines.get(line).copied()
    }

    /// Slice the content of `line` out of the text this index was built from.
    #[must_use]
    pub fn line_text<'a>(&self, text: &'a str, line: usize) -> Option<&'a str> {
        self.line_range(line)
            .and_then(|range| text.get(range.to_range()))
    }

    /// Iterate over every line's content.
    pub fn lines<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.lines
            .iter()
            .map(move |range| text.get(range.to_range()).unwrap_or_default())
    }

    /// Line containing `offset`. Offsets past the end clamp to the last line.
    #[must_use]
    pub fn line_of(&self, offset: TextSize) -> usize {
        let offset = offset.min(self.text_len);
        match self.lines.binary_search_by(|range| range.start().cmp(&offset)) {
            Ok(idx) => idx,
            Err(idx) => idx.saturating_sub(1),
        }
    }
}
