//! # Incremental Highlighting
//!
//! [`DocumentHighlighter`] keeps a whole buffer highlighted. Each line is
//! scanned from the state the previous line ended in, and the result is cached
//! together with that start state. After an edit only the touched lines are
//! rescanned, plus any following lines whose start state changed; the first
//! following line whose start state is unchanged stops the rescan because its
//! cached tokens are still valid.
//!
//! ```rust
//! use celltail_mode::lexer::incremental::TextEdit;
//! use celltail_mode::mode::Mode;
//!
//! let mode = Mode::celltail()?;
//! let mut doc = mode.highlighter("x = 1\ny = 2\n");
//!
//! // Opening a string on line 0 changes how every later line is scanned.
//! let delta = doc.update(&TextEdit::insert(0, "\""))?;
//! assert_eq!(delta.changed_lines, 0..3);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::error::EditError;
use crate::lexer::{
    IdentifierClassifier, LineTokenizer, LineTokens, RuleTable, StateId, TokenizerConfig,
};
use crate::syntax::{LineIndex, TextSize};
use std::ops::Range;
use std::sync::Arc;

/// A byte-range replacement in the document text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    /// The byte range to replace
    pub range: Range<usize>,
    /// The new text to insert
    pub new_text: String,
}

impl TextEdit {
    #[must_use]
    pub fn replace(range: Range<usize>, new_text: impl Into<String>) -> Self {
        Self {
            range,
            new_text: new_text.into(),
        }
    }

    #[must_use]
    pub fn insert(offset: usize, text: impl Into<String>) -> Self {
        Self::replace(offset..offset, text)
    }

    #[must_use]
    pub fn delete(range: Range<usize>) -> Self {
        Self::replace(range, String::new())
    }

    /// Change in document length, in bytes
    #[must_use]
    pub fn delta(&self) -> isize {
        self.new_text.len() as isize - self.range.len() as isize
    }
}

/// Lines touched by an [`DocumentHighlighter::update`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightDelta {
    /// Lines (in the new numbering) whose tokens were recomputed
    pub changed_lines: Range<usize>,
    /// Lines removed by the edit
    pub removed_lines: usize,
    /// Lines inserted by the edit
    pub inserted_lines: usize,
    pub version: u64,
}

#[derive(Debug, Clone)]
struct LineEntry {
    start_state: StateId,
    tokens: LineTokens,
}

/// A highlighted document that re-highlights incrementally on edit.
#[derive(Debug, Clone)]
pub struct DocumentHighlighter {
    rules: Arc<RuleTable>,
    classifier: Arc<IdentifierClassifier>,
    config: TokenizerConfig,
    text: String,
    index: LineIndex,
    lines: Vec<LineEntry>,
    version: u64,
}

impl DocumentHighlighter {
    #[must_use]
    pub fn new(
        rules: Arc<RuleTable>,
        classifier: Arc<IdentifierClassifier>,
        config: TokenizerConfig,
        text: impl Into<String>,
    ) -> Self {
        let text = text.into();
        let index = LineIndex::new(&text);
        let mut doc = Self {
            rules,
            classifier,
            config,
            text,
            index,
            lines: Vec::new(),
            version: 0,
        };
        doc.lines = doc.scan_lines(0..doc.index.line_count(), doc.rules.start());
        doc
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn line_tokens(&self, line: usize) -> Option<&LineTokens> {
        self.lines.get(line).map(|entry| &entry.tokens)
    }

    /// State the given line ends in.
    #[must_use]
    pub fn line_state(&self, line: usize) -> Option<StateId> {
        self.lines.get(line).map(|entry| entry.tokens.end_state)
    }

    #[must_use]
    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Apply `edit` and re-highlight what it invalidated.
    ///
    /// # Errors
    ///
    /// Returns [`EditError`] if the range is reversed, past the end of the
    /// text, or splits a UTF-8 character. The document is left unchanged.
    pub fn update(&mut self, edit: &TextEdit) -> Result<HighlightDelta, EditError> {
        let Range { start, end } = edit.range.clone();
        if start > end || end > self.text.len() {
            return Err(EditError::OutOfBounds {
                start,
                end,
                len: self.text.len(),
            });
        }
        if !self.text.is_char_boundary(start) || !self.text.is_char_boundary(end) {
            return Err(EditError::NotCharBoundary { start, end });
        }

        // An edit right after a `\r` can turn a lone `\r` into `\r\n`, so the
        // previous line is always included.
        let first = self.index.line_of(TextSize::of(start)).saturating_sub(1);
        let old_last = self.index.line_of(TextSize::of(end));

        self.text.replace_range(start..end, &edit.new_text);
        self.index = LineIndex::new(&self.text);
        self.version += 1;

        let new_last = self
            .index
            .line_of(TextSize::of(start + edit.new_text.len()));
        let removed = old_last - first + 1;
        let inserted = new_last - first + 1;

        let start_state = self.start_state_of(first);
        let fresh = self.scan_lines(first..first + inserted, start_state);
        self.lines.splice(first..first + removed, fresh);

        // Lines after the edited block: rescan until a start state matches the cache.
        let mut line = first + inserted;
        while line < self.lines.len() {
            let state = self.start_state_of(line);
            if self.lines[line].start_state == state {
                break;
            }
            let entry = self.scan_line(line, state);
            self.lines[line] = entry;
            line += 1;
        }

        tracing::debug!(
            version = self.version,
            first,
            rescanned = line - first,
            "re-highlighted after edit"
        );

        Ok(HighlightDelta {
            changed_lines: first..line,
            removed_lines: removed,
            inserted_lines: inserted,
            version: self.version,
        })
    }

    fn start_state_of(&self, line: usize) -> StateId {
        line.checked_sub(1)
            .and_then(|prev| self.lines.get(prev))
            .map_or(self.rules.start(), |entry| entry.tokens.end_state)
    }

    fn scan_line(&self, line: usize, state: StateId) -> LineEntry {
        let tokenizer = LineTokenizer::with_config(&self.rules, &self.classifier, self.config);
        let text = self.index.line_text(&self.text, line).unwrap_or_default();
        LineEntry {
            start_state: state,
            tokens: tokenizer.tokenize_line(text, state),
        }
    }

    fn scan_lines(&self, lines: Range<usize>, mut state: StateId) -> Vec<LineEntry> {
        lines
            .map(|line| {
                let entry = self.scan_line(line, state);
                state = entry.tokens.end_state;
                entry
            })
            .collect()
    }
}
