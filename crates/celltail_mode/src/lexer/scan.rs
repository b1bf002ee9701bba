//! The per-line scan loop.
//!
//! [`LineTokenizer`] drives a [`RuleTable`] across one line: ask for the
//! first matching rule, turn the match into tokens, follow the transition,
//! repeat. Positions no rule accepts are consumed one character at a time as
//! `text`, so every line terminates and the emitted tokens always cover the
//! line exactly.

use crate::lexer::{
    IdentifierClassifier, MatchedLabel, RuleMatch, RuleTable, StateId, Token, TokenLabel,
};
use crate::syntax::TextRange;
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Default cap on tokens emitted for a single line.
pub const DEFAULT_MAX_TOKENS_PER_LINE: usize = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialize", serde(default))]
pub struct TokenizerConfig {
    /// Once a line has produced this many tokens the rest of it becomes one
    /// `text` token and the next line starts over in `start`. `None` disables
    /// the cap.
    pub max_tokens_per_line: Option<usize>,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            max_tokens_per_line: Some(DEFAULT_MAX_TOKENS_PER_LINE),
        }
    }
}

/// Tokens of one line plus the state the next line starts in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineTokens {
    pub tokens: Vec<Token>,
    pub end_state: StateId,
}

impl LineTokens {
    /// Adjacent tokens with the same label joined into one.
    ///
    /// Quoted strings are emitted a character at a time; consumers that only
    /// care about which bytes carry which label can use this view instead.
    #[must_use]
    pub fn merged(&self) -> Vec<Token> {
        let mut out: Vec<Token> = Vec::with_capacity(self.tokens.len());
        for token in &self.tokens {
            match out.last_mut() {
                Some(last) if last.label == token.label && last.range.end() == token.range.start() => {
                    last.text.push_str(&token.text);
                    last.range = TextRange::new(last.range.start(), token.range.end());
                }
                _ => out.push(token.clone()),
            }
        }
        out
    }

    /// Concatenated token text, always equal to the scanned line.
    #[must_use]
    pub fn text(&self) -> String {
        self.tokens.iter().map(|t| t.text.as_str()).collect()
    }
}

/// Outcome of a single scan step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Matched(RuleMatch),
    /// No rule applied; the caller consumes `len` bytes (one character, or
    /// the tail of one when `pos` sat inside it).
    NoMatch { len: usize },
}

/// Scans lines against a rule table, resolving identifiers through a classifier.
#[derive(Debug, Clone, Copy)]
pub struct LineTokenizer<'a> {
    table: &'a RuleTable,
    classifier: &'a IdentifierClassifier,
    config: TokenizerConfig,
}

impl<'a> LineTokenizer<'a> {
    #[must_use]
    pub fn new(table: &'a RuleTable, classifier: &'a IdentifierClassifier) -> Self {
        Self::with_config(table, classifier, TokenizerConfig::default())
    }

    #[must_use]
    pub const fn with_config(
        table: &'a RuleTable,
        classifier: &'a IdentifierClassifier,
        config: TokenizerConfig,
    ) -> Self {
        Self {
            table,
            classifier,
            config,
        }
    }

    #[must_use]
    pub const fn table(&self) -> &'a RuleTable {
        self.table
    }

    /// One step of the scan at `pos`.
    ///
    /// Total for any `pos`: off a char boundary or past the end nothing
    /// matches, and `NoMatch` spans the bytes up to the next boundary
    /// (at least one).
    #[must_use]
    pub fn step(&self, line: &str, pos: usize, state: StateId) -> Step {
        self.table.match_at(state, line, pos).map_or_else(
            || Step::NoMatch {
                len: (pos + 1..=line.len())
                    .find(|&end| line.is_char_boundary(end))
                    .map_or(1, |end| end - pos),
            },
            Step::Matched,
        )
    }

    /// Tokenize `line` (without its terminator) starting in `state`.
    #[must_use]
    pub fn tokenize_line(&self, line: &str, state: StateId) -> LineTokens {
        let mut tokens = Vec::new();
        let mut state = state;
        let mut pos = 0;

        while pos < line.len() {
            if let Some(max) = self.config.max_tokens_per_line
                && tokens.len() >= max
            {
                tracing::warn!(
                    max,
                    remaining = line.len() - pos,
                    "token limit reached; rest of line left unhighlighted"
                );
                tokens.push(text_token(line, pos..line.len()));
                return LineTokens {
                    tokens,
                    end_state: self.table.start(),
                };
            }

            match self.step(line, pos, state) {
                Step::Matched(m) => {
                    self.emit(line, &m, &mut tokens);
                    pos = m.range.end;
                    state = m.next;
                }
                Step::NoMatch { len } => {
                    tracing::trace!(
                        pos,
                        state = self.table.state_name(state),
                        "no rule matched; consuming one character"
                    );
                    tokens.push(text_token(line, pos..pos + len));
                    pos += len;
                }
            }
        }

        LineTokens {
            tokens,
            end_state: state,
        }
    }

    /// Tokenize consecutive lines, carrying the end state of each into the next.
    pub fn tokenize_lines<'l, I>(&self, lines: I) -> Vec<LineTokens>
    where
        I: IntoIterator<Item = &'l str>,
    {
        let mut state = self.table.start();
        lines
            .into_iter()
            .map(|line| {
                let result = self.tokenize_line(line, state);
                state = result.end_state;
                result
            })
            .collect()
    }

    fn emit(&self, line: &str, m: &RuleMatch, tokens: &mut Vec<Token>) {
        match &m.label {
            MatchedLabel::Label(label) => {
                tokens.push(token(*label, line, m.range.clone()));
            }
            MatchedLabel::Classify => {
                let word = &line[m.range.clone()];
                let label = self.classifier.classify(word).label();
                tokens.push(token(label, line, m.range.clone()));
            }
            MatchedLabel::Groups(groups) => {
                // Bytes of the match outside every group are kept as text.
                let mut cursor = m.range.start;
                for (label, range) in groups {
                    if range.start < cursor || range.is_empty() {
                        continue;
                    }
                    if range.start > cursor {
                        tokens.push(text_token(line, cursor..range.start));
                    }
                    tokens.push(token(*label, line, range.clone()));
                    cursor = range.end;
                }
                if cursor < m.range.end {
                    tokens.push(text_token(line, cursor..m.range.end));
                }
            }
        }
    }
}

fn token(label: TokenLabel, line: &str, range: std::ops::Range<usize>) -> Token {
    Token::new(label, &line[range.clone()], TextRange::from_usize(range))
}

fn text_token(line: &str, range: std::ops::Range<usize>) -> Token {
    token(TokenLabel::Text, line, range)
}
