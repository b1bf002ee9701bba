//! # celltail_mode
//!
//! Syntax highlighting for the CellTail language, packaged as an editor mode.
//!
//! ## Overview
//!
//! Highlighting is line-oriented and stateful. A rule table maps each lexical
//! state to an ordered list of regex rules; scanning a line tries them
//! first-match-wins at the cursor and carries the final state into the next
//! line, so a string left open on one line keeps colouring the next.
//!
//! - **Rule tables**: [`RuleTableBuilder`] / [`RuleTable`]
//! - **Identifier classification**: [`IdentifierClassifier`] sorts bare words
//!   into keywords, constants, pseudo-variables and so on
//! - **Scanning**: [`LineTokenizer`] for single lines, [`DocumentHighlighter`]
//!   for whole buffers with incremental re-highlighting
//! - **Modes**: [`Mode`] bundles all of the above with comment markers and
//!   editing behaviour; [`ModeRegistry`] looks modes up by id
//!
//! ## Quick Start
//!
//! ```rust
//! use celltail_mode::{Mode, TokenLabel};
//!
//! let mode = Mode::celltail()?;
//! let line = mode.tokenizer().tokenize_line("def foo(x, y):", mode.rules.start());
//!
//! let labels: Vec<TokenLabel> = line.tokens.iter().map(|t| t.label).collect();
//! assert_eq!(
//!     &labels[..4],
//!     &[
//!         TokenLabel::Keyword,
//!         TokenLabel::Text,
//!         TokenLabel::FunctionName,
//!         TokenLabel::LParen,
//!     ]
//! );
//! // Tokens always cover the line exactly.
//! assert_eq!(line.text(), "def foo(x, y):");
//! # Ok::<(), celltail_mode::error::RuleTableError>(())
//! ```
//!
//! ## Features
//!
//! - `serialize`: serde derives for spans, labels, tokens and configuration

pub mod error;
pub mod lexer;
pub mod mode;
pub mod syntax;

// Re-export commonly used types
pub use error::{EditError, ModeError, RuleTableError};
pub use lexer::{
    ClassifierConfig, DocumentHighlighter, HighlightDelta, IdentifierCategory,
    IdentifierClassifier, LineTokenizer, LineTokens, RuleTable, RuleTableBuilder, StateId,
    TextEdit, Token, TokenLabel, TokenType, TokenizerConfig,
};
pub use mode::{Behaviour, Mode, ModeRegistry};
pub use syntax::{LineIndex, TextRange, TextSize};
