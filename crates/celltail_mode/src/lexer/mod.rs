//! # Lexer Module
//!
//! Stateful, line-oriented highlighting.
//!
//! ## Overview
//!
//! The pieces, from the bottom up:
//!
//! - **Rule tables** ([`RuleTable`]): named lexical states, each an ordered
//!   list of regex rules tried first-match-wins at the cursor
//! - **Identifier classification** ([`IdentifierClassifier`]): word-set lookup
//!   deciding whether a bare word is a keyword, a constant, and so on
//! - **Line scanning** ([`LineTokenizer`]): the loop that turns one line into
//!   labelled tokens, falling back to one `text` character when nothing matches
//! - **Incremental highlighting** ([`DocumentHighlighter`]): a whole buffer,
//!   re-scanned line by line after edits
//!
//! ## Usage
//!
//! ```rust
//! use celltail_mode::lexer::{
//!     ClassifierConfig, IdentifierCategory, IdentifierClassifier, LineTokenizer,
//!     RuleTableBuilder, TokenLabel, TokenType,
//! };
//!
//! let table = RuleTableBuilder::new()
//!     .state("start")
//!     .token(TokenLabel::Text, r"\s+")
//!     .token(TokenType::Classify, "[a-z]+")
//!     .build()?;
//! let classifier = IdentifierClassifier::new(
//!     &ClassifierConfig::new().words(IdentifierCategory::Keyword, "let|in"),
//! );
//!
//! let line = LineTokenizer::new(&table, &classifier).tokenize_line("let x", table.start());
//! assert_eq!(line.tokens[0].label, TokenLabel::Keyword);
//! assert_eq!(line.tokens[2].label, TokenLabel::Identifier);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Error Handling
//!
//! Scanning never fails. Building a table can, with [`RuleTableError`]:
//!
//! - Patterns that do not compile
//! - Transitions or includes naming unknown states
//! - Include cycles
//!
//! [`RuleTableError`]: crate::error::RuleTableError

pub mod classifier;
pub mod incremental;
pub mod rules;
pub mod scan;
pub mod token;

pub use classifier::{
    ClassifierConfig, IdentifierCategory, IdentifierClassifier, is_identifier_shape,
};
pub use incremental::{DocumentHighlighter, HighlightDelta, TextEdit};
pub use rules::{
    LexicalState, MatchedLabel, Rule, RuleMatch, RuleTable, RuleTableBuilder, START, StateId,
};
pub use scan::{DEFAULT_MAX_TOKENS_PER_LINE, LineTokenizer, LineTokens, Step, TokenizerConfig};
pub use token::{Token, TokenLabel, TokenType, UnknownScope};
