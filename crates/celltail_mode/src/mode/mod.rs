//! # Editor Modes
//!
//! A [`Mode`] is the record a host editor needs to highlight and edit one
//! language: the rule table, the identifier classifier, comment markers and
//! editing [`Behaviour`]. Modes are plain values composed from a base record
//! with struct update syntax; [`Mode::plain_text`] is that base.
//!
//! ```rust
//! use celltail_mode::mode::{Mode, ModeRegistry};
//!
//! let registry = ModeRegistry::with_builtin()?;
//! let mode = registry.require("celltail")?;
//!
//! assert_eq!(mode.line_comment_start.as_deref(), Some("#"));
//! assert_eq!(mode.toggle_line_comment("  x"), Some("  # x".to_string()));
//! # Ok::<(), celltail_mode::error::ModeError>(())
//! ```

pub mod celltail;

pub use celltail::{CELLTAIL_ID, celltail_classifier, celltail_classifier_config, celltail_rules};

use crate::error::{ModeError, RuleTableError};
use crate::lexer::{
    DocumentHighlighter, IdentifierClassifier, LineTokenizer, LineTokens, RuleTable,
    TokenizerConfig,
};
use crate::syntax::LineIndex;
use compact_str::CompactString;
use hashbrown::HashMap;
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const PLAIN_TEXT_ID: &str = "text";

/// Editing defaults a host applies while typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialize", serde(default, rename_all = "kebab-case"))]
pub struct Behaviour {
    /// Insert the closing bracket after `(`, `[` or `{`
    pub auto_pair_brackets: bool,
    /// Insert the closing quote after `"` or `'`
    pub auto_pair_quotes: bool,
}

impl Default for Behaviour {
    fn default() -> Self {
        Self {
            auto_pair_brackets: true,
            auto_pair_quotes: true,
        }
    }
}

impl Behaviour {
    /// Indentation for a line inserted after `line`: its leading whitespace.
    #[must_use]
    pub fn next_line_indent<'a>(&self, line: &'a str) -> &'a str {
        let content = line.trim_start_matches([' ', '\t']);
        &line[..line.len() - content.len()]
    }
}

#[derive(Debug, Clone)]
pub struct Mode {
    pub id: CompactString,
    pub rules: Arc<RuleTable>,
    pub classifier: Arc<IdentifierClassifier>,
    pub line_comment_start: Option<CompactString>,
    /// Opening and closing block comment markers
    pub block_comment: Option<(CompactString, CompactString)>,
    pub behaviour: Behaviour,
    pub tokenizer_config: TokenizerConfig,
}

impl Mode {
    /// The base mode: no rules, so every character is `text`.
    #[must_use]
    pub fn plain_text() -> Self {
        Self {
            id: PLAIN_TEXT_ID.into(),
            rules: Arc::new(RuleTable::empty()),
            classifier: Arc::new(IdentifierClassifier::default()),
            line_comment_start: None,
            block_comment: None,
            behaviour: Behaviour::default(),
            tokenizer_config: TokenizerConfig::default(),
        }
    }

    /// The CellTail mode, layered over [`Mode::plain_text`].
    ///
    /// # Errors
    ///
    /// Propagates [`RuleTableError`] from building the rule table.
    pub fn celltail() -> Result<Self, RuleTableError> {
        Ok(Self {
            id: CELLTAIL_ID.into(),
            rules: Arc::new(celltail_rules()?),
            classifier: Arc::new(celltail_classifier()),
            line_comment_start: Some("#".into()),
            block_comment: None,
            ..Self::plain_text()
        })
    }

    #[must_use]
    pub fn tokenizer(&self) -> LineTokenizer<'_> {
        LineTokenizer::with_config(&self.rules, &self.classifier, self.tokenizer_config)
    }

    /// Tokenize a whole text in one pass, line by line.
    #[must_use]
    pub fn tokenize_text(&self, text: &str) -> Vec<LineTokens> {
        let index = LineIndex::new(text);
        self.tokenizer().tokenize_lines(index.lines(text))
    }

    /// An incrementally updated highlighter over `text` sharing this mode's tables.
    #[must_use]
    pub fn highlighter(&self, text: impl Into<String>) -> DocumentHighlighter {
        DocumentHighlighter::new(
            Arc::clone(&self.rules),
            Arc::clone(&self.classifier),
            self.tokenizer_config,
            text,
        )
    }

    /// Comment `line` out, or uncomment it if it already starts with the
    /// marker. `None` when the mode has no line comment marker.
    #[must_use]
    pub fn toggle_line_comment(&self, line: &str) -> Option<String> {
        let marker = self.line_comment_start.as_deref()?;
        let indent = self.behaviour.next_line_indent(line);
        let rest = &line[indent.len()..];

        let toggled = match rest.strip_prefix(marker) {
            Some(body) => format!("{indent}{}", body.strip_prefix(' ').unwrap_or(body)),
            None => format!("{indent}{marker} {rest}"),
        };
        Some(toggled)
    }
}

/// Modes by id.
#[derive(Debug, Clone, Default)]
pub struct ModeRegistry {
    modes: HashMap<CompactString, Arc<Mode>, ahash::RandomState>,
}

impl ModeRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding `text` and `celltail`.
    ///
    /// # Errors
    ///
    /// Fails only if a built-in rule table does not build.
    pub fn with_builtin() -> Result<Self, ModeError> {
        let mut registry = Self::new();
        registry.register(Mode::plain_text())?;
        registry.register(Mode::celltail()?)?;
        Ok(registry)
    }

    /// # Errors
    ///
    /// [`ModeError::AlreadyRegistered`] if a mode with the same id exists.
    pub fn register(&mut self, mode: Mode) -> Result<Arc<Mode>, ModeError> {
        if self.modes.contains_key(&mode.id) {
            return Err(ModeError::AlreadyRegistered { id: mode.id });
        }
        tracing::debug!(id = %mode.id, states = mode.rules.states().count(), "registered mode");
        let mode = Arc::new(mode);
        self.modes.insert(mode.id.clone(), Arc::clone(&mode));
        Ok(mode)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<Arc<Mode>> {
        self.modes.get(id).cloned()
    }

    /// # Errors
    ///
    /// [`ModeError::UnknownMode`] if nothing is registered under `id`.
    pub fn require(&self, id: &str) -> Result<Arc<Mode>, ModeError> {
        self.get(id)
            .ok_or_else(|| ModeError::UnknownMode { id: id.into() })
    }

    /// Registered ids, sorted.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.modes.keys().map(CompactString::as_str).collect();
        ids.sort_unstable();
        ids
    }
}
