//! # Error Types
//!
//! Scanning itself never fails: a position no rule accepts is handed back to
//! the caller as "no match" and consumed as plain text. Errors only arise while
//! assembling configuration:
//!
//! - [`RuleTableError`]: a rule table that cannot be built (bad regex,
//!   dangling state reference, include cycle, ...)
//! - [`ModeError`]: mode registry lookups and registrations
//!
//! [`EditError`] is the one runtime error: an edit handed to a
//! [`crate::lexer::DocumentHighlighter`] that does not fit its text.

use compact_str::CompactString;
use thiserror::Error;

/// Errors raised by [`crate::lexer::RuleTableBuilder::build`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleTableError {
    #[error("rule table has no `start` state")]
    MissingStartState,

    #[error("state `{state}` is declared more than once")]
    DuplicateState { state: CompactString },

    #[error("state `{from}` references unknown state `{target}`")]
    UnknownState {
        from: CompactString,
        target: CompactString,
    },

    #[error("state `{state}` includes itself through `{via}`")]
    IncludeCycle {
        state: CompactString,
        via: CompactString,
    },

    #[error("rule {index} in state `{state}` has an invalid pattern: {message}")]
    InvalidPattern {
        state: CompactString,
        index: usize,
        message: String,
    },

    #[error(
        "rule {index} in state `{state}` labels {labels} capture groups but its pattern has {groups}"
    )]
    CaptureMismatch {
        state: CompactString,
        index: usize,
        labels: usize,
        groups: usize,
    },
}

impl RuleTableError {
    /// Create an unknown state reference error
    #[must_use]
    pub fn unknown_state(from: &str, target: &str) -> Self {
        Self::UnknownState {
            from: from.into(),
            target: target.into(),
        }
    }

    /// Create an invalid pattern error from the regex compiler's report
    #[must_use]
    pub fn invalid_pattern(
        state: &str,
        index: usize,
        err: &regex_automata::meta::BuildError,
    ) -> Self {
        Self::InvalidPattern {
            state: state.into(),
            index,
            message: err.to_string(),
        }
    }
}

/// Errors raised by [`crate::mode::ModeRegistry`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModeError {
    #[error("mode `{id}` is already registered")]
    AlreadyRegistered { id: CompactString },

    #[error("unknown mode `{id}`")]
    UnknownMode { id: CompactString },

    #[error(transparent)]
    RuleTable(#[from] RuleTableError),
}

/// Errors raised by [`crate::lexer::DocumentHighlighter::update`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("edit range {start}..{end} is outside the document (length {len})")]
    OutOfBounds { start: usize, end: usize, len: usize },

    #[error("edit range {start}..{end} does not fall on character boundaries")]
    NotCharBoundary { start: usize, end: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_state_message() {
        let err = RuleTableError::unknown_state("start", "qstrng");
        assert_eq!(
            err.to_string(),
            "state `start` references unknown state `qstrng`"
        );
    }

    #[test]
    fn test_invalid_pattern_keeps_regex_message() {
        let Err(regex_err) = regex_automata::meta::Regex::new("(unclosed") else {
            panic!("pattern should not compile");
        };
        let err = RuleTableError::invalid_pattern("start", 3, &regex_err);
        let text = err.to_string();
        assert!(text.starts_with("rule 3 in state `start` has an invalid pattern"));
    }

    #[test]
    fn test_mode_error_wraps_rule_table_error() {
        let err: ModeError = RuleTableError::MissingStartState.into();
        assert_eq!(err.to_string(), "rule table has no `start` state");
    }

    #[test]
    fn test_edit_error_message() {
        let err = EditError::OutOfBounds {
            start: 4,
            end: 9,
            len: 6,
        };
        assert_eq!(
            err.to_string(),
            "edit range 4..9 is outside the document (length 6)"
        );
    }
}
