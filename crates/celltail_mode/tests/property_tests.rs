//! Property-based tests for the CellTail rules
//!
//! These use proptest to check the scanning guarantees on arbitrary input:
//! tokens always reproduce the line, numbers win over identifiers, and the
//! classifier gives every identifier exactly one category.

use celltail_mode::lexer::{MatchedLabel, TokenizerConfig, is_identifier_shape};
use celltail_mode::mode::celltail::{
    BUILTIN_CONSTANTS, DEPRECATED, KEYWORDS, PSEUDO_VARIABLES, celltail_classifier,
};
use celltail_mode::{IdentifierCategory, Mode, TokenLabel};
use proptest::prelude::*;

/// Printable text biased towards characters the rules care about
fn celltail_line() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9_$ ]{0,40}",
        "[\"'#(){}\\[\\],:;+\\-*/%^&|@<>=. a-z0-9]{0,40}",
        ".{0,40}",
    ]
}

fn listed_words() -> Vec<&'static str> {
    [DEPRECATED, PSEUDO_VARIABLES, BUILTIN_CONSTANTS, KEYWORDS]
        .iter()
        .flat_map(|list| list.split('|'))
        .collect()
}

proptest! {
    #[test]
    fn tokens_reconstruct_line(line in celltail_line()) {
        let mode = Mode::celltail().unwrap();
        let tokenizer = mode.tokenizer();
        for state in mode.rules.states().map(|(id, _)| id) {
            let result = tokenizer.tokenize_line(&line, state);
            prop_assert_eq!(result.text(), line.clone());

            // Ranges are contiguous and agree with the token text.
            let mut pos = 0;
            for token in &result.tokens {
                prop_assert_eq!(token.range.start().to_usize(), pos);
                prop_assert!(!token.text.is_empty());
                prop_assert_eq!(&line[token.range.to_range()], token.text.as_str());
                pos = token.range.end().to_usize();
            }
            prop_assert_eq!(pos, line.len());
        }
    }

    #[test]
    fn tokens_reconstruct_line_under_token_cap(line in celltail_line(), max in 0usize..6) {
        let mut mode = Mode::celltail().unwrap();
        mode.tokenizer_config = TokenizerConfig { max_tokens_per_line: Some(max) };
        let result = mode.tokenizer().tokenize_line(&line, mode.rules.start());
        prop_assert_eq!(result.text(), line);
        // One step emits at most three tokens (the def header), plus the remainder.
        prop_assert!(result.tokens.len() <= max + 3);
    }

    #[test]
    fn merged_view_keeps_text(line in celltail_line()) {
        let mode = Mode::celltail().unwrap();
        let result = mode.tokenizer().tokenize_line(&line, mode.rules.start());
        let merged: String = result.merged().iter().map(|t| t.text.as_str()).collect();
        prop_assert_eq!(merged, line);
    }

    #[test]
    fn integer_literal_matches_whole_span(s in "(0|[1-9][0-9]{0,12})") {
        let mode = Mode::celltail().unwrap();
        let m = mode.rules.match_at(mode.rules.start(), &s, 0).unwrap();
        prop_assert_eq!(m.label, MatchedLabel::Label(TokenLabel::Numeric));
        prop_assert_eq!(m.range, 0..s.len());
    }

    #[test]
    fn classifier_is_total(word in "[a-zA-Z_$][a-zA-Z0-9_$]{0,12}") {
        prop_assume!(is_identifier_shape(&word));
        let classifier = celltail_classifier();
        let category = classifier.classify(&word);
        let listed = listed_words().contains(&word.as_str());
        prop_assert_eq!(category == IdentifierCategory::Identifier, !listed);
    }

    #[test]
    fn identifiers_scan_as_one_token(word in "[a-zA-Z_][a-zA-Z0-9_]{0,12}") {
        prop_assume!(!matches!(word.as_str(), "def" | "class"));
        let mode = Mode::celltail().unwrap();
        let result = mode.tokenizer().tokenize_line(&word, mode.rules.start());
        prop_assert_eq!(result.tokens.len(), 1);
        prop_assert_eq!(
            result.tokens[0].label,
            mode.classifier.classify(&word).label()
        );
    }
}
