//! Tests for incremental re-highlighting of CellTail buffers

use celltail_mode::{DocumentHighlighter, EditError, Mode, TextEdit, TokenLabel};
use proptest::prelude::*;

fn assert_matches_fresh(mode: &Mode, doc: &DocumentHighlighter) {
    let fresh = mode.highlighter(doc.text());
    assert_eq!(fresh.line_count(), doc.line_count());
    for line in 0..doc.line_count() {
        assert_eq!(fresh.line_tokens(line), doc.line_tokens(line), "line {line}");
        assert_eq!(fresh.line_state(line), doc.line_state(line), "line {line}");
    }
}

#[test]
fn test_initial_highlight() {
    let mode = Mode::celltail().unwrap();
    let doc = mode.highlighter("fn f(x): x\nO = f(1)\n");

    assert_eq!(doc.version(), 0);
    assert_eq!(doc.line_count(), 3);
    let first = doc.line_tokens(0).unwrap();
    assert_eq!(first.tokens[0].label, TokenLabel::Keyword);
    assert!(doc.line_tokens(2).unwrap().tokens.is_empty());
    assert!(doc.line_tokens(3).is_none());
}

#[test]
fn test_edit_inside_line() {
    let mode = Mode::celltail().unwrap();
    let mut doc = mode.highlighter("x = 1\ny = 2\nz = 3");

    let delta = doc.update(&TextEdit::replace(6..7, "INPUT")).unwrap();
    assert_eq!(doc.text(), "x = 1\nINPUT = 2\nz = 3");
    assert_eq!(delta.version, 1);
    assert!(delta.changed_lines.end <= 2);
    assert_eq!(
        doc.line_tokens(1).unwrap().tokens[0].label,
        TokenLabel::Keyword
    );
    assert_matches_fresh(&mode, &doc);
}

#[test]
fn test_opening_and_closing_a_string() {
    let mode = Mode::celltail().unwrap();
    let mut doc = mode.highlighter("a\nb\nc\nd");

    let opened = doc.update(&TextEdit::insert(2, "\"")).unwrap();
    assert_eq!(opened.changed_lines, 0..4);
    assert!(
        doc.line_tokens(3)
            .unwrap()
            .tokens
            .iter()
            .all(|t| t.label == TokenLabel::String)
    );
    assert_matches_fresh(&mode, &doc);

    // Closing it on line 2 only affects the lines up to the close.
    let closed = doc.update(&TextEdit::insert(6, "\"")).unwrap();
    assert_eq!(doc.text(), "a\n\"b\nc\"\nd");
    assert_eq!(closed.changed_lines.end, 4);
    assert_eq!(doc.line_state(3), Some(mode.rules.start()));
    assert_matches_fresh(&mode, &doc);
}

#[test]
fn test_join_and_split_lines() {
    let mode = Mode::celltail().unwrap();
    let mut doc = mode.highlighter("def f\n(x)");

    let joined = doc.update(&TextEdit::delete(5..6)).unwrap();
    assert_eq!(joined.removed_lines, 2);
    assert_eq!(joined.inserted_lines, 1);
    assert_eq!(doc.line_count(), 1);
    assert_matches_fresh(&mode, &doc);

    doc.update(&TextEdit::insert(3, "\r\n")).unwrap();
    assert_eq!(doc.line_count(), 2);
    assert_eq!(doc.version(), 2);
    assert_matches_fresh(&mode, &doc);
}

#[test]
fn test_rejected_edit_leaves_document_alone() {
    let mode = Mode::celltail().unwrap();
    let mut doc = mode.highlighter("x");
    let err = doc.update(&TextEdit::delete(0..4)).unwrap_err();
    assert_eq!(
        err,
        EditError::OutOfBounds {
            start: 0,
            end: 4,
            len: 1
        }
    );
    assert_eq!(doc.text(), "x");
    assert_eq!(doc.version(), 0);
}

fn edit_strategy() -> impl Strategy<Value = (usize, usize, String)> {
    (
        0usize..64,
        0usize..8,
        "[a-z\"#'() \n]{0,6}",
    )
}

proptest! {
    #[test]
    fn incremental_matches_fresh_highlight(
        initial in "[a-zA-Z0-9\"#'(), \n]{0,48}",
        edits in prop::collection::vec(edit_strategy(), 1..6),
    ) {
        let mode = Mode::celltail().unwrap();
        let mut doc = mode.highlighter(initial);

        for (start, len, text) in edits {
            let doc_len = doc.text().len();
            let start = start.min(doc_len);
            let end = (start + len).min(doc_len);
            doc.update(&TextEdit::replace(start..end, text)).unwrap();

            let fresh = mode.highlighter(doc.text());
            prop_assert_eq!(fresh.line_count(), doc.line_count());
            for line in 0..doc.line_count() {
                prop_assert_eq!(fresh.line_tokens(line), doc.line_tokens(line));
            }
        }
    }
}
