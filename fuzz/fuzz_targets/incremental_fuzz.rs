#![no_main]
use celltail_mode::{Mode, TextEdit};
use libfuzzer_sys::fuzz_target;
use std::sync::OnceLock;

static MODE: OnceLock<Option<Mode>> = OnceLock::new();

fuzz_target!(|data: &[u8]| {
    let Some(mode) = MODE.get_or_init(|| Mode::celltail().ok()).as_ref() else {
        return;
    };
    if data.len() < 2 {
        return;
    }
    let (header, rest) = data.split_at(2);
    let Ok(text) = std::str::from_utf8(rest) else {
        return;
    };

    // First half of the input is the document, second half the replacement.
    let split = (0..=text.len() / 2)
        .rev()
        .find(|&i| text.is_char_boundary(i))
        .unwrap_or(0);
    let (initial, inserted) = text.split_at(split);
    let mut doc = mode.highlighter(initial);

    let clamp = |b: u8| {
        let mut offset = usize::from(b).min(initial.len());
        while !initial.is_char_boundary(offset) {
            offset -= 1;
        }
        offset
    };
    let (a, b) = (clamp(header[0]), clamp(header[1]));
    let edit = TextEdit::replace(a.min(b)..a.max(b), inserted);
    let Ok(delta) = doc.update(&edit) else {
        return;
    };
    assert_eq!(delta.version, 1);

    let fresh = mode.highlighter(doc.text());
    assert_eq!(fresh.line_count(), doc.line_count());
    for line in 0..doc.line_count() {
        assert_eq!(fresh.line_tokens(line), doc.line_tokens(line));
    }
});
