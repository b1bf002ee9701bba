#![no_main]
use celltail_mode::Mode;
use libfuzzer_sys::fuzz_target;
use std::sync::OnceLock;

static MODE: OnceLock<Option<Mode>> = OnceLock::new();

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Some(mode) = MODE.get_or_init(|| Mode::celltail().ok()).as_ref() else {
        return;
    };

    // Every line, from every state, is covered exactly by its tokens.
    let tokenizer = mode.tokenizer();
    for line in text.lines() {
        for (state, _) in mode.rules.states() {
            let result = tokenizer.tokenize_line(line, state);
            assert_eq!(result.text(), line);
        }
    }
});
