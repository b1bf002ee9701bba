use celltail_mode::{Mode, TextEdit};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

const PROGRAM: &str = "\
# game of life, one generation per step
fn neighbours(x, y): (x - 1)..(x + 1)
I = INPUT
D = DEBUG
def step(cell, n):
    O = 'x' | n & 3
    msg = \"cell is alive\"  # trailing note
";

fn source(copies: usize) -> String {
    PROGRAM.repeat(copies)
}

fn bench_tokenize_line(c: &mut Criterion) {
    let mode = Mode::celltail().unwrap();
    let tokenizer = mode.tokenizer();
    let line = "def step(cell, n): O = neighbours(cell, 12) + 'x' # done";

    c.bench_function("tokenize_line", |b| {
        b.iter(|| black_box(tokenizer.tokenize_line(black_box(line), mode.rules.start())));
    });
}

fn bench_tokenize_document(c: &mut Criterion) {
    let mode = Mode::celltail().unwrap();
    let text = source(200);

    c.bench_function("tokenize_document_1400_lines", |b| {
        b.iter(|| black_box(mode.tokenize_text(black_box(&text))));
    });
}

fn bench_long_string_line(c: &mut Criterion) {
    let mode = Mode::celltail().unwrap();
    let tokenizer = mode.tokenizer();
    let line = format!("\"{}\"", "a".repeat(1500));

    c.bench_function("tokenize_long_string", |b| {
        b.iter(|| black_box(tokenizer.tokenize_line(black_box(&line), mode.rules.start())));
    });
}

fn bench_unmatched_line(c: &mut Criterion) {
    let mut mode = Mode::celltail().unwrap();
    mode.tokenizer_config.max_tokens_per_line = None;
    let line = "@".repeat(20_000);

    c.bench_function("tokenize_unmatched_line", |b| {
        b.iter(|| black_box(mode.tokenizer().tokenize_line(black_box(&line), mode.rules.start())));
    });
}

fn bench_incremental_edit(c: &mut Criterion) {
    let mode = Mode::celltail().unwrap();
    let text = source(200);
    let doc = mode.highlighter(text.as_str());
    let middle = text.len() / 2;
    let offset = (0..=middle)
        .rev()
        .find(|&i| text.is_char_boundary(i))
        .unwrap_or(0);

    c.bench_function("incremental_single_char_edit", |b| {
        b.iter(|| {
            let mut doc = doc.clone();
            black_box(doc.update(black_box(&TextEdit::insert(offset, "x"))).unwrap());
        });
    });

    c.bench_function("incremental_open_string", |b| {
        b.iter(|| {
            let mut doc = doc.clone();
            black_box(doc.update(black_box(&TextEdit::insert(offset, "\""))).unwrap());
        });
    });
}

criterion_group!(
    benches,
    bench_tokenize_line,
    bench_tokenize_document,
    bench_long_string_line,
    bench_unmatched_line,
    bench_incremental_edit
);
criterion_main!(benches);
