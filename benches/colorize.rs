//! Benchmarks for incremental colorization
//!
//! Run with: cargo bench --bench colorize

mod support;

use caret::syntax::LanguageId;

use support::{cpp_source, editor_with};

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

#[divan::bench(args = [LanguageId::Cpp, LanguageId::Python, LanguageId::Lua, LanguageId::Sql])]
fn colorize_all(bencher: divan::Bencher, language: LanguageId) {
    let text = cpp_source(500);
    bencher
        .with_inputs(|| editor_with(&text, language))
        .bench_local_values(|mut editor| {
            editor.colorize_all();
            editor
        });
}

/// One slice of work as a host would run it per frame
#[divan::bench(args = [LanguageId::Cpp, LanguageId::Python])]
fn single_tick(bencher: divan::Bencher, language: LanguageId) {
    let text = cpp_source(2_000);
    bencher
        .with_inputs(|| editor_with(&text, language))
        .bench_local_refs(|editor| editor.tick());
}

/// Typing a character then recoloring the dirty tail
#[divan::bench(args = [100, 1_000])]
fn edit_then_recolor(bencher: divan::Bencher, functions: usize) {
    let mut editor = editor_with(&cpp_source(functions), LanguageId::Cpp);
    editor.colorize_all();
    let middle = editor.line_count() / 2;
    bencher.bench_local(|| {
        editor.set_cursor_position(middle, 0, None);
        editor.enter_character('x', false);
        editor.colorize_all();
        editor.undo(1);
        editor.colorize_all();
    });
}

#[divan::bench]
fn comment_heavy_document(bencher: divan::Bencher) {
    let text = "/* a\n b */ int x; // tail\n".repeat(2_000);
    bencher
        .with_inputs(|| editor_with(&text, LanguageId::Cpp))
        .bench_local_values(|mut editor| {
            editor.colorize_all();
            divan::black_box(editor.buffer().line(0).len());
            editor
        });
}
