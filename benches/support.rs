//! Shared helpers for benchmarks

use caret::syntax::LanguageId;
use caret::TextEditor;

/// Plain prose with a tab and some long lines so wrapping has work to do
#[allow(dead_code)]
pub fn prose(lines: usize) -> String {
    (0..lines)
        .map(|i| {
            if i % 7 == 0 {
                "\tThe quick brown fox jumps over the lazy dog, again and again and again.".repeat(3)
            } else {
                "The quick brown fox jumps over the lazy dog.".to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// C++ source mixing comments, strings, preprocessor lines and code
#[allow(dead_code)]
pub fn cpp_source(functions: usize) -> String {
    let mut out = String::from("#include <vector>\n/* generated\n   benchmark input */\n");
    for i in 0..functions {
        out.push_str(&format!(
            "// function {i}\nint function_{i}(int x) {{\n    const char* s = \"value {i}\";\n    return x * {i} + 0x{i:x};\n}}\n"
        ));
    }
    out
}

/// Editor holding `text`, optionally with a language
#[allow(dead_code)]
pub fn editor_with(text: &str, language: LanguageId) -> TextEditor {
    let mut editor = TextEditor::new();
    editor.set_language(language);
    editor.set_text(text);
    editor
}
