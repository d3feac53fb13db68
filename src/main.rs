use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;

use caret::config::EditorConfig;
use caret::TextEditor;

mod cli;

use cli::CliArgs;

fn main() -> Result<()> {
    let _log_guard = caret::tracing::init();
    let args = CliArgs::parse();

    let mut config = EditorConfig::load();
    args.apply_to(&mut config)?;
    // a viewer never edits the file
    config.read_only = true;
    // first and only set in this process
    let _ = caret::settings::init_default_palette(config.palette);

    let text = std::fs::read_to_string(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;

    let mut editor = TextEditor::with_config(&config);
    if let Some(palette) = args.custom_palette()? {
        editor.set_custom_palette(config.palette, palette);
    }
    editor.set_text(&text);
    editor.colorize_all();
    tracing::info!(
        "loaded {} ({} lines, language {})",
        args.file.display(),
        editor.line_count(),
        editor.language_name()
    );

    let output = cli::dump(&editor, args.dump)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{output}").context("writing output")?;
    Ok(())
}
