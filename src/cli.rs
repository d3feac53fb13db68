//! Command-line interface of the `caret` binary
//!
//! Loads one file into an editor, colorizes it completely, and dumps the
//! visual projection, the color runs or the text as JSON.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;

use caret::config::EditorConfig;
use caret::palette::{Palette, PaletteId, PaletteIndex};
use caret::projection::VisualLine;
use caret::syntax::LanguageId;
use caret::text::Coordinates;
use caret::TextEditor;

/// Inspect how the caret engine sees a file
#[derive(Parser, Debug)]
#[command(name = "caret", version, about = "Inspect how the caret engine sees a file")]
pub struct CliArgs {
    /// File to load
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Language name (cpp, c, cs, python, lua, json, sql, angelscript, glsl, hlsl);
    /// detected from the extension when omitted
    #[arg(short, long, value_name = "NAME")]
    pub language: Option<String>,

    /// Tab width, 1 to 8
    #[arg(long, value_name = "N")]
    pub tab_size: Option<usize>,

    /// Wrap lines at N columns
    #[arg(long, value_name = "N")]
    pub wrap: Option<usize>,

    /// Palette for color dumps: dark, light, mariana, retro-blue, or the
    /// name of a file in the palettes config directory
    #[arg(long, value_name = "NAME")]
    pub palette: Option<String>,

    /// What to print
    #[arg(long, value_enum, default_value_t = DumpMode::Visual)]
    pub dump: DumpMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DumpMode {
    /// Painted rows after wrapping
    Visual,
    /// Per-line color runs
    Colors,
    /// Document text
    Text,
}

impl CliArgs {
    /// Apply command-line overrides on top of the loaded configuration
    pub fn apply_to(&self, config: &mut EditorConfig) -> Result<()> {
        config.language = match &self.language {
            Some(name) => LanguageId::from_name(name).with_context(|| format!("unknown language: {name}"))?,
            None => LanguageId::from_path(&self.file),
        };
        if let Some(id) = self.palette.as_deref().and_then(PaletteId::from_name) {
            config.palette = id;
        } else if let Some(name) = &self.palette {
            if custom_palette_path(name).is_none() {
                bail!("unknown palette: {name}");
            }
        }
        if let Some(tab_size) = self.tab_size {
            if !(1..=8).contains(&tab_size) {
                bail!("tab size must be between 1 and 8, got {tab_size}");
            }
            config.tab_size = tab_size;
        }
        if let Some(wrap) = self.wrap {
            config.word_wrap = true;
            config.wrap_column = wrap.max(1);
        }
        Ok(())
    }

    /// A palette named on the command line that is not built in
    pub fn custom_palette(&self) -> Result<Option<Palette>> {
        let Some(name) = &self.palette else {
            return Ok(None);
        };
        if PaletteId::from_name(name).is_some() {
            return Ok(None);
        }
        let path = custom_palette_path(name).with_context(|| format!("unknown palette: {name}"))?;
        Palette::from_file(&path).map(Some)
    }
}

fn custom_palette_path(name: &str) -> Option<PathBuf> {
    let path = caret::config_paths::palettes_dir()?.join(format!("{name}.yaml"));
    path.is_file().then_some(path)
}

#[derive(Debug, Serialize)]
struct VisualRow {
    row: usize,
    #[serde(flatten)]
    line: VisualLine,
    text: String,
}

#[derive(Debug, Serialize)]
struct ColorLine {
    line: usize,
    runs: Vec<ColorRun>,
}

#[derive(Debug, Serialize)]
struct ColorRun {
    column: usize,
    text: String,
    index: PaletteIndex,
    color: String,
}

/// Render the requested dump for a fully colorized editor
pub fn dump(editor: &TextEditor, mode: DumpMode) -> Result<String> {
    let json = match mode {
        DumpMode::Text => return Ok(editor.text()),
        DumpMode::Visual => serde_json::to_string_pretty(&visual_rows(editor))?,
        DumpMode::Colors => serde_json::to_string_pretty(&color_lines(editor))?,
    };
    Ok(json)
}

fn visual_rows(editor: &TextEditor) -> Vec<VisualRow> {
    editor
        .visual_lines()
        .into_iter()
        .enumerate()
        .map(|(row, line)| {
            let text = match line {
                VisualLine::Document {
                    line,
                    start_column,
                    end_column,
                } => editor.text_range(
                    Coordinates::new(line, start_column),
                    Coordinates::new(line, end_column),
                ),
                VisualLine::Ghost { index } => editor
                    .ghost_lines()
                    .get(index)
                    .map(|g| g.text.clone())
                    .unwrap_or_default(),
            };
            VisualRow { row, line, text }
        })
        .collect()
}

fn color_lines(editor: &TextEditor) -> Vec<ColorLine> {
    let buffer = editor.buffer();
    (0..buffer.line_count())
        .map(|line| {
            let glyphs = buffer.line(line);
            let mut runs: Vec<ColorRun> = Vec::new();
            let (mut i, mut column) = (0, 0);
            while i < glyphs.len() {
                let (next_i, next_column) = buffer.advance(line, i, column);
                let index = glyphs[i].color;
                let color = format!("#{:08x}", editor.glyph_color(&glyphs[i]).to_rgba_u32());
                let bytes: Vec<u8> = glyphs[i..next_i].iter().map(|g| g.byte).collect();
                let piece = String::from_utf8_lossy(&bytes);

                // runs follow the painted color; `index` is the first glyph's
                match runs.last_mut() {
                    Some(run) if run.color == color => run.text.push_str(&piece),
                    _ => runs.push(ColorRun {
                        column,
                        text: piece.into_owned(),
                        index,
                        color,
                    }),
                }
                i = next_i;
                column = next_column;
            }
            ColorLine { line, runs }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(std::iter::once("caret").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_language_detected_from_extension() {
        let args = parse(&["main.cpp"]);
        let mut config = EditorConfig::default();
        args.apply_to(&mut config).unwrap();
        assert_eq!(config.language, LanguageId::Cpp);
        assert_eq!(args.dump, DumpMode::Visual);
    }

    #[test]
    fn test_overrides() {
        let args = parse(&[
            "notes.txt",
            "--language",
            "lua",
            "--tab-size",
            "2",
            "--wrap",
            "20",
            "--palette",
            "retro-blue",
            "--dump",
            "colors",
        ]);
        let mut config = EditorConfig::default();
        args.apply_to(&mut config).unwrap();
        assert_eq!(config.language, LanguageId::Lua);
        assert_eq!(config.tab_size, 2);
        assert!(config.word_wrap);
        assert_eq!(config.wrap_column, 20);
        assert_eq!(config.palette, PaletteId::RetroBlue);
        assert_eq!(args.dump, DumpMode::Colors);
    }

    #[test]
    fn test_invalid_overrides_are_errors() {
        let mut config = EditorConfig::default();
        assert!(parse(&["a", "--language", "cobol"]).apply_to(&mut config).is_err());
        assert!(parse(&["a", "--tab-size", "9"]).apply_to(&mut config).is_err());
        assert!(parse(&["a", "--palette", "neon"]).apply_to(&mut config).is_err());
    }

    #[test]
    fn test_visual_dump_includes_wrapped_text() {
        let mut config = EditorConfig::default();
        parse(&["a.txt", "--wrap", "4"]).apply_to(&mut config).unwrap();
        let mut editor = TextEditor::with_config(&config);
        editor.set_text("abcdefgh\nx");
        let rows = visual_rows(&editor);
        let texts: Vec<&str> = rows.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, ["abcd", "efgh", "x"]);

        let json = dump(&editor, DumpMode::Visual).unwrap();
        assert!(json.contains("\"kind\": \"document\""));
    }

    #[test]
    fn test_color_dump_groups_runs() {
        let mut config = EditorConfig::default();
        config.language = LanguageId::Cpp;
        let mut editor = TextEditor::with_config(&config);
        editor.set_text("int x; // hi");
        editor.colorize_all();

        let lines = color_lines(&editor);
        let runs = &lines[0].runs;
        assert_eq!(runs[0].text, "int");
        assert_eq!(runs[0].index, PaletteIndex::Keyword);
        let comment = runs.last().unwrap();
        assert_eq!(comment.text, "// hi");
        assert_eq!(comment.column, 7);
    }
}
