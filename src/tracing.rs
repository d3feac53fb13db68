//! Logging setup and cursor diagnostics
//!
//! Configure console output with `RUST_LOG`:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=caret::projection=debug` - projection rebuilds only
//! - `RUST_LOG=caret::update=trace` - every dispatched command
//!
//! The file log always records at debug level, rotated daily under
//! `<config>/logs/caret.log.YYYY-MM-DD`.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::editor::TextEditor;
use crate::text::Coordinates;

/// Install console and file logging. Keep the returned guard alive for the
/// lifetime of the process so buffered file output gets flushed.
pub fn init() -> Option<WorkerGuard> {
    let console_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let (file_layer, guard) = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let appender = tracing_appender::rolling::daily(logs_dir, "caret.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true)
                .with_filter(EnvFilter::new("debug"));
            (Some(layer), Some(guard))
        }
        Err(e) => {
            eprintln!("Warning: could not initialize file logging: {e:#}");
            (None, None)
        }
    };

    let result = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init();
    if let Err(e) = result {
        eprintln!("Warning: tracing already initialized: {e}");
    }
    guard
}

/// Cursor set captured around a command, for change logging
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorSnapshot {
    /// (anchor, caret) of every cursor in order
    cursors: Vec<(Coordinates, Coordinates)>,
}

impl CursorSnapshot {
    pub fn from_editor(editor: &TextEditor) -> Self {
        Self {
            cursors: editor
                .state()
                .cursors()
                .iter()
                .map(|c| (c.interactive_start, c.interactive_end))
                .collect(),
        }
    }

    /// Describe how the cursors moved between `self` and `after`
    pub fn diff(&self, after: &CursorSnapshot) -> Option<String> {
        if self.cursors.len() != after.cursors.len() {
            return Some(format!(
                "cursor count {} -> {}",
                self.cursors.len(),
                after.cursors.len()
            ));
        }

        let moved: Vec<String> = self
            .cursors
            .iter()
            .zip(&after.cursors)
            .enumerate()
            .filter(|(_, (before, now))| before != now)
            .map(|(i, (_, &(anchor, caret)))| {
                if anchor == caret {
                    format!("#{i} at {caret}")
                } else {
                    format!("#{i} selects {anchor}..{caret}")
                }
            })
            .collect();
        (!moved.is_empty()).then(|| moved.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_diff() {
        let mut editor = TextEditor::new();
        editor.set_text("abc\ndef");
        let before = CursorSnapshot::from_editor(&editor);
        assert_eq!(before.diff(&before), None);

        editor.move_right(true, false);
        let after = CursorSnapshot::from_editor(&editor);
        assert_eq!(
            before.diff(&after).as_deref(),
            Some("#0 selects 0:0..0:1")
        );

        editor.move_down(1, false);
        let moved = CursorSnapshot::from_editor(&editor);
        assert_eq!(after.diff(&moved).as_deref(), Some("#0 at 1:1"));

        editor.add_cursors_above();
        let multi = CursorSnapshot::from_editor(&editor);
        assert_eq!(moved.diff(&multi).as_deref(), Some("cursor count 1 -> 2"));
    }
}
