//! caret - a multi-cursor text editing engine
//!
//! The engine keeps a document as lines of colored glyphs and edits it
//! through any number of cursors with full undo. On top of that it projects
//! the document into painted rows (word wrap, folded ranges, ghost lines)
//! and colorizes it incrementally for a set of built-in languages.
//!
//! Rendering and platform input stay with the host: it reports its layout
//! through [`editor::ViewMetrics`], feeds [`keymap::Command`]s to
//! [`update::update`], and paints from the projection and glyph colors.

pub mod annotations;
pub mod clipboard;
pub mod config;
pub mod config_paths;
pub mod editor;
pub mod keymap;
pub mod palette;
pub mod projection;
pub mod settings;
pub mod syntax;
pub mod text;
pub mod tracing;
pub mod update;
pub mod util;

// Re-export commonly used types
pub use clipboard::{Clipboard, MemoryClipboard};
pub use config::EditorConfig;
pub use editor::TextEditor;
pub use keymap::Command;
pub use text::Coordinates;
