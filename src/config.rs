//! Editor configuration persistence
//!
//! Stores preferences in `<config>/config.yaml` (see [`crate::config_paths`]).
//! Missing fields take their defaults; out-of-range values are clamped on load.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::palette::PaletteId;
use crate::syntax::LanguageId;
use crate::text::{DEFAULT_TAB_SIZE, MAX_TAB_SIZE, MIN_TAB_SIZE};

pub const MIN_LINE_SPACING: f32 = 1.0;
pub const MAX_LINE_SPACING: f32 = 2.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid config value: {0}")]
    Invalid(String),
}

/// Editor configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    #[serde(default = "default_tab_size")]
    pub tab_size: usize,
    /// Multiplier on the glyph height
    #[serde(default = "default_line_spacing")]
    pub line_spacing: f32,
    /// Copy leading blanks onto a new line
    #[serde(default = "default_true")]
    pub auto_indent: bool,
    #[serde(default = "default_true")]
    pub show_whitespaces: bool,
    #[serde(default = "default_true")]
    pub show_line_numbers: bool,
    /// Draw tabs as a short arrow instead of spanning the whole stop
    #[serde(default = "default_true")]
    pub short_tabs: bool,
    #[serde(default)]
    pub word_wrap: bool,
    /// Wrap width used until the view reports its size
    #[serde(default = "default_wrap_column")]
    pub wrap_column: usize,
    #[serde(default)]
    pub palette: PaletteId,
    #[serde(default)]
    pub language: LanguageId,
    /// Maximum undo records kept; 0 keeps everything
    #[serde(default)]
    pub undo_limit: usize,
    #[serde(default)]
    pub read_only: bool,
}

fn default_tab_size() -> usize {
    DEFAULT_TAB_SIZE
}

fn default_line_spacing() -> f32 {
    MIN_LINE_SPACING
}

fn default_true() -> bool {
    true
}

fn default_wrap_column() -> usize {
    80
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_size: default_tab_size(),
            line_spacing: default_line_spacing(),
            auto_indent: true,
            show_whitespaces: true,
            show_line_numbers: true,
            short_tabs: true,
            word_wrap: false,
            wrap_column: default_wrap_column(),
            palette: PaletteId::default(),
            language: LanguageId::default(),
            undo_limit: 0,
            read_only: false,
        }
    }
}

impl EditorConfig {
    /// Load config from disk, or return defaults if missing or broken
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("Ignoring config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Read and validate a config file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validated()
    }

    /// Clamp ranged values; reject values that cannot be repaired
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        if !self.line_spacing.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "line_spacing must be a number, got {}",
                self.line_spacing
            )));
        }
        if self.wrap_column == 0 {
            return Err(ConfigError::Invalid("wrap_column must be at least 1".into()));
        }

        let tab_size = self.tab_size.clamp(MIN_TAB_SIZE, MAX_TAB_SIZE);
        if tab_size != self.tab_size {
            tracing::warn!("tab_size {} clamped to {}", self.tab_size, tab_size);
            self.tab_size = tab_size;
        }
        self.line_spacing = self.line_spacing.clamp(MIN_LINE_SPACING, MAX_LINE_SPACING);
        Ok(self)
    }

    /// Save config to the default location, creating the directory
    pub fn save(&self) -> Result<()> {
        let path = crate::config_paths::config_file().context("no config directory available")?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating config directory {}", parent.display()))?;
        }

        let content = serde_yaml::to_string(self).context("serializing config")?;
        std::fs::write(path, content)
            .with_context(|| format!("writing config to {}", path.display()))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_take_defaults() {
        let config = EditorConfig::from_yaml("tab_size: 2\n").unwrap();
        assert_eq!(config.tab_size, 2);
        assert!(config.auto_indent);
        assert_eq!(config.wrap_column, 80);
        assert_eq!(config.palette, PaletteId::Dark);
        assert_eq!(config.language, LanguageId::None);
    }

    #[test]
    fn test_values_are_clamped() {
        let config = EditorConfig::from_yaml("tab_size: 20\nline_spacing: 5.0\n").unwrap();
        assert_eq!(config.tab_size, MAX_TAB_SIZE);
        assert_eq!(config.line_spacing, MAX_LINE_SPACING);

        let config = EditorConfig::from_yaml("tab_size: 0\n").unwrap();
        assert_eq!(config.tab_size, MIN_TAB_SIZE);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(matches!(
            EditorConfig::from_yaml("wrap_column: 0\n"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            EditorConfig::from_yaml("tab_size: [1, 2]\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_named_enums_parse() {
        let config =
            EditorConfig::from_yaml("palette: retro_blue\nlanguage: python\nword_wrap: true\n")
                .unwrap();
        assert_eq!(config.palette, PaletteId::RetroBlue);
        assert_eq!(config.language, LanguageId::Python);
        assert!(config.word_wrap);
    }
}
