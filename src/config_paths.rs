//! Configuration locations
//!
//! Everything lives under one directory:
//! - Unix/macOS: `$XDG_CONFIG_HOME/caret` or `~/.config/caret`
//! - Windows: `%APPDATA%\caret`

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

const APP_DIR: &str = "caret";

/// Base config directory
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join(APP_DIR))
    }

    #[cfg(not(target_os = "windows"))]
    {
        env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .map(|config| config.join(APP_DIR))
    }
}

/// `<config>/config.yaml`
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.yaml"))
}

/// `<config>/keymap.yaml`
pub fn keymap_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("keymap.yaml"))
}

/// `<config>/palettes/`, one YAML file per custom palette
pub fn palettes_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("palettes"))
}

/// `<config>/logs/`
pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).with_context(|| format!("creating directory {}", path.display()))
}

/// Ensure the base config dir exists, returning it
pub fn ensure_config_dir() -> Result<PathBuf> {
    let dir = config_dir().context("no config directory available")?;
    ensure_dir(&dir)?;
    Ok(dir)
}

/// Ensure the logs dir exists, returning it
pub fn ensure_logs_dir() -> Result<PathBuf> {
    let logs = ensure_config_dir()?.join("logs");
    ensure_dir(&logs)?;
    Ok(logs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_share_the_config_dir() {
        let Some(base) = config_dir() else {
            return;
        };
        assert!(base.ends_with(APP_DIR));
        assert_eq!(config_file(), Some(base.join("config.yaml")));
        assert_eq!(logs_dir(), Some(base.join("logs")));
        assert_eq!(palettes_dir(), Some(base.join("palettes")));
    }
}
