use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const SETTINGS_FILE: &str = "formgen.settings.json";

/// User-tunable application settings, read from `formgen.settings.json` in
/// the working directory.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub window_title: String,
    /// Suggested name in the export dialog.
    pub export_file_name: String,
    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Longest edge of file-field image previews, in points.
    pub preview_max_px: f32,
    /// Show submitted values in a window after a successful submit.
    pub show_submitted_values: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_title: "Dynamic Form Generator".to_string(),
            export_file_name: crate::config_io::DEFAULT_FILE_NAME.to_string(),
            log_filter: "info".to_string(),
            preview_max_px: 96.0,
            show_submitted_values: true,
        }
    }
}

impl Settings {
    pub fn default_path() -> PathBuf {
        PathBuf::from(SETTINGS_FILE)
    }

    /// Missing file gives defaults; a present but broken file is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Like [`Settings::load`] but falls back to defaults on error.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|err| {
            tracing::warn!("{err:#}; using default settings");
            Self::default()
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize settings")?;
        fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_gives_defaults() {
        let td = tempdir().expect("tempdir");
        let s = Settings::load(&td.path().join(SETTINGS_FILE)).unwrap();
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let td = tempdir().expect("tempdir");
        let path = td.path().join(SETTINGS_FILE);
        fs::write(&path, r#"{"export_file_name":"signup.json"}"#).unwrap();
        let s = Settings::load(&path).unwrap();
        assert_eq!(s.export_file_name, "signup.json");
        assert_eq!(s.log_filter, "info");
    }

    #[test]
    fn broken_file_falls_back() {
        let td = tempdir().expect("tempdir");
        let path = td.path().join(SETTINGS_FILE);
        fs::write(&path, "{ nope").unwrap();
        assert!(Settings::load(&path).is_err());
        assert_eq!(Settings::load_or_default(&path), Settings::default());
    }

    #[test]
    fn save_then_load() {
        let td = tempdir().expect("tempdir");
        let path = td.path().join(SETTINGS_FILE);
        let s = Settings {
            preview_max_px: 128.0,
            ..Settings::default()
        };
        s.save(&path).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), s);
    }
}
