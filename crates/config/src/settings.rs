// Application settings
// Loaded from ~/.config/rewardboard/settings.json

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use rewardboard_core::LAYOUT_KEY;

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Storage
    #[serde(rename = "storage.key")]
    pub storage_key: String,

    #[serde(rename = "storage.dataDir", skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,  // None = platform data dir

    // Board
    #[serde(rename = "board.file", skip_serializing_if = "Option::is_none")]
    pub board_file: Option<PathBuf>,  // None = built-in sample board

    // History
    #[serde(rename = "history.confirmClear")]
    pub confirm_clear: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_key: LAYOUT_KEY.to_string(),
            data_dir: None,
            board_file: None,
            confirm_clear: true,
        }
    }
}

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        crate::config_dir().join("settings.json")
    }

    /// Load settings from the default location, writing a commented default
    /// file on first run
    pub fn load() -> Self {
        let path = Self::config_path();

        if !path.exists() {
            let settings = Self::default();
            settings.create_default_file(&path);
            return settings;
        }

        Self::load_from(&path)
    }

    /// Load settings from `path`, falling back to defaults when the file is
    /// missing or unreadable
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match Self::read(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{} ({}), using default settings", e, path.display());
                Self::default()
            }
        }
    }

    /// Strict variant of [`Settings::load_from`]
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        // Strip comments (lines starting with //)
        let cleaned: String = contents
            .lines()
            .filter(|line| !line.trim().starts_with("//"))
            .collect::<Vec<_>>()
            .join("\n");

        serde_json::from_str(&cleaned).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Save settings to `path`
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::Parse(e.to_string()))?;

        fs::write(path, json)?;
        Ok(())
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path())
    }

    /// Create default settings file with comments
    fn create_default_file(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                log::warn!("Error creating config directory: {}", e);
                return;
            }
        }

        let default_config = r#"{
    // Key the saved layout is stored under
    "storage.key": "rewardsLayout",

    // Directory for saved layouts (omit for the platform data directory)
    // "storage.dataDir": "/path/to/dir",

    // Board definition TOML (omit for the built-in sample board)
    // "board.file": "/path/to/board.toml",

    // Ask before clearing the saved layout in the shell
    "history.confirmClear": true
}
"#;

        if let Err(e) = fs::write(path, default_config) {
            log::warn!("Error writing default settings.json: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_file_parses_to_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.json");
        Settings::default().create_default_file(&path);

        let settings = Settings::read(&path).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let settings = Settings::parse(
            r#"{
    // custom data dir only
    "storage.dataDir": "/tmp/boards"
}"#,
        )
        .unwrap();
        assert_eq!(settings.data_dir, Some(PathBuf::from("/tmp/boards")));
        assert_eq!(settings.storage_key, "rewardsLayout");
        assert!(settings.confirm_clear);
    }

    #[test]
    fn test_bad_file_falls_back() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(Settings::read(&path), Err(ConfigError::Parse(_))));
        assert_eq!(Settings::load_from(&path), Settings::default());
        assert_eq!(Settings::load_from(&tmp.path().join("missing.json")), Settings::default());
    }

    #[test]
    fn test_save_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("sub/settings.json");
        let settings = Settings {
            storage_key: "team".to_string(),
            board_file: Some(PathBuf::from("board.toml")),
            confirm_clear: false,
            ..Settings::default()
        };
        settings.save_to(&path).unwrap();
        assert_eq!(Settings::read(&path).unwrap(), settings);
    }
}
