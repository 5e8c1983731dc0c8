//! Configuration management

use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::lesson::loader::LessonSource;
use crate::theme::Theme;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Selected theme name
    pub theme: String,

    /// Custom theme overrides (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_theme: Option<Theme>,

    /// Where lesson JSON files are loaded from
    #[serde(default)]
    pub lesson_source: LessonSource,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "Dusk".to_string(),
            custom_theme: None,
            lesson_source: LessonSource::default(),
        }
    }
}

impl Config {
    /// Load configuration from disk, or create default if not exists
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config from {config_path:?}"))?;
            serde_json::from_str(&contents).with_context(|| "Failed to parse config.json")
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {parent:?}"))?;
        }

        let contents =
            serde_json::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        std::fs::write(&config_path, contents)
            .with_context(|| format!("Failed to write config to {config_path:?}"))?;

        Ok(())
    }

    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let proj_dirs =
            ProjectDirs::from("", "", "shiksha").context("Failed to determine config directory")?;
        Ok(proj_dirs.config_dir().join("config.json"))
    }

    /// Get the data directory path
    pub fn data_dir() -> Result<PathBuf> {
        let proj_dirs =
            ProjectDirs::from("", "", "shiksha").context("Failed to determine data directory")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    /// Get the directory holding persisted learner state
    pub fn storage_dir() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("state"))
    }

    /// Get the active theme
    pub fn active_theme(&self) -> Theme {
        self.custom_theme.clone().unwrap_or_else(Theme::dusk)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_dusk_theme() {
        let config = Config::default();
        assert_eq!(config.theme, "Dusk");
    }

    #[test]
    fn default_config_reads_local_data_dir() {
        let config = Config::default();
        assert_eq!(config.lesson_source, LessonSource::Dir(PathBuf::from("data")));
    }

    #[test]
    fn config_serializes_to_json() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("Dusk"));
        assert!(json.contains("lesson_source"));
    }

    #[test]
    fn config_deserializes_from_json() {
        let json = r#"{"theme":"Custom","lesson_source":{"http":"https://lessons.example.org/data"}}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.theme, "Custom");
        assert_eq!(
            config.lesson_source,
            LessonSource::Http("https://lessons.example.org/data".to_string())
        );
    }

    #[test]
    fn missing_lesson_source_falls_back_to_default() {
        let json = r#"{"theme":"Dusk"}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.lesson_source, LessonSource::default());
    }
}
