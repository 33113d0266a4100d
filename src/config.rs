use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::System;
use crate::pipeline::SortKey;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl ConfigError {
    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            ConfigError::FileNotFound(path) => {
                format!("No config file at {}", path.display())
            }
            ConfigError::IoError(e) => format!("File system error: {}", e),
            ConfigError::ParseError(e) => format!("Config is not valid JSON: {}", e),
            ConfigError::ValidationError(msg) => format!("Invalid config: {}", msg),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
    Compact,
}

impl ViewMode {
    pub fn next(self) -> Self {
        match self {
            Self::Grid => Self::List,
            Self::List => Self::Compact,
            Self::Compact => Self::Grid,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Grid => "Grid",
            Self::List => "List",
            Self::Compact => "Compact",
        }
    }
}

/// Startup preferences. Read once; the portal never writes it back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct PortalConfig {
    pub theme: Theme,
    pub view_mode: ViewMode,
    pub sort: SortKey,
    pub favorites: Vec<u32>,
    pub notification_secs: u64,
    pub log_level: String,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            view_mode: ViewMode::Grid,
            sort: SortKey::Name,
            favorites: vec![1, 2],
            notification_secs: 4,
            log_level: "info".to_string(),
        }
    }
}

impl PortalConfig {
    /// Load from an explicit path, which must exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path)?;
        let config: PortalConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the platform config dir, falling back to defaults when no
    /// file has been created there.
    pub fn load_default() -> Result<Self, ConfigError> {
        match default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.notification_secs == 0 {
            return Err(ConfigError::ValidationError(
                "notification_secs must be greater than 0".to_string(),
            ));
        }
        if self.log_level.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "log_level must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_secs(self.notification_secs)
    }

    /// Favorite ids that exist in the catalog; the rest are logged and dropped.
    pub fn known_favorites(&self, systems: &[System]) -> Vec<u32> {
        self.favorites
            .iter()
            .copied()
            .filter(|id| {
                let known = systems.iter().any(|s| s.id == *id);
                if !known {
                    tracing::warn!(id, "ignoring unknown favorite id from config");
                }
                known
            })
            .collect()
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "gateway", "employee-portal")
}

pub fn default_path() -> Option<PathBuf> {
    project_dirs().map(|d| d.config_dir().join("config.json"))
}

pub fn default_log_path() -> Option<PathBuf> {
    project_dirs().map(|d| d.data_local_dir().join("portal.log"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_portal_config_default() {
        let config = PortalConfig::default();
        assert_eq!(config.theme, Theme::Light);
        assert_eq!(config.view_mode, ViewMode::Grid);
        assert_eq!(config.favorites, vec![1, 2]);
        assert_eq!(config.notification_ttl(), Duration::from_secs(4));
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let file = write_config(r#"{ "theme": "dark", "sort": "lastAccessed" }"#);
        let config = PortalConfig::load(file.path()).unwrap();
        assert_eq!(config.theme, Theme::Dark);
        assert_eq!(config.sort, SortKey::LastAccessed);
        assert_eq!(config.notification_secs, 4);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = PortalConfig::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn test_load_invalid_json() {
        let file = write_config("{ theme: ");
        let err = PortalConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
        assert!(err.user_message().contains("not valid JSON"));
    }

    #[test]
    fn test_zero_notification_secs_rejected() {
        let file = write_config(r#"{ "notification_secs": 0 }"#);
        let err = PortalConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_known_favorites_drops_unknown_ids() {
        let config = PortalConfig {
            favorites: vec![3, 42, 6],
            ..PortalConfig::default()
        };
        assert_eq!(config.known_favorites(&catalog::catalog()), vec![3, 6]);
    }

    #[test]
    fn test_theme_and_view_mode_cycle() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
        assert_eq!(ViewMode::Grid.next(), ViewMode::List);
        assert_eq!(ViewMode::Compact.next(), ViewMode::Grid);
    }
}
