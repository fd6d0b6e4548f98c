//! User configuration, read from a JSON file.

use crate::app::error::{context, Result};
use convlist::list::ScrollConfig;
use eyre::WrapErr;
use serde::{Deserialize, Serialize};
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

/// Environment variable pointing at an explicit configuration file
pub const CONFIG_ENV: &str = "CONVLIST_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    pub ui_block_is_rounded: bool,
    pub animation_duration_ms: u64,
    pub scroll_margin: usize,
    pub tick_interval_ms: u64,
    pub sync_simulation: bool,
    pub sync_interval_ms: u64,
    pub fixture_path: Option<PathBuf>,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            ui_block_is_rounded: true,
            animation_duration_ms: 200,
            scroll_margin: 1,
            tick_interval_ms: 16,
            sync_simulation: true,
            sync_interval_ms: 4000,
            fixture_path: None,
        }
    }
}

impl UserConfig {
    /// Reads the configuration from `$CONVLIST_CONFIG` or the user config directory.
    ///
    /// A missing file yields the defaults; an unreadable or malformed one is an error.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::from_file(&path),
            None => {
                tracing::debug!("No config directory available, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join("convlist").join("config.json"))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("Config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_json(&text).map_err(|e| {
            context::configuration(format!("Invalid config file {}: {}", path.display(), e))
        })?;

        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Applies command-line arguments; the first one names a fixture file.
    pub fn with_args(mut self, args: impl IntoIterator<Item = String>) -> Self {
        if let Some(path) = args.into_iter().next() {
            self.fixture_path = Some(PathBuf::from(path));
        }
        self
    }

    pub fn scroll_config(&self) -> ScrollConfig {
        ScrollConfig {
            animation_duration: Duration::from_millis(self.animation_duration_ms),
            scroll_margin: self.scroll_margin,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    pub fn sync_interval(&self) -> Duration {
        Duration::from_millis(self.sync_interval_ms.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = UserConfig::from_file(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, UserConfig::default());
    }

    #[test]
    fn test_partial_file_overrides_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "scroll_margin": 3, "sync_simulation": false }}"#).unwrap();

        let config = UserConfig::from_file(file.path()).unwrap();
        assert_eq!(config.scroll_margin, 3);
        assert!(!config.sync_simulation);
        assert_eq!(config.animation_duration_ms, 200);
    }

    #[test]
    fn test_malformed_file_is_configuration_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let err = UserConfig::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Invalid config file"));
    }

    #[test]
    fn test_first_argument_sets_fixture() {
        let config = UserConfig::default().with_args(vec!["demo.json".to_string()]);
        assert_eq!(config.fixture_path, Some(PathBuf::from("demo.json")));
        assert_eq!(
            config.scroll_config().animation_duration,
            Duration::from_millis(200)
        );
    }
}
