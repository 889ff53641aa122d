use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::storage::SaveMode;
use crate::utils::paths::{get_config_path, get_entries_path};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,

    /// Overrides the default entries file location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entries_file: Option<PathBuf>,

    #[serde(default = "default_atomic_save")]
    pub atomic_save: bool,

    #[serde(default = "default_status_timeout_ms")]
    pub status_timeout_ms: u64,

    /// How long `trayclip copy` keeps serving the copied text on Linux
    /// before exiting, unless another program takes the clipboard first.
    #[serde(default = "default_copy_hold_secs")]
    pub copy_hold_secs: u64,
}

fn default_theme() -> String {
    "default".to_string()
}

fn default_atomic_save() -> bool {
    true
}

fn default_status_timeout_ms() -> u64 {
    3000
}

fn default_copy_hold_secs() -> u64 {
    60
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            entries_file: None,
            atomic_save: default_atomic_save(),
            status_timeout_ms: default_status_timeout_ms(),
            copy_hold_secs: default_copy_hold_secs(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = get_config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config: {}", config_path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", config_path.display()))?;

        Ok(config)
    }

    pub fn entries_path(&self) -> Result<PathBuf> {
        match &self.entries_file {
            Some(path) => Ok(path.clone()),
            None => get_entries_path(),
        }
    }

    pub fn save_mode(&self) -> SaveMode {
        SaveMode::from_atomic(self.atomic_save)
    }

    pub fn status_timeout(&self) -> Duration {
        Duration::from_millis(self.status_timeout_ms)
    }

    pub fn copy_hold(&self) -> Duration {
        Duration::from_secs(self.copy_hold_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.theme, "default");
        assert!(config.atomic_save);
        assert_eq!(config.save_mode(), SaveMode::Atomic);
        assert_eq!(config.status_timeout(), Duration::from_millis(3000));
        assert_eq!(config.copy_hold(), Duration::from_secs(60));
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        assert!(toml_str.contains("theme"));
        assert!(!toml_str.contains("entries_file"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
        theme = "dark"
        entries_file = "/tmp/snippets.json"
        atomic_save = false
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.theme, "dark");
        assert_eq!(config.entries_path().unwrap(), PathBuf::from("/tmp/snippets.json"));
        assert_eq!(config.save_mode(), SaveMode::Direct);
        assert_eq!(config.status_timeout_ms, 3000);
        assert_eq!(config.copy_hold_secs, 60);
    }

    #[test]
    fn test_copy_hold_override() {
        let config: Config = toml::from_str("copy_hold_secs = 5").unwrap();
        assert_eq!(config.copy_hold(), Duration::from_secs(5));
    }

    #[test]
    fn test_load_from_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load_from(&temp_dir.path().join("config.toml")).unwrap();
        assert_eq!(config.theme, "default");
        assert!(config.entries_file.is_none());
    }

    #[test]
    fn test_load_from_invalid_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "theme = [").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
