//! Configuration Management
//!
//! Handles persistent configuration storage for dsctl.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::format::Format;

/// User configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Preferred document format, used when nothing else decides
    #[serde(default)]
    pub format: Option<Format>,
    /// Plugin kind applied by `list` when no `--kind` is given
    #[serde(default)]
    pub plugin_kind: Option<String>,
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("dsctl").join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load configuration from a given file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring invalid config {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };
        self.save_to(&path)
    }

    /// Save configuration to a given file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {:?}", parent))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))?;

        Ok(())
    }

    /// Overwrite the given settings; an empty kind clears the stored one
    pub fn apply(&mut self, format: Option<Format>, plugin_kind: Option<&str>) {
        if let Some(format) = format {
            self.format = Some(format);
        }
        if let Some(kind) = plugin_kind {
            self.plugin_kind = (!kind.is_empty()).then(|| kind.to_string());
        }
    }

    /// Get effective format (CLI > config > file extension > JSON)
    pub fn effective_format(&self, cli: Option<Format>, path: &Path) -> Format {
        cli.or(self.format)
            .or_else(|| Format::from_path(path))
            .unwrap_or_default()
    }

    /// Get effective plugin kind filter (CLI > config > none)
    pub fn effective_plugin_kind(&self, cli: Option<&str>) -> String {
        cli.map(str::to_string)
            .or_else(|| self.plugin_kind.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json"));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_invalid_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();
        assert_eq!(Config::load_from(&path), Config::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            format: Some(Format::Yaml),
            plugin_kind: Some("prometheus".to_string()),
        };

        config.save_to(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains(r#""format": "yaml""#));
        assert_eq!(Config::load_from(&path), config);
    }

    #[test]
    fn test_apply_then_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::load_from(&path);
        config.apply(Some(Format::Yaml), Some("prometheus"));
        config.save_to(&path).unwrap();

        let mut config = Config::load_from(&path);
        assert_eq!(config.format, Some(Format::Yaml));
        assert_eq!(config.plugin_kind.as_deref(), Some("prometheus"));

        config.apply(None, None);
        assert_eq!(config.format, Some(Format::Yaml));
        assert_eq!(config.plugin_kind.as_deref(), Some("prometheus"));

        config.apply(None, Some(""));
        assert_eq!(config.plugin_kind, None);
    }

    #[test]
    fn test_effective_format_precedence() {
        let yaml_file = Path::new("ds.yaml");
        let unknown = Path::new("ds.txt");

        let config = Config::default();
        assert_eq!(config.effective_format(None, yaml_file), Format::Yaml);
        assert_eq!(config.effective_format(None, unknown), Format::Json);
        assert_eq!(
            config.effective_format(Some(Format::Json), yaml_file),
            Format::Json
        );

        let config = Config {
            format: Some(Format::Json),
            ..Default::default()
        };
        assert_eq!(config.effective_format(None, yaml_file), Format::Json);
    }

    #[test]
    fn test_effective_plugin_kind_precedence() {
        let config = Config {
            plugin_kind: Some("loki".to_string()),
            ..Default::default()
        };
        assert_eq!(config.effective_plugin_kind(None), "loki");
        assert_eq!(config.effective_plugin_kind(Some("prometheus")), "prometheus");
        assert_eq!(Config::default().effective_plugin_kind(None), "");
    }
}
