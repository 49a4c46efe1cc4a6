//! Configuration management for gdres CLI

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_SLOTS: &str = "slots.csv";
pub const DEFAULT_GOALS: &str = "resistance.csv";
pub const DEFAULT_COMPONENTS: &str = "components_raw.txt";
pub const DEFAULT_AUGMENTS: &str = "augments_raw.txt";
pub const DEFAULT_STATS: &str = "stats.csv";

#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    pub slots: Option<PathBuf>,
    pub goals: Option<PathBuf>,
    pub components: Option<PathBuf>,
    pub augments: Option<PathBuf>,
    pub stats: Option<PathBuf>,
    /// Extra unobtainable item names on top of the built-in list
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unobtainable: Vec<String>,
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("gdres");

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from file, or the default if it doesn't exist
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        toml::from_str(&contents).context("Failed to parse config file")
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to file
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory at {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(config_path, contents)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        Ok(())
    }

    /// Pick the CLI value, then the configured one, then the stock file name
    pub fn resolve(cli: Option<PathBuf>, configured: Option<&Path>, fallback: &str) -> PathBuf {
        cli.or_else(|| configured.map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from(fallback))
    }

    pub fn add_unobtainable(&mut self, name: String) {
        if !self.unobtainable.contains(&name) {
            self.unobtainable.push(name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config {
            slots: Some(PathBuf::from("/data/slots.csv")),
            ..Config::default()
        };
        config.add_unobtainable("Ember Band".to_string());
        config.add_unobtainable("Ember Band".to_string());
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.unobtainable.len(), 1);
    }

    #[test]
    fn test_resolve_order() {
        let configured = PathBuf::from("conf.csv");
        assert_eq!(
            Config::resolve(Some(PathBuf::from("cli.csv")), Some(&configured), DEFAULT_SLOTS),
            PathBuf::from("cli.csv")
        );
        assert_eq!(
            Config::resolve(None, Some(&configured), DEFAULT_SLOTS),
            configured
        );
        assert_eq!(
            Config::resolve(None, None, DEFAULT_SLOTS),
            PathBuf::from("slots.csv")
        );
    }

    #[test]
    fn test_config_path_ends_with_file_name() {
        if let Ok(path) = Config::config_path() {
            assert!(path.ends_with("gdres/config.toml"));
        }
    }
}
