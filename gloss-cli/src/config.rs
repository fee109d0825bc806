//! On-disk configuration for the terminal build

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use gloss_core::Settings;

fn fallback_dir() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".gloss")
}

/// `GLOSS_DATA_DIR`, else `~/.gloss`
pub fn default_data_dir() -> PathBuf {
    if let Some(path) = std::env::var_os("GLOSS_DATA_DIR") {
        return PathBuf::from(path);
    }
    dirs::home_dir()
        .map(|home| home.join(".gloss"))
        .unwrap_or_else(fallback_dir)
}

/// Platform config dir, else the data dir
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("gloss"))
        .unwrap_or_else(default_data_dir)
        .join("config.toml")
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub reader: Settings,
    pub data: DataConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DataConfig {
    /// Exports and logs are written here
    pub dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
        }
    }
}

impl Config {
    /// Read `path`, writing defaults there when it does not exist yet
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Config::default();
            config.save_to_path(path)?;
            return Ok(config);
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        if config.data.dir.as_os_str().is_empty() {
            config.data.dir = default_data_dir();
        } else if config.data.dir.is_relative() {
            config.data.dir = default_data_dir().join(&config.data.dir);
        }

        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gloss_core::{Granularity, HighlightColor};

    #[test]
    fn test_missing_config_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load(&path).unwrap();
        assert_eq!(config.reader, Settings::default());
        assert!(path.exists());

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("[reader]"));
        assert!(written.contains("granularity = \"word\""));
    }

    #[test]
    fn test_partial_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[reader]\ndefault_color = \"pink\"\ngranularity = \"phrase\"\n\n[data]\ndir = \"/tmp/gloss-data\"\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.reader.default_color, HighlightColor::Pink);
        assert_eq!(config.reader.granularity, Granularity::Phrase);
        assert!(config.reader.show_notes);
        assert_eq!(config.data.dir, PathBuf::from("/tmp/gloss-data"));
    }

    #[test]
    fn test_bad_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[reader]\ndefault_color = \"teal\"\n").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }
}
