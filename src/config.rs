//! Channel configuration parser.
//!
//! A channel maps an identifier to its dataset file plus presentation
//! passthrough (image paths, theme colors). The core only consumes
//! `data_file`; everything else is handed through to the presentation layer
//! untouched. The config file is optional — a missing file yields
//! `Config::default()` (no channels).

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use crate::dataset::DEFAULT_DELIMITER;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config file exceeds maximum allowed size.
    #[error("Config file too large: {0}")]
    TooLarge(String),

    #[error("Unknown channel '{0}'")]
    UnknownChannel(String),
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// One channel's configuration.
///
/// `data_file` is the only field the core consumes; the rest is opaque
/// presentation passthrough carried for the consumer.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    /// Display title for the channel.
    pub title: String,

    /// Path to the delimited dataset file.
    pub data_file: String,

    /// Field delimiter in the dataset file.
    pub delimiter: char,

    /// Base path for article images.
    pub images_path: String,

    /// Fallback image for articles without one.
    pub placeholder_image: String,

    /// Theme colors (opaque to the core).
    pub primary_color: String,
    pub secondary_color: String,
    pub background_color: String,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            data_file: String::new(),
            delimiter: DEFAULT_DELIMITER,
            images_path: String::new(),
            placeholder_image: String::new(),
            primary_color: String::new(),
            secondary_color: String::new(),
            background_color: String::new(),
        }
    }
}

/// Top-level application configuration: the channel map plus the channel to
/// open when none is named on the command line.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub default_channel: Option<String>,
    pub channels: HashMap<String, ChannelConfig>,
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    /// Load configuration from a TOML file.
    ///
    /// - Missing file -> `Ok(Config::default())`
    /// - Empty file -> `Ok(Config::default())`
    /// - Invalid TOML -> `Err(ConfigError::Parse)` with line number info
    /// - Unknown top-level keys -> silently accepted, logged as warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            let known_keys = ["default_channel", "channels"];
            for key in raw.keys() {
                if !known_keys.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(&content)?;
        tracing::info!(
            path = %path.display(),
            channels = config.channels.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Resolve a channel by id, falling back to `default_channel` when `id`
    /// is `None`.
    pub fn channel(&self, id: Option<&str>) -> Result<(&str, &ChannelConfig), ConfigError> {
        let id = id
            .or(self.default_channel.as_deref())
            .ok_or_else(|| ConfigError::UnknownChannel("<none requested>".to_string()))?;
        self.channels
            .get_key_value(id)
            .map(|(key, value)| (key.as_str(), value))
            .ok_or_else(|| ConfigError::UnknownChannel(id.to_string()))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"
default_channel = "wowmind"

[channels.wowmind]
title = "Category and Tag Cloud"
data_file = "channels/wowmind/articles.csv"
images_path = "channels/wowmind/images/"
placeholder_image = "channels/wowmind/images/placeholder.jpg"
primary_color = "#3B82F6"
secondary_color = "#1E3A8A"
background_color = "#F0F9FF"

[channels.aitmir]
title = "AI and IT"
data_file = "channels/aitmir/articles.csv"
delimiter = "|"
"##;

    fn write_config(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_missing_file_returns_default() {
        let config = Config::load(Path::new("/tmp/cumulus_test_nonexistent.toml")).unwrap();
        assert!(config.channels.is_empty());
        assert!(config.default_channel.is_none());
    }

    #[test]
    fn test_empty_file_returns_default() {
        let (_dir, path) = write_config("   \n  ");
        let config = Config::load(&path).unwrap();
        assert!(config.channels.is_empty());
    }

    #[test]
    fn test_full_config() {
        let (_dir, path) = write_config(SAMPLE);
        let config = Config::load(&path).unwrap();

        assert_eq!(config.default_channel.as_deref(), Some("wowmind"));
        assert_eq!(config.channels.len(), 2);

        let wowmind = &config.channels["wowmind"];
        assert_eq!(wowmind.title, "Category and Tag Cloud");
        assert_eq!(wowmind.data_file, "channels/wowmind/articles.csv");
        assert_eq!(wowmind.delimiter, '^'); // default
        assert_eq!(wowmind.primary_color, "#3B82F6");

        assert_eq!(config.channels["aitmir"].delimiter, '|');
    }

    #[test]
    fn test_channel_resolution() {
        let (_dir, path) = write_config(SAMPLE);
        let config = Config::load(&path).unwrap();

        let (id, channel) = config.channel(Some("aitmir")).unwrap();
        assert_eq!(id, "aitmir");
        assert_eq!(channel.title, "AI and IT");

        // Falls back to default_channel
        let (id, _) = config.channel(None).unwrap();
        assert_eq!(id, "wowmind");

        let err = config.channel(Some("missing")).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownChannel(_)));
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_no_default_no_request_is_error() {
        let (_dir, path) = write_config("[channels.only]\ntitle = \"Only\"\n");
        let config = Config::load(&path).unwrap();
        assert!(config.channel(None).is_err());
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        let (_dir, path) = write_config("this is not [valid toml");
        let result = Config::load(&path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_unknown_keys_accepted() {
        let (_dir, path) = write_config("totally_fake_key = 1\n[channels.a]\ntitle = \"A\"\n");
        let config = Config::load(&path).unwrap();
        assert_eq!(config.channels.len(), 1);
    }

    #[test]
    fn test_too_large_file_rejected() {
        let (_dir, path) = write_config(&"a".repeat(1_048_577));
        let result = Config::load(&path);
        assert!(matches!(result, Err(ConfigError::TooLarge(_))));
    }
}
