//! Configuration management for hexfecta

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::client::tba::DEFAULT_API_HOST;
use crate::error::{ConfigError, Result};

/// Default cache snapshot location, relative to the working directory
pub const DEFAULT_CACHE_FILE: &str = "tba_api_cache.json";

/// Default results artifact location, relative to the working directory
pub const DEFAULT_OUTPUT_FILE: &str = "frc_team_awards.json";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// The Blue Alliance read API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// API host, without the `/api/v3` prefix
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_host: Option<String>,

    /// Cache snapshot path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_file: Option<PathBuf>,

    /// Results artifact path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    /// User preferences
    #[serde(default)]
    pub preferences: Preferences,
}

/// User preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    /// Team whose ranking position ends the top list
    #[serde(default = "default_sentinel_team")]
    pub sentinel_team: u32,

    /// Pause after every successful request, in milliseconds
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,
}

fn default_sentinel_team() -> u32 {
    2200
}

fn default_request_delay_ms() -> u64 {
    100
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            sentinel_team: default_sentinel_team(),
            request_delay_ms: default_request_delay_ms(),
        }
    }
}

/// Values from the command line or environment that beat the config file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_key: Option<String>,
    pub api_host: Option<String>,
    pub cache_file: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let base = dirs::config_dir().ok_or(ConfigError::Invalid(
            "Could not determine config directory".to_string(),
        ))?;

        Ok(base.join("hexfecta").join("config.yaml"))
    }

    /// Load configuration from `path`, or the default path when `None`.
    ///
    /// A missing file yields the defaults.
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        let path = match path {
            Some(p) => PathBuf::from(p),
            None => Self::default_path()?,
        };
        if !path.exists() {
            log::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Apply command line and environment values on top of the file values
    pub fn apply(&mut self, overrides: Overrides) {
        if let Some(key) = overrides.api_key.filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key);
        }
        if let Some(host) = overrides.api_host {
            self.api_host = Some(host);
        }
        if let Some(path) = overrides.cache_file {
            self.cache_file = Some(path);
        }
        if let Some(path) = overrides.output {
            self.output = Some(path);
        }
    }

    /// The API key, or an error naming the variable to set
    pub fn require_api_key(&self) -> Result<&str> {
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(ConfigError::MissingApiKey.into()),
        }
    }

    pub fn api_host(&self) -> &str {
        self.api_host.as_deref().unwrap_or(DEFAULT_API_HOST)
    }

    pub fn cache_file(&self) -> PathBuf {
        self.cache_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CACHE_FILE))
    }

    pub fn output(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILE))
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.preferences.request_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.api_key.is_none());
        assert_eq!(config.api_host(), "https://www.thebluealliance.com");
        assert_eq!(config.cache_file(), PathBuf::from("tba_api_cache.json"));
        assert_eq!(config.output(), PathBuf::from("frc_team_awards.json"));
        assert_eq!(config.preferences.sentinel_team, 2200);
        assert_eq!(config.request_delay(), Duration::from_millis(100));
    }

    #[test]
    fn test_load_partial_yaml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(
            &path,
            "api_key: from-file\ncache_file: /tmp/cache.json\npreferences:\n  sentinel_team: 254\n",
        )
        .unwrap();

        let config = Config::load_at(path.to_str()).unwrap();

        assert_eq!(config.api_key.as_deref(), Some("from-file"));
        assert_eq!(config.cache_file(), PathBuf::from("/tmp/cache.json"));
        assert_eq!(config.preferences.sentinel_team, 254);
        assert_eq!(config.preferences.request_delay_ms, 100);
        assert_eq!(config.output(), PathBuf::from("frc_team_awards.json"));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.yaml");

        let config = Config::load_at(path.to_str()).unwrap();

        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_invalid_yaml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "preferences: [1, 2").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_overrides_beat_file() {
        let mut config = Config {
            api_key: Some("file-key".to_string()),
            api_host: Some("http://file".to_string()),
            ..Default::default()
        };

        config.apply(Overrides {
            api_key: Some("cli-key".to_string()),
            output: Some(PathBuf::from("out.json")),
            ..Default::default()
        });

        assert_eq!(config.api_key.as_deref(), Some("cli-key"));
        assert_eq!(config.api_host(), "http://file");
        assert_eq!(config.output(), PathBuf::from("out.json"));
    }

    #[test]
    fn test_require_api_key() {
        let mut config = Config::default();
        assert!(matches!(
            config.require_api_key(),
            Err(Error::Config(ConfigError::MissingApiKey))
        ));

        config.apply(Overrides {
            api_key: Some("   ".to_string()),
            ..Default::default()
        });
        assert!(config.require_api_key().is_err());

        config.api_key = Some("abc".to_string());
        assert_eq!(config.require_api_key().unwrap(), "abc");
    }
}
