//! Application configuration.
//!
//! Loaded from an optional TOML file, then overridden by environment
//! variables. The API key is the only required value.
//!
//! ```toml
//! [genai]
//! text_model = "gemini-2.0-flash"
//! image_model = "gemini-2.0-flash-preview-image-generation"
//!
//! [fetch]
//! max_retries = 3
//! backoff_ms = 1000
//! image_strategy = "staggered"
//! stagger_ms = 2000
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::orchestrator::{FetchSettings, ImageStrategy};

pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "BIOLENS_API_KEY"];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Config directory not found")]
    ConfigDirNotFound,

    #[error("API key is required. Set GEMINI_API_KEY or add api_key under [genai] in the config file")]
    MissingCredential,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub genai: GenAiConfig,
    pub fetch: FetchConfig,
}

/// Connection settings for the generative AI provider
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenAiConfig {
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub base_url: String,
    pub text_model: String,
    pub image_model: String,
    pub request_timeout_secs: u64,
}

impl Default for GenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            text_model: "gemini-2.0-flash".to_string(),
            image_model: "gemini-2.0-flash-preview-image-generation".to_string(),
            request_timeout_secs: 60,
        }
    }
}

impl GenAiConfig {
    /// The API key, or `MissingCredential` when unset or blank
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingCredential)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageStrategyKind {
    Parallel,
    Staggered,
}

/// Retry and image fan-out settings for topic fetches
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Retries after a rate-limited text request (attempts = retries + 1)
    pub max_retries: u32,
    /// First backoff delay; doubled on every retry
    pub backoff_ms: u64,
    pub max_backoff_ms: u64,
    pub image_strategy: ImageStrategyKind,
    /// Pause between image requests when staggered
    pub stagger_ms: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff_ms: 1000,
            max_backoff_ms: 30_000,
            image_strategy: ImageStrategyKind::Staggered,
            stagger_ms: 2000,
        }
    }
}

impl FetchConfig {
    pub fn to_settings(&self) -> FetchSettings {
        let image_strategy = match self.image_strategy {
            ImageStrategyKind::Parallel => ImageStrategy::Parallel,
            ImageStrategyKind::Staggered => ImageStrategy::Staggered {
                delay: Duration::from_millis(self.stagger_ms),
            },
        };

        FetchSettings {
            max_retries: self.max_retries,
            base_backoff: Duration::from_millis(self.backoff_ms),
            max_backoff: Duration::from_millis(self.max_backoff_ms.max(self.backoff_ms)),
            image_strategy,
        }
    }
}

impl AppConfig {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join("biolens").join("config.toml"))
            .ok_or(ConfigError::ConfigDirNotFound)
    }

    /// Load the config file (if it exists) and apply environment overrides.
    ///
    /// An explicit `path` must exist; the default path is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Self::default_path()?;
                if default_path.exists() {
                    Self::from_file(&default_path)?
                } else {
                    log::debug!("No config file at {:?}, using defaults", default_path);
                    Self::default()
                }
            }
        };

        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        log::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Apply environment overrides through `lookup` (usually `std::env::var`)
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let key = API_KEY_VARS
            .iter()
            .filter_map(|name| lookup(name))
            .find(|value| !value.trim().is_empty());
        if let Some(key) = key {
            self.genai.api_key = Some(key);
        }
        if let Some(url) = lookup("BIOLENS_BASE_URL") {
            self.genai.base_url = url;
        }
        if let Some(model) = lookup("BIOLENS_TEXT_MODEL") {
            self.genai.text_model = model;
        }
        if let Some(model) = lookup("BIOLENS_IMAGE_MODEL") {
            self.genai.image_model = model;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.fetch.max_retries, 3);
        assert_eq!(config.genai.text_model, "gemini-2.0-flash");
        assert!(matches!(
            config.genai.require_api_key(),
            Err(ConfigError::MissingCredential)
        ));
    }

    #[test]
    fn test_blank_key_is_missing() {
        let mut config = AppConfig::default();
        config.genai.api_key = Some("   ".to_string());
        assert!(config.genai.require_api_key().is_err());
    }

    #[test]
    fn test_from_file_partial() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[genai]\napi_key = \"file-key\"\n\n[fetch]\nimage_strategy = \"parallel\"\nmax_retries = 5"
        )
        .unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.genai.require_api_key().unwrap(), "file-key");
        assert_eq!(config.fetch.max_retries, 5);
        assert_eq!(config.fetch.image_strategy, ImageStrategyKind::Parallel);
        // untouched values keep their defaults
        assert_eq!(config.fetch.backoff_ms, 1000);
        assert_eq!(config.genai.text_model, "gemini-2.0-flash");
    }

    #[test]
    fn test_from_file_invalid() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[fetch]\nmax_retries = \"many\"").unwrap();
        assert!(matches!(
            AppConfig::from_file(file.path()),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn test_explicit_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(matches!(AppConfig::load(Some(&path)), Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("BIOLENS_API_KEY", "env-key"),
            ("BIOLENS_TEXT_MODEL", "gemini-exp"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config.genai.api_key = Some("file-key".to_string());
        config.apply_env(|name| env.get(name).map(|v| v.to_string()));

        assert_eq!(config.genai.require_api_key().unwrap(), "env-key");
        assert_eq!(config.genai.text_model, "gemini-exp");
        assert_eq!(
            config.genai.image_model,
            GenAiConfig::default().image_model
        );
    }

    #[test]
    fn test_blank_env_key_falls_through() {
        let env: HashMap<&str, &str> = [("GEMINI_API_KEY", ""), ("BIOLENS_API_KEY", "env-key")]
            .into_iter()
            .collect();

        let mut config = AppConfig::default();
        config.apply_env(|name| env.get(name).map(|v| v.to_string()));
        assert_eq!(config.genai.require_api_key().unwrap(), "env-key");

        let blank: HashMap<&str, &str> = [("GEMINI_API_KEY", "  ")].into_iter().collect();
        let mut config = AppConfig::default();
        config.genai.api_key = Some("file-key".to_string());
        config.apply_env(|name| blank.get(name).map(|v| v.to_string()));
        assert_eq!(config.genai.require_api_key().unwrap(), "file-key");
    }

    #[test]
    fn test_api_key_not_serialized() {
        let mut config = AppConfig::default();
        config.genai.api_key = Some("secret".to_string());
        let rendered = toml::to_string(&config).unwrap();
        assert!(!rendered.contains("secret"));
    }

    #[test]
    fn test_to_settings() {
        let fetch = FetchConfig {
            image_strategy: ImageStrategyKind::Staggered,
            stagger_ms: 500,
            ..FetchConfig::default()
        };
        let settings = fetch.to_settings();
        assert_eq!(
            settings.image_strategy,
            ImageStrategy::Staggered { delay: Duration::from_millis(500) }
        );
        assert_eq!(settings.base_backoff, Duration::from_secs(1));
    }
}
