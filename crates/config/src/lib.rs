//! Configuration loading, validation, and management for Kioku.
//!
//! Loads configuration from `~/.kioku/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use kioku_core::emotion::Language;
use kioku_core::memory::LongTermConfig;
use kioku_core::working::WorkingMemoryConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.kioku/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Subject used when a command does not name one
    #[serde(default = "default_subject")]
    pub default_subject: String,

    /// Short-term (working) memory tuning
    #[serde(default)]
    pub working_memory: WorkingMemoryConfig,

    /// Long-term memory search tuning
    #[serde(default)]
    pub long_term: LongTermConfig,

    /// Emotion and feedback detection
    #[serde(default)]
    pub affect: AffectConfig,
}

fn default_subject() -> String {
    "default".into()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffectConfig {
    /// Keyword tables consulted by the emotion analyzer and feedback detector
    #[serde(default = "default_languages")]
    pub languages: Vec<Language>,
}

fn default_languages() -> Vec<Language> {
    vec![Language::Japanese, Language::English]
}

impl Default for AffectConfig {
    fn default() -> Self {
        Self {
            languages: default_languages(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.kioku/config.toml).
    ///
    /// Environment variables override the file:
    /// - `KIOKU_MAX_ITEMS`
    /// - `KIOKU_TOP_K`
    /// - `KIOKU_SIMILARITY_THRESHOLD`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".kioku")
    }

    /// Apply overrides from an environment lookup.
    fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("KIOKU_MAX_ITEMS") {
            self.working_memory.max_items = parse_env("KIOKU_MAX_ITEMS", &value)?;
        }
        if let Some(value) = lookup("KIOKU_TOP_K") {
            self.long_term.top_k = parse_env("KIOKU_TOP_K", &value)?;
        }
        if let Some(value) = lookup("KIOKU_SIMILARITY_THRESHOLD") {
            self.long_term.similarity_threshold = parse_env("KIOKU_SIMILARITY_THRESHOLD", &value)?;
        }
        Ok(())
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        let wm = &self.working_memory;
        if wm.max_items == 0 {
            return Err(ConfigError::ValidationError(
                "working_memory.max_items must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&wm.activation_threshold) {
            return Err(ConfigError::ValidationError(
                "working_memory.activation_threshold must be between 0.0 and 1.0".into(),
            ));
        }
        if wm.normal_decay_rate < 0.0 || wm.emotional_decay_rate < 0.0 || wm.refresh_boost < 0.0 {
            return Err(ConfigError::ValidationError(
                "working_memory decay rates and refresh_boost must not be negative".into(),
            ));
        }

        let lt = &self.long_term;
        if lt.top_k == 0 {
            return Err(ConfigError::ValidationError(
                "long_term.top_k must be at least 1".into(),
            ));
        }
        if !(-1.0..=1.0).contains(&lt.similarity_threshold) {
            return Err(ConfigError::ValidationError(
                "long_term.similarity_threshold must be between -1.0 and 1.0".into(),
            ));
        }
        if lt.emotional_prime_delta < 0.0 {
            return Err(ConfigError::ValidationError(
                "long_term.emotional_prime_delta must not be negative".into(),
            ));
        }

        if self.affect.languages.is_empty() {
            return Err(ConfigError::ValidationError(
                "affect.languages must name at least one language".into(),
            ));
        }

        Ok(())
    }

    /// Generate a default config TOML string.
    pub fn default_toml() -> String {
        Self::default().to_toml()
    }

    /// Render this configuration as TOML.
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_subject: default_subject(),
            working_memory: WorkingMemoryConfig::default(),
            long_term: LongTermConfig::default(),
            affect: AffectConfig::default(),
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| {
        ConfigError::ValidationError(format!("{key} has an invalid value: {value:?}"))
    })
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
