//! Runtime configuration read from `PHONON_*` environment variables.

use std::path::PathBuf;

use crate::classifier::MatchMode;

pub const ENV_PHRASE_FILE: &str = "PHONON_PHRASE_FILE";
pub const ENV_MATCH_MODE: &str = "PHONON_MATCH_MODE";
pub const ENV_REASON_LIMIT: &str = "PHONON_REASON_LIMIT";
pub const ENV_CHANNEL_CAPACITY: &str = "PHONON_CHANNEL_CAPACITY";
pub const ENV_DETECT_LANGUAGE: &str = "PHONON_DETECT_LANGUAGE";

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue { key: &'static str, value: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue { key, value } => {
                write!(f, "invalid value for {key}: {value:?}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Classifier settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierConfig {
    /// Optional JSON dictionary replacing the built-in tables.
    pub phrase_file: Option<PathBuf>,
    pub match_mode: MatchMode,
    /// How many matched phrases the reason string names.
    pub reason_limit: usize,
}

impl ClassifierConfig {
    pub const DEFAULT_REASON_LIMIT: usize = 3;

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (used by `from_env` and tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(path) = lookup(ENV_PHRASE_FILE).filter(|p| !p.trim().is_empty()) {
            config.phrase_file = Some(PathBuf::from(path));
        }
        if let Some(mode) = lookup(ENV_MATCH_MODE) {
            config.match_mode = parse_match_mode(&mode)?;
        }
        if let Some(limit) = lookup(ENV_REASON_LIMIT) {
            config.reason_limit = parse_positive(ENV_REASON_LIMIT, &limit)?;
        }
        Ok(config)
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            phrase_file: None,
            match_mode: MatchMode::Substring,
            reason_limit: Self::DEFAULT_REASON_LIMIT,
        }
    }
}

/// Live monitor settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    /// Bound of the transcript segment channel.
    pub channel_capacity: usize,
    /// Attach a whatlang guess to each verdict.
    pub detect_language: bool,
}

impl MonitorConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(cap) = lookup(ENV_CHANNEL_CAPACITY) {
            config.channel_capacity = parse_positive(ENV_CHANNEL_CAPACITY, &cap)?;
        }
        if let Some(flag) = lookup(ENV_DETECT_LANGUAGE) {
            config.detect_language = parse_bool(ENV_DETECT_LANGUAGE, &flag)?;
        }
        Ok(config)
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 64,
            detect_language: true,
        }
    }
}

fn invalid(key: &'static str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    }
}

fn parse_match_mode(value: &str) -> Result<MatchMode, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "substring" => Ok(MatchMode::Substring),
        "word" | "word_boundary" => Ok(MatchMode::WordBoundary),
        _ => Err(invalid(ENV_MATCH_MODE, value)),
    }
}

fn parse_positive(key: &'static str, value: &str) -> Result<usize, ConfigError> {
    match value.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(invalid(key, value)),
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(key, value)),
    }
}
