use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::languages::{LanguagePair, normalize_language_code};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Directed language pairs offered in the menus, as `[from, to]` codes;
    /// both directions of every pair are offered at runtime
    #[serde(default = "default_language_pairs")]
    pub language_pairs: Vec<[String; 2]>,

    /// Quiz tuning
    #[serde(default)]
    pub quiz: QuizConfig,

    /// Dictionary lookup service
    #[serde(default)]
    pub lookup: LookupConfig,

    /// Database location
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Quiz engine tuning
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct QuizConfig {
    /// Terms drawn per quiz batch
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// A streak hitting a multiple of this suggests archiving the term
    #[serde(default = "default_streak_interval")]
    pub streak_interval: i64,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            streak_interval: default_streak_interval(),
        }
    }
}

/// Dictionary lookup service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LookupConfig {
    /// Base URL of the lookup endpoint
    #[serde(default = "default_lookup_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_lookup_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            endpoint: default_lookup_endpoint(),
            timeout_secs: default_lookup_timeout_secs(),
        }
    }
}

/// Database location configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct DatabaseConfig {
    /// Database file path; the per-user data directory is used when unset
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Log level for application logging
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Error level
    Error,
    /// Warning level
    Warn,
    /// Info level (default)
    #[default]
    Info,
    /// Debug level
    Debug,
    /// Trace level
    Trace,
}

impl LogLevel {
    /// Convert to the log crate's level filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_language_pairs() -> Vec<[String; 2]> {
    vec![
        ["en".to_string(), "fr".to_string()],
        ["en".to_string(), "es".to_string()],
    ]
}

fn default_batch_size() -> usize {
    5
}

fn default_streak_interval() -> i64 {
    5
}

fn default_lookup_endpoint() -> String {
    "https://api.wordreference.com/0.8".to_string()
}

fn default_lookup_timeout_secs() -> u64 {
    15
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language_pairs: default_language_pairs(),
            quiz: QuizConfig::default(),
            lookup: LookupConfig::default(),
            database: DatabaseConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.language_pairs.is_empty() {
            return Err(anyhow!("At least one language pair must be configured"));
        }

        for [from, to] in &self.language_pairs {
            normalize_language_code(from)?;
            normalize_language_code(to)?;
            if from.eq_ignore_ascii_case(to) {
                return Err(anyhow!(
                    "Language pair must use two different languages: {} -> {}",
                    from,
                    to
                ));
            }
        }

        if self.quiz.batch_size == 0 {
            return Err(anyhow!("Quiz batch size must be at least 1"));
        }

        if self.quiz.streak_interval <= 0 {
            return Err(anyhow!("Streak interval must be at least 1"));
        }

        if self.lookup.endpoint.trim().is_empty() {
            return Err(anyhow!("Lookup endpoint must not be empty"));
        }

        if self.lookup.timeout_secs == 0 {
            return Err(anyhow!("Lookup timeout must be at least 1 second"));
        }

        Ok(())
    }

    /// The configured seed pairs as validated `LanguagePair` values
    pub fn seed_pairs(&self) -> Result<Vec<LanguagePair>> {
        self.language_pairs
            .iter()
            .map(|[from, to]| LanguagePair::new(from, to))
            .collect()
    }
}
