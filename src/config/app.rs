//! Main application configuration
//!
//! Configuration comes from an optional TOML file, then environment
//! variables, then command line flags, each layer overriding the last.

use crate::rating::weights::WeightTable;
use crate::roster::history::RatingThresholds;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub roster: RosterSettings,
    pub scoring: ScoringSettings,
}

/// Service-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging and metrics
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Roster storage settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterSettings {
    /// Rating records kept before the oldest are dropped
    pub max_history_entries: usize,
    /// Distinct (position, ratings) results kept by the score cache
    pub score_cache_capacity: usize,
}

/// Scoring settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringSettings {
    /// TOML file replacing the built-in weight tables
    pub weights_file: Option<PathBuf>,
    /// History filter: overall ratings at or above this are high
    pub high_rating_threshold: i32,
    /// History filter: overall ratings below this are low
    pub low_rating_threshold: i32,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "roster-rating".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for RosterSettings {
    fn default() -> Self {
        Self {
            max_history_entries: 10_000,
            score_cache_capacity: 4096,
        }
    }
}

impl Default for ScoringSettings {
    fn default() -> Self {
        let thresholds = RatingThresholds::default();
        Self {
            weights_file: None,
            high_rating_threshold: thresholds.high,
            low_rating_threshold: thresholds.low,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| anyhow!("Invalid {} value: {}", name, value))
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        Self::load(None, |name| env::var(name).ok())
    }

    /// Load configuration from a TOML file; missing sections use defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let config = Self::parse_file(path)?;

        validate_config(&config)?;
        Ok(config)
    }

    /// Defaults, then the TOML file at `path` if given, then variables from
    /// `lookup`. Only the merged result is validated.
    pub fn load<F>(path: Option<&Path>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match path {
            Some(path) => Self::parse_file(path)?,
            None => Self::default(),
        };
        config.apply_env(lookup)?;

        validate_config(&config)?;
        Ok(config)
    }

    fn parse_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Override fields from variables returned by `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Service settings
        if let Some(name) = lookup("SERVICE_NAME") {
            self.service.name = name;
        }
        if let Some(log_level) = lookup("LOG_LEVEL") {
            self.service.log_level = log_level;
        }

        // Roster settings
        if let Some(entries) = lookup("MAX_HISTORY_ENTRIES") {
            self.roster.max_history_entries = parse_var("MAX_HISTORY_ENTRIES", &entries)?;
        }
        if let Some(capacity) = lookup("SCORE_CACHE_CAPACITY") {
            self.roster.score_cache_capacity = parse_var("SCORE_CACHE_CAPACITY", &capacity)?;
        }

        // Scoring settings
        if let Some(path) = lookup("WEIGHTS_FILE") {
            self.scoring.weights_file = Some(PathBuf::from(path));
        }
        if let Some(high) = lookup("HIGH_RATING_THRESHOLD") {
            self.scoring.high_rating_threshold = parse_var("HIGH_RATING_THRESHOLD", &high)?;
        }
        if let Some(low) = lookup("LOW_RATING_THRESHOLD") {
            self.scoring.low_rating_threshold = parse_var("LOW_RATING_THRESHOLD", &low)?;
        }

        Ok(())
    }

    /// History filter thresholds
    pub fn thresholds(&self) -> RatingThresholds {
        RatingThresholds {
            high: self.scoring.high_rating_threshold,
            low: self.scoring.low_rating_threshold,
        }
    }

    /// Weight table from `weights_file`, or the built-in tables
    pub fn weight_table(&self) -> Result<WeightTable> {
        match &self.scoring.weights_file {
            Some(path) => Ok(WeightTable::from_file(path)?),
            None => Ok(WeightTable::standard()),
        }
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.service.name.trim().is_empty() {
        return Err(anyhow!("Service name cannot be empty"));
    }

    // Validate roster settings
    if config.roster.max_history_entries == 0 {
        return Err(anyhow!("Max history entries must be greater than 0"));
    }
    if config.roster.score_cache_capacity == 0 {
        return Err(anyhow!("Score cache capacity must be greater than 0"));
    }

    // Validate thresholds
    if config.scoring.low_rating_threshold >= config.scoring.high_rating_threshold {
        return Err(anyhow!(
            "Low rating threshold ({}) must be below high rating threshold ({})",
            config.scoring.low_rating_threshold,
            config.scoring.high_rating_threshold
        ));
    }

    Ok(())
}
