//! Configuration settings for the prepflow scheduling engine.

use crate::error::{ConfigError, Result};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scheduling: SchedulingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::ReadFile)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default locations or use defaults.
    pub fn load() -> Result<Self> {
        let config_paths = [
            // Current directory
            PathBuf::from("prepflow.toml"),
            PathBuf::from("config.toml"),
            // User config directory
            dirs::config_dir()
                .map(|p| p.join("prepflow/config.toml"))
                .unwrap_or_default(),
        ];

        for path in &config_paths {
            if path.exists() {
                tracing::info!("Loading config from: {}", path.display());
                return Self::from_file(path);
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Config::default())
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<()> {
        self.scheduling.validate()
    }
}

/// Tunables for the preparation scheduling engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulingConfig {
    /// Start of the daily working window (default 08:00).
    pub working_hours_start: NaiveTime,
    /// End of the daily working window (default 22:00).
    pub working_hours_end: NaiveTime,
    /// How far ahead (days) to prompt for preparation hours.
    pub hours_prompt_window_days: i64,
    /// How far ahead (days) to run a suggestion round.
    pub suggestion_window_days: i64,
    /// Default hours suggested when prompting the user.
    pub default_preparation_hours: f64,
    /// Minimum length of a single study session, in minutes.
    pub min_session_minutes: i64,
    /// Grid alignment for session boundaries, in minutes.
    pub slot_step_minutes: i64,
    /// Minimum lead time before the target event, in hours.
    pub min_lead_hours: i64,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            working_hours_start: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            working_hours_end: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
            hours_prompt_window_days: 14,
            suggestion_window_days: 8,
            default_preparation_hours: 3.0,
            min_session_minutes: 30,
            slot_step_minutes: 15,
            min_lead_hours: 24,
        }
    }
}

impl SchedulingConfig {
    /// Validate the scheduling configuration.
    pub fn validate(&self) -> Result<()> {
        if self.working_hours_start >= self.working_hours_end {
            return Err(ConfigError::Invalid(
                "working_hours_start must be before working_hours_end".to_string(),
            )
            .into());
        }
        if self.slot_step_minutes <= 0 {
            return Err(
                ConfigError::Invalid("slot_step_minutes must be > 0".to_string()).into(),
            );
        }
        if self.min_session_minutes < self.slot_step_minutes {
            return Err(ConfigError::Invalid(
                "min_session_minutes must be at least slot_step_minutes".to_string(),
            )
            .into());
        }
        if self.suggestion_window_days <= 0 || self.hours_prompt_window_days <= 0 {
            return Err(
                ConfigError::Invalid("scan windows must be positive".to_string()).into(),
            );
        }
        if self.default_preparation_hours <= 0.0 {
            return Err(ConfigError::Invalid(
                "default_preparation_hours must be > 0".to_string(),
            )
            .into());
        }
        Ok(())
    }
}
