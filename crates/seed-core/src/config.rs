//! Generation counts and the historical window.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Error type for configuration loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error reading config file
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// A count that must be positive was zero
    #[error("'{0}' must be a positive integer")]
    NotPositive(&'static str),
}

/// Counts and window driving a single generation run.
///
/// Missing keys in a YAML file fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    pub n_users: u32,
    pub n_teams: u32,
    pub n_projects: u32,
    pub n_tasks: u32,
    pub n_tags: u32,
    pub max_comments_per_task: u32,
    pub history_days: u32,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            n_users: 2000,
            n_teams: 40,
            n_projects: 120,
            n_tasks: 50_000,
            n_tags: 80,
            max_comments_per_task: 3,
            history_days: 180,
        }
    }
}

impl SeedConfig {
    /// Load config from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse config from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: SeedConfig = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Reject zero counts. Must run before any generation starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let counts = [
            ("n_users", self.n_users),
            ("n_teams", self.n_teams),
            ("n_projects", self.n_projects),
            ("n_tasks", self.n_tasks),
            ("n_tags", self.n_tags),
            ("max_comments_per_task", self.max_comments_per_task),
            ("history_days", self.history_days),
        ];
        match counts.iter().find(|(_, value)| *value == 0) {
            Some((name, _)) => Err(ConfigError::NotPositive(*name)),
            None => Ok(()),
        }
    }
}
