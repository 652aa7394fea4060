//! Common CLI argument definitions shared by all populators.

use clap::Args;
use seed_core::{ConfigError, SeedConfig};
use std::path::PathBuf;

/// Default number of rows per bulk insert.
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Generation arguments shared by every populate command.
///
/// Each count can come from the command line, from its environment
/// variable, or from the optional YAML config file, in that order of
/// precedence. Anything left unset takes the [`SeedConfig`] default.
#[derive(Args, Clone, Debug, Default)]
pub struct CommonSeedArgs {
    /// Path to a YAML file with generation counts
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Number of users to generate
    #[arg(long, env = "N_USERS")]
    pub n_users: Option<u32>,

    /// Number of teams to generate
    #[arg(long, env = "N_TEAMS")]
    pub n_teams: Option<u32>,

    /// Number of projects to generate
    #[arg(long, env = "N_PROJECTS")]
    pub n_projects: Option<u32>,

    /// Number of tasks to generate
    #[arg(long, env = "N_TASKS")]
    pub n_tasks: Option<u32>,

    /// Number of tags to generate
    #[arg(long, env = "N_TAGS")]
    pub n_tags: Option<u32>,

    /// Upper bound on comments per task
    #[arg(long, env = "MAX_COMMENTS_PER_TASK")]
    pub max_comments_per_task: Option<u32>,

    /// Size of the historical window, in days
    #[arg(long, env = "HISTORY_DAYS")]
    pub history_days: Option<u32>,

    /// Random seed for deterministic generation (same seed = same data)
    #[arg(long, env = "SEED", default_value = "42")]
    pub seed: u64,

    /// Batch size for database inserts
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    /// Dry-run mode: generate and validate the dataset without writing it
    #[arg(long)]
    pub dry_run: bool,
}

impl CommonSeedArgs {
    /// Merge the config file, environment and flags into a validated config.
    pub fn resolve_config(&self) -> Result<SeedConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => SeedConfig::from_file(path)?,
            None => SeedConfig::default(),
        };

        let overrides = [
            (&mut config.n_users, self.n_users),
            (&mut config.n_teams, self.n_teams),
            (&mut config.n_projects, self.n_projects),
            (&mut config.n_tasks, self.n_tasks),
            (&mut config.n_tags, self.n_tags),
            (&mut config.max_comments_per_task, self.max_comments_per_task),
            (&mut config.history_days, self.history_days),
        ];
        for (slot, value) in overrides {
            if let Some(value) = value {
                *slot = value;
            }
        }

        config.validate()?;
        Ok(config)
    }
}
