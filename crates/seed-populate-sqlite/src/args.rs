//! CLI argument definitions for the SQLite populator.

use clap::Args;
use seed_populate::CommonSeedArgs;
use std::path::PathBuf;

/// Default database location, relative to the working directory.
pub const DEFAULT_DB_PATH: &str = "output/asana_simulation.sqlite";

/// SQLite-specific populate arguments.
#[derive(Args, Clone, Debug)]
pub struct SqlitePopulateArgs {
    /// Path to the SQLite database file (created if missing)
    #[arg(long, env = "DB_PATH", default_value = DEFAULT_DB_PATH)]
    pub db_path: PathBuf,

    /// Drop every seed table before loading
    #[arg(long)]
    pub reset: bool,

    #[command(flatten)]
    pub common: CommonSeedArgs,
}
