//! Command-line interface for workspace-seed
//!
//! # Usage Examples
//!
//! ```bash
//! # Populate the default database with the default counts
//! workspace-seed populate
//!
//! # Small, reproducible run into a scratch file, replacing earlier data
//! workspace-seed populate \
//!   --db-path /tmp/seed.sqlite \
//!   --n-users 50 --n-teams 4 --n-projects 6 --n-tasks 500 --n-tags 10 \
//!   --seed 7 --reset
//!
//! # Generate and validate without writing anything
//! N_TASKS=1000 workspace-seed populate --dry-run
//!
//! # Print the DDL
//! workspace-seed schema
//! ```

use clap::{Parser, Subcommand};
use seed_populate_sqlite::SqlitePopulateArgs;
use workspace_seed::populate::run_populate;

#[derive(Parser)]
#[command(name = "workspace-seed")]
#[command(about = "Generate a referentially consistent work-management dataset into SQLite")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a dataset and write it to a SQLite database
    Populate {
        #[command(flatten)]
        args: SqlitePopulateArgs,
    },

    /// Print the SQLite schema applied before loading
    Schema,
}

fn main() -> anyhow::Result<()> {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Populate { args } => {
            run_populate(args)?;
        }
        Commands::Schema => {
            print!("{}", seed_populate_sqlite::schema::SCHEMA_SQL);
        }
    }

    Ok(())
}
