//! SQLite populator for workspace-seed.
//!
//! Writes a generated [`Dataset`](seed_generator::Dataset) into a SQLite file
//! with foreign keys enforced:
//!
//! - [`schema`] - DDL for the fourteen seed tables
//! - [`insert`] - Batched inserts with a row-by-row fallback
//! - [`populator`] - Dependency-ordered waves, one transaction each

pub mod args;
pub mod error;
pub mod insert;
pub mod populator;
pub mod schema;

pub use args::{SqlitePopulateArgs, DEFAULT_DB_PATH};
pub use error::SqlitePopulatorError;
pub use insert::{insert_batch, BatchOutcome, TableStats, DEFAULT_BATCH_SIZE};
pub use populator::{PopulateMetrics, SqlitePopulator};
