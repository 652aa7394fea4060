//! Error types for the SQLite populator.

use seed_core::Id;
use seed_generator::{GeneratorError, Violation};
use thiserror::Error;

/// Errors that can occur during SQLite population.
#[derive(Error, Debug)]
pub enum SqlitePopulatorError {
    /// SQLite open, statement or transaction error.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Filesystem error while preparing the database path.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A single row failed to insert after the bulk attempt fell back.
    #[error("Row {index} rejected by '{table}': {cause} (row: {row})")]
    RowRejected {
        table: &'static str,
        index: usize,
        row: String,
        #[source]
        cause: rusqlite::Error,
    },

    /// A failed bulk insert could not be rolled back.
    #[error("Rollback of bulk insert into '{table}' failed: {cause} (bulk error: {bulk})")]
    RollbackFailed {
        table: &'static str,
        bulk: String,
        #[source]
        cause: rusqlite::Error,
    },

    /// The target database already holds seed rows.
    #[error("Table '{0}' is not empty; rerun with --reset to start from an empty store")]
    StoreNotEmpty(&'static str),

    /// A parent link pointed at a task row that is not in the store.
    #[error("Task {0} not found while applying parent link")]
    MissingTask(Id),

    /// The generated dataset broke one or more invariants.
    #[error("Dataset failed validation: {}", summarize(.0))]
    InvalidDataset(Vec<Violation>),

    /// Generator error.
    #[error("Generator error: {0}")]
    Generator(#[from] GeneratorError),
}

fn summarize(violations: &[Violation]) -> String {
    match violations.first() {
        Some(first) => format!("{} violation(s), first: {first}", violations.len()),
        None => "no violations".to_string(),
    }
}
