//! SQLite populator: writes a generated dataset in dependency-ordered waves.

use crate::error::SqlitePopulatorError;
use crate::insert::{apply_parent_links, insert_table, TableStats, DEFAULT_BATCH_SIZE};
use crate::schema::{apply_schema, drop_seed_tables, first_non_empty_table, row_count, SEED_TABLES};
use rusqlite::Connection;
use seed_core::Task;
use seed_generator::{Dataset, DatasetGenerator};
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Metrics from a populate operation.
#[derive(Debug, Clone, Default)]
pub struct PopulateMetrics {
    /// Number of rows inserted.
    pub rows_inserted: u64,
    /// Number of parent links applied to stored tasks.
    pub parent_links: u64,
    /// Number of batches executed.
    pub batch_count: u64,
    /// Number of batches that went through the row-by-row fallback.
    pub fallback_count: u64,
    /// Total time taken.
    pub total_duration: Duration,
    /// Time spent generating data.
    pub generation_duration: Duration,
    /// Time spent inserting data.
    pub insert_duration: Duration,
}

impl PopulateMetrics {
    /// Calculate rows per second.
    pub fn rows_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.rows_inserted as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }

    fn record(&mut self, stats: TableStats) {
        self.rows_inserted += stats.rows;
        self.batch_count += stats.batches;
        self.fallback_count += stats.fallbacks;
    }
}

/// Run one wave in its own transaction.
///
/// A successful wave is committed. A rejected row commits whatever the wave
/// inserted before it and then fails the run; any other error rolls the
/// wave back.
fn run_wave<F>(
    conn: &mut Connection,
    name: &str,
    metrics: &mut PopulateMetrics,
    body: F,
) -> Result<(), SqlitePopulatorError>
where
    F: FnOnce(&Connection, &mut PopulateMetrics) -> Result<(), SqlitePopulatorError>,
{
    let before = metrics.rows_inserted + metrics.parent_links;
    let tx = conn.transaction()?;
    match body(&tx, metrics) {
        Ok(()) => {
            tx.commit()?;
            info!(
                "Wave '{}' committed: {} rows",
                name,
                metrics.rows_inserted + metrics.parent_links - before
            );
            Ok(())
        }
        Err(err @ SqlitePopulatorError::RowRejected { .. }) => {
            tx.commit()?;
            Err(err)
        }
        Err(err) => Err(err),
    }
}

/// SQLite populator that writes a generated dataset.
pub struct SqlitePopulator {
    conn: Connection,
    batch_size: usize,
}

impl SqlitePopulator {
    /// Open (or create) the database file at `path`.
    ///
    /// Missing parent directories are created. Foreign keys are enforced on
    /// the connection for its whole lifetime.
    pub fn open(path: &Path) -> Result<Self, SqlitePopulatorError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        info!("Opening SQLite database: {}", path.display());
        Self::with_connection(Connection::open(path)?)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self, SqlitePopulatorError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    /// Wrap an existing connection.
    pub fn with_connection(conn: Connection) -> Result<Self, SqlitePopulatorError> {
        conn.pragma_update(None, "foreign_keys", true)?;
        Ok(Self {
            conn,
            batch_size: DEFAULT_BATCH_SIZE,
        })
    }

    /// Set the batch size for INSERT operations.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Ensure the schema exists and the store is empty.
    ///
    /// With `reset`, every seed table is dropped first. Without it, a store
    /// that already holds seed rows is refused.
    pub fn prepare_store(&self, reset: bool) -> Result<(), SqlitePopulatorError> {
        if reset {
            drop_seed_tables(&self.conn)?;
        }
        apply_schema(&self.conn)?;
        if let Some(table) = first_non_empty_table(&self.conn)? {
            return Err(SqlitePopulatorError::StoreNotEmpty(table));
        }
        Ok(())
    }

    /// Generate a dataset and write it.
    pub fn populate(
        &mut self,
        generator: &mut DatasetGenerator,
    ) -> Result<PopulateMetrics, SqlitePopulatorError> {
        let start_time = Instant::now();
        let dataset = generator.generate()?;
        let generation_duration = start_time.elapsed();

        let mut metrics = self.load(&dataset)?;
        metrics.generation_duration = generation_duration;
        metrics.total_duration = start_time.elapsed();

        info!(
            "Population complete: {} rows in {:?} ({:.2} rows/sec)",
            metrics.rows_inserted,
            metrics.total_duration,
            metrics.rows_per_second()
        );
        Ok(metrics)
    }

    /// Write an already generated dataset, wave by wave.
    ///
    /// The dataset is validated first; nothing is written if it breaks any
    /// invariant.
    pub fn load(&mut self, dataset: &Dataset) -> Result<PopulateMetrics, SqlitePopulatorError> {
        let violations = dataset.validate();
        if !violations.is_empty() {
            return Err(SqlitePopulatorError::InvalidDataset(violations));
        }

        let start_time = Instant::now();
        let batch_size = self.batch_size;
        let mut metrics = PopulateMetrics::default();
        let conn = &mut self.conn;

        info!(
            "Loading {} rows (batch size: {})",
            dataset.total_rows(),
            batch_size
        );

        run_wave(conn, "workspace", &mut metrics, |c, m| {
            m.record(insert_table(c, std::slice::from_ref(&dataset.workspace), batch_size)?);
            Ok(())
        })?;

        run_wave(conn, "people", &mut metrics, |c, m| {
            m.record(insert_table(c, &dataset.teams, batch_size)?);
            m.record(insert_table(c, &dataset.users, batch_size)?);
            m.record(insert_table(c, &dataset.team_memberships, batch_size)?);
            Ok(())
        })?;

        run_wave(conn, "projects", &mut metrics, |c, m| {
            m.record(insert_table(c, &dataset.projects, batch_size)?);
            m.record(insert_table(c, &dataset.sections, batch_size)?);
            Ok(())
        })?;

        run_wave(conn, "tasks", &mut metrics, |c, m| {
            let detached: Vec<Task> = dataset.tasks.iter().map(Task::detached).collect();
            m.record(insert_table(c, &detached, batch_size)?);
            Ok(())
        })?;

        run_wave(conn, "parent links", &mut metrics, |c, m| {
            let links = dataset.parent_links();
            m.parent_links += apply_parent_links(c, &links)?;
            debug!("Applied {} parent links", links.len());
            Ok(())
        })?;

        run_wave(conn, "tags", &mut metrics, |c, m| {
            m.record(insert_table(c, &dataset.tags, batch_size)?);
            m.record(insert_table(c, &dataset.task_tags, batch_size)?);
            Ok(())
        })?;

        run_wave(conn, "comments", &mut metrics, |c, m| {
            m.record(insert_table(c, &dataset.comments, batch_size)?);
            Ok(())
        })?;

        run_wave(conn, "custom fields", &mut metrics, |c, m| {
            m.record(insert_table(c, &dataset.custom_fields, batch_size)?);
            m.record(insert_table(c, &dataset.enum_options, batch_size)?);
            m.record(insert_table(c, &dataset.project_custom_fields, batch_size)?);
            m.record(insert_table(c, &dataset.task_field_values, batch_size)?);
            Ok(())
        })?;

        metrics.insert_duration = start_time.elapsed();
        metrics.total_duration = metrics.insert_duration;
        Ok(metrics)
    }

    /// Get the row count for a table.
    pub fn row_count(&self, table_name: &str) -> Result<u64, SqlitePopulatorError> {
        row_count(&self.conn, table_name)
    }

    /// Row counts for every seed table, in dependency order.
    pub fn row_counts(&self) -> Result<Vec<(&'static str, u64)>, SqlitePopulatorError> {
        SEED_TABLES
            .iter()
            .map(|table| Ok((*table, self.row_count(table)?)))
            .collect()
    }

    /// Close the connection, surfacing any error from the final flush.
    pub fn close(self) -> Result<(), SqlitePopulatorError> {
        self.conn.close().map_err(|(_, err)| err.into())
    }
}
