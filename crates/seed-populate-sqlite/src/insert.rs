//! Batched INSERT logic for SQLite population.
//!
//! A batch is first inserted in bulk inside a savepoint. If any row violates
//! a constraint the savepoint is rolled back and the rows are replayed one at
//! a time, so the offending row can be reported with its full contents.

use crate::error::SqlitePopulatorError;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, ErrorCode};
use seed_core::{format_date, format_timestamp, ParentLink, Record, SqlValue};
use tracing::{debug, error, warn};

/// Default batch size for INSERT operations.
pub const DEFAULT_BATCH_SIZE: usize = seed_populate::DEFAULT_BATCH_SIZE;

const BULK_SAVEPOINT: &str = "bulk_insert";

/// How a batch made it into the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOutcome {
    /// Every row went in through the bulk path.
    Inserted(u64),
    /// The bulk path hit a constraint violation; every row then succeeded
    /// individually.
    Recovered(u64),
}

impl BatchOutcome {
    pub fn rows(&self) -> u64 {
        match self {
            BatchOutcome::Inserted(n) | BatchOutcome::Recovered(n) => *n,
        }
    }
}

/// Totals for one table written in several batches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableStats {
    pub rows: u64,
    pub batches: u64,
    pub fallbacks: u64,
}

/// Generate the single-row INSERT statement for a record type.
pub fn insert_sql<R: Record>() -> String {
    let columns = R::COLUMNS
        .iter()
        .map(|c| format!("\"{c}\""))
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = (1..=R::COLUMNS.len())
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO \"{}\" ({}) VALUES ({})",
        R::TABLE,
        columns,
        placeholders
    )
}

/// Convert a column value to its SQLite storage form.
pub fn to_sqlite_value(value: SqlValue) -> Value {
    match value {
        SqlValue::Null => Value::Null,
        SqlValue::Bool(b) => Value::Integer(i64::from(b)),
        SqlValue::Int64(i) => Value::Integer(i),
        SqlValue::Float64(f) => Value::Real(f),
        SqlValue::Text(s) => Value::Text(s),
        SqlValue::Id(id) => Value::Text(id.to_string()),
        SqlValue::Timestamp(ts) => Value::Text(format_timestamp(&ts)),
        SqlValue::Date(d) => Value::Text(format_date(&d)),
    }
}

fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    err.sqlite_error_code() == Some(ErrorCode::ConstraintViolation)
}

/// Insert a single row.
pub fn insert_single<R: Record>(conn: &Connection, row: &R) -> Result<(), rusqlite::Error> {
    let mut stmt = conn.prepare_cached(&insert_sql::<R>())?;
    stmt.execute(params_from_iter(row.values().into_iter().map(to_sqlite_value)))?;
    Ok(())
}

fn insert_bulk<R: Record>(conn: &Connection, rows: &[R]) -> Result<(), rusqlite::Error> {
    let mut stmt = conn.prepare_cached(&insert_sql::<R>())?;
    for row in rows {
        stmt.execute(params_from_iter(row.values().into_iter().map(to_sqlite_value)))?;
    }
    Ok(())
}

/// Undo a failed bulk attempt.
///
/// If the rollback itself fails, the error keeps the bulk failure that
/// triggered it.
fn rollback_bulk(
    conn: &Connection,
    table: &'static str,
    bulk: &rusqlite::Error,
) -> Result<(), SqlitePopulatorError> {
    debug!("Rolling back bulk insert into '{}': {}", table, bulk);
    conn.execute_batch(&format!(
        "ROLLBACK TO {BULK_SAVEPOINT}; RELEASE {BULK_SAVEPOINT}"
    ))
    .map_err(|cause| {
        error!(
            "Rollback of bulk insert into '{}' failed: {} (bulk error: {})",
            table, cause, bulk
        );
        SqlitePopulatorError::RollbackFailed {
            table,
            bulk: bulk.to_string(),
            cause,
        }
    })
}

/// Insert a batch of rows into the record's table.
///
/// On a constraint violation the bulk attempt leaves nothing behind and the
/// rows are retried in order. The first row that still fails ends the batch
/// with [`SqlitePopulatorError::RowRejected`]; rows before it stay inserted
/// in the caller's transaction. Any other error is returned as-is.
pub fn insert_batch<R: Record>(
    conn: &Connection,
    rows: &[R],
) -> Result<BatchOutcome, SqlitePopulatorError> {
    if rows.is_empty() {
        return Ok(BatchOutcome::Inserted(0));
    }

    conn.execute_batch(&format!("SAVEPOINT {BULK_SAVEPOINT}"))?;
    let bulk = insert_bulk(conn, rows);
    match &bulk {
        Ok(()) => conn.execute_batch(&format!("RELEASE {BULK_SAVEPOINT}"))?,
        Err(err) => rollback_bulk(conn, R::TABLE, err)?,
    }

    match bulk {
        Ok(()) => Ok(BatchOutcome::Inserted(rows.len() as u64)),
        Err(err) if is_constraint_violation(&err) => {
            warn!(
                "Bulk insert into '{}' failed ({}); retrying {} rows individually",
                R::TABLE,
                err,
                rows.len()
            );
            for (index, row) in rows.iter().enumerate() {
                if let Err(cause) = insert_single(conn, row) {
                    let rendered = row.describe();
                    error!(
                        "Row {} rejected by '{}': {} (row: {})",
                        index,
                        R::TABLE,
                        cause,
                        rendered
                    );
                    return Err(SqlitePopulatorError::RowRejected {
                        table: R::TABLE,
                        index,
                        row: rendered,
                        cause,
                    });
                }
            }
            Ok(BatchOutcome::Recovered(rows.len() as u64))
        }
        Err(err) => Err(err.into()),
    }
}

/// Insert every row of a table in batches of `batch_size`.
///
/// A rejected row's index is reported relative to the whole table.
pub fn insert_table<R: Record>(
    conn: &Connection,
    rows: &[R],
    batch_size: usize,
) -> Result<TableStats, SqlitePopulatorError> {
    let mut stats = TableStats::default();
    for (chunk_index, chunk) in rows.chunks(batch_size.max(1)).enumerate() {
        let offset = chunk_index * batch_size.max(1);
        let outcome = insert_batch(conn, chunk).map_err(|err| match err {
            SqlitePopulatorError::RowRejected {
                table,
                index,
                row,
                cause,
            } => SqlitePopulatorError::RowRejected {
                table,
                index: offset + index,
                row,
                cause,
            },
            other => other,
        })?;

        stats.rows += outcome.rows();
        stats.batches += 1;
        if matches!(outcome, BatchOutcome::Recovered(_)) {
            stats.fallbacks += 1;
        }
        debug!(
            "Batch {} of '{}' complete: {} rows",
            stats.batches,
            R::TABLE,
            outcome.rows()
        );
    }
    Ok(stats)
}

/// Point each linked task at its parent.
///
/// Both rows must already be stored; a link whose task row is missing fails
/// with [`SqlitePopulatorError::MissingTask`].
pub fn apply_parent_links(
    conn: &Connection,
    links: &[ParentLink],
) -> Result<u64, SqlitePopulatorError> {
    let mut stmt =
        conn.prepare_cached("UPDATE \"tasks\" SET \"parent_task_id\" = ?1 WHERE \"task_id\" = ?2")?;
    for link in links {
        let changed = stmt.execute([
            link.parent_task_id.to_string(),
            link.task_id.to_string(),
        ])?;
        if changed == 0 {
            return Err(SqlitePopulatorError::MissingTask(link.task_id));
        }
    }
    Ok(links.len() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use seed_core::Id;
    use uuid::Uuid;

    struct Account {
        id: u128,
        email: &'static str,
    }

    impl Record for Account {
        const TABLE: &'static str = "accounts";
        const COLUMNS: &'static [&'static str] = &["id", "email"];

        fn values(&self) -> Vec<SqlValue> {
            vec![
                Id::from_uuid(Uuid::from_u128(self.id)).into(),
                self.email.into(),
            ]
        }
    }

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE accounts (id TEXT PRIMARY KEY, email TEXT NOT NULL UNIQUE)",
        )
        .unwrap();
        conn
    }

    fn count(conn: &Connection) -> i64 {
        conn.query_row("SELECT COUNT(*) FROM accounts", [], |r| r.get(0))
            .unwrap()
    }

    fn accounts(emails: &[&'static str]) -> Vec<Account> {
        emails
            .iter()
            .enumerate()
            .map(|(i, email)| Account {
                id: i as u128 + 1,
                email,
            })
            .collect()
    }

    #[test]
    fn test_insert_sql() {
        assert_eq!(
            insert_sql::<Account>(),
            "INSERT INTO \"accounts\" (\"id\", \"email\") VALUES (?1, ?2)"
        );
    }

    #[test]
    fn test_empty_batch_is_noop() {
        let conn = conn();
        let rows: Vec<Account> = Vec::new();
        assert_eq!(insert_batch(&conn, &rows).unwrap(), BatchOutcome::Inserted(0));
        assert_eq!(count(&conn), 0);
    }

    #[test]
    fn test_bulk_path() {
        let conn = conn();
        let rows = accounts(&["a@x.test", "b@x.test", "c@x.test"]);
        assert_eq!(insert_batch(&conn, &rows).unwrap(), BatchOutcome::Inserted(3));
        assert_eq!(count(&conn), 3);
    }

    #[test]
    fn test_duplicate_email_keeps_preceding_rows() {
        let conn = conn();
        let rows = accounts(&["a@x.test", "b@x.test", "a@x.test", "d@x.test"]);

        let err = insert_batch(&conn, &rows).unwrap_err();
        match err {
            SqlitePopulatorError::RowRejected {
                table, index, row, ..
            } => {
                assert_eq!(table, "accounts");
                assert_eq!(index, 2);
                assert!(row.contains("\"email\":\"a@x.test\""));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(count(&conn), 2);
    }

    #[test]
    fn test_failed_rollback_keeps_bulk_error() {
        let conn = conn();
        let bulk = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE),
            Some("UNIQUE constraint failed: accounts.email".to_string()),
        );

        // No savepoint is open, so the rollback fails.
        let err = rollback_bulk(&conn, "accounts", &bulk).unwrap_err();
        match &err {
            SqlitePopulatorError::RollbackFailed { table, bulk, .. } => {
                assert_eq!(*table, "accounts");
                assert!(bulk.contains("accounts.email"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("accounts.email"));
    }

    #[test]
    fn test_non_constraint_error_propagates() {
        let conn = Connection::open_in_memory().unwrap();
        let rows = accounts(&["a@x.test"]);
        let err = insert_batch(&conn, &rows).unwrap_err();
        assert!(matches!(err, SqlitePopulatorError::Sqlite(_)));
    }

    #[test]
    fn test_insert_table_reports_table_wide_index() {
        let conn = conn();
        let rows = accounts(&["a@x.test", "b@x.test", "c@x.test", "a@x.test"]);

        let err = insert_table(&conn, &rows, 2).unwrap_err();
        assert!(matches!(
            err,
            SqlitePopulatorError::RowRejected { index: 3, .. }
        ));
        assert_eq!(count(&conn), 3);
    }

    #[test]
    fn test_insert_table_counts_batches() {
        let conn = conn();
        let rows = accounts(&["a@x.test", "b@x.test", "c@x.test"]);
        let stats = insert_table(&conn, &rows, 2).unwrap();
        assert_eq!(
            stats,
            TableStats {
                rows: 3,
                batches: 2,
                fallbacks: 0
            }
        );
    }

    #[test]
    fn test_to_sqlite_value() {
        assert_eq!(to_sqlite_value(SqlValue::Bool(true)), Value::Integer(1));
        assert_eq!(to_sqlite_value(SqlValue::Null), Value::Null);
        assert_eq!(
            to_sqlite_value(SqlValue::Id(Id::from_uuid(Uuid::nil()))),
            Value::Text("00000000-0000-0000-0000-000000000000".to_string())
        );
    }
}
