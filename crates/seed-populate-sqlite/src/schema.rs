//! DDL for the seed tables.

use crate::error::SqlitePopulatorError;
use rusqlite::Connection;
use tracing::{debug, info};

/// The full schema, applied with `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA_SQL: &str = include_str!("../schema.sql");

/// Every seed table, parents before children.
pub const SEED_TABLES: [&str; 14] = [
    "workspaces",
    "teams",
    "users",
    "team_memberships",
    "projects",
    "sections",
    "tasks",
    "tags",
    "task_tags",
    "comments",
    "custom_field_definitions",
    "custom_field_enum_options",
    "project_custom_fields",
    "task_custom_field_values",
];

/// Create any missing seed tables and indexes.
pub fn apply_schema(conn: &Connection) -> Result<(), SqlitePopulatorError> {
    info!("Applying schema ({} tables)", SEED_TABLES.len());
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

/// Generate DROP TABLE statement.
pub fn generate_drop_table(table_name: &str) -> String {
    format!("DROP TABLE IF EXISTS \"{table_name}\"")
}

/// Drop every seed table, children first.
pub fn drop_seed_tables(conn: &Connection) -> Result<(), SqlitePopulatorError> {
    conn.pragma_update(None, "foreign_keys", false)?;
    let dropped = SEED_TABLES.iter().rev().try_for_each(|table| {
        debug!("Dropping table: {}", table);
        conn.execute_batch(&generate_drop_table(table))
    });
    conn.pragma_update(None, "foreign_keys", true)?;
    dropped?;
    info!("Dropped {} seed tables", SEED_TABLES.len());
    Ok(())
}

/// Get the row count for a table.
pub fn row_count(conn: &Connection, table_name: &str) -> Result<u64, SqlitePopulatorError> {
    let sql = format!("SELECT COUNT(*) FROM \"{table_name}\"");
    let count: i64 = conn.query_row(&sql, [], |row| row.get(0))?;
    Ok(count.max(0) as u64)
}

/// The first seed table (in dependency order) that already holds rows.
pub fn first_non_empty_table(
    conn: &Connection,
) -> Result<Option<&'static str>, SqlitePopulatorError> {
    for table in SEED_TABLES {
        if row_count(conn, table)? > 0 {
            return Ok(Some(table));
        }
    }
    Ok(None)
}
