//! The row abstraction consumed by populators.

use crate::values::SqlValue;

/// A row that knows its target table and can expose its columns.
///
/// `COLUMNS` and [`values`](Record::values) must line up: the i-th value
/// belongs to the i-th column. Populators rely on this to build a single
/// prepared statement per table.
pub trait Record {
    /// Target table name.
    const TABLE: &'static str;

    /// Column names, in the order `values` yields them.
    const COLUMNS: &'static [&'static str];

    /// Column values, in `COLUMNS` order.
    fn values(&self) -> Vec<SqlValue>;

    /// Render the full row as a JSON object for diagnostics.
    fn describe(&self) -> String {
        describe_row(Self::COLUMNS, &self.values())
    }
}

/// Render column/value pairs as a JSON object, preserving column order.
pub fn describe_row(columns: &[&str], values: &[SqlValue]) -> String {
    let pairs: Vec<String> = columns
        .iter()
        .zip(values)
        .map(|(column, value)| {
            format!(
                "{}:{}",
                serde_json::Value::String((*column).to_string()),
                value.to_json()
            )
        })
        .collect();
    format!("{{{}}}", pairs.join(","))
}
