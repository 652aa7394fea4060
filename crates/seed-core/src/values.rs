//! Value representations for the workspace-seed generator.
//!
//! This module defines the identifier type shared by every entity and the
//! store-agnostic column value produced by [`Record`](crate::Record)
//! implementations.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Timestamps are always whole seconds in UTC.
pub type Timestamp = DateTime<Utc>;

/// Opaque, globally unique entity identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(Uuid);

impl Id {
    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Render a timestamp with second precision (`2024-05-01T12:30:00+00:00`).
pub fn format_timestamp(ts: &Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// Render a date without a time component (`2024-05-01`).
pub fn format_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// A single column value, before conversion to a store-specific type.
///
/// `SqlValue` is what [`Record::values`](crate::Record::values) yields for
/// each column. Populators convert it into their driver's native value type.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// Null value
    Null,

    /// Boolean value
    Bool(bool),

    /// 64-bit signed integer
    Int64(i64),

    /// 64-bit floating point
    Float64(f64),

    /// String value
    Text(String),

    /// Entity identifier
    Id(Id),

    /// Date/time in UTC
    Timestamp(Timestamp),

    /// Calendar date
    Date(NaiveDate),
}

impl SqlValue {
    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Render the value as JSON for diagnostics.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Null => serde_json::Value::Null,
            Self::Bool(b) => serde_json::Value::Bool(*b),
            Self::Int64(i) => serde_json::Value::from(*i),
            Self::Float64(f) => serde_json::Value::from(*f),
            Self::Text(s) => serde_json::Value::String(s.clone()),
            Self::Id(id) => serde_json::Value::String(id.to_string()),
            Self::Timestamp(ts) => serde_json::Value::String(format_timestamp(ts)),
            Self::Date(d) => serde_json::Value::String(format_date(d)),
        }
    }
}

impl From<Id> for SqlValue {
    fn from(id: Id) -> Self {
        Self::Id(id)
    }
}

impl From<bool> for SqlValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for SqlValue {
    fn from(i: i64) -> Self {
        Self::Int64(i)
    }
}

impl From<u32> for SqlValue {
    fn from(i: u32) -> Self {
        Self::Int64(i64::from(i))
    }
}

impl From<f64> for SqlValue {
    fn from(f: f64) -> Self {
        Self::Float64(f)
    }
}

impl From<String> for SqlValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for SqlValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<Timestamp> for SqlValue {
    fn from(ts: Timestamp) -> Self {
        Self::Timestamp(ts)
    }
}

impl From<NaiveDate> for SqlValue {
    fn from(d: NaiveDate) -> Self {
        Self::Date(d)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timestamp_renders_to_seconds() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        assert_eq!(format_timestamp(&ts), "2024-05-01T12:30:00+00:00");
    }

    #[test]
    fn test_date_renders_without_time() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(format_date(&date), "2024-02-29");
    }

    #[test]
    fn test_option_conversion() {
        let none: Option<String> = None;
        assert!(SqlValue::from(none).is_null());
        assert_eq!(
            SqlValue::from(Some("P1")),
            SqlValue::Text("P1".to_string())
        );
    }

    #[test]
    fn test_to_json() {
        let id = Id::from_uuid(Uuid::nil());
        assert_eq!(
            SqlValue::Id(id).to_json(),
            serde_json::json!("00000000-0000-0000-0000-000000000000")
        );
        assert_eq!(SqlValue::Bool(true).to_json(), serde_json::json!(true));
        assert_eq!(SqlValue::Null.to_json(), serde_json::Value::Null);
    }
}
