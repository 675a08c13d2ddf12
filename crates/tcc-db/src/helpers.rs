//! Row-to-entity parsing helpers and the timestamp format.
//!
//! Repos read `libsql::Row` by column index; these helpers cover the column
//! shapes that need conversion (timestamps, enums, nullable text/real,
//! integer booleans).

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::DatabaseError;

/// Format a timestamp for storage: `2026-03-01T09:15:02.123456Z`.
///
/// Fixed width, so `ORDER BY created_at` sorts chronologically.
#[must_use]
pub fn fmt_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// Accepts RFC 3339 and `SQLite`'s `datetime('now')` format.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string matches neither format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// # Errors
///
/// Returns `DatabaseError::Query` if a non-empty string cannot be parsed.
pub fn parse_optional_datetime(s: Option<&str>) -> Result<Option<DateTime<Utc>>, DatabaseError> {
    match s {
        Some(s) if !s.is_empty() => Ok(Some(parse_datetime(s)?)),
        _ => Ok(None),
    }
}

/// Parse a TEXT column into a `snake_case` serde enum from tcc-core.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string does not match any variant.
pub fn parse_enum<T: serde::de::DeserializeOwned>(s: &str) -> Result<T, DatabaseError> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|e| DatabaseError::Query(format!("Failed to parse enum from '{s}': {e}")))
}

/// Read a nullable TEXT column. SQL NULL and `""` both become `None`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Read a nullable REAL column.
///
/// # Errors
///
/// Returns `DatabaseError` if the column holds something other than a number or NULL.
pub fn get_opt_f64(row: &libsql::Row, idx: i32) -> Result<Option<f64>, DatabaseError> {
    match row.get_value(idx)? {
        libsql::Value::Null => Ok(None),
        libsql::Value::Real(v) => Ok(Some(v)),
        #[allow(clippy::cast_precision_loss)]
        libsql::Value::Integer(v) => Ok(Some(v as f64)),
        other => Err(DatabaseError::Query(format!(
            "expected REAL in column {idx}, got {other:?}"
        ))),
    }
}

/// Read an INTEGER 0/1 column as `bool`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_bool(row: &libsql::Row, idx: i32) -> Result<bool, DatabaseError> {
    Ok(row.get::<i64>(idx)? != 0)
}

/// Read a `COUNT(*)` result.
///
/// # Errors
///
/// Returns `DatabaseError::InvalidState` for a negative count.
pub fn get_count(row: &libsql::Row, idx: i32) -> Result<u64, DatabaseError> {
    let n = row.get::<i64>(idx)?;
    u64::try_from(n).map_err(|_| DatabaseError::InvalidState(format!("negative count {n}")))
}

/// Optional text as a bindable value (`NULL` for `None`).
pub fn opt_text(value: Option<&str>) -> libsql::Value {
    value.map_or(libsql::Value::Null, |s| libsql::Value::Text(s.to_string()))
}

/// Optional real as a bindable value (`NULL` for `None`).
pub fn opt_real(value: Option<f64>) -> libsql::Value {
    value.map_or(libsql::Value::Null, libsql::Value::Real)
}

/// Whether a libSQL error is a UNIQUE constraint violation.
#[must_use]
pub fn is_unique_violation(err: &libsql::Error) -> bool {
    err.to_string().contains("UNIQUE constraint failed")
}
