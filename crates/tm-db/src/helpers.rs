//! Row-to-entity parsing helpers.
//!
//! Every repo needs to convert `libsql::Row` (column-indexed) into typed entity
//! structs. These helpers isolate the parsing logic and handle the dual datetime
//! format issue (`SQLite`'s `datetime('now')` vs Rust's `to_rfc3339()`).

use chrono::{DateTime, Utc};
use tm_core::data_spec::DataSpecification;

use crate::error::DatabaseError;

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// Handles both RFC 3339 (`"2026-02-09T14:30:00+00:00"`) and `SQLite`'s default
/// format (`"2026-02-09 14:30:00"`).
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string cannot be parsed as either format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Parse a TEXT column into a serde-deserializable enum.
///
/// Works with all tm-core enums, which serialize as their upper-case names.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string does not match any enum variant.
pub fn parse_enum<T: serde::de::DeserializeOwned>(s: &str) -> Result<T, DatabaseError> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|e| DatabaseError::Query(format!("Failed to parse enum from '{s}': {e}")))
}

/// Parse a nullable TEXT column into an optional enum.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if a non-empty string matches no variant.
pub fn parse_optional_enum<T: serde::de::DeserializeOwned>(
    s: Option<&str>,
) -> Result<Option<T>, DatabaseError> {
    match s {
        Some(s) if !s.is_empty() => Ok(Some(parse_enum(s)?)),
        _ => Ok(None),
    }
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
/// You must use `get::<Option<String>>()` for nullable columns.
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

/// Rebuild a `DataSpecification` from its stored JSON.
///
/// The value is re-validated on every read. An empty column means no filter.
///
/// # Errors
///
/// Returns `DatabaseError::InvalidState` if the JSON is malformed or no longer
/// passes validation.
pub fn parse_data_spec(s: &str) -> Result<DataSpecification, DatabaseError> {
    if s.trim().is_empty() {
        return Ok(DataSpecification::default());
    }
    serde_json::from_str(s)
        .map_err(|e| DatabaseError::InvalidState(format!("Stored data specification rejected: {e}")))
}

/// Serialize a `DataSpecification` for storage.
///
/// # Errors
///
/// Returns `DatabaseError::Other` if serialization fails.
pub fn data_spec_to_json(spec: &DataSpecification) -> Result<String, DatabaseError> {
    serde_json::to_string(spec).map_err(|e| DatabaseError::Other(e.into()))
}
