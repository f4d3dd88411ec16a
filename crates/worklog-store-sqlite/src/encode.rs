//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as fixed-width RFC 3339 UTC strings so that they sort
//! lexicographically. Calendar dates are stored as `YYYY-MM-DD`.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rusqlite::{Row, types::{Type, Value}};
use worklog_core::work::DATE_FORMAT;

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
  DateTime::parse_from_rfc3339(s).map(|dt| dt.with_timezone(&Utc))
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate, chrono::ParseError> {
  NaiveDate::parse_from_str(s, DATE_FORMAT)
}

// ─── Column values ───────────────────────────────────────────────────────────

pub fn text(s: &str) -> Value { Value::Text(s.to_owned()) }

pub fn opt_text(s: Option<&str>) -> Value {
  s.map_or(Value::Null, text)
}

pub fn dt_value(dt: DateTime<Utc>) -> Value { Value::Text(encode_dt(dt)) }

/// Read a timestamp column, reporting a bad value as a conversion failure.
pub fn column_dt(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
  let raw: String = row.get(idx)?;
  decode_dt(&raw).map_err(|e| conversion_failure(idx, e))
}

/// Read a calendar date column.
pub fn column_date(row: &Row<'_>, idx: usize) -> rusqlite::Result<NaiveDate> {
  let raw: String = row.get(idx)?;
  decode_date(&raw).map_err(|e| conversion_failure(idx, e))
}

fn conversion_failure(idx: usize, e: chrono::ParseError) -> rusqlite::Error {
  rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
}
