//! Calendar dates on the wire
//!
//! Date pickers work with `{year, month, day}` structs; the backend expects
//! `YYYY-MM-DD` strings and sends either that or an ISO timestamp back.
//! Values are calendar dates, never instants: no timezone conversion happens
//! in either direction.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{AppError, AppResult};

/// Structured calendar date as produced by a date picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WireDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl WireDate {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    /// Today's local calendar date (default issue/return/stock date)
    pub fn today() -> Self {
        chrono::Local::now().date_naive().into()
    }

    /// Whether the struct names a real calendar day
    pub fn is_valid(&self) -> bool {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day).is_some()
    }
}

impl From<NaiveDate> for WireDate {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }
}

impl fmt::Display for WireDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// A date field as it may be held by a form: a picked struct, raw text
/// (already in wire form or straight from the backend), or nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum DateInput {
    Picked(WireDate),
    Text(String),
    #[default]
    Empty,
}

impl From<WireDate> for DateInput {
    fn from(date: WireDate) -> Self {
        Self::Picked(date)
    }
}

/// Format a date for the backend
///
/// Structs are zero padded to `YYYY-MM-DD`; text is passed through
/// unchanged; an empty input yields an empty string.
pub fn to_wire_date(input: &DateInput) -> String {
    match input {
        DateInput::Picked(date) => date.to_string(),
        DateInput::Text(text) => text.clone(),
        DateInput::Empty => String::new(),
    }
}

/// Parse a backend date into a struct
///
/// Accepts plain `YYYY-MM-DD` (split directly) as well as RFC 3339
/// timestamps and `YYYY-MM-DD HH:MM:SS`; for timestamps the calendar date
/// as written is kept.
pub fn from_wire_date(input: &str) -> AppResult<WireDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AppError::invalid_date(input));
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date.into());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.date_naive().into());
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Ok(dt.date().into());
        }
    }

    Err(AppError::invalid_date(input))
}

/// Optional variant used when loading records: empty or missing → `None`
pub fn from_optional_wire_date(input: Option<&str>) -> AppResult<Option<WireDate>> {
    match input.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => from_wire_date(s).map(Some),
    }
}
