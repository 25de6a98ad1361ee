//! Core data types for the task tracker.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Calendar format for due dates.
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Timestamp format for creation dates.
pub const CREATED_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single to-do record. The id is the key it is stored under.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    /// Short summary of the work
    pub title: String,

    /// Longer free text
    pub description: String,

    /// Day the task is due
    pub due_date: NaiveDate,

    /// Current state
    pub status: Status,

    /// When created, second precision
    #[serde(with = "created_date")]
    pub created_date: NaiveDateTime,
}

/// Task status states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Incomplete,
    Complete,
}

impl Status {
    /// Check if a status transition is valid.
    pub fn can_transition_to(&self, target: &Status) -> bool {
        use Status::*;
        match (self, target) {
            (Incomplete, Complete) => true,

            // Same status = no-op, allowed
            (a, b) if a == b => true,

            _ => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Incomplete => "incomplete",
            Status::Complete => "complete",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation errors for task input.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    EmptyTitle,
    EmptyDescription,
    InvalidDateFormat(String),
    DueDateInPast(NaiveDate),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptyTitle => write!(f, "title cannot be empty"),
            ValidationError::EmptyDescription => write!(f, "description cannot be empty"),
            ValidationError::InvalidDateFormat(input) => {
                write!(f, "invalid date '{}': use YYYY-MM-DD", input)
            }
            ValidationError::DueDateInPast(date) => {
                write!(f, "due date {} is in the past", date.format(DUE_DATE_FORMAT))
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Trim a required text field, rejecting blank input with `err`.
pub(crate) fn require_text(input: &str, err: ValidationError) -> Result<String, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(err);
    }
    Ok(trimmed.to_string())
}

/// Parse a due date and check it is not in the past relative to `now`.
///
/// A due date means "by the end of that day", so today's date is accepted.
pub fn parse_due_date(input: &str, now: NaiveDateTime) -> Result<NaiveDate, ValidationError> {
    let trimmed = input.trim();
    let date = NaiveDate::parse_from_str(trimmed, DUE_DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDateFormat(trimmed.to_string()))?;

    if date < now.date() {
        return Err(ValidationError::DueDateInPast(date));
    }

    Ok(date)
}

/// Serde adapter for `YYYY-MM-DD HH:MM:SS` timestamps.
mod created_date {
    use super::CREATED_DATE_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(CREATED_DATE_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, CREATED_DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}
