//! Error types for store operations.

use thiserror::Error;

/// Errors surfaced by room, schedule, and maintenance store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A required field was empty
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Capacity was zero, negative, or not a number
    #[error("Capacity must be a positive number")]
    BadCapacity,

    /// Room name collides with an existing room
    #[error("A room named {name} already exists")]
    DuplicateName { name: String },

    /// Day string is not one of the seven weekday names
    #[error("Unrecognized day of week: {raw}")]
    BadDay { raw: String },

    /// Time string did not parse as H:MM AM/PM
    #[error("Could not parse {which} time: {raw}")]
    BadTime { which: &'static str, raw: String },

    /// Start time was not strictly before end time
    #[error("End time must be after start time")]
    InvalidInterval,

    /// Requested interval overlaps an existing entry on the same room/day
    #[error("Conflict with {subject} ({start} - {end})")]
    Conflict {
        subject: String,
        start: String,
        end: String,
    },

    /// Manual status value is not administrator-settable
    #[error("{raw} is not a settable room status")]
    BadStatus { raw: String },

    /// Addressed row does not exist
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: i64 },

    /// Underlying SQLite failure
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),
}

impl StoreError {
    /// Returns true if this error is a caller-input problem (bad field,
    /// bad time, bad day) rather than a conflict or storage fault.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            StoreError::MissingField(_)
                | StoreError::BadCapacity
                | StoreError::DuplicateName { .. }
                | StoreError::BadDay { .. }
                | StoreError::BadTime { .. }
                | StoreError::InvalidInterval
                | StoreError::BadStatus { .. }
        )
    }

    /// Returns true if this error is an interval conflict.
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict { .. })
    }

    /// Returns true if this error addressed a missing row.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}
