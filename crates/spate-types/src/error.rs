//! Error types for spate.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::{DateRange, RowParseError};

/// Result type alias for spate operations.
pub type Result<T> = std::result::Result<T, SpateError>;

/// Errors that can occur during a windowed download.
#[derive(Error, Debug)]
pub enum SpateError {
    /// Credential exchange failed or produced no usable token.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// The API reported that the daily request quota is spent.
    #[error("Credit limit exceeded: {0}")]
    QuotaExceeded(String),

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Transport(String),

    /// Invalid or unusable date range.
    #[error(transparent)]
    DateRange(#[from] DateRangeError),

    /// A data row could not be parsed.
    #[error(transparent)]
    Row(#[from] RowParseError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors for invalid or unusable date ranges.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateRangeError {
    /// Start timestamp is after end timestamp.
    #[error("Invalid date range: {start} > {end}")]
    InvalidRange {
        /// The start timestamp.
        start: DateTime<Utc>,
        /// The end timestamp.
        end: DateTime<Utc>,
    },

    /// The requested range does not overlap the period of record.
    #[error("Requested range {requested} does not overlap the period of record {coverage}")]
    EmptyClamp {
        /// The range that was requested.
        requested: DateRange,
        /// The period of record it was clamped against.
        coverage: DateRange,
    },

    /// A timestamp could not be parsed.
    #[error("Unparsable timestamp '{0}', expected YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS.000Z")]
    UnparsableTimestamp(String),
}
