//! Data rows returned by the values query.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{format_wire_timestamp, parse_wire_timestamp};

/// A single reading: timestamp, measured value and quality code.
///
/// Real exports contain rows whose value or quality field is blank, so
/// both are optional.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Row {
    /// Timestamp of the reading (UTC).
    pub timestamp: DateTime<Utc>,
    /// Measured value, absent for gap records.
    pub value: Option<f64>,
    /// Quality code assigned by the provider.
    pub quality_code: Option<i32>,
}

impl Row {
    /// Creates a new row.
    #[must_use]
    pub const fn new(
        timestamp: DateTime<Utc>,
        value: Option<f64>,
        quality_code: Option<i32>,
    ) -> Self {
        Self {
            timestamp,
            value,
            quality_code,
        }
    }

    /// Parses one `timestamp,value,quality` line.
    ///
    /// Fields beyond the third are ignored; blank value and quality
    /// fields parse as `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the line has fewer than three fields or any
    /// field is unparsable.
    pub fn parse(line: &str) -> Result<Self, RowParseError> {
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() < 3 {
            return Err(RowParseError::MissingFields(line.to_string()));
        }

        let timestamp = parse_wire_timestamp(fields[0])
            .map_err(|_| RowParseError::Timestamp(fields[0].to_string()))?;
        let value = match fields[1] {
            "" => None,
            s => Some(s.parse().map_err(|_| RowParseError::Value(s.to_string()))?),
        };
        let quality_code = match fields[2].trim() {
            "" => None,
            s => Some(s.parse().map_err(|_| RowParseError::Quality(s.to_string()))?),
        };

        Ok(Self::new(timestamp, value, quality_code))
    }
}

impl std::fmt::Display for Row {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},", format_wire_timestamp(self.timestamp))?;
        if let Some(value) = self.value {
            write!(f, "{value}")?;
        }
        write!(f, ",")?;
        if let Some(quality) = self.quality_code {
            write!(f, "{quality}")?;
        }
        Ok(())
    }
}

/// Errors from parsing a data row line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowParseError {
    /// The line does not have the three expected fields.
    #[error("Row '{0}' does not have timestamp,value,quality fields")]
    MissingFields(String),

    /// The timestamp field is unparsable.
    #[error("Invalid row timestamp '{0}'")]
    Timestamp(String),

    /// The value field is unparsable.
    #[error("Invalid row value '{0}'")]
    Value(String),

    /// The quality code field is unparsable.
    #[error("Invalid quality code '{0}'")]
    Quality(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_row_parse() {
        let row = Row::parse("2020-01-01T00:15:00.000Z,1.234,0").unwrap();

        assert_eq!(
            row.timestamp,
            Utc.with_ymd_and_hms(2020, 1, 1, 0, 15, 0).unwrap()
        );
        assert_eq!(row.value, Some(1.234));
        assert_eq!(row.quality_code, Some(0));
    }

    #[test]
    fn test_row_parse_blank_value_and_quality() {
        let row = Row::parse("2020-01-01T00:15:00.000Z,,").unwrap();

        assert_eq!(row.value, None);
        assert_eq!(row.quality_code, None);
    }

    #[test]
    fn test_row_parse_extra_fields_ignored() {
        let row = Row::parse("2020-01-01T00:15:00.000Z,1.0,40,extra").unwrap();
        assert_eq!(row.quality_code, Some(40));
    }

    #[test]
    fn test_row_parse_rejects_short_line() {
        assert!(matches!(
            Row::parse("2020-01-01T00:15:00.000Z,1.0"),
            Err(RowParseError::MissingFields(_))
        ));
    }

    #[test]
    fn test_row_parse_rejects_bad_timestamp() {
        assert!(matches!(
            Row::parse("yesterday,1.0,0"),
            Err(RowParseError::Timestamp(_))
        ));
    }

    #[test]
    fn test_row_parse_rejects_bad_value() {
        assert!(matches!(
            Row::parse("2020-01-01T00:15:00.000Z,high,0"),
            Err(RowParseError::Value(_))
        ));
    }

    #[test]
    fn test_row_display_round_trips() {
        let line = "2020-01-01T00:15:00.000Z,1.234,0";
        let row = Row::parse(line).unwrap();
        assert_eq!(row.to_string(), line);

        let gap = "2020-01-01T00:15:00.000Z,,";
        assert_eq!(Row::parse(gap).unwrap().to_string(), gap);
    }
}
