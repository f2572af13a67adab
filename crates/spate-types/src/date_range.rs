//! Date ranges and calendar-aware timestamp arithmetic.

use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::DateRangeError;

/// Timestamp format used on the wire (`2020-01-31T09:15:00.000Z`).
pub const WIRE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Highest year a timestamp may carry after calendar arithmetic.
///
/// Month and year additions that would pass it are clamped here instead
/// of failing.
pub const MAX_YEAR: i32 = 9999;

/// A closed interval of UTC timestamps.
///
/// Both endpoints are inclusive; a range may be a single instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// Start timestamp (inclusive).
    pub start: DateTime<Utc>,
    /// End timestamp (inclusive).
    pub end: DateTime<Utc>,
}

impl DateRange {
    /// Creates a new range, validating that start <= end.
    ///
    /// # Errors
    ///
    /// Returns an error if start > end.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, DateRangeError> {
        if start > end {
            return Err(DateRangeError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parses a range from two `YYYY-MM-DD` dates or full wire timestamps.
    ///
    /// # Errors
    ///
    /// Returns an error if either endpoint is unparsable or start > end.
    pub fn parse(start: &str, end: &str) -> Result<Self, DateRangeError> {
        Self::new(parse_date_or_timestamp(start)?, parse_date_or_timestamp(end)?)
    }

    /// Intersects this range with a period of record.
    ///
    /// Endpoints outside `coverage` are pulled in to its bounds.
    ///
    /// # Errors
    ///
    /// Returns an error if the two ranges do not overlap at all.
    pub fn clamp_to(&self, coverage: &Self) -> Result<Self, DateRangeError> {
        let start = self.start.max(coverage.start);
        let end = self.end.min(coverage.end);
        if start > end {
            return Err(DateRangeError::EmptyClamp {
                requested: *self,
                coverage: *coverage,
            });
        }
        Ok(Self { start, end })
    }

    /// Returns true if the range contains the given instant.
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} to {}",
            format_wire_timestamp(self.start),
            format_wire_timestamp(self.end)
        )
    }
}

/// Formats a timestamp in the wire format.
#[must_use]
pub fn format_wire_timestamp(instant: DateTime<Utc>) -> String {
    instant.format(WIRE_TIME_FORMAT).to_string()
}

/// Parses a wire-format timestamp.
///
/// # Errors
///
/// Returns an error if the input does not match [`WIRE_TIME_FORMAT`].
pub fn parse_wire_timestamp(input: &str) -> Result<DateTime<Utc>, DateRangeError> {
    NaiveDateTime::parse_from_str(input, WIRE_TIME_FORMAT)
        .map(|naive| Utc.from_utc_datetime(&naive))
        .map_err(|_| DateRangeError::UnparsableTimestamp(input.to_string()))
}

/// Parses either a `YYYY-MM-DD` date (taken as midnight UTC) or a full
/// wire-format timestamp.
///
/// # Errors
///
/// Returns an error if the input matches neither form.
pub fn parse_date_or_timestamp(input: &str) -> Result<DateTime<Utc>, DateRangeError> {
    if let Ok(naive) = NaiveDateTime::parse_from_str(input, WIRE_TIME_FORMAT) {
        return Ok(Utc.from_utc_datetime(&naive));
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)));
    }
    Err(DateRangeError::UnparsableTimestamp(input.to_string()))
}

/// Adds calendar months, clamping the day to the target month's length
/// and the year to [`MAX_YEAR`].
///
/// `2021-01-31 + 1 month` is `2021-02-28`. An addition that would land
/// past year 9999 lands on the same month and day in year 9999 instead.
#[must_use]
pub fn add_months_clamped(instant: DateTime<Utc>, months: u32) -> DateTime<Utc> {
    match instant.checked_add_months(Months::new(months)) {
        Some(result) if result.year() <= MAX_YEAR => result,
        _ => clamp_to_year(instant, MAX_YEAR),
    }
}

/// Adds calendar years with the same clamping rules as
/// [`add_months_clamped`].
#[must_use]
pub fn add_years_clamped(instant: DateTime<Utc>, years: u32) -> DateTime<Utc> {
    years.checked_mul(12).map_or_else(
        || clamp_to_year(instant, MAX_YEAR),
        |months| add_months_clamped(instant, months),
    )
}

/// Moves a timestamp to the given year, keeping month, day and time of
/// day. February 29th collapses to the 28th when the target year is not
/// a leap year.
#[must_use]
pub fn clamp_to_year(instant: DateTime<Utc>, year: i32) -> DateTime<Utc> {
    instant
        .with_year(year)
        .or_else(|| instant.with_day(28).and_then(|d| d.with_year(year)))
        .unwrap_or(instant)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_date_range_new() {
        let range = DateRange::new(at(2020, 1, 1), at(2020, 6, 1)).unwrap();

        assert_eq!(range.start, at(2020, 1, 1));
        assert_eq!(range.end, at(2020, 6, 1));
    }

    #[test]
    fn test_date_range_invalid() {
        assert!(DateRange::new(at(2020, 6, 1), at(2020, 1, 1)).is_err());
    }

    #[test]
    fn test_date_range_single_instant() {
        let range = DateRange::new(at(2020, 1, 1), at(2020, 1, 1)).unwrap();
        assert!(range.contains(at(2020, 1, 1)));
    }

    #[test]
    fn test_date_range_parse() {
        let range = DateRange::parse("2020-01-01", "2020-06-01T12:00:00.000Z").unwrap();

        assert_eq!(range.start, at(2020, 1, 1));
        assert_eq!(
            range.end,
            Utc.with_ymd_and_hms(2020, 6, 1, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_clamp_to_intersects() {
        let requested = DateRange::new(at(2019, 1, 1), at(2021, 1, 1)).unwrap();
        let coverage = DateRange::new(at(2020, 1, 1), at(2022, 1, 1)).unwrap();

        let clamped = requested.clamp_to(&coverage).unwrap();
        assert_eq!(clamped.start, at(2020, 1, 1));
        assert_eq!(clamped.end, at(2021, 1, 1));
    }

    #[test]
    fn test_clamp_to_inside_coverage_unchanged() {
        let requested = DateRange::new(at(2020, 3, 1), at(2020, 4, 1)).unwrap();
        let coverage = DateRange::new(at(2020, 1, 1), at(2022, 1, 1)).unwrap();

        assert_eq!(requested.clamp_to(&coverage).unwrap(), requested);
    }

    #[test]
    fn test_clamp_to_disjoint_is_error() {
        let requested = DateRange::new(at(2010, 1, 1), at(2011, 1, 1)).unwrap();
        let coverage = DateRange::new(at(2020, 1, 1), at(2022, 1, 1)).unwrap();

        assert!(matches!(
            requested.clamp_to(&coverage),
            Err(DateRangeError::EmptyClamp { .. })
        ));
    }

    #[test]
    fn test_wire_timestamp_round_trip() {
        let instant = Utc.with_ymd_and_hms(2020, 1, 31, 9, 15, 0).unwrap();
        let formatted = format_wire_timestamp(instant);

        assert_eq!(formatted, "2020-01-31T09:15:00.000Z");
        assert_eq!(parse_wire_timestamp(&formatted).unwrap(), instant);
    }

    #[test]
    fn test_parse_wire_timestamp_rejects_garbage() {
        assert!(parse_wire_timestamp("not a timestamp").is_err());
        assert!(parse_wire_timestamp("2020-01-31").is_err());
    }

    #[test]
    fn test_parse_date_or_timestamp() {
        assert_eq!(parse_date_or_timestamp("2020-01-31").unwrap(), at(2020, 1, 31));
        assert_eq!(
            parse_date_or_timestamp("2020-01-31T09:15:00.000Z").unwrap(),
            Utc.with_ymd_and_hms(2020, 1, 31, 9, 15, 0).unwrap()
        );
        assert!(parse_date_or_timestamp("31/01/2020").is_err());
    }

    #[test]
    fn test_add_months_clamps_day() {
        assert_eq!(add_months_clamped(at(2021, 1, 31), 1), at(2021, 2, 28));
        assert_eq!(add_months_clamped(at(2020, 1, 31), 1), at(2020, 2, 29));
        assert_eq!(add_months_clamped(at(2020, 1, 15), 1), at(2020, 2, 15));
    }

    #[test]
    fn test_add_years_clamps_leap_day() {
        assert_eq!(add_years_clamped(at(2020, 2, 29), 1), at(2021, 2, 28));
    }

    #[test]
    fn test_add_years_clamps_to_max_year() {
        assert_eq!(add_years_clamped(at(2000, 6, 15), 250_000), at(9999, 6, 15));
    }

    #[test]
    fn test_add_months_clamps_to_max_year() {
        assert_eq!(add_months_clamped(at(2000, 6, 15), 250_000), at(9999, 6, 15));
    }

    #[test]
    fn test_clamp_to_year_collapses_leap_day() {
        // 9999 is not a leap year.
        assert_eq!(clamp_to_year(at(2020, 2, 29), 9999), at(9999, 2, 28));
    }

    #[test]
    fn test_display_uses_wire_format() {
        let range = DateRange::new(at(2020, 1, 1), at(2020, 6, 1)).unwrap();
        assert_eq!(
            range.to_string(),
            "2020-01-01T00:00:00.000Z to 2020-06-01T00:00:00.000Z"
        );
    }
}
