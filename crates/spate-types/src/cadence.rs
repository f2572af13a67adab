//! Sampling cadence definitions.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Sampling cadence of a time series.
///
/// Fixed cadences advance by a whole number of seconds. `Monthly` and
/// `Yearly` advance by calendar arithmetic and have no fixed second count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cadence {
    /// 15-minute readings.
    #[serde(rename = "15m")]
    Minute15,
    /// Hourly readings.
    Hourly,
    /// Daily readings.
    Daily,
    /// Weekly readings.
    Weekly,
    /// Monthly readings.
    Monthly,
    /// Yearly and event-based readings.
    Yearly,
}

impl Cadence {
    /// Returns the sampling interval in seconds, or None for calendar
    /// cadences.
    #[must_use]
    pub const fn seconds(&self) -> Option<u64> {
        match self {
            Self::Minute15 => Some(900),
            Self::Hourly => Some(3600),
            Self::Daily => Some(86_400),
            Self::Weekly => Some(604_800),
            Self::Monthly | Self::Yearly => None,
        }
    }

    /// Returns true if this cadence advances by calendar arithmetic.
    #[must_use]
    pub const fn is_calendar(&self) -> bool {
        matches!(self, Self::Monthly | Self::Yearly)
    }

    /// Returns the cadence as a string identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Minute15 => "15m",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    /// Returns all available cadences.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Minute15,
            Self::Hourly,
            Self::Daily,
            Self::Weekly,
            Self::Monthly,
            Self::Yearly,
        ]
    }

    /// Infers the cadence from a series short name such as `15minute.Cmd`
    /// or `Day.Mean`.
    ///
    /// `Gaugings` and `POT` series carry at most a handful of readings per
    /// year; they plan as yearly, and so does any unrecognised name.
    #[must_use]
    pub fn from_series_name(name: &str) -> Self {
        if name.contains("15m") {
            Self::Minute15
        } else if name.contains("Hour") {
            Self::Hourly
        } else if name.contains("Day") {
            Self::Daily
        } else if name.contains("Week") {
            Self::Weekly
        } else if name.contains("Month") {
            Self::Monthly
        } else {
            Self::Yearly
        }
    }
}

impl std::fmt::Display for Cadence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Cadence {
    type Err = CadenceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "15m" | "15min" | "minute15" => Ok(Self::Minute15),
            "hourly" | "hour" | "1h" => Ok(Self::Hourly),
            "daily" | "day" | "1d" => Ok(Self::Daily),
            "weekly" | "week" | "1w" => Ok(Self::Weekly),
            "monthly" | "month" => Ok(Self::Monthly),
            "yearly" | "year" => Ok(Self::Yearly),
            _ => Err(CadenceParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid cadence string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CadenceParseError(String);

impl std::fmt::Display for CadenceParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid cadence '{}', expected one of: 15m, hourly, daily, weekly, monthly, yearly",
            self.0
        )
    }
}

impl std::error::Error for CadenceParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cadence_seconds() {
        assert_eq!(Cadence::Minute15.seconds(), Some(900));
        assert_eq!(Cadence::Hourly.seconds(), Some(3600));
        assert_eq!(Cadence::Daily.seconds(), Some(86_400));
        assert_eq!(Cadence::Weekly.seconds(), Some(604_800));
        assert_eq!(Cadence::Monthly.seconds(), None);
        assert_eq!(Cadence::Yearly.seconds(), None);
    }

    #[test]
    fn test_cadence_parse() {
        assert_eq!("15m".parse::<Cadence>().unwrap(), Cadence::Minute15);
        assert_eq!("hourly".parse::<Cadence>().unwrap(), Cadence::Hourly);
        assert_eq!("Week".parse::<Cadence>().unwrap(), Cadence::Weekly);
        assert!("invalid".parse::<Cadence>().is_err());
    }

    #[test]
    fn test_from_series_name() {
        assert_eq!(Cadence::from_series_name("15minute.Cmd"), Cadence::Minute15);
        assert_eq!(Cadence::from_series_name("Hour.Cmd"), Cadence::Hourly);
        assert_eq!(Cadence::from_series_name("Day.Mean"), Cadence::Daily);
        assert_eq!(Cadence::from_series_name("Week.Max"), Cadence::Weekly);
        assert_eq!(Cadence::from_series_name("Month.Total"), Cadence::Monthly);
        assert_eq!(Cadence::from_series_name("Year.Max"), Cadence::Yearly);
    }

    #[test]
    fn test_event_series_plan_as_yearly() {
        assert_eq!(Cadence::from_series_name("Gaugings"), Cadence::Yearly);
        assert_eq!(Cadence::from_series_name("POT"), Cadence::Yearly);
        assert_eq!(Cadence::from_series_name("Unknown.Series"), Cadence::Yearly);
    }

    #[test]
    fn test_is_calendar() {
        assert!(!Cadence::Daily.is_calendar());
        assert!(Cadence::Monthly.is_calendar());
        assert!(Cadence::Yearly.is_calendar());
    }
}
