//! Catalog entities: stations and the time series they record.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::{Cadence, DateRange, parse_wire_timestamp};

/// Station type filter understood by the station catalog.
///
/// Each variant maps to the `stationparameter_no` codes the service
/// groups that station type under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Parameter {
    /// Rainfall gauges (mm).
    Rainfall,
    /// River level gauges (m).
    RiverLevel,
    /// River flow gauges (m3/s).
    RiverFlow,
    /// Groundwater level boreholes (m).
    GroundwaterLevel,
    /// Tidal level gauges (m).
    TidalLevel,
}

impl Parameter {
    /// Returns the `stationparameter_no` codes for this station type.
    #[must_use]
    pub const fn codes(&self) -> &'static str {
        match self {
            Self::Rainfall => "RE,RS",
            Self::RiverLevel => "SG",
            Self::RiverFlow => "Q",
            Self::GroundwaterLevel => "GWL",
            Self::TidalLevel => "TL",
        }
    }

    /// Human-readable description including units.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Rainfall => "Rainfall (mm)",
            Self::RiverLevel => "River Level (m)",
            Self::RiverFlow => "River Flow (m3/s)",
            Self::GroundwaterLevel => "Groundwater Level (m)",
            Self::TidalLevel => "Tidal Level (m)",
        }
    }

    /// Returns the parameter as a string identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Rainfall => "rainfall",
            Self::RiverLevel => "river-level",
            Self::RiverFlow => "river-flow",
            Self::GroundwaterLevel => "groundwater-level",
            Self::TidalLevel => "tidal-level",
        }
    }

    /// Returns all station types.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Rainfall,
            Self::RiverLevel,
            Self::RiverFlow,
            Self::GroundwaterLevel,
            Self::TidalLevel,
        ]
    }
}

impl std::fmt::Display for Parameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Parameter {
    type Err = ParameterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rainfall" | "rain" => Ok(Self::Rainfall),
            "river-level" | "riverlevel" => Ok(Self::RiverLevel),
            "river-flow" | "riverflow" | "flow" => Ok(Self::RiverFlow),
            "groundwater-level" | "groundwater" => Ok(Self::GroundwaterLevel),
            "tidal-level" | "tidal" => Ok(Self::TidalLevel),
            _ => Err(ParameterParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid station type string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterParseError(String);

impl std::fmt::Display for ParameterParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid station type '{}', expected one of: rainfall, river-level, river-flow, \
             groundwater-level, tidal-level",
            self.0
        )
    }
}

impl std::error::Error for ParameterParseError {}

/// A monitoring station as listed by the station catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    name: String,
    station_no: String,
    station_id: String,
    parameter_name: String,
    easting: String,
    northing: String,
}

impl Station {
    /// Creates a new station entry.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        station_no: impl Into<String>,
        station_id: impl Into<String>,
        parameter_name: impl Into<String>,
        easting: impl Into<String>,
        northing: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            station_no: station_no.into(),
            station_id: station_id.into(),
            parameter_name: parameter_name.into(),
            easting: easting.into(),
            northing: northing.into(),
        }
    }

    /// Parses one catalog CSV line
    /// (`name,station_no,station_id,parameter_name,easting,northing`).
    ///
    /// Returns `None` when the line does not have exactly six fields.
    #[must_use]
    pub fn from_csv_line(line: &str) -> Option<Self> {
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != 6 {
            return None;
        }
        Some(Self::new(
            fields[0], fields[1], fields[2], fields[3], fields[4], fields[5],
        ))
    }

    /// Station name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Station number, the key used for series lookups.
    #[must_use]
    pub fn station_no(&self) -> &str {
        &self.station_no
    }

    /// Internal station identifier.
    #[must_use]
    pub fn station_id(&self) -> &str {
        &self.station_id
    }

    /// Name of the parameter measured at this station (e.g. `Precip`).
    #[must_use]
    pub fn parameter_name(&self) -> &str {
        &self.parameter_name
    }

    /// British National Grid easting, blank when unset.
    #[must_use]
    pub fn easting(&self) -> &str {
        &self.easting
    }

    /// British National Grid northing, blank when unset.
    #[must_use]
    pub fn northing(&self) -> &str {
        &self.northing
    }
}

impl std::fmt::Display for Station {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}) {}", self.name, self.station_no, self.parameter_name)
    }
}

/// One time series recorded at a station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    site_no: String,
    station_no: String,
    parameter_no: String,
    shortname: String,
    ts_id: String,
    coverage: Option<DateRange>,
}

impl TimeSeries {
    /// Creates a new time series entry.
    #[must_use]
    pub fn new(
        site_no: impl Into<String>,
        station_no: impl Into<String>,
        parameter_no: impl Into<String>,
        shortname: impl Into<String>,
        ts_id: impl Into<String>,
        coverage: Option<DateRange>,
    ) -> Self {
        Self {
            site_no: site_no.into(),
            station_no: station_no.into(),
            parameter_no: parameter_no.into(),
            shortname: shortname.into(),
            ts_id: ts_id.into(),
            coverage,
        }
    }

    /// Parses one catalog CSV line
    /// (`site_no,station_no,parameter_no,shortname,ts_id,from,to`).
    ///
    /// The coverage field expands to two columns on the wire. A line
    /// whose coverage columns are blank or unparsable still yields a
    /// series, with `coverage` set to `None`.
    ///
    /// Returns `None` when the line does not have exactly seven fields.
    #[must_use]
    pub fn from_csv_line(line: &str) -> Option<Self> {
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != 7 {
            return None;
        }
        let coverage = match (
            parse_wire_timestamp(fields[5]),
            parse_wire_timestamp(fields[6]),
        ) {
            (Ok(start), Ok(end)) => DateRange::new(start, end).ok(),
            _ => None,
        };
        Some(Self::new(
            fields[0], fields[1], fields[2], fields[3], fields[4], coverage,
        ))
    }

    /// Site number of the owning site.
    #[must_use]
    pub fn site_no(&self) -> &str {
        &self.site_no
    }

    /// Station number the series belongs to.
    #[must_use]
    pub fn station_no(&self) -> &str {
        &self.station_no
    }

    /// Parameter number (e.g. `RE`).
    #[must_use]
    pub fn parameter_no(&self) -> &str {
        &self.parameter_no
    }

    /// Series short name (e.g. `Day.Mean`).
    #[must_use]
    pub fn shortname(&self) -> &str {
        &self.shortname
    }

    /// Series identifier used in values queries.
    #[must_use]
    pub fn ts_id(&self) -> &str {
        &self.ts_id
    }

    /// Period of record, when the catalog reported one.
    #[must_use]
    pub const fn coverage(&self) -> Option<DateRange> {
        self.coverage
    }

    /// Sampling cadence inferred from the series short name.
    #[must_use]
    pub fn cadence(&self) -> Cadence {
        Cadence::from_series_name(&self.shortname)
    }
}

impl std::fmt::Display for TimeSeries {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (ts {})", self.shortname, self.ts_id)?;
        if let Some(coverage) = self.coverage {
            write!(f, " {coverage}")?;
        }
        Ok(())
    }
}
