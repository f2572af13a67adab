//! Core types for the spate hydrology data downloader.
//!
//! This crate provides the fundamental data structures used throughout spate:
//!
//! - [`Cadence`] - Sampling cadence of a time series
//! - [`DateRange`] - Closed interval of UTC timestamps with calendar-aware arithmetic
//! - [`Window`] / [`WindowPlan`] - Partition of a date range into request-sized windows
//! - [`Row`] - A single timestamp/value/quality reading
//! - [`Station`] / [`TimeSeries`] - Catalog entities returned by the API

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/spate-rs/spate/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cadence;
mod date_range;
mod error;
mod row;
mod series;
mod window;

pub use cadence::{Cadence, CadenceParseError};
pub use date_range::{
    DateRange, MAX_YEAR, WIRE_TIME_FORMAT, add_months_clamped, add_years_clamped, clamp_to_year,
    format_wire_timestamp, parse_date_or_timestamp, parse_wire_timestamp,
};
pub use error::{DateRangeError, Result, SpateError};
pub use row::{Row, RowParseError};
pub use series::{Parameter, ParameterParseError, Station, TimeSeries};
pub use window::{DEFAULT_ROW_CAP, Window, WindowIter, WindowPlan};
