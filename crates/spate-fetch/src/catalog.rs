//! Station and time-series catalog queries.
//!
//! Catalog responses are small single-request CSV bodies with one header
//! line, unlike the two-line preamble of values pages. Malformed rows are
//! skipped rather than failing the whole listing.

use spate_types::{Parameter, Station, TimeSeries};
use tracing::{debug, warn};

use crate::client::{ApiClient, FetchError};
use crate::page::check_quota;
use crate::url::{series_list_url, station_list_url};

/// Fetches the station catalog, optionally filtered by station type and
/// name prefix.
///
/// # Errors
///
/// Returns an error on any transport failure or when the quota is spent.
pub async fn stations(
    client: &ApiClient,
    parameter: Option<Parameter>,
    name_prefix: Option<&str>,
    bearer: Option<&str>,
) -> Result<Vec<Station>, FetchError> {
    let url = station_list_url(parameter.map(|p| p.codes()), name_prefix);
    let body = client.get_csv(&url, bearer).await?;
    check_quota(&body)?;
    Ok(parse_station_lines(&body))
}

/// Fetches the time series recorded at one station for one parameter.
///
/// # Errors
///
/// Returns an error on any transport failure or when the quota is spent.
pub async fn series_for_station(
    client: &ApiClient,
    station_no: &str,
    parameter_name: &str,
    bearer: Option<&str>,
) -> Result<Vec<TimeSeries>, FetchError> {
    let url = series_list_url(station_no, parameter_name);
    let body = client.get_csv(&url, bearer).await?;
    check_quota(&body)?;
    Ok(parse_series_lines(&body))
}

fn parse_station_lines(body: &str) -> Vec<Station> {
    let mut stations = Vec::new();
    for line in body.lines().skip(1) {
        if line.is_empty() {
            continue;
        }
        match Station::from_csv_line(line) {
            Some(station) => stations.push(station),
            None => warn!(line, "skipping malformed station row"),
        }
    }
    debug!(count = stations.len(), "parsed station catalog");
    stations
}

fn parse_series_lines(body: &str) -> Vec<TimeSeries> {
    let mut series = Vec::new();
    for line in body.lines().skip(1) {
        if line.is_empty() {
            continue;
        }
        match TimeSeries::from_csv_line(line) {
            Some(entry) => series.push(entry),
            None => warn!(line, "skipping malformed series row"),
        }
    }
    debug!(count = series.len(), "parsed series catalog");
    series
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_station_lines_skips_header() {
        let body = "station_name,station_no,station_id,parameter_name,easting,northing\n\
                    Dalwhinnie,123456,42,Precip,270000,798000\n\
                    Aviemore,234567,43,Precip,289000,813000\n";

        let stations = parse_station_lines(body);
        assert_eq!(stations.len(), 2);
        assert_eq!(stations[0].name(), "Dalwhinnie");
        assert_eq!(stations[1].station_no(), "234567");
    }

    #[test]
    fn test_parse_station_lines_skips_malformed_rows() {
        let body = "station_name,station_no,station_id,parameter_name,easting,northing\n\
                    Dalwhinnie,123456,42,Precip,270000,798000\n\
                    short,row\n\
                    \n\
                    Aviemore,234567,43,Precip,289000,813000\n";

        let stations = parse_station_lines(body);
        assert_eq!(stations.len(), 2);
    }

    #[test]
    fn test_parse_station_lines_empty_catalog() {
        let body = "station_name,station_no,station_id,parameter_name,easting,northing\n";
        assert!(parse_station_lines(body).is_empty());
        assert!(parse_station_lines("").is_empty());
    }

    #[test]
    fn test_parse_series_lines() {
        let body = "site_no,station_no,stationparameter_no,ts_shortname,ts_id,from,to\n\
                    1,123456,RE,Day.Total,38618010,1970-01-01T00:00:00.000Z,2024-06-01T00:00:00.000Z\n\
                    1,123456,RE,15minute.Total,38618020,,\n";

        let series = parse_series_lines(body);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].ts_id(), "38618010");
        assert!(series[0].coverage().is_some());
        assert_eq!(series[1].shortname(), "15minute.Total");
        assert!(series[1].coverage().is_none());
    }

    #[test]
    fn test_quota_body_fails_before_parsing() {
        let body = "Credit limit exceeded for key abc123\n";
        assert!(matches!(
            check_quota(body),
            Err(FetchError::QuotaExceeded { .. })
        ));
    }
}
