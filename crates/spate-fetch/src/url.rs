//! Query URL construction for the time-series service.

use spate_types::{Window, format_wire_timestamp};

/// Base URL of the query service.
pub const BASE_URL: &str = "https://timeseries.sepa.org.uk/KiWIS/KiWIS";

/// Request suffix selecting comma-delimited CSV output.
const CSV_SUFFIX: &str = "&format=csv&csvdiv=,";

/// Builds the values query for one request window.
///
/// Both window endpoints are inclusive on the server side, which is why
/// adjacent windows of a plan deliver their shared boundary row twice.
///
/// # Example
///
/// ```
/// use spate_fetch::url::values_url;
/// use spate_types::Window;
/// use chrono::{TimeZone, Utc};
///
/// let window = Window::new(
///     Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
///     Utc.with_ymd_and_hms(2020, 6, 1, 0, 0, 0).unwrap(),
/// );
/// let url = values_url("38618010", &window);
/// assert!(url.contains("ts_id=38618010"));
/// assert!(url.contains("from=2020-01-01T00:00:00.000Z"));
/// ```
#[must_use]
pub fn values_url(ts_id: &str, window: &Window) -> String {
    format!(
        "{BASE_URL}?service=kisters&type=queryServices&datasource=0&request=getTimeseriesValues\
         &ts_id={ts_id}&from={}&to={}\
         &returnfields=Timestamp,Value,Quality%20Code{CSV_SUFFIX}",
        format_wire_timestamp(window.from),
        format_wire_timestamp(window.to),
    )
}

/// Builds the station catalog query.
///
/// `parameter_codes` narrows by station type (comma-joined codes such as
/// `RE,RS`); `name_prefix` keeps stations whose name starts with the
/// given letters.
#[must_use]
pub fn station_list_url(parameter_codes: Option<&str>, name_prefix: Option<&str>) -> String {
    // The station endpoint spells its datasource parameter with a hyphen.
    let mut url = format!("{BASE_URL}?data-source=0&request=getStationList");
    if let Some(codes) = parameter_codes {
        url.push_str("&stationparameter_no=");
        url.push_str(codes);
    }
    if let Some(prefix) = name_prefix {
        url.push_str("&station_name=");
        url.push_str(&encode_spaces(prefix));
        url.push('*');
    }
    url.push_str(
        "&returnfields=station_name,station_no,station_id,stationparameter_name,\
         station_carteasting,station_cartnorthing",
    );
    url.push_str("&object_type=General");
    url.push_str(CSV_SUFFIX);
    url
}

/// Builds the series catalog query for one station and parameter.
///
/// The `coverage` return field expands to two CSV columns, so catalog
/// rows carry seven fields.
#[must_use]
pub fn series_list_url(station_no: &str, parameter_name: &str) -> String {
    format!(
        "{BASE_URL}?service=kisters&type=queryServices&datasource=0&request=getTimeseriesList\
         &station_no={station_no}&stationparameter_name={}\
         &returnfields=site_no,station_no,stationparameter_no,ts_shortname,ts_id,coverage\
         {CSV_SUFFIX}",
        encode_spaces(parameter_name),
    )
}

/// Percent-encodes spaces, the only query-unsafe character the catalog
/// values contain.
fn encode_spaces(s: &str) -> String {
    s.replace(' ', "%20")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_values_url() {
        let window = Window::new(
            Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2020, 6, 1, 0, 0, 0).unwrap(),
        );
        let url = values_url("38618010", &window);
        assert_eq!(
            url,
            "https://timeseries.sepa.org.uk/KiWIS/KiWIS?service=kisters&type=queryServices\
             &datasource=0&request=getTimeseriesValues&ts_id=38618010\
             &from=2020-01-01T00:00:00.000Z&to=2020-06-01T00:00:00.000Z\
             &returnfields=Timestamp,Value,Quality%20Code&format=csv&csvdiv=,"
        );
    }

    #[test]
    fn test_station_list_url_unfiltered() {
        let url = station_list_url(None, None);
        assert_eq!(
            url,
            "https://timeseries.sepa.org.uk/KiWIS/KiWIS?data-source=0&request=getStationList\
             &returnfields=station_name,station_no,station_id,stationparameter_name,\
             station_carteasting,station_cartnorthing&object_type=General&format=csv&csvdiv=,"
        );
    }

    #[test]
    fn test_station_list_url_with_filters() {
        let url = station_list_url(Some("RE,RS"), Some("Loch K"));
        assert_eq!(
            url,
            "https://timeseries.sepa.org.uk/KiWIS/KiWIS?data-source=0&request=getStationList\
             &stationparameter_no=RE,RS&station_name=Loch%20K*\
             &returnfields=station_name,station_no,station_id,stationparameter_name,\
             station_carteasting,station_cartnorthing&object_type=General&format=csv&csvdiv=,"
        );
    }

    #[test]
    fn test_series_list_url() {
        let url = series_list_url("123456", "Precip");
        assert_eq!(
            url,
            "https://timeseries.sepa.org.uk/KiWIS/KiWIS?service=kisters&type=queryServices\
             &datasource=0&request=getTimeseriesList&station_no=123456\
             &stationparameter_name=Precip\
             &returnfields=site_no,station_no,stationparameter_no,ts_shortname,ts_id,coverage\
             &format=csv&csvdiv=,"
        );
    }

    #[test]
    fn test_encode_spaces() {
        assert_eq!(encode_spaces("Quality Code"), "Quality%20Code");
        assert_eq!(encode_spaces("nospace"), "nospace");
    }
}
