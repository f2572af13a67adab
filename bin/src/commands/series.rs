//! Series command implementation.
//!
//! Lists the time series recorded at one station for one parameter.

use anyhow::Result;
use spate_lib::catalog;
use spate_lib::prelude::*;

/// List the time series recorded at a station.
pub(crate) async fn list_series(
    station_no: &str,
    parameter_name: &str,
    bearer: Option<&str>,
) -> Result<()> {
    let client = ApiClient::with_defaults()?;
    let series = catalog::series_for_station(&client, station_no, parameter_name, bearer).await?;

    if series.is_empty() {
        println!("No time series found for station {station_no} ({parameter_name}).");
        return Ok(());
    }

    println!(
        "{:<10} {:<24} {:<8} {:<10} {}",
        "TS ID", "SHORTNAME", "PARAM", "CADENCE", "COVERAGE"
    );
    println!("{}", "-".repeat(100));

    for entry in &series {
        let coverage = entry
            .coverage()
            .map_or_else(|| "n/a".to_string(), |range| range.to_string());
        println!(
            "{:<10} {:<24} {:<8} {:<10} {}",
            entry.ts_id(),
            entry.shortname(),
            entry.parameter_no(),
            entry.cadence().as_str(),
            coverage
        );
    }

    println!("\nTotal: {} series", series.len());
    Ok(())
}
