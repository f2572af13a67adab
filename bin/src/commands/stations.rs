//! Stations command implementation.
//!
//! Lists monitoring stations, optionally filtered by station type and
//! name prefix.

use anyhow::Result;
use spate_lib::catalog;
use spate_lib::prelude::*;

/// List monitoring stations with optional filters.
pub(crate) async fn list_stations(
    parameter: Option<&str>,
    name_prefix: Option<&str>,
    bearer: Option<&str>,
) -> Result<()> {
    let parameter = parameter
        .map(str::parse::<Parameter>)
        .transpose()
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    let client = ApiClient::with_defaults()?;
    let stations = catalog::stations(&client, parameter, name_prefix, bearer).await?;

    if stations.is_empty() {
        println!("No stations found.");
        return Ok(());
    }

    println!(
        "{:<32} {:<12} {:<16} {:<10} {:<10}",
        "NAME", "NUMBER", "PARAMETER", "EASTING", "NORTHING"
    );
    println!("{}", "-".repeat(84));

    for station in &stations {
        println!(
            "{:<32} {:<12} {:<16} {:<10} {:<10}",
            station.name(),
            station.station_no(),
            station.parameter_name(),
            station.easting(),
            station.northing()
        );
    }

    println!("\nTotal: {} stations", stations.len());
    Ok(())
}
