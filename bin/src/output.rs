//! Output naming and CSV writing for the spate CLI.

use anyhow::{Context, Result};
use spate_lib::format_wire_timestamp;
use spate_lib::prelude::*;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Builds the station metadata preamble written ahead of the data lines.
pub(crate) fn station_metadata(
    station: &Station,
    series: &TimeSeries,
    range: &DateRange,
) -> Vec<String> {
    vec![
        format!("Station Name,{}", station.name()),
        format!("Station Number,{}", station.station_no()),
        format!("Station Type,{}", station.parameter_name()),
        format!("Station Easting,{}", station.easting()),
        format!("Station Northing,{}", station.northing()),
        format!("Station Parameter,{}", series.parameter_no()),
        format!("Timeseries Name,{}", series.shortname()),
        format!("Timestamp From,{}", format_wire_timestamp(range.start)),
        format!("Timestamp To,{}", format_wire_timestamp(range.end)),
    ]
}

/// Default output file name for an interactively picked series.
pub(crate) fn default_file_name(station: &Station, series: &TimeSeries) -> String {
    format!(
        "{}_{}_{}_{}.csv",
        station.name(),
        station.station_no(),
        series.shortname(),
        series.parameter_no()
    )
}

/// Writes the metadata preamble (when given) and the CSV lines to `path`,
/// or to stdout when `path` is `-`.
pub(crate) fn write_csv(path: &Path, metadata: Option<&[String]>, lines: &[String]) -> Result<()> {
    if path == Path::new("-") {
        let stdout = std::io::stdout();
        let mut writer = stdout.lock();
        write_lines(&mut writer, metadata, lines)?;
    } else {
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        write_lines(&mut writer, metadata, lines)?;
    }
    Ok(())
}

fn write_lines(
    writer: &mut impl Write,
    metadata: Option<&[String]>,
    lines: &[String],
) -> std::io::Result<()> {
    if let Some(metadata) = metadata {
        for line in metadata {
            writeln!(writer, "{line}")?;
        }
    }
    for line in lines {
        writeln!(writer, "{line}")?;
    }
    writer.flush()
}
