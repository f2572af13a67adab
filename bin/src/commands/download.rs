//! Download command implementation.
//!
//! A fully specified invocation (`--ts-id` with `--cadence`, `--from` and
//! `--to`) runs without prompts; otherwise the station, series and range
//! are picked interactively.

use anyhow::{Context, Result, bail, ensure};
use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use inquire::{Confirm, Select, Text};
use spate_lib::catalog;
use spate_lib::parse_date_or_timestamp;
use spate_lib::prelude::*;
use std::path::{Path, PathBuf};

use crate::output;

/// Everything a download needs before the first values request.
struct DownloadTarget {
    ts_id: String,
    cadence: Cadence,
    range: DateRange,
    default_file_name: String,
    metadata: Option<Vec<String>>,
}

/// Download time-series data for one series and range.
#[allow(clippy::too_many_arguments)]
pub(crate) async fn download(
    ts_id: Option<&str>,
    cadence: Option<&str>,
    from: Option<&str>,
    to: Option<&str>,
    output: Option<PathBuf>,
    row_cap: u32,
    full_record: bool,
    bearer: Option<&str>,
    quiet: bool,
) -> Result<()> {
    ensure!(row_cap > 0, "--row-cap must be positive");

    let client = ApiClient::with_defaults()?;

    let target = match ts_id {
        Some(id) => flag_target(id, cadence, from, to)?,
        None => pick_interactively(&client, bearer, full_record).await?,
    };

    let plan = WindowPlan::new(target.range, target.cadence).with_row_cap(row_cap);

    // Setup progress bar
    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(plan.window_count() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} windows ({percent}%) {msg}")
                .expect("Invalid progress template")
                .progress_chars("=>-"),
        );
        pb.set_message(format!("ts {} {}", target.ts_id, plan.range()));
        pb
    };

    let mut pages = Vec::with_capacity(plan.window_count());
    let mut stream = std::pin::pin!(page_stream(&client, &target.ts_id, plan, bearer));

    while let Some(result) = stream.next().await {
        match result {
            Ok(page) => {
                pages.push(page);
                progress.inc(1);
            }
            Err(SpateError::QuotaExceeded(detail)) => {
                progress.abandon_with_message("quota exceeded");
                bail!(
                    "The daily request quota is spent ({detail}). Try again in 24 hours, \
                     retry without an access key to use the unregistered quota, or use a \
                     different key."
                );
            }
            Err(e) => {
                progress.abandon();
                return Err(e.into());
            }
        }
    }
    progress.finish_with_message(format!("Downloaded {} windows", pages.len()));

    let lines = assemble(&pages);
    let output = output.unwrap_or_else(|| PathBuf::from(&target.default_file_name));
    output::write_csv(&output, target.metadata.as_deref(), &lines)?;

    if !quiet && output != Path::new("-") {
        println!("Output written to: {}", output.display());
    }

    Ok(())
}

/// Builds the download target from flags alone.
fn flag_target(
    ts_id: &str,
    cadence: Option<&str>,
    from: Option<&str>,
    to: Option<&str>,
) -> Result<DownloadTarget> {
    let cadence = cadence
        .context("--cadence is required with --ts-id")?
        .parse::<Cadence>()
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    let from = from.context("--from is required with --ts-id")?;
    let to = to.context("--to is required with --ts-id")?;
    let range = DateRange::parse(from, to)?;

    Ok(DownloadTarget {
        ts_id: ts_id.to_string(),
        cadence,
        range,
        default_file_name: format!("{ts_id}.csv"),
        metadata: None,
    })
}

/// Walks the station, series and range prompts.
async fn pick_interactively(
    client: &ApiClient,
    bearer: Option<&str>,
    full_record: bool,
) -> Result<DownloadTarget> {
    const NO_FILTER: &str = "All station types";

    let mut type_options: Vec<String> = vec![NO_FILTER.to_string()];
    type_options.extend(Parameter::all().iter().map(|p| p.description().to_string()));
    let choice = Select::new("Station type:", type_options)
        .prompt()
        .context("Station type selection cancelled")?;
    let parameter = Parameter::all()
        .iter()
        .copied()
        .find(|p| p.description() == choice);

    let name_prefix = Text::new("Station name starts with (blank for all):")
        .prompt()
        .context("Station name prompt cancelled")?;
    let name_prefix = name_prefix.trim();
    let name_prefix = (!name_prefix.is_empty()).then_some(name_prefix);

    let stations = catalog::stations(client, parameter, name_prefix, bearer).await?;
    ensure!(!stations.is_empty(), "No stations match the given filters.");

    let station = Select::new("Station:", stations)
        .prompt()
        .context("Station selection cancelled")?;

    let series =
        catalog::series_for_station(client, station.station_no(), station.parameter_name(), bearer)
            .await?;
    ensure!(
        !series.is_empty(),
        "No time series found for station {}.",
        station.station_no()
    );

    let series = Select::new("Time series:", series)
        .prompt()
        .context("Series selection cancelled")?;

    let coverage = series.coverage();
    let use_full = full_record
        || Confirm::new("Download the full period of record?")
            .with_default(true)
            .prompt()
            .context("Range prompt cancelled")?;

    let range = if use_full {
        coverage.context(
            "The catalog reported no period of record for this series; \
             pass explicit dates with --from/--to instead",
        )?
    } else {
        let from = Text::new("From (YYYY-MM-DD):")
            .prompt()
            .context("Range prompt cancelled")?;
        let to = Text::new("To (YYYY-MM-DD):")
            .prompt()
            .context("Range prompt cancelled")?;
        let requested = DateRange::new(
            parse_date_or_timestamp(from.trim())?,
            parse_date_or_timestamp(to.trim())?,
        )?;
        // Requests outside the period of record return nothing useful,
        // so trim to the coverage the catalog reported.
        match coverage {
            Some(coverage) => requested.clamp_to(&coverage)?,
            None => requested,
        }
    };

    Ok(DownloadTarget {
        ts_id: series.ts_id().to_string(),
        cadence: series.cadence(),
        range,
        default_file_name: output::default_file_name(&station, &series),
        metadata: Some(output::station_metadata(&station, &series, &range)),
    })
}
