//! spate CLI - Interactive SEPA hydrology time-series downloader.

use anyhow::{Context, Result, ensure};
use clap::{CommandFactory, Parser, Subcommand};
use spate_lib::{DEFAULT_ROW_CAP, HttpTokenExchange, TokenCache, TokenProvider};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

#[derive(Parser)]
#[command(name = "spate")]
#[command(about = "Interactive SEPA hydrology time-series downloader", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// File holding a registered API access key. Without one, requests
    /// run in the smaller unregistered quota class.
    #[arg(long, global = true)]
    access_key_file: Option<PathBuf>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress progress output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List monitoring stations
    Stations {
        /// Filter by station type (rainfall, river-level, river-flow,
        /// groundwater-level, tidal-level)
        #[arg(short, long)]
        parameter: Option<String>,

        /// Filter by station name prefix
        #[arg(short, long)]
        name: Option<String>,
    },

    /// List the time series recorded at a station
    Series {
        /// Station number, as listed by `spate stations`
        #[arg(short, long)]
        station: String,

        /// Parameter name at the station (e.g. Precip)
        #[arg(short, long)]
        parameter: String,
    },

    /// Download time-series data, interactively unless fully specified
    Download {
        /// Time series identifier. Skips the interactive picker; requires
        /// --cadence, --from and --to.
        #[arg(long)]
        ts_id: Option<String>,

        /// Sampling cadence of the series (15m, hourly, daily, weekly,
        /// monthly, yearly)
        #[arg(short, long)]
        cadence: Option<String>,

        /// Range start (YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS.000Z)
        #[arg(long)]
        from: Option<String>,

        /// Range end (YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS.000Z)
        #[arg(long)]
        to: Option<String>,

        /// Output file path, or `-` for stdout. Defaults to a name built
        /// from the selected station and series.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Rows per request window
        #[arg(long, default_value_t = DEFAULT_ROW_CAP)]
        row_cap: u32,

        /// Download the series' whole period of record without prompting
        #[arg(long)]
        full_record: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    // One token resolution up front covers every request the command makes
    let bearer = match cli.access_key_file.as_deref() {
        Some(path) => Some(resolve_token(path).await?),
        None => None,
    };

    match command {
        Commands::Stations { parameter, name } => {
            commands::stations::list_stations(
                parameter.as_deref(),
                name.as_deref(),
                bearer.as_deref(),
            )
            .await
        }
        Commands::Series { station, parameter } => {
            commands::series::list_series(&station, &parameter, bearer.as_deref()).await
        }
        Commands::Download {
            ts_id,
            cadence,
            from,
            to,
            output,
            row_cap,
            full_record,
        } => {
            commands::download::download(
                ts_id.as_deref(),
                cadence.as_deref(),
                from.as_deref(),
                to.as_deref(),
                output,
                row_cap,
                full_record,
                bearer.as_deref(),
                cli.quiet,
            )
            .await
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_directive = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Reads the access key and exchanges it for a bearer token, reusing the
/// cached token when one is still fresh.
async fn resolve_token(path: &Path) -> Result<String> {
    let access_key = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read access key file: {}", path.display()))?;
    let access_key = access_key.trim();
    ensure!(
        !access_key.is_empty(),
        "Access key file is empty: {}",
        path.display()
    );

    let exchange = HttpTokenExchange::new().context("Failed to create token client")?;
    let provider = TokenProvider::new(TokenCache::with_default_path(), exchange);
    provider
        .get_token(access_key)
        .await
        .context("Failed to acquire API token")
}
