//! Rust library for downloading SEPA hydrology time-series data.
//!
//! This is a facade crate that re-exports functionality from the spate
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use spate_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::with_defaults()?;
//!     let range = DateRange::parse("2020-01-01", "2020-06-01")?;
//!     let plan = WindowPlan::new(range, Cadence::Minute15);
//!
//!     // No bearer token: the request runs in the unregistered quota class.
//!     let lines = fetch_range(&client, "38618010", plan, None).await?;
//!     for line in lines {
//!         println!("{line}");
//!     }
//!
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/spate-rs/spate/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use spate_types::*;

// Re-export token acquisition (its Result alias stays behind the crate path)
pub use spate_auth::{
    AuthError, CacheError, CachedToken, HttpTokenExchange, TOKEN_TTL_SECONDS, TOKEN_URL,
    TokenCache, TokenExchange, TokenProvider, is_fresh,
};

// Re-export the download pipeline
pub use spate_fetch::{
    ApiClient, BOUNDARY_SKIP_LINES, ClientConfig, FetchError, PAGE_PREAMBLE_LINES, Page,
    QUOTA_MARKER, assemble, assemble_rows, catalog, check_quota, fetch_range, page_stream, url,
};

/// Prelude module for convenient imports.
///
/// ```
/// use spate_lib::prelude::*;
/// ```
pub mod prelude {
    pub use spate_types::{
        Cadence, DEFAULT_ROW_CAP, DateRange, DateRangeError, Parameter, Result, Row, SpateError,
        Station, TimeSeries, Window, WindowPlan,
    };

    pub use spate_auth::{HttpTokenExchange, TokenCache, TokenProvider};

    pub use spate_fetch::{ApiClient, ClientConfig, Page, assemble, fetch_range, page_stream};
}
