//! Streaming page download pipeline.

use futures::stream::{self, Stream, StreamExt, TryStreamExt};
use spate_types::{SpateError, WindowPlan};
use tracing::{debug, info};

use crate::{ApiClient, Page, assemble, url::values_url};

/// Creates an async stream of pages for the given time series and plan.
///
/// Windows are fetched strictly in order with one request in flight at a
/// time. The quota error is fatal; once a window fails there is no point
/// issuing the remaining requests, and sequential fetching lets the
/// consumer stop at the first error.
///
/// # Arguments
///
/// * `client` - The HTTP client to use for requests
/// * `ts_id` - The time series identifier to download
/// * `plan` - The window plan covering the requested range
/// * `bearer` - Optional bearer token for the registered quota class
///
/// # Returns
///
/// An async stream of pages, one per window, in window order.
pub fn page_stream<'a>(
    client: &'a ApiClient,
    ts_id: &'a str,
    plan: WindowPlan,
    bearer: Option<&'a str>,
) -> impl Stream<Item = Result<Page, SpateError>> + 'a {
    stream::iter(plan.windows()).then(move |window| async move {
        debug!(%window, ts_id, "fetching window");
        let url = values_url(ts_id, &window);
        let body = client.get_csv(&url, bearer).await?;
        let page = Page::parse(window, &body)?;
        debug!(lines = page.len(), "window fetched");
        Ok(page)
    })
}

/// Downloads a whole range and assembles it into one stream of CSV lines.
///
/// Convenience wrapper over [`page_stream`] and [`assemble`] for callers
/// that do not need per-window progress.
///
/// # Errors
///
/// Returns the first error from any window request; nothing downloaded
/// so far is returned in that case.
pub async fn fetch_range(
    client: &ApiClient,
    ts_id: &str,
    plan: WindowPlan,
    bearer: Option<&str>,
) -> Result<Vec<String>, SpateError> {
    info!(ts_id, windows = plan.window_count(), "downloading range {}", plan.range());
    let pages: Vec<Page> = page_stream(client, ts_id, plan, bearer).try_collect().await?;
    Ok(assemble(&pages))
}
