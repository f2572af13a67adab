//! CSV page model for windowed time-series responses.

use crate::client::FetchError;
use spate_types::{Row, RowParseError, Window};

/// Marker text the service places in the response body when the daily
/// request quota is spent. It arrives with HTTP 200, so the body has to
/// be inspected before any CSV handling.
pub const QUOTA_MARKER: &str = "Credit limit exceeded";

/// Preamble lines at the top of every values page: a `#ts_id` line and a
/// `#Timestamp,Value,Quality Code` header line.
pub const PAGE_PREAMBLE_LINES: usize = 2;

/// Lines to drop from the start of every page after the first when
/// stitching pages together: the two preamble lines plus the boundary
/// data row already emitted as the previous window's last row.
pub const BOUNDARY_SKIP_LINES: usize = 3;

/// Checks a response body for the quota marker.
///
/// Only the first line is inspected; the marker text can legitimately
/// appear later in a body (a station name, say) without meaning anything.
///
/// # Errors
///
/// Returns [`FetchError::QuotaExceeded`] if the first line carries the marker.
pub fn check_quota(body: &str) -> Result<(), FetchError> {
    let first_line = body.lines().next().unwrap_or_default();
    if first_line.contains(QUOTA_MARKER) {
        return Err(FetchError::QuotaExceeded {
            detail: first_line.to_string(),
        });
    }
    Ok(())
}

/// A single values response for one window, split into lines.
#[derive(Debug, Clone)]
pub struct Page {
    window: Window,
    lines: Vec<String>,
}

impl Page {
    /// Parses a response body into a page.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::QuotaExceeded`] if the body carries the
    /// quota marker instead of CSV data.
    pub fn parse(window: Window, body: &str) -> Result<Self, FetchError> {
        check_quota(body)?;
        let lines = body.lines().map(ToString::to_string).collect();
        Ok(Self { window, lines })
    }

    /// Returns the window this page covers.
    #[must_use]
    pub const fn window(&self) -> &Window {
        &self.window
    }

    /// Returns all lines of the page, preamble included.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Returns the preamble lines (at most [`PAGE_PREAMBLE_LINES`]).
    #[must_use]
    pub fn preamble(&self) -> &[String] {
        let n = self.lines.len().min(PAGE_PREAMBLE_LINES);
        &self.lines[..n]
    }

    /// Returns the data lines, with the preamble stripped.
    #[must_use]
    pub fn data_lines(&self) -> &[String] {
        self.lines.get(PAGE_PREAMBLE_LINES..).unwrap_or(&[])
    }

    /// Parses the data lines into rows.
    ///
    /// # Errors
    ///
    /// Returns an error if any data line is not a valid row.
    pub fn rows(&self) -> Result<Vec<Row>, RowParseError> {
        self.data_lines().iter().map(|line| Row::parse(line)).collect()
    }

    /// Returns the total number of lines, preamble included.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` if the page has no lines at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
