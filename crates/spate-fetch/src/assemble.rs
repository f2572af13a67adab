//! Stitching windowed pages into one continuous CSV stream.
//!
//! Adjacent windows share their boundary timestamp, so every page after
//! the first repeats the preamble and the previous page's last data row.
//! Assembly keeps the first page whole and drops
//! [`BOUNDARY_SKIP_LINES`](crate::BOUNDARY_SKIP_LINES) from each later page.

use crate::page::{BOUNDARY_SKIP_LINES, Page};
use spate_types::{Row, RowParseError};

/// Stitches pages into one stream of CSV lines.
///
/// The first page contributes all of its lines, preamble included.
/// Every later page contributes its lines after the boundary skip.
#[must_use]
pub fn assemble(pages: &[Page]) -> Vec<String> {
    let mut lines = Vec::new();
    for (index, page) in pages.iter().enumerate() {
        let contributed = if index == 0 {
            page.lines()
        } else {
            page.lines().get(BOUNDARY_SKIP_LINES..).unwrap_or(&[])
        };
        lines.extend_from_slice(contributed);
    }
    lines
}

/// Stitches pages into parsed rows, with no preamble lines at all.
///
/// # Errors
///
/// Returns an error if any contributed line is not a valid row.
pub fn assemble_rows(pages: &[Page]) -> Result<Vec<Row>, RowParseError> {
    let mut rows = Vec::new();
    for (index, page) in pages.iter().enumerate() {
        let contributed = if index == 0 {
            page.data_lines()
        } else {
            page.lines().get(BOUNDARY_SKIP_LINES..).unwrap_or(&[])
        };
        for line in contributed {
            rows.push(Row::parse(line)?);
        }
    }
    Ok(rows)
}
