//! HTTP client and data fetching for the spate hydrology downloader.
//!
//! This crate provides the data download pipeline:
//!
//! - [`url::values_url`] - Constructs CSV query URLs
//! - [`ApiClient`] - HTTP client issuing single-shot GET requests
//! - [`Page`] - One windowed CSV response, with quota detection
//! - [`assemble`] - Stitches pages into one continuous stream
//! - [`page_stream`] / [`fetch_range`] - Sequential windowed download
//! - [`catalog`] - Station and time-series listings

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/spate-rs/spate/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod assemble;
pub mod catalog;
mod client;
mod page;
mod stream;
pub mod url;

pub use assemble::{assemble, assemble_rows};
pub use client::{ApiClient, ClientConfig, FetchError};
pub use page::{BOUNDARY_SKIP_LINES, PAGE_PREAMBLE_LINES, Page, QUOTA_MARKER, check_quota};
pub use stream::{fetch_range, page_stream};
