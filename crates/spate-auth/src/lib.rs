//! Token acquisition and caching for the spate hydrology downloader.
//!
//! Registered API access works in two steps: a long-lived access key is
//! exchanged for a short-lived bearer token, and that token is cached so
//! repeated invocations within its lifetime never touch the token
//! endpoint.
//!
//! - [`TokenCache`] - Persistent single-entry cache with a time-stamped token
//! - [`TokenExchange`] - The exchange seam, implemented over HTTP by
//!   [`HttpTokenExchange`]
//! - [`TokenProvider`] - Cache-first token supply with a 23-hour expiry

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/spate-rs/spate/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cache;
mod provider;

pub use cache::{CacheError, CachedToken, TokenCache};
pub use provider::{
    AuthError, HttpTokenExchange, Result, TOKEN_TTL_SECONDS, TOKEN_URL, TokenExchange,
    TokenProvider, is_fresh,
};
