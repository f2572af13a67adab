//! Persistent single-entry token cache.

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// File name of the cache entry inside the data directory.
const CACHE_FILE_NAME: &str = "accessToken.json";

/// Errors that can occur writing the token cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Failed to create the cache directory.
    #[error("Failed to create directory '{path}': {source}")]
    CreateDir {
        /// The path that could not be created.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to write the cache file.
    #[error("Failed to write file '{path}': {source}")]
    WriteFile {
        /// The path that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to serialize the cache entry.
    #[error("Failed to serialize token entry: {0}")]
    SerializeJson(#[from] serde_json::Error),
}

/// A bearer token together with the instant it was issued.
///
/// Freshness is judged from the stored `issued_at`, not from file
/// metadata, so the expiry policy can be tested with an injected clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedToken {
    /// The opaque bearer token.
    pub access_token: String,
    /// When the token was obtained from the token endpoint.
    pub issued_at: DateTime<Utc>,
}

/// Single-entry cache holding the most recently issued bearer token.
///
/// The entry is stored as JSON at one fixed path. Loading is lenient: a
/// missing or corrupt file simply means there is no cached token and the
/// next request will refresh it.
#[derive(Debug, Clone)]
pub struct TokenCache {
    path: PathBuf,
}

impl TokenCache {
    /// Creates a cache backed by the given file.
    ///
    /// Nothing is touched on disk until [`store`](Self::store) is called.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Returns the default cache file path.
    ///
    /// Uses the `directories` crate to find the appropriate location:
    /// - Linux: `~/.local/share/spate/accessToken.json`
    /// - macOS: `~/Library/Application Support/spate/accessToken.json`
    /// - Windows: `C:\Users\<User>\AppData\Roaming\spate\accessToken.json`
    ///
    /// Falls back to `~/.spate/accessToken.json` if the platform-specific
    /// location cannot be determined.
    #[must_use]
    pub fn default_path() -> PathBuf {
        ProjectDirs::from("", "", "spate")
            .map_or_else(dirs_fallback, |proj_dirs| proj_dirs.data_dir().to_path_buf())
            .join(CACHE_FILE_NAME)
    }

    /// Creates a cache at the default path.
    #[must_use]
    pub fn with_default_path() -> Self {
        Self::new(Self::default_path())
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the cached entry.
    ///
    /// Returns `None` when the file is missing. A file that exists but
    /// cannot be read or parsed also yields `None`, with a warning, so a
    /// damaged cache never blocks a token refresh.
    #[must_use]
    pub fn load(&self) -> Option<CachedToken> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read token cache");
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(token) => Some(token),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring corrupt token cache");
                None
            }
        }
    }

    /// Stores the entry, replacing any previous one.
    ///
    /// Creates the parent directory if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be serialized or written.
    pub fn store(&self, token: &CachedToken) -> Result<(), CacheError> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| CacheError::CreateDir {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let json = serde_json::to_string_pretty(token)?;
        fs::write(&self.path, json).map_err(|e| CacheError::WriteFile {
            path: self.path.clone(),
            source: e,
        })
    }
}

/// Fallback for determining the home directory.
fn dirs_fallback() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".spate")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_token() -> CachedToken {
        CachedToken {
            access_token: "abc123".to_string(),
            issued_at: Utc::now(),
        }
    }

    #[test]
    fn test_store_and_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let cache = TokenCache::new(temp_dir.path().join("accessToken.json"));

        let token = sample_token();
        cache.store(&token).unwrap();

        assert_eq!(cache.load(), Some(token));
    }

    #[test]
    fn test_missing_file_returns_none() {
        let temp_dir = TempDir::new().unwrap();
        let cache = TokenCache::new(temp_dir.path().join("accessToken.json"));

        assert_eq!(cache.load(), None);
    }

    #[test]
    fn test_corrupt_file_returns_none() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("accessToken.json");
        fs::write(&path, "not json at all").unwrap();

        let cache = TokenCache::new(path);
        assert_eq!(cache.load(), None);
    }

    #[test]
    fn test_store_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("token.json");
        let cache = TokenCache::new(path.clone());

        cache.store(&sample_token()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_default_path_names_the_app() {
        let path = TokenCache::default_path();
        assert!(path.to_string_lossy().contains("spate"));
        assert!(path.to_string_lossy().ends_with("accessToken.json"));
    }
}
