// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can end (or, for writes, dent) a CAPK refresh.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The page could not be loaded: bad URL, browser launch, network, HTTP status, file read.
    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    /// A table row did not have the nine cells the record layout needs.
    #[error("{brand} row {index}: expected at least {expected} cells, found {found}")]
    Parse {
        brand: String,
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("writing {path:?}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ScrapeError {
    pub fn navigation(url: impl Into<String>, reason: impl ToString) -> Self {
        ScrapeError::Navigation {
            url: url.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T, E = ScrapeError> = std::result::Result<T, E>;
