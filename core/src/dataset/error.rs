//! Error types for dataset loading

use std::path::PathBuf;
use thiserror::Error;

/// Errors while fetching or parsing a CSV resource
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("request for {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request for {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("malformed CSV in {source_name}")]
    Csv {
        source_name: String,
        #[source]
        source: csv::Error,
    },

    #[error("load cancelled")]
    Cancelled,

    #[error("load task failed: {0}")]
    Task(String),
}

impl LoadError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, LoadError::Cancelled)
    }
}
