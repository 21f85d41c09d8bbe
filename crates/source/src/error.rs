//! Record source errors.

use std::path::PathBuf;

use rao_shared::AppError;
use thiserror::Error;

/// Failure to deliver records.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The dataset file could not be read.
    #[error("Failed to read dataset {}: {source}", path.display())]
    Io {
        /// Dataset path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The payload is not valid JSON or has the wrong shape.
    #[error("Malformed records: {0}")]
    Parse(#[from] serde_json::Error),

    /// The upstream service could not be reached or its body not read.
    #[error("Request to {url} failed: {source}")]
    Request {
        /// Requested URL.
        url: String,
        /// Underlying client error.
        #[source]
        source: reqwest::Error,
    },

    /// The upstream service answered with a non-success status.
    #[error("{url} returned status {status}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// The source is misconfigured.
    #[error("Invalid source configuration: {0}")]
    Config(String),
}

impl From<SourceError> for AppError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::Request { .. } | SourceError::Status { .. } => {
                Self::ExternalService(err.to_string())
            }
            SourceError::Io { .. } | SourceError::Parse(_) | SourceError::Config(_) => {
                Self::Internal(err.to_string())
            }
        }
    }
}
