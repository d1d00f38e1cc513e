//! Error types for news collection, configuration and export.

use newsgraph_core::{AnalysisError, SourceApi};

/// Errors raised by a single provider adapter.
///
/// The collector never propagates these into the analysis pipeline: a
/// failing source is logged and contributes zero articles.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// No API key was configured or found in the environment.
    #[error("missing API key for {0}")]
    MissingApiKey(SourceApi),

    /// The HTTP request could not be sent or the body could not be read.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The provider answered with a non-success status.
    #[error("{api} error: {status}")]
    Status {
        /// Which provider answered.
        api: SourceApi,
        /// The HTTP status code.
        status: u16,
    },

    /// The response body was not the JSON shape the adapter expects.
    #[error("parse error: {0}")]
    Parse(String),
}

/// Top-level error type for the newsgraph host.
#[derive(Debug, thiserror::Error)]
pub enum NewsGraphError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// A provider adapter failed.
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    /// Analysis parameters were rejected.
    #[error("analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for NewsGraphError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<csv::Error> for NewsGraphError {
    fn from(err: csv::Error) -> Self {
        let message = err.to_string();
        match err.into_kind() {
            csv::ErrorKind::Io(io) => Self::Io(io),
            _ => Self::Serialization(message),
        }
    }
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, NewsGraphError>;
