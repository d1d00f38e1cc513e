//! Error types for the newsgraph-core crate.
//!
//! The pipeline stages themselves are total functions and never fail.
//! Errors only arise when caller-supplied parameters are rejected before a
//! scoring pass starts.

/// Errors that can occur when preparing an analysis run.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// Invalid analysis parameters or scoring configuration.
    #[error("config error: {0}")]
    Config(String),

    /// A method name could not be mapped to a known relationship method.
    #[error("unknown method: {0}")]
    UnknownMethod(String),
}

/// Convenience type alias for newsgraph-core results.
pub type Result<T> = std::result::Result<T, AnalysisError>;
