//! Measurement harness error types.

use crate::pattern::CatalogError;

/// Errors that can occur while driving benchmark runs.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    /// Requested pattern could not be resolved
    #[error("{0}")]
    Catalog(#[from] CatalogError),

    /// Failed to locate or start a forked worker
    #[error("Failed to spawn worker: {0}")]
    Spawn(#[source] std::io::Error),

    /// A forked worker exited unsuccessfully
    #[error("Worker exited with {status}: {stderr}")]
    WorkerFailed { status: String, stderr: String },

    /// A forked worker produced output that is not a fork result
    #[error("Invalid worker output: {0}")]
    Protocol(String),
}
