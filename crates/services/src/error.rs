//! Shared error types for the services crate.

use std::path::PathBuf;

use quiz_core::model::BankError;
use thiserror::Error;

/// Errors emitted while loading a question bank.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BankLoadError {
    #[error("failed to read question bank {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("question bank is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Bank(#[from] BankError),
}
