//! Error types for the manual-instructions reporter.
//!
//! Reporting never aborts a transformation run; the orchestrator logs
//! these and carries on.
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("I/O error during '{operation}' on '{path}': {source}")]
    Io {
        operation: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Instruction resource '{path}' could not be read: {source}")]
    ResourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ReportError {
    pub fn io(operation: impl Into<String>, path: PathBuf, source: std::io::Error) -> Self {
        ReportError::Io {
            operation: operation.into(),
            path,
            source,
        }
    }
}
