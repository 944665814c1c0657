//! # Refit Core Transformation Errors
//!
//! Errors surfaced by the transformation orchestration layer: malformed
//! requests, pre-run validation failures, working-copy preparation
//! problems and internal faults. Step-level failures are NOT represented
//! here; those are absorbed into the run statistics.
use std::path::PathBuf;

use thiserror::Error;

use crate::template::error::TemplateSystemError;

#[derive(Debug, Error)]
pub enum TransformationError {
    #[error("Application directory '{path}' does not exist or is not a directory")]
    ApplicationNotFound { path: PathBuf },

    #[error("Invalid transformation request: {reason}")]
    InvalidRequest { reason: String },

    #[error("Template definition error: {0}")]
    Template(#[from] TemplateSystemError),

    #[error("Working copy has pending manual instructions at '{marker}'; resolve them and delete the file before running again")]
    PendingManualInstructions { marker: PathBuf },

    #[error("Failed to prepare working copy at '{path}': {source}")]
    WorkingCopy {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unknown or unsupported config format for path: {path}")]
    UnsupportedConfigFormat { path: PathBuf },

    #[error("Failed to read config '{path}': {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config '{path}': {reason}")]
    ConfigParse { path: PathBuf, reason: String },

    #[error("Failed to write result report '{path}': {source}")]
    ReportIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Internal transformation error: {0}")]
    Internal(String),
}
