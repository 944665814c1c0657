//! # Refit Core Errors
//!
//! Defines the crate-wide error type aggregating the subsystem errors.
//!
//! Each subsystem (transform engine, template definitions, transformation
//! orchestration, reporting) carries its own `thiserror` enum; this module
//! folds them into a single [`Error`] for callers that work across
//! subsystem boundaries.
use std::result::Result as StdResult;

use thiserror::Error as ThisError;

use crate::report::error::ReportError;
use crate::template::error::TemplateSystemError;
use crate::transform::error::TransformSystemError;
use crate::transformation::error::TransformationError;

/// Crate-wide error type for the refit engine
#[derive(Debug, ThisError)]
pub enum Error {
    /// Specific, typed transform engine error
    #[error("Transform engine error: {0}")]
    Transform(#[from] TransformSystemError),

    /// Template or upgrade-chain definition error
    #[error("Template error: {0}")]
    Template(#[from] TemplateSystemError),

    /// Transformation request / orchestration error
    #[error("Transformation error: {0}")]
    Transformation(#[from] TransformationError),

    /// Manual-instructions reporting error
    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    /// Generic error with message
    #[error("Error: {0}")]
    Other(String),
}

/// Shorthand for Result with our Error type
pub type Result<T> = StdResult<T, Error>;

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Other(msg.to_string())
    }
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Other(msg)
    }
}
