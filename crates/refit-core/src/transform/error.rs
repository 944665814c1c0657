//! # Refit Core Transform Errors
//!
//! Defines error types specific to the step execution machinery.
//!
//! Note that ordinary step failures are not errors at this level: they are
//! classified into [`crate::transform::PerformResult`] and absorbed into
//! the run statistics. These types cover faults in the machinery itself
//! and context access problems inside step implementations.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformSystemError {
    #[error("Error accessing data from TransformContext: Key '{key}' - {reason}")]
    ContextError { key: String, reason: String },

    #[error("Internal transform engine error: {0}")]
    InternalError(String),
}
