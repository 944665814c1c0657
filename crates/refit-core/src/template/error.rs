//! # Refit Core Template Errors
//!
//! Definition errors for templates, upgrade-step chains and upgrade-path
//! resolution. All of these are raised synchronously at construction time,
//! before any step runs, and are always fatal to the request.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TemplateSystemError {
    #[error("Step '{step_id}' already exists in template '{template}'")]
    DuplicateStepId { template: String, step_id: String },

    #[error("Template '{template}' declares no steps")]
    EmptyTemplate { template: String },

    #[error("Invalid version '{value}': {source}")]
    InvalidVersion {
        value: String,
        #[source]
        source: semver::Error,
    },

    #[error("Upgrade step versions must increase: current '{current}', next '{next}'")]
    VersionNotIncreasing { current: String, next: String },

    #[error("Upgrade chain discontinuity: step ends at '{expected}' but its successor starts at '{found}'")]
    ChainDiscontinuity { expected: String, found: String },

    #[error("Requested target version '{version}' equals the current version, nothing to do")]
    TargetEqualsCurrent { version: String },

    #[error("Requested target version '{target}' is older than the current version '{current}'")]
    TargetOlderThanCurrent { current: String, target: String },

    #[error("Requested target version '{target}' not reachable in the upgrade chain (terminal version is '{terminal}')")]
    TargetNotInChain { target: String, terminal: String },
}
