pub mod adapters;
pub mod context;
pub mod engine;
pub mod error;
pub mod result;

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

// Re-export important types
pub use adapters::{FnOperation, FnUtility};
pub use context::{ContextValue, TransformContext};
pub use engine::{AbortDetails, EngineRun, ExecutionEngine, StepRecord};
pub use result::{
    ExecutionClass, ExecutionResult, OperationOutcome, PerformResult, StepKind, UtilityOutcome,
};

/// Error channel for unexpected step faults. Ordinary failures travel as
/// error-classified [`ExecutionResult`]s; only truly unexpected faults use
/// this, and the engine classifies them as a perform-level `Error`.
pub type BoxedStepError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A named boolean predicate over the run context. All of a step's
/// conditions must hold for the step to be invoked.
#[derive(Clone)]
pub struct StepCondition {
    description: String,
    predicate: Arc<dyn Fn(&TransformContext) -> bool + Send + Sync>,
}

impl StepCondition {
    pub fn new(
        description: &str,
        predicate: impl Fn(&TransformContext) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            description: description.to_string(),
            predicate: Arc::new(predicate),
        }
    }

    /// Condition requiring a context key to be present (any type)
    pub fn key_present(key: &str) -> Self {
        let owned = key.to_string();
        Self::new(
            &format!("context key '{}' present", key),
            move |ctx| ctx.contains(&owned),
        )
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn holds(&self, context: &TransformContext) -> bool {
        (self.predicate)(context)
    }
}

impl fmt::Debug for StepCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepCondition")
            .field("description", &self.description)
            .finish()
    }
}

/// Core trait that all transformation steps must implement.
///
/// Steps are defined at template-authoring time and are logically immutable
/// during a run; per-run state lives in the [`TransformContext`].
#[async_trait]
pub trait Step: Send + Sync {
    /// The unique identifier of the step within its template
    fn id(&self) -> &str;

    /// The human-readable name of the step
    fn name(&self) -> &str;

    /// The description of what this step does
    fn description(&self) -> &str;

    /// Whether this is a utility or an operation
    fn kind(&self) -> StepKind;

    /// Ids of prior steps whose successful execution gates this one
    fn dependencies(&self) -> Vec<String> {
        Vec::new()
    }

    /// Context-derived predicates that must all hold for this step to run
    fn conditions(&self) -> Vec<StepCondition> {
        Vec::new()
    }

    /// Context key under which a utility's returned value is stored
    fn context_key(&self) -> Option<&str> {
        None
    }

    /// A deliberate abort step halts the whole run when its result is
    /// error-class
    fn is_abort(&self) -> bool {
        false
    }

    /// Execute the step against the working copy with the given context
    async fn execute(
        &self,
        working_copy: &Path,
        context: &mut TransformContext,
    ) -> std::result::Result<ExecutionResult, BoxedStepError>;
}

// Test module declaration
#[cfg(test)]
mod tests;
