//! Closure-backed step adapters.
//!
//! Templates are usually assembled from purpose-built step types living in
//! the embedding binary; these adapters cover the simple cases where a
//! full type is overkill. The body runs to completion inside the async
//! `execute`, matching the engine's strictly sequential model.
use std::path::Path;

use async_trait::async_trait;

use crate::transform::context::TransformContext;
use crate::transform::result::{ExecutionResult, OperationOutcome, StepKind, UtilityOutcome};
use crate::transform::{BoxedStepError, Step, StepCondition};

type UtilityBody = dyn Fn(&Path, &mut TransformContext) -> std::result::Result<UtilityOutcome, BoxedStepError>
    + Send
    + Sync;

type OperationBody = dyn Fn(&Path, &mut TransformContext) -> std::result::Result<OperationOutcome, BoxedStepError>
    + Send
    + Sync;

/// A utility step backed by a closure
pub struct FnUtility {
    id: String,
    name: String,
    description: String,
    context_key: Option<String>,
    dependencies: Vec<String>,
    conditions: Vec<StepCondition>,
    abort: bool,
    body: Box<UtilityBody>,
}

impl FnUtility {
    pub fn new(
        id: &str,
        description: &str,
        body: impl Fn(&Path, &mut TransformContext) -> std::result::Result<UtilityOutcome, BoxedStepError>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: id.to_string(),
            description: description.to_string(),
            context_key: None,
            dependencies: Vec::new(),
            conditions: Vec::new(),
            abort: false,
            body: Box::new(body),
        }
    }

    /// Override the display name (defaults to the id)
    pub fn named(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Declare the context key the returned value is stored under
    pub fn with_context_key(mut self, key: &str) -> Self {
        self.context_key = Some(key.to_string());
        self
    }

    /// Gate this step on a prior step's successful execution
    pub fn with_dependency(mut self, step_id: &str) -> Self {
        self.dependencies.push(step_id.to_string());
        self
    }

    /// Gate this step on a context predicate
    pub fn with_condition(mut self, condition: StepCondition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Mark this step as a deliberate abort step
    pub fn as_abort(mut self) -> Self {
        self.abort = true;
        self
    }
}

#[async_trait]
impl Step for FnUtility {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn kind(&self) -> StepKind {
        StepKind::Utility
    }

    fn dependencies(&self) -> Vec<String> {
        self.dependencies.clone()
    }

    fn conditions(&self) -> Vec<StepCondition> {
        self.conditions.clone()
    }

    fn context_key(&self) -> Option<&str> {
        self.context_key.as_deref()
    }

    fn is_abort(&self) -> bool {
        self.abort
    }

    async fn execute(
        &self,
        working_copy: &Path,
        context: &mut TransformContext,
    ) -> std::result::Result<ExecutionResult, BoxedStepError> {
        (self.body)(working_copy, context).map(ExecutionResult::Utility)
    }
}

/// An operation step backed by a closure
pub struct FnOperation {
    id: String,
    name: String,
    description: String,
    dependencies: Vec<String>,
    conditions: Vec<StepCondition>,
    abort: bool,
    body: Box<OperationBody>,
}

impl FnOperation {
    pub fn new(
        id: &str,
        description: &str,
        body: impl Fn(&Path, &mut TransformContext) -> std::result::Result<OperationOutcome, BoxedStepError>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: id.to_string(),
            description: description.to_string(),
            dependencies: Vec::new(),
            conditions: Vec::new(),
            abort: false,
            body: Box::new(body),
        }
    }

    /// Override the display name (defaults to the id)
    pub fn named(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Gate this step on a prior step's successful execution
    pub fn with_dependency(mut self, step_id: &str) -> Self {
        self.dependencies.push(step_id.to_string());
        self
    }

    /// Gate this step on a context predicate
    pub fn with_condition(mut self, condition: StepCondition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Mark this step as a deliberate abort step
    pub fn as_abort(mut self) -> Self {
        self.abort = true;
        self
    }
}

#[async_trait]
impl Step for FnOperation {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn kind(&self) -> StepKind {
        StepKind::Operation
    }

    fn dependencies(&self) -> Vec<String> {
        self.dependencies.clone()
    }

    fn conditions(&self) -> Vec<StepCondition> {
        self.conditions.clone()
    }

    fn is_abort(&self) -> bool {
        self.abort
    }

    async fn execute(
        &self,
        working_copy: &Path,
        context: &mut TransformContext,
    ) -> std::result::Result<ExecutionResult, BoxedStepError> {
        (self.body)(working_copy, context).map(ExecutionResult::Operation)
    }
}
