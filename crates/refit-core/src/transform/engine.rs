use std::collections::HashMap;

use log::{debug, info, warn};
use serde::Serialize;

use crate::metrics::TransformationStatistics;
use crate::template::Template;
use crate::transform::context::TransformContext;
use crate::transform::result::{ExecutionResult, PerformResult, StepKind, UtilityOutcome};
use crate::transform::Step;

/// The perform result recorded for one step of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepRecord {
    pub step_id: String,
    pub result: PerformResult,
}

/// Diagnostic context captured when a deliberate abort step fires.
/// Captured at most once per run; its presence makes the run unsuccessful.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AbortDetails {
    /// Name of the template that contained the abort step
    pub template: String,
    /// Id of the triggering step
    pub step_id: String,
    /// Human-readable name of the triggering step
    pub step_name: String,
    /// Kind of the triggering step
    pub step_kind: StepKind,
    /// The abort message supplied by the step's error-class result
    pub message: String,
}

/// Everything one engine pass over a template produced
#[derive(Debug)]
pub struct EngineRun {
    /// One record per declared step, in declared order (truncated at abort)
    pub records: Vec<StepRecord>,
    /// Accumulated run statistics
    pub statistics: TransformationStatistics,
    /// Abort context, if a deliberate abort step fired
    pub abort: Option<AbortDetails>,
}

/// Walks one template's ordered step list: evaluates each step's gates
/// against the context, invokes it, classifies the outcome, records the
/// statistic and checks for a deliberate abort.
///
/// A step-level failure does not halt the run; later steps may not depend
/// on the failed one. Only an abort-flagged step returning an error-class
/// result stops the template.
pub struct ExecutionEngine;

impl ExecutionEngine {
    pub fn new() -> Self {
        Self
    }

    /// Execute the template's steps strictly in declared order.
    /// Mutates the context in place and tallies one statistic per step.
    pub async fn run(&self, template: &Template, context: &mut TransformContext) -> EngineRun {
        info!(
            "Executing template '{}' ({} steps)",
            template.name(),
            template.steps().len()
        );

        let mut statistics = TransformationStatistics::default();
        let mut records: Vec<StepRecord> = Vec::with_capacity(template.steps().len());
        let mut outcomes: HashMap<String, PerformResult> = HashMap::new();
        let mut abort = None;
        let mut instructions_seen = context.manual_instructions().len();

        for step in template.steps() {
            let (perform, message) = self.perform(step.as_ref(), &outcomes, context).await;

            // Tally manual instructions raised by this invocation
            let raised = context.manual_instructions().len();
            for _ in instructions_seen..raised {
                statistics.add_manual_instruction();
            }
            instructions_seen = raised;

            statistics.register(step.kind(), &perform);
            debug!("Step '{}': {}", step.id(), perform);

            let fatal = step.is_abort()
                && matches!(&perform, PerformResult::Executed(class) if class.is_error());

            records.push(StepRecord {
                step_id: step.id().to_string(),
                result: perform.clone(),
            });
            outcomes.insert(step.id().to_string(), perform);

            if fatal {
                let details = AbortDetails {
                    template: template.name().to_string(),
                    step_id: step.id().to_string(),
                    step_name: step.name().to_string(),
                    step_kind: step.kind(),
                    message: message.unwrap_or_else(|| "abort requested".to_string()),
                };
                warn!(
                    "Template '{}' aborted by step '{}': {}",
                    details.template, details.step_id, details.message
                );
                abort = Some(details);
                break;
            }
        }

        EngineRun {
            records,
            statistics,
            abort,
        }
    }

    /// Gate, invoke and classify a single step. Returns the perform result
    /// plus the error/warning message of the execution result, if any.
    async fn perform(
        &self,
        step: &dyn Step,
        outcomes: &HashMap<String, PerformResult>,
        context: &mut TransformContext,
    ) -> (PerformResult, Option<String>) {
        for dep in step.dependencies() {
            let met = outcomes
                .get(&dep)
                .map(PerformResult::satisfies_dependency)
                .unwrap_or(false);
            if !met {
                debug!(
                    "Skipping step '{}': dependency '{}' not satisfied",
                    step.id(),
                    dep
                );
                return (PerformResult::SkippedDependency, None);
            }
        }

        for condition in step.conditions() {
            if !condition.holds(context) {
                debug!(
                    "Skipping step '{}': condition '{}' is false",
                    step.id(),
                    condition.description()
                );
                return (PerformResult::SkippedCondition, None);
            }
        }

        let working_copy = context.working_copy().to_path_buf();
        match step.execute(&working_copy, context).await {
            Err(err) => {
                warn!("Step '{}' failed unexpectedly: {}", step.id(), err);
                (PerformResult::Error(err.to_string()), Some(err.to_string()))
            }
            Ok(result) => {
                let class = result.class();
                let message = result.message().map(str::to_string);

                // A utility's returned value lands in the context under the
                // step's declared key; without a key it is dropped after
                // classification.
                if let ExecutionResult::Utility(UtilityOutcome::Value(value)) = result {
                    match step.context_key() {
                        Some(key) => context.insert_boxed(key, value),
                        None => debug!(
                            "Step '{}' returned a value but declares no context key",
                            step.id()
                        ),
                    }
                }

                (PerformResult::Executed(class), message)
            }
        }
    }
}

impl Default for ExecutionEngine {
    fn default() -> Self {
        Self::new()
    }
}
