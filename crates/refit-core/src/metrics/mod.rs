//! Run statistics and per-template metrics records.
//!
//! The engine registers exactly one perform result per step into a
//! [`TransformationStatistics`]; at run end the counters are wrapped,
//! together with template identity and timing, into an immutable
//! [`TransformationMetrics`]. The ordered list of metrics (one per upgrade
//! step, or exactly one for a single-template run) is the durable record
//! of what happened.
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

use crate::report::ManualInstruction;
use crate::transform::engine::StepRecord;
use crate::transform::result::{ExecutionClass, PerformResult, StepKind};

/// Run-scoped counters, mutated only through [`register`] and
/// [`add_manual_instruction`], monotonically increasing within a run.
///
/// [`register`]: TransformationStatistics::register
/// [`add_manual_instruction`]: TransformationStatistics::add_manual_instruction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformationStatistics {
    /// Utility steps seen
    pub utilities: u32,
    /// Operation steps seen
    pub operations: u32,

    // Perform result categories
    pub errors: u32,
    pub executed: u32,
    pub skipped_condition: u32,
    pub skipped_dependency: u32,

    // Execution result sub-categories, utility branch
    pub utility_null: u32,
    pub utility_value: u32,
    pub utility_warning: u32,
    pub utility_error: u32,

    // Execution result sub-categories, operation branch
    pub operation_noop: u32,
    pub operation_success: u32,
    pub operation_warning: u32,
    pub operation_error: u32,

    /// Manual follow-up records raised during the run
    pub manual_instructions: u32,
}

impl TransformationStatistics {
    /// Register one step's perform result. Increments the kind counter,
    /// exactly one perform category counter and, for executed steps,
    /// exactly one execution sub-category counter.
    pub fn register(&mut self, kind: StepKind, outcome: &PerformResult) {
        match kind {
            StepKind::Utility => self.utilities += 1,
            StepKind::Operation => self.operations += 1,
        }

        match outcome {
            PerformResult::Error(_) => self.errors += 1,
            PerformResult::SkippedCondition => self.skipped_condition += 1,
            PerformResult::SkippedDependency => self.skipped_dependency += 1,
            PerformResult::Executed(class) => {
                self.executed += 1;
                match class {
                    ExecutionClass::UtilityNull => self.utility_null += 1,
                    ExecutionClass::UtilityValue => self.utility_value += 1,
                    ExecutionClass::UtilityWarning => self.utility_warning += 1,
                    ExecutionClass::UtilityError => self.utility_error += 1,
                    ExecutionClass::OperationNoOp => self.operation_noop += 1,
                    ExecutionClass::OperationSuccess => self.operation_success += 1,
                    ExecutionClass::OperationWarning => self.operation_warning += 1,
                    ExecutionClass::OperationError => self.operation_error += 1,
                }
            }
        }
    }

    /// Count one manual follow-up record raised by a step
    pub fn add_manual_instruction(&mut self) {
        self.manual_instructions += 1;
    }

    /// Total steps registered. Equals the template's declared step count
    /// for a completed run (truncated at abort).
    pub fn total_steps(&self) -> u32 {
        self.errors + self.executed + self.skipped_condition + self.skipped_dependency
    }

    /// True if any step produced an error-class outcome or failed outright
    pub fn has_errors(&self) -> bool {
        self.errors > 0 || self.utility_error > 0 || self.operation_error > 0
    }
}

/// Immutable record of one engine pass: the statistics plus template
/// identity, the per-step records, the manual instructions raised and
/// timing metadata.
#[derive(Debug, Clone, Serialize)]
pub struct TransformationMetrics {
    /// Name of the executed template
    pub template: String,
    /// For upgrade steps, the version the step upgrades from
    pub from_version: Option<String>,
    /// For upgrade steps, the version the step upgrades to
    pub to_version: Option<String>,
    /// Accumulated counters for this pass
    pub statistics: TransformationStatistics,
    /// One perform record per step, in declared order
    pub records: Vec<StepRecord>,
    /// Manual instructions raised during this pass
    pub manual_instructions: Vec<ManualInstruction>,
    /// Wall-clock time the pass started
    pub started_at: SystemTime,
    /// How long the pass took
    pub duration: Duration,
}

impl TransformationMetrics {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        template: String,
        from_version: Option<String>,
        to_version: Option<String>,
        statistics: TransformationStatistics,
        records: Vec<StepRecord>,
        manual_instructions: Vec<ManualInstruction>,
        started_at: SystemTime,
        duration: Duration,
    ) -> Self {
        Self {
            template,
            from_version,
            to_version,
            statistics,
            records,
            manual_instructions,
            started_at,
            duration,
        }
    }

    /// Whether this pass raised any manual follow-up records
    pub fn has_manual_instructions(&self) -> bool {
        !self.manual_instructions.is_empty()
    }
}
