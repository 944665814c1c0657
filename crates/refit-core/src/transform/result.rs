use std::fmt;

use serde::{Deserialize, Serialize};

use crate::transform::context::ContextValue;

/// The two kinds of step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    /// Reads or inspects the working copy and contributes a value to the context
    Utility,
    /// Mutates the working copy
    Operation,
}

/// Outcome of an operation step that actually ran
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationOutcome {
    /// Nothing needed changing
    NoOp,
    /// The change was applied
    Success,
    /// The change was applied with a caveat
    Warning(String),
    /// The change failed
    Error(String),
}

/// Outcome of a utility step that actually ran
pub enum UtilityOutcome {
    /// The utility produced nothing
    Null,
    /// The utility produced a value for the context
    Value(ContextValue),
    /// The utility completed with a caveat
    Warning(String),
    /// The utility failed
    Error(String),
}

impl fmt::Debug for UtilityOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UtilityOutcome::Null => write!(f, "Null"),
            UtilityOutcome::Value(_) => write!(f, "Value(..)"),
            UtilityOutcome::Warning(msg) => write!(f, "Warning({:?})", msg),
            UtilityOutcome::Error(msg) => write!(f, "Error({:?})", msg),
        }
    }
}

/// Typed outcome of a step that actually ran. A closed, tagged variant:
/// a result is always exactly one of the two branches.
#[derive(Debug)]
pub enum ExecutionResult {
    Utility(UtilityOutcome),
    Operation(OperationOutcome),
}

impl ExecutionResult {
    /// Which kind of step produced this result
    pub fn kind(&self) -> StepKind {
        match self {
            ExecutionResult::Utility(_) => StepKind::Utility,
            ExecutionResult::Operation(_) => StepKind::Operation,
        }
    }

    /// The statistics sub-category of this result
    pub fn class(&self) -> ExecutionClass {
        match self {
            ExecutionResult::Utility(UtilityOutcome::Null) => ExecutionClass::UtilityNull,
            ExecutionResult::Utility(UtilityOutcome::Value(_)) => ExecutionClass::UtilityValue,
            ExecutionResult::Utility(UtilityOutcome::Warning(_)) => ExecutionClass::UtilityWarning,
            ExecutionResult::Utility(UtilityOutcome::Error(_)) => ExecutionClass::UtilityError,
            ExecutionResult::Operation(OperationOutcome::NoOp) => ExecutionClass::OperationNoOp,
            ExecutionResult::Operation(OperationOutcome::Success) => ExecutionClass::OperationSuccess,
            ExecutionResult::Operation(OperationOutcome::Warning(_)) => {
                ExecutionClass::OperationWarning
            }
            ExecutionResult::Operation(OperationOutcome::Error(_)) => ExecutionClass::OperationError,
        }
    }

    /// True for the error-class variants of either branch
    pub fn is_error(&self) -> bool {
        self.class().is_error()
    }

    /// The error or warning message carried by this result, if any
    pub fn message(&self) -> Option<&str> {
        match self {
            ExecutionResult::Utility(UtilityOutcome::Warning(msg))
            | ExecutionResult::Utility(UtilityOutcome::Error(msg))
            | ExecutionResult::Operation(OperationOutcome::Warning(msg))
            | ExecutionResult::Operation(OperationOutcome::Error(msg)) => Some(msg),
            _ => None,
        }
    }
}

impl fmt::Display for ExecutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionResult::Utility(UtilityOutcome::Null) => write!(f, "Null"),
            ExecutionResult::Utility(UtilityOutcome::Value(_)) => write!(f, "Value"),
            ExecutionResult::Utility(UtilityOutcome::Warning(msg)) => write!(f, "Warning: {}", msg),
            ExecutionResult::Utility(UtilityOutcome::Error(msg)) => write!(f, "Error: {}", msg),
            ExecutionResult::Operation(OperationOutcome::NoOp) => write!(f, "NoOp"),
            ExecutionResult::Operation(OperationOutcome::Success) => write!(f, "Success"),
            ExecutionResult::Operation(OperationOutcome::Warning(msg)) => {
                write!(f, "Warning: {}", msg)
            }
            ExecutionResult::Operation(OperationOutcome::Error(msg)) => write!(f, "Error: {}", msg),
        }
    }
}

/// Copyable discriminant of an [`ExecutionResult`], used by the statistics
/// aggregator after the result itself (and any carried value) is consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionClass {
    UtilityNull,
    UtilityValue,
    UtilityWarning,
    UtilityError,
    OperationNoOp,
    OperationSuccess,
    OperationWarning,
    OperationError,
}

impl ExecutionClass {
    pub fn kind(&self) -> StepKind {
        match self {
            ExecutionClass::UtilityNull
            | ExecutionClass::UtilityValue
            | ExecutionClass::UtilityWarning
            | ExecutionClass::UtilityError => StepKind::Utility,
            _ => StepKind::Operation,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ExecutionClass::UtilityError | ExecutionClass::OperationError)
    }
}

/// Engine-level classification of one step's attempted execution.
/// Exactly one is recorded per step per run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "perform", content = "detail", rename_all = "snake_case")]
pub enum PerformResult {
    /// The step invocation itself failed unexpectedly
    Error(String),
    /// The step ran and returned a typed result
    Executed(ExecutionClass),
    /// A declared condition evaluated false
    SkippedCondition,
    /// A declared dependency was not satisfied
    SkippedDependency,
}

impl PerformResult {
    /// True when the step ran and its result was not error-class.
    /// This is what satisfies a dependent step's gate.
    pub fn satisfies_dependency(&self) -> bool {
        matches!(self, PerformResult::Executed(class) if !class.is_error())
    }
}

impl fmt::Display for PerformResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PerformResult::Error(msg) => write!(f, "Error: {}", msg),
            PerformResult::Executed(class) => write!(f, "Executed: {:?}", class),
            PerformResult::SkippedCondition => write!(f, "Skipped: condition"),
            PerformResult::SkippedDependency => write!(f, "Skipped: dependency"),
        }
    }
}
