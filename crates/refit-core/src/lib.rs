// Crate modules
pub mod constants;
pub mod error;
pub mod metrics;
pub mod report;
pub mod template;
pub mod transform;
pub mod transformation;
pub mod utils;

// Re-export key public types for easier use by the binary and by embedders
pub use error::{Error, Result};
pub use metrics::{TransformationMetrics, TransformationStatistics};
pub use report::ManualInstruction;
pub use template::{Template, TemplateBuilder, UpgradePath, UpgradeStep};
pub use transform::{ExecutionEngine, Step, StepCondition, TransformContext};
pub use transformation::{
    TransformationConfig, TransformationRequest, TransformationResult, Transformer,
};
