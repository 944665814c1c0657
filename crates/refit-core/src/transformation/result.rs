use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::constants;
use crate::metrics::TransformationMetrics;
use crate::transform::AbortDetails;
use super::error::TransformationError;

/// Manual-instructions outcome of a run, as reported to the caller
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ManualInstructionsSummary {
    /// Whether any step raised a manual follow-up
    pub present: bool,
    /// Total instructions raised across all metrics
    pub count: u32,
    /// Rendered documents, summary first
    pub documents: Vec<PathBuf>,
}

/// The terminal, immutable record of one full run: one template, or one
/// full upgrade path. Created exactly once, at the very end, by folding
/// all metrics and the abort state.
#[derive(Debug, Clone, Serialize)]
pub struct TransformationResult {
    /// True when no abort fired. Step-level errors do not clear this flag;
    /// inspect the metrics for those.
    pub success: bool,
    /// Absolute path of the transformed application
    pub transformed_path: PathBuf,
    /// One metrics record per engine pass, in execution order
    pub metrics: Vec<TransformationMetrics>,
    /// Abort context when a deliberate abort step fired
    pub abort: Option<AbortDetails>,
    /// Manual follow-up summary
    pub manual_instructions: ManualInstructionsSummary,
}

impl TransformationResult {
    /// Serialize this result as a JSON report into the given directory.
    /// Returns the report path.
    pub fn write_json_report(&self, dir: &Path) -> Result<PathBuf, TransformationError> {
        let path = dir.join(constants::RESULT_REPORT_FILE);
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| TransformationError::Internal(format!("result serialization failed: {}", e)))?;
        fs::write(&path, json).map_err(|e| TransformationError::ReportIo {
            path: path.clone(),
            source: e,
        })?;
        Ok(path)
    }
}
