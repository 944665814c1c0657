use std::path::Path;

use crate::constants;
use super::error::TransformationError;

/// Pre-run validation: refuse to run against a working copy that still
/// carries unresolved manual instructions from a previous run.
///
/// This is distinct from an abort: it rejects the request outright, before
/// any step executes, and no transformation result is produced.
pub fn ensure_no_pending_instructions(working_copy: &Path) -> Result<(), TransformationError> {
    let marker = working_copy.join(constants::PENDING_INSTRUCTIONS_FILE);
    if marker.exists() {
        return Err(TransformationError::PendingManualInstructions { marker });
    }
    Ok(())
}
