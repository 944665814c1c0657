use std::fs;

use tempfile::tempdir;

use crate::constants;
use crate::transformation::error::TransformationError;
use crate::transformation::validation::ensure_no_pending_instructions;

#[test]
fn test_clean_working_copy_passes() {
    let dir = tempdir().unwrap();
    assert!(ensure_no_pending_instructions(dir.path()).is_ok());
}

#[test]
fn test_marker_file_fails_validation() {
    let dir = tempdir().unwrap();
    let marker = dir.path().join(constants::PENDING_INSTRUCTIONS_FILE);
    fs::write(&marker, "resolve me first").unwrap();

    let result = ensure_no_pending_instructions(dir.path());
    assert!(matches!(
        result,
        Err(TransformationError::PendingManualInstructions { marker: ref m }) if *m == marker
    ));
}

#[test]
fn test_marker_in_subdirectory_is_ignored() {
    // Only a marker at the working-copy root blocks the run
    let dir = tempdir().unwrap();
    let sub = dir.path().join("nested");
    fs::create_dir_all(&sub).unwrap();
    fs::write(sub.join(constants::PENDING_INSTRUCTIONS_FILE), "nested").unwrap();

    assert!(ensure_no_pending_instructions(dir.path()).is_ok());
}
