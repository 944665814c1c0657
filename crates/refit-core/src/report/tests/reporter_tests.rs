use std::fs;
use std::time::{Duration, SystemTime};

use tempfile::tempdir;

use crate::constants;
use crate::metrics::{TransformationMetrics, TransformationStatistics};
use crate::report::{ManualInstruction, ManualInstructionsReporter};

fn metrics(
    template: &str,
    versions: Option<(&str, &str)>,
    instructions: Vec<ManualInstruction>,
) -> TransformationMetrics {
    TransformationMetrics::new(
        template.to_string(),
        versions.map(|(from, _)| from.to_string()),
        versions.map(|(_, to)| to.to_string()),
        TransformationStatistics::default(),
        Vec::new(),
        instructions,
        SystemTime::UNIX_EPOCH,
        Duration::from_millis(1),
    )
}

#[test]
fn test_no_instructions_renders_nothing() {
    let dir = tempdir().unwrap();
    let all = vec![metrics("clean", None, Vec::new())];

    let rendered = ManualInstructionsReporter::render(&all, dir.path(), false).unwrap();

    assert!(rendered.is_empty());
    assert!(rendered.summary.is_none());
    assert!(!dir.path().join(constants::PENDING_INSTRUCTIONS_FILE).exists());
    assert!(!dir.path().join(constants::INSTRUCTIONS_DIR).exists());
}

#[test]
fn test_single_template_flat_list() {
    let dir = tempdir().unwrap();
    let all = vec![metrics(
        "cleanup",
        None,
        vec![
            ManualInstruction::new("move the legacy settings"),
            ManualInstruction::new("review the generated manifest"),
        ],
    )];

    let rendered = ManualInstructionsReporter::render(&all, dir.path(), false).unwrap();

    assert_eq!(rendered.count, 2);
    let summary_path = rendered.summary.clone().unwrap();
    assert_eq!(
        summary_path,
        dir.path().join(constants::PENDING_INSTRUCTIONS_FILE)
    );

    let summary = fs::read_to_string(&summary_path).unwrap();
    assert!(summary.contains("move the legacy settings"));
    assert!(summary.contains("review the generated manifest"));
    // Flat list: no per-template section headers
    assert!(!summary.contains("## "));
}

#[test]
fn test_upgrade_sections_only_for_raising_steps() {
    let dir = tempdir().unwrap();
    let all = vec![
        metrics(
            "to-1.0.1",
            Some(("1.0.0", "1.0.1")),
            vec![ManualInstruction::new("port the custom hooks")],
        ),
        metrics("to-1.1.0", Some(("1.0.1", "1.1.0")), Vec::new()),
        metrics(
            "to-1.2.0",
            Some(("1.1.0", "1.2.0")),
            vec![ManualInstruction::new("verify the new schema")],
        ),
    ];

    let rendered = ManualInstructionsReporter::render(&all, dir.path(), true).unwrap();

    assert_eq!(rendered.count, 2);
    // Summary plus one document per raising step
    assert_eq!(rendered.documents.len(), 3);

    let summary = fs::read_to_string(rendered.summary.unwrap()).unwrap();
    assert!(summary.contains("## to-1.0.1 (1.0.0 to 1.0.1)"));
    assert!(summary.contains("## to-1.2.0 (1.1.0 to 1.2.0)"));
    assert!(!summary.contains("to-1.1.0"));

    let doc = fs::read_to_string(
        dir.path()
            .join(constants::INSTRUCTIONS_DIR)
            .join("to-1-0-1.md"),
    )
    .unwrap();
    assert!(doc.contains("port the custom hooks"));
}

#[test]
fn test_resource_copied_verbatim() {
    let dir = tempdir().unwrap();
    let resource = dir.path().join("notes.md");
    fs::write(&resource, "detailed migration notes").unwrap();

    let all = vec![metrics(
        "cleanup",
        None,
        vec![ManualInstruction::with_resource(
            "follow the migration notes",
            resource,
        )],
    )];

    let rendered = ManualInstructionsReporter::render(&all, dir.path(), false).unwrap();
    assert_eq!(rendered.count, 1);

    let copied = dir.path().join(constants::INSTRUCTIONS_DIR).join("notes.md");
    assert_eq!(fs::read_to_string(copied).unwrap(), "detailed migration notes");

    let summary = fs::read_to_string(rendered.summary.unwrap()).unwrap();
    assert!(summary.contains("follow the migration notes"));
    assert!(summary.contains(&format!("{}/notes.md", constants::INSTRUCTIONS_DIR)));
}

#[test]
fn test_rendering_is_idempotent() {
    let dir = tempdir().unwrap();
    let all = vec![
        metrics(
            "to-1.0.1",
            Some(("1.0.0", "1.0.1")),
            vec![ManualInstruction::new("port the custom hooks")],
        ),
        metrics(
            "to-1.1.0",
            Some(("1.0.1", "1.1.0")),
            vec![ManualInstruction::new("verify the schema")],
        ),
    ];

    let first = ManualInstructionsReporter::render(&all, dir.path(), true).unwrap();
    let first_summary = fs::read_to_string(first.summary.clone().unwrap()).unwrap();

    let second = ManualInstructionsReporter::render(&all, dir.path(), true).unwrap();
    let second_summary = fs::read_to_string(second.summary.clone().unwrap()).unwrap();

    assert_eq!(first, second);
    assert_eq!(first_summary, second_summary);
}

#[test]
fn test_missing_resource_degrades_to_error() {
    let dir = tempdir().unwrap();
    let all = vec![metrics(
        "cleanup",
        None,
        vec![ManualInstruction::with_resource(
            "read the notes",
            dir.path().join("not-there.md"),
        )],
    )];

    // The reporter surfaces the error; the orchestrator downgrades it to a
    // logged warning rather than failing the run
    let outcome = ManualInstructionsReporter::render(&all, dir.path(), false);
    assert!(outcome.is_err());
}
