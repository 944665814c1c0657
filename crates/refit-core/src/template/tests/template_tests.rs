use std::sync::Arc;

use crate::template::error::TemplateSystemError;
use crate::template::{Template, TemplateBuilder, UpgradeStep};
use crate::transform::adapters::FnUtility;
use crate::transform::result::UtilityOutcome;

fn noop_utility(id: &str) -> Arc<FnUtility> {
    Arc::new(FnUtility::new(id, &format!("Test utility {}", id), |_, _| {
        Ok(UtilityOutcome::Null)
    }))
}

fn single_step_template(name: &str) -> Template {
    let mut template = Template::new(name, "Test template");
    template.add_step(noop_utility("step.1")).unwrap();
    template
}

#[test]
fn test_template_preserves_declared_order() {
    let mut template = Template::new("ordered", "Order check");
    template.add_step(noop_utility("a")).unwrap();
    template.add_step(noop_utility("b")).unwrap();
    template.add_step(noop_utility("c")).unwrap();

    let ids: Vec<&str> = template.steps().iter().map(|s| s.id()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
    assert_eq!(template.len(), 3);
    assert!(!template.is_empty());
}

#[test]
fn test_template_rejects_duplicate_step_id() {
    let mut template = Template::new("dupes", "Duplicate check");
    template.add_step(noop_utility("step.1")).unwrap();

    let result = template.add_step(noop_utility("step.1"));
    assert!(matches!(
        result,
        Err(TemplateSystemError::DuplicateStepId { ref template, ref step_id })
            if template == "dupes" && step_id == "step.1"
    ));
    assert_eq!(template.len(), 1);
}

#[test]
fn test_template_builder_defers_errors() {
    let built = TemplateBuilder::new("built", "Builder check")
        .add_step(noop_utility("a"))
        .add_step(noop_utility("b"))
        .build();
    assert!(built.is_ok());
    assert_eq!(built.unwrap().len(), 2);

    let failed = TemplateBuilder::new("built", "Builder check")
        .add_step(noop_utility("a"))
        .add_step(noop_utility("a"))
        .add_step(noop_utility("b"))
        .build();
    assert!(matches!(
        failed,
        Err(TemplateSystemError::DuplicateStepId { .. })
    ));
}

#[test]
fn test_upgrade_step_rejects_invalid_version() {
    let result = UpgradeStep::terminal(single_step_template("up"), "not-a-version", "1.0.0");
    assert!(matches!(
        result,
        Err(TemplateSystemError::InvalidVersion { ref value, .. }) if value == "not-a-version"
    ));
}

#[test]
fn test_upgrade_step_requires_increasing_versions() {
    let equal = UpgradeStep::terminal(single_step_template("up"), "1.5.6", "1.5.6");
    assert!(matches!(
        equal,
        Err(TemplateSystemError::VersionNotIncreasing { .. })
    ));

    let decreasing = UpgradeStep::terminal(single_step_template("up"), "1.5.6", "1.5.5");
    assert!(matches!(
        decreasing,
        Err(TemplateSystemError::VersionNotIncreasing { .. })
    ));
}

#[test]
fn test_upgrade_step_chain_continuity() {
    let tail = UpgradeStep::terminal(single_step_template("to-1.5.8"), "1.5.7", "1.5.8").unwrap();

    // Linking a step whose next version does not match the successor's
    // current version is a definition error
    let broken = UpgradeStep::linked(single_step_template("to-1.5.7"), "1.5.5", "1.5.6", tail.clone());
    assert!(matches!(
        broken,
        Err(TemplateSystemError::ChainDiscontinuity { ref expected, ref found })
            if expected == "1.5.6" && found == "1.5.7"
    ));

    let linked = UpgradeStep::linked(single_step_template("to-1.5.7"), "1.5.6", "1.5.7", tail).unwrap();
    assert_eq!(linked.current_version().to_string(), "1.5.6");
    assert_eq!(linked.next_version().to_string(), "1.5.7");
    assert!(linked.next().is_some());
}

#[test]
fn test_terminal_version_walks_the_chain() {
    let tail = UpgradeStep::terminal(single_step_template("b"), "1.5.7", "1.5.8").unwrap();
    let head = UpgradeStep::linked(single_step_template("a"), "1.5.6", "1.5.7", tail).unwrap();

    assert_eq!(head.terminal_version().to_string(), "1.5.8");
    assert_eq!(
        head.next().unwrap().terminal_version().to_string(),
        "1.5.8"
    );
}
