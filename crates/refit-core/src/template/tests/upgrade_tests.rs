use std::sync::Arc;

use crate::template::error::TemplateSystemError;
use crate::template::upgrade::UpgradePath;
use crate::template::{Template, UpgradeStep};
use crate::transform::adapters::FnUtility;
use crate::transform::result::UtilityOutcome;

fn template(name: &str) -> Template {
    let mut t = Template::new(name, "Test upgrade template");
    t.add_step(Arc::new(FnUtility::new("noop", "Does nothing", |_, _| {
        Ok(UtilityOutcome::Null)
    })))
    .unwrap();
    t
}

/// Chain: 1.5.6 -> 1.5.7 -> 1.5.8
fn chain() -> Arc<UpgradeStep> {
    let tail = UpgradeStep::terminal(template("to-1.5.8"), "1.5.7", "1.5.8").unwrap();
    UpgradeStep::linked(template("to-1.5.7"), "1.5.6", "1.5.7", tail).unwrap()
}

#[test]
fn test_resolve_rejects_target_equal_to_current() {
    let result = UpgradePath::resolve(chain(), Some("1.5.6"));
    assert!(matches!(
        result,
        Err(TemplateSystemError::TargetEqualsCurrent { ref version }) if version == "1.5.6"
    ));
}

#[test]
fn test_resolve_rejects_older_target() {
    let result = UpgradePath::resolve(chain(), Some("1.5.5"));
    assert!(matches!(
        result,
        Err(TemplateSystemError::TargetOlderThanCurrent { ref current, ref target })
            if current == "1.5.6" && target == "1.5.5"
    ));
}

#[test]
fn test_resolve_uses_version_ordering_not_string_ordering() {
    // "1.5.10" sorts before "1.5.9" as a string but is newer as a version
    let tail = UpgradeStep::terminal(template("to-1.5.10"), "1.5.9", "1.5.10").unwrap();
    let head = UpgradeStep::linked(template("to-1.5.9"), "1.5.6", "1.5.9", tail).unwrap();

    let path = UpgradePath::resolve(head, Some("1.5.10")).unwrap();
    assert_eq!(path.len(), 2);
    assert_eq!(path.target_version().to_string(), "1.5.10");
}

#[test]
fn test_resolve_rejects_unreachable_target() {
    // The chain only reaches 1.5.8
    let result = UpgradePath::resolve(chain(), Some("1.5.9"));
    assert!(matches!(
        result,
        Err(TemplateSystemError::TargetNotInChain { ref target, ref terminal })
            if target == "1.5.9" && terminal == "1.5.8"
    ));
}

#[test]
fn test_resolve_rejects_unparseable_target() {
    let result = UpgradePath::resolve(chain(), Some("next"));
    assert!(matches!(result, Err(TemplateSystemError::InvalidVersion { .. })));
}

#[test]
fn test_resolve_defaults_to_terminal_version() {
    let path = UpgradePath::resolve(chain(), None).unwrap();
    assert_eq!(path.start_version().to_string(), "1.5.6");
    assert_eq!(path.target_version().to_string(), "1.5.8");
    assert_eq!(path.len(), 2);
}

#[test]
fn test_path_stops_at_requested_version() {
    // Requesting 1.5.7 over a chain that continues to 1.5.8 yields exactly
    // one step and then reports no further steps
    let mut path = UpgradePath::resolve(chain(), Some("1.5.7")).unwrap();

    assert_eq!(path.len(), 1);
    assert!(path.has_next());

    let step = path.next().expect("one step");
    assert_eq!(step.current_version().to_string(), "1.5.6");
    assert_eq!(step.next_version().to_string(), "1.5.7");

    assert!(!path.has_next());
    assert!(path.next().is_none());
}

#[test]
fn test_path_iterates_each_step_exactly_once() {
    let mut path = UpgradePath::resolve(chain(), None).unwrap();

    let first = path.next().expect("first step");
    assert_eq!(first.current_version().to_string(), "1.5.6");

    let second = path.next().expect("second step");
    assert_eq!(second.current_version().to_string(), "1.5.7");

    // Exhausted cursors never resume
    assert!(!path.has_next());
    assert!(path.next().is_none());
    assert!(path.next().is_none());
}

#[test]
fn test_resolved_path_does_not_mutate_chain() {
    let head = chain();
    let mut path = UpgradePath::resolve(head.clone(), None).unwrap();
    while path.next().is_some() {}

    // The underlying chain is untouched and can be resolved again
    let again = UpgradePath::resolve(head, Some("1.5.7")).unwrap();
    assert_eq!(again.len(), 1);
}
