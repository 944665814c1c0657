use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::transform::adapters::{FnOperation, FnUtility};
use crate::transform::context::TransformContext;
use crate::transform::result::{OperationOutcome, StepKind, UtilityOutcome};
use crate::transform::{Step, StepCondition};

fn context() -> TransformContext {
    TransformContext::new(PathBuf::from("./dummy_adapter_test_path"))
}

#[tokio::test]
async fn test_fn_utility_defaults() {
    let step = FnUtility::new("scan.files", "Counts source files", |_, _| {
        Ok(UtilityOutcome::Null)
    });

    assert_eq!(step.id(), "scan.files");
    assert_eq!(step.name(), "scan.files");
    assert_eq!(step.description(), "Counts source files");
    assert_eq!(step.kind(), StepKind::Utility);
    assert!(step.dependencies().is_empty());
    assert!(step.conditions().is_empty());
    assert!(step.context_key().is_none());
    assert!(!step.is_abort());

    let mut ctx = context();
    let result = step.execute(&PathBuf::from("."), &mut ctx).await.unwrap();
    assert_eq!(result.kind(), StepKind::Utility);
}

#[tokio::test]
async fn test_fn_utility_builder_configuration() {
    let step = FnUtility::new("scan.version", "Reads the application version", |_, _| {
        Ok(UtilityOutcome::Value(Box::new("1.2.3".to_string())))
    })
    .named("Version Scanner")
    .with_context_key("app_version")
    .with_dependency("scan.files")
    .with_condition(StepCondition::key_present("source_count"))
    .as_abort();

    assert_eq!(step.name(), "Version Scanner");
    assert_eq!(step.context_key(), Some("app_version"));
    assert_eq!(step.dependencies(), vec!["scan.files".to_string()]);
    assert_eq!(step.conditions().len(), 1);
    assert!(step.is_abort());
}

#[tokio::test]
async fn test_fn_operation_executes_body() {
    let calls = Arc::new(AtomicU32::new(0));
    let tracked = Arc::clone(&calls);

    let step = FnOperation::new("edit.manifest", "Rewrites the build manifest", move |_, _| {
        tracked.fetch_add(1, Ordering::SeqCst);
        Ok(OperationOutcome::Success)
    });

    assert_eq!(step.kind(), StepKind::Operation);

    let mut ctx = context();
    let result = step.execute(&PathBuf::from("."), &mut ctx).await.unwrap();
    assert_eq!(result.to_string(), "Success");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_fn_operation_error_channel() {
    let step = FnOperation::new("edit.broken", "Always faults", |_, _| {
        Err(Box::new(std::io::Error::other("disk gone")) as crate::transform::BoxedStepError)
    });

    let mut ctx = context();
    let outcome = step.execute(&PathBuf::from("."), &mut ctx).await;
    assert!(outcome.is_err());
    assert!(outcome.unwrap_err().to_string().contains("disk gone"));
}

#[test]
fn test_condition_key_present() {
    let condition = StepCondition::key_present("needle");
    let mut ctx = context();

    assert!(!condition.holds(&ctx));
    ctx.set_value("needle", 1_u8);
    assert!(condition.holds(&ctx));
    assert!(condition.description().contains("needle"));
}
