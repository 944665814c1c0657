//! Built-in template catalog.
//!
//! The engine itself carries no knowledge of any particular application
//! format; product distributions embed refit-core and register their own
//! templates and upgrade chains. This stock binary ships one
//! inspection-only baseline template so the engine can be exercised
//! against any folder without modifying it.
use std::path::Path;
use std::sync::Arc;

use refit_core::template::error::TemplateSystemError;
use refit_core::template::{Template, UpgradeStep};
use refit_core::transform::error::TransformSystemError;
use refit_core::transform::{BoxedStepError, FnUtility, UtilityOutcome};
use refit_core::utils::fs as fs_utils;

/// Name of the built-in inspection template
pub const AUDIT_TEMPLATE: &str = "audit";

/// Look up a built-in template by name
pub fn template(name: &str) -> Option<Result<Template, TemplateSystemError>> {
    match name {
        AUDIT_TEMPLATE => Some(audit_template()),
        _ => None,
    }
}

/// Names of all built-in templates
pub fn template_names() -> Vec<&'static str> {
    vec![AUDIT_TEMPLATE]
}

/// Upgrade chains registered in this build, by name.
/// The stock binary registers none; distributions embedding refit-core
/// compile their version chains in here.
pub fn upgrade_chains() -> Vec<(String, Arc<UpgradeStep>)> {
    Vec::new()
}

/// Inspection-only baseline: walks the application tree and reports what a
/// transformation would have to touch, without changing anything.
fn audit_template() -> Result<Template, TemplateSystemError> {
    let mut template = Template::new(
        AUDIT_TEMPLATE,
        "Inspects the application tree without changing it",
    );

    template.add_step(Arc::new(
        FnUtility::new(
            "scan.sources",
            "Counts the files in the application tree",
            |working_copy: &Path, _| {
                let count = fs_utils::count_files(working_copy)
                    .map_err(|e| Box::new(e) as BoxedStepError)?;
                Ok(UtilityOutcome::Value(Box::new(count)))
            },
        )
        .named("Source Scanner")
        .with_context_key("source_file_count"),
    ))?;

    template.add_step(Arc::new(
        FnUtility::new(
            "scan.manifest",
            "Looks for a recognized build manifest at the application root",
            |working_copy: &Path, _| {
                for candidate in ["Cargo.toml", "package.json", "pom.xml", "build.gradle"] {
                    if working_copy.join(candidate).is_file() {
                        return Ok(UtilityOutcome::Value(Box::new(candidate.to_string())));
                    }
                }
                Ok(UtilityOutcome::Warning("no build manifest found".to_string()))
            },
        )
        .named("Manifest Detector")
        .with_context_key("build_manifest"),
    ))?;

    template.add_step(Arc::new(
        FnUtility::new(
            "audit.summary",
            "Logs a one-line summary of the findings",
            |_, context| {
                let sources = context
                    .get_value::<u64>("source_file_count")
                    .copied()
                    .ok_or_else(|| TransformSystemError::ContextError {
                        key: "source_file_count".to_string(),
                        reason: "Source Scanner result not found".to_string(),
                    })?;
                match context.get_value::<String>("build_manifest") {
                    Some(manifest) => {
                        log::info!("Audit: {} file(s), build manifest '{}'", sources, manifest)
                    }
                    None => log::info!("Audit: {} file(s), no build manifest", sources),
                }
                Ok(UtilityOutcome::Null)
            },
        )
        .named("Audit Summary")
        .with_dependency("scan.sources"),
    ))?;

    Ok(template)
}
