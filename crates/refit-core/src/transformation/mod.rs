//! Transformation orchestration.
//!
//! The [`Transformer`] is the top-level entry point: it takes a validated
//! [`TransformationRequest`], performs pre-run validation, prepares the
//! working copy, drives the execution engine once per template (or once
//! per upgrade step, each with a fresh context), folds the per-pass
//! metrics, renders manual-instruction documents and assembles the
//! terminal [`TransformationResult`].
pub mod error;
pub mod request;
pub mod result;
pub mod validation;

use std::path::{Path, PathBuf};
use std::time::{Instant, SystemTime};

use log::{info, warn};

use crate::constants;
use crate::metrics::TransformationMetrics;
use crate::report::ManualInstructionsReporter;
use crate::template::Template;
use crate::transform::{AbortDetails, EngineRun, ExecutionEngine, TransformContext};
use crate::utils::fs as fs_utils;

// Re-export important types
pub use error::TransformationError;
pub use request::{ConfigFormat, RequestKind, TransformationConfig, TransformationRequest};
pub use result::{ManualInstructionsSummary, TransformationResult};

/// Drives one transformation request from validation to terminal result
pub struct Transformer {
    engine: ExecutionEngine,
}

impl Transformer {
    pub fn new() -> Self {
        Self {
            engine: ExecutionEngine::new(),
        }
    }

    /// Execute a transformation request to completion.
    ///
    /// Request-definition and pre-run validation errors surface as `Err`
    /// and produce no result. Aborts and step-level errors are folded into
    /// the returned [`TransformationResult`].
    pub async fn execute(
        &self,
        request: TransformationRequest,
    ) -> Result<TransformationResult, TransformationError> {
        validation::ensure_no_pending_instructions(request.app_dir())?;

        let working_copy = self.prepare_working_copy(&request).await?;
        let is_upgrade = request.is_upgrade();
        let (app_dir, config, kind) = request.into_parts();

        info!(
            "Transforming '{}' (working copy '{}')",
            app_dir.display(),
            working_copy.display()
        );

        let mut metrics: Vec<TransformationMetrics> = Vec::new();
        let mut abort: Option<AbortDetails> = None;

        match kind {
            RequestKind::Template(template) => {
                let (pass, pass_abort) =
                    self.run_template(&template, None, None, &working_copy).await;
                metrics.push(pass);
                abort = pass_abort;
            }
            RequestKind::Upgrade(mut path) => {
                info!(
                    "Upgrading from {} to {} ({} step(s))",
                    path.start_version(),
                    path.target_version(),
                    path.len()
                );
                // Strictly sequential: step N+1 never begins before step N's
                // engine pass, including its abort check, completes.
                while path.has_next() {
                    let Some(step) = path.next() else { break };
                    let (pass, pass_abort) = self
                        .run_template(
                            step.template(),
                            Some(step.current_version().to_string()),
                            Some(step.next_version().to_string()),
                            &working_copy,
                        )
                        .await;
                    metrics.push(pass);
                    if pass_abort.is_some() {
                        abort = pass_abort;
                        warn!(
                            "Upgrade path halted before reaching {}",
                            path.target_version()
                        );
                        break;
                    }
                }
            }
        }

        // Manual instructions raised before an abort still matter
        let manual_instructions = self.render_instructions(&metrics, &working_copy, is_upgrade);

        if config.zip_output {
            info!("Zip packaging requested; handing the transformed application to the packaging collaborator");
        }

        let transformed_path =
            std::path::absolute(&working_copy).unwrap_or_else(|_| working_copy.clone());

        Ok(TransformationResult {
            success: abort.is_none(),
            transformed_path,
            metrics,
            abort,
            manual_instructions,
        })
    }

    /// One engine pass with a fresh context; wraps the outcome in a metrics
    /// record
    async fn run_template(
        &self,
        template: &Template,
        from_version: Option<String>,
        to_version: Option<String>,
        working_copy: &Path,
    ) -> (TransformationMetrics, Option<AbortDetails>) {
        let started_at = SystemTime::now();
        let clock = Instant::now();

        let mut context = TransformContext::new(working_copy.to_path_buf());
        let EngineRun {
            records,
            statistics,
            abort,
        } = self.engine.run(template, &mut context).await;

        let pass = TransformationMetrics::new(
            template.name().to_string(),
            from_version,
            to_version,
            statistics,
            records,
            context.manual_instructions().to_vec(),
            started_at,
            clock.elapsed(),
        );
        (pass, abort)
    }

    /// In-place runs use the application folder directly; otherwise the
    /// tree is copied to the output location first.
    async fn prepare_working_copy(
        &self,
        request: &TransformationRequest,
    ) -> Result<PathBuf, TransformationError> {
        let app_dir = request.app_dir();
        if request.config().in_place {
            return Ok(app_dir.to_path_buf());
        }

        let destination = match &request.config().output_dir {
            Some(dir) => dir.clone(),
            None => default_output_dir(app_dir),
        };

        // The copy is blocking filesystem work; keep it off the runtime
        let src = app_dir.to_path_buf();
        let dst = destination.clone();
        let copied = tokio::task::spawn_blocking(move || fs_utils::copy_dir_recursive(&src, &dst))
            .await
            .map_err(|e| {
                TransformationError::Internal(format!("working copy task failed: {}", e))
            })?
            .map_err(|e| TransformationError::WorkingCopy {
                path: destination.clone(),
                source: e,
            })?;
        info!(
            "Copied {} file(s) into working copy '{}'",
            copied,
            destination.display()
        );
        Ok(destination)
    }

    /// Reporting failures degrade to a logged warning, never an abort
    fn render_instructions(
        &self,
        metrics: &[TransformationMetrics],
        working_copy: &Path,
        upgrade: bool,
    ) -> ManualInstructionsSummary {
        match ManualInstructionsReporter::render(metrics, working_copy, upgrade) {
            Ok(rendered) if !rendered.is_empty() => {
                info!(
                    "{} manual instruction(s) require follow-up, see '{}'",
                    rendered.count,
                    rendered
                        .summary
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_default()
                );
                ManualInstructionsSummary {
                    present: true,
                    count: rendered.count,
                    documents: rendered.documents,
                }
            }
            Ok(_) => ManualInstructionsSummary::default(),
            Err(e) => {
                warn!("Manual-instructions reporting failed: {}", e);
                ManualInstructionsSummary::default()
            }
        }
    }
}

impl Default for Transformer {
    fn default() -> Self {
        Self::new()
    }
}

/// Default copy destination: a sibling of the application directory
fn default_output_dir(app_dir: &Path) -> PathBuf {
    let name = app_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "application".to_string());
    let parent = app_dir.parent().unwrap_or_else(|| Path::new("."));
    parent.join(format!("{}{}", name, constants::DEFAULT_OUTPUT_SUFFIX))
}

// Test module declaration
#[cfg(test)]
mod tests;
