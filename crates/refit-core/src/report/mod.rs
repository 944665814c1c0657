//! Manual-instructions reporting.
//!
//! Steps that cannot complete a change automatically raise a
//! [`ManualInstruction`] into the run's context. Once the whole
//! transformation finishes (aborted or not), the reporter scans the
//! collected metrics and renders a linked document set into the
//! transformed application: a summary file at the application root, which
//! doubles as the pending-instructions marker checked by pre-run
//! validation, plus one document per template that raised instructions.
//!
//! Rendering is a pure function of the metrics list: re-rendering from the
//! same metrics produces the same documents.
pub mod error;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::metrics::TransformationMetrics;
use error::ReportError;

/// A follow-up action the automated run could not perform.
///
/// The optional resource points at a file whose content is copied verbatim
/// next to the rendered documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualInstruction {
    /// Human-readable description of the required action
    pub description: String,
    /// Optional file with detailed content, copied into the output
    pub resource: Option<PathBuf>,
}

impl ManualInstruction {
    /// Create a description-only instruction
    pub fn new(description: &str) -> Self {
        Self {
            description: description.to_string(),
            resource: None,
        }
    }

    /// Create an instruction backed by a resource file
    pub fn with_resource(description: &str, resource: PathBuf) -> Self {
        Self {
            description: description.to_string(),
            resource: Some(resource),
        }
    }
}

/// The document set produced by one reporter pass
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderedInstructions {
    /// Summary document at the application root, if any instructions exist
    pub summary: Option<PathBuf>,
    /// All rendered documents, summary first, in metrics order
    pub documents: Vec<PathBuf>,
    /// Total number of instructions across all metrics
    pub count: u32,
}

impl RenderedInstructions {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Renders manual-instruction documents from a completed run's metrics.
pub struct ManualInstructionsReporter;

impl ManualInstructionsReporter {
    /// Render the document set into `target` (the transformed application
    /// root). Metrics without instructions contribute nothing. Returns an
    /// empty [`RenderedInstructions`] when no step raised any.
    pub fn render(
        metrics: &[TransformationMetrics],
        target: &Path,
        upgrade: bool,
    ) -> Result<RenderedInstructions, ReportError> {
        let raised: Vec<&TransformationMetrics> = metrics
            .iter()
            .filter(|m| m.has_manual_instructions())
            .collect();

        if raised.is_empty() {
            return Ok(RenderedInstructions::default());
        }

        let instructions_dir = target.join(constants::INSTRUCTIONS_DIR);
        fs::create_dir_all(&instructions_dir)
            .map_err(|e| ReportError::io("create_dir_all", instructions_dir.clone(), e))?;

        let mut documents = Vec::new();
        let mut count = 0u32;
        let mut summary = String::new();
        summary.push_str("# Pending manual instructions\n\n");
        summary.push_str(
            "The automated transformation could not complete the actions listed \
             below. Apply them by hand, then delete this file; refit refuses to \
             run again while it is present.\n\n",
        );

        for &m in &raised {
            count += m.manual_instructions.len() as u32;

            if upgrade {
                let doc_name = format!("{}.md", slug(&m.template));
                let doc_path = instructions_dir.join(&doc_name);
                let body = render_template_document(m, &instructions_dir)?;
                fs::write(&doc_path, body)
                    .map_err(|e| ReportError::io("write", doc_path.clone(), e))?;

                summary.push_str(&format!(
                    "## {} ({} to {})\n\n",
                    m.template,
                    m.from_version.as_deref().unwrap_or("?"),
                    m.to_version.as_deref().unwrap_or("?"),
                ));
                summary.push_str(&format!(
                    "{} instruction(s), see [{}/{}]({}/{}).\n\n",
                    m.manual_instructions.len(),
                    constants::INSTRUCTIONS_DIR,
                    doc_name,
                    constants::INSTRUCTIONS_DIR,
                    doc_name,
                ));
                documents.push(doc_path);
            } else {
                // Single-template runs get one flat list in the summary itself.
                for instruction in &m.manual_instructions {
                    summary.push_str(&render_instruction_line(
                        instruction,
                        &instructions_dir,
                        constants::INSTRUCTIONS_DIR,
                    )?);
                }
                summary.push('\n');
            }
        }

        let summary_path = target.join(constants::PENDING_INSTRUCTIONS_FILE);
        fs::write(&summary_path, summary)
            .map_err(|e| ReportError::io("write", summary_path.clone(), e))?;

        documents.insert(0, summary_path.clone());

        Ok(RenderedInstructions {
            summary: Some(summary_path),
            documents,
            count,
        })
    }
}

/// Render the per-template instruction document for an upgrade step.
/// The document lives inside the instructions directory, so its resource
/// links are bare file names.
fn render_template_document(
    metrics: &TransformationMetrics,
    instructions_dir: &Path,
) -> Result<String, ReportError> {
    let mut body = format!("# Manual instructions for {}\n\n", metrics.template);
    for instruction in &metrics.manual_instructions {
        body.push_str(&render_instruction_line(instruction, instructions_dir, "")?);
    }
    Ok(body)
}

/// Render one instruction as a list line, copying its resource (if any)
/// verbatim into the instructions directory. `link_prefix` is the relative
/// directory prefix from the rendered document to the copied resource.
fn render_instruction_line(
    instruction: &ManualInstruction,
    instructions_dir: &Path,
    link_prefix: &str,
) -> Result<String, ReportError> {
    match &instruction.resource {
        Some(resource) => {
            let file_name = resource
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "resource".to_string());
            let copied = instructions_dir.join(&file_name);
            let content = fs::read(resource).map_err(|e| ReportError::ResourceUnreadable {
                path: resource.clone(),
                source: e,
            })?;
            fs::write(&copied, content).map_err(|e| ReportError::io("write", copied.clone(), e))?;
            let link = if link_prefix.is_empty() {
                file_name.clone()
            } else {
                format!("{}/{}", link_prefix, file_name)
            };
            Ok(format!(
                "- {} (details: [{}]({}))\n",
                instruction.description, link, link,
            ))
        }
        None => Ok(format!("- {}\n", instruction.description)),
    }
}

/// File-system friendly slug of a template name
fn slug(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect()
}

// Test module declaration
#[cfg(test)]
mod tests;
