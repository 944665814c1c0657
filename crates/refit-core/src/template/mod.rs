pub mod error;
pub mod upgrade;

use std::fmt;
use std::sync::Arc;

use semver::Version;

use crate::transform::Step;
use error::TemplateSystemError;

/// An ordered, reusable definition of transformation steps.
///
/// Templates are stateless blueprints: all per-run state lives in the
/// [`crate::transform::TransformContext`] created for each execution.
pub struct Template {
    /// Name of the template
    name: String,
    /// Description of what this template does
    description: String,
    /// Ordered list of steps to execute
    steps: Vec<Arc<dyn Step>>,
}

impl Template {
    /// Create a new, empty template
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            steps: Vec::new(),
        }
    }

    /// Append a step. Step ids must be unique within a template.
    pub fn add_step(&mut self, step: Arc<dyn Step>) -> Result<(), TemplateSystemError> {
        if self.steps.iter().any(|existing| existing.id() == step.id()) {
            return Err(TemplateSystemError::DuplicateStepId {
                template: self.name.clone(),
                step_id: step.id().to_string(),
            });
        }
        self.steps.push(step);
        Ok(())
    }

    /// Get the name of the template
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the description of the template
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The steps in declared order
    pub fn steps(&self) -> &[Arc<dyn Step>] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

// Manual Debug implementation: steps are trait objects, show their ids
impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let step_ids: Vec<&str> = self.steps.iter().map(|s| s.id()).collect();
        f.debug_struct("Template")
            .field("name", &self.name)
            .field("steps", &step_ids)
            .finish()
    }
}

/// Builder for simplified template creation. Errors are deferred to
/// [`build`](TemplateBuilder::build).
pub struct TemplateBuilder {
    template: Template,
    error: Option<TemplateSystemError>,
}

impl TemplateBuilder {
    /// Start building a new template
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            template: Template::new(name, description),
            error: None,
        }
    }

    /// Add a step to the template
    pub fn add_step(mut self, step: Arc<dyn Step>) -> Self {
        if self.error.is_none() {
            if let Err(e) = self.template.add_step(step) {
                self.error = Some(e);
            }
        }
        self
    }

    /// Build the template, surfacing the first deferred error
    pub fn build(self) -> Result<Template, TemplateSystemError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.template),
        }
    }
}

/// A template additionally tagged with a current/next version pair and
/// linked to its successor, forming a singly-linked, strictly
/// version-increasing chain.
pub struct UpgradeStep {
    template: Template,
    current_version: Version,
    next_version: Version,
    next: Option<Arc<UpgradeStep>>,
}

impl UpgradeStep {
    /// Create the last step of a chain
    pub fn terminal(
        template: Template,
        current: &str,
        next: &str,
    ) -> Result<Arc<Self>, TemplateSystemError> {
        Self::build(template, current, next, None)
    }

    /// Create a step linked to its successor. The successor's current
    /// version must equal this step's next version.
    pub fn linked(
        template: Template,
        current: &str,
        next: &str,
        successor: Arc<UpgradeStep>,
    ) -> Result<Arc<Self>, TemplateSystemError> {
        let next_version = parse_version(next)?;
        if *successor.current_version() != next_version {
            return Err(TemplateSystemError::ChainDiscontinuity {
                expected: next_version.to_string(),
                found: successor.current_version().to_string(),
            });
        }
        Self::build(template, current, next, Some(successor))
    }

    fn build(
        template: Template,
        current: &str,
        next: &str,
        successor: Option<Arc<UpgradeStep>>,
    ) -> Result<Arc<Self>, TemplateSystemError> {
        let current_version = parse_version(current)?;
        let next_version = parse_version(next)?;

        if next_version <= current_version {
            return Err(TemplateSystemError::VersionNotIncreasing {
                current: current_version.to_string(),
                next: next_version.to_string(),
            });
        }

        Ok(Arc::new(Self {
            template,
            current_version,
            next_version,
            next: successor,
        }))
    }

    /// The step list executed when this upgrade step runs
    pub fn template(&self) -> &Template {
        &self.template
    }

    /// The version this step upgrades from
    pub fn current_version(&self) -> &Version {
        &self.current_version
    }

    /// The version this step upgrades to
    pub fn next_version(&self) -> &Version {
        &self.next_version
    }

    /// The successor in the chain, if any
    pub fn next(&self) -> Option<&Arc<UpgradeStep>> {
        self.next.as_ref()
    }

    /// The final version reachable from this step by walking the chain
    pub fn terminal_version(&self) -> Version {
        let mut step = self;
        while let Some(successor) = step.next() {
            step = successor;
        }
        step.next_version.clone()
    }
}

impl fmt::Debug for UpgradeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpgradeStep")
            .field("template", &self.template.name())
            .field("current_version", &self.current_version)
            .field("next_version", &self.next_version)
            .field("has_next", &self.next.is_some())
            .finish()
    }
}

/// Parse a version string, mapping the semver error into a definition error
pub(crate) fn parse_version(value: &str) -> Result<Version, TemplateSystemError> {
    Version::parse(value).map_err(|e| TemplateSystemError::InvalidVersion {
        value: value.to_string(),
        source: e,
    })
}

// Re-export important types
pub use upgrade::UpgradePath;

// Test module declaration
#[cfg(test)]
mod tests;
