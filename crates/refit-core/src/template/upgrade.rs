use std::fmt;
use std::sync::Arc;

use semver::Version;

use super::error::TemplateSystemError;
use super::{parse_version, UpgradeStep};

/// A resolved, bounded traversal of an upgrade-step chain toward a target
/// version.
///
/// Resolution validates the requested target against the chain reachable
/// from the starting step; iteration hands out each upgrade step exactly
/// once, stopping at the step whose `next_version` equals the resolved
/// target even if the underlying chain continues further. The chain itself
/// is never mutated.
pub struct UpgradePath {
    /// The steps of the path, in execution order
    steps: Vec<Arc<UpgradeStep>>,
    /// Index of the next step to hand out; once exhausted, never resumes
    cursor: usize,
    start_version: Version,
    target_version: Version,
}

impl UpgradePath {
    /// Resolve a path from a starting upgrade step and an optional target
    /// version. When no target is requested, the chain's terminal version
    /// is used.
    ///
    /// Fails with a definition error when the target cannot be parsed,
    /// equals the start's current version, is older than it, or matches no
    /// `next_version` reachable from the start.
    pub fn resolve(
        start: Arc<UpgradeStep>,
        target: Option<&str>,
    ) -> Result<Self, TemplateSystemError> {
        let start_version = start.current_version().clone();
        let target_version = match target {
            Some(raw) => parse_version(raw)?,
            None => start.terminal_version(),
        };

        if target_version == start_version {
            return Err(TemplateSystemError::TargetEqualsCurrent {
                version: target_version.to_string(),
            });
        }
        if target_version < start_version {
            return Err(TemplateSystemError::TargetOlderThanCurrent {
                current: start_version.to_string(),
                target: target_version.to_string(),
            });
        }

        let mut steps = Vec::new();
        let mut walker = Some(start);
        let mut found = false;
        while let Some(step) = walker {
            let reached = *step.next_version() == target_version;
            walker = step.next().cloned();
            steps.push(step);
            if reached {
                found = true;
                break;
            }
        }

        if !found {
            let terminal = steps
                .last()
                .map(|s| s.next_version().to_string())
                .unwrap_or_default();
            return Err(TemplateSystemError::TargetNotInChain {
                target: target_version.to_string(),
                terminal,
            });
        }

        Ok(Self {
            steps,
            cursor: 0,
            start_version,
            target_version,
        })
    }

    /// Whether a step remains to be handed out
    pub fn has_next(&self) -> bool {
        self.cursor < self.steps.len()
    }

    /// Return the cursor step and advance. `None` once the path is
    /// exhausted; the cursor never resumes.
    pub fn next(&mut self) -> Option<Arc<UpgradeStep>> {
        let step = self.steps.get(self.cursor).cloned();
        if step.is_some() {
            self.cursor += 1;
        }
        step
    }

    /// Number of upgrade steps in the resolved path
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The version the path starts from
    pub fn start_version(&self) -> &Version {
        &self.start_version
    }

    /// The version the path upgrades to
    pub fn target_version(&self) -> &Version {
        &self.target_version
    }
}

impl fmt::Debug for UpgradePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpgradePath")
            .field("start_version", &self.start_version)
            .field("target_version", &self.target_version)
            .field("steps", &self.steps.len())
            .field("cursor", &self.cursor)
            .finish()
    }
}
