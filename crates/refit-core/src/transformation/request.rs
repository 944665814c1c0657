use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::template::error::TemplateSystemError;
use crate::template::{Template, UpgradePath};
use super::error::TransformationError;

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigFormat {
    /// JSON format (.json)
    Json,
    /// YAML format (.yaml, .yml) - requires "yaml-config" feature
    #[cfg(feature = "yaml-config")]
    Yaml,
    /// TOML format (.toml) - requires "toml-config" feature
    #[cfg(feature = "toml-config")]
    Toml,
}

impl ConfigFormat {
    /// Determine format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_lowercase().as_str() {
                "json" => Some(ConfigFormat::Json),
                #[cfg(feature = "yaml-config")]
                "yaml" | "yml" => Some(ConfigFormat::Yaml),
                #[cfg(feature = "toml-config")]
                "toml" => Some(ConfigFormat::Toml),
                _ => None,
            })
    }
}

/// Read-only configuration for one transformation run.
/// The engine never mutates it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransformationConfig {
    /// Where the transformed copy lands; defaults to a sibling of the
    /// application directory. Ignored for in-place runs.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Transform the application folder directly instead of a copy
    #[serde(default)]
    pub in_place: bool,

    /// Hand the transformed application to the packaging collaborator
    /// for zip compression once the run completes
    #[serde(default)]
    pub zip_output: bool,
}

impl TransformationConfig {
    /// Load a configuration file, detecting the format from the extension
    pub fn load(path: &Path) -> Result<Self, TransformationError> {
        let format = ConfigFormat::from_path(path).ok_or_else(|| {
            TransformationError::UnsupportedConfigFormat {
                path: path.to_path_buf(),
            }
        })?;

        let raw = fs::read_to_string(path).map_err(|e| TransformationError::ConfigIo {
            path: path.to_path_buf(),
            source: e,
        })?;

        let parse_err = |reason: String| TransformationError::ConfigParse {
            path: path.to_path_buf(),
            reason,
        };

        match format {
            ConfigFormat::Json => serde_json::from_str(&raw).map_err(|e| parse_err(e.to_string())),
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => serde_yaml::from_str(&raw).map_err(|e| parse_err(e.to_string())),
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => toml::from_str(&raw).map_err(|e| parse_err(e.to_string())),
        }
    }
}

/// What a request asks to run: a single template or a resolved upgrade path
#[derive(Debug)]
pub enum RequestKind {
    Template(Template),
    Upgrade(UpgradePath),
}

/// Immutable description of one requested transformation, created once per
/// invocation and validated at construction. Owned by the caller, read-only
/// to the engine.
#[derive(Debug)]
pub struct TransformationRequest {
    app_dir: PathBuf,
    config: TransformationConfig,
    kind: RequestKind,
    created_at: SystemTime,
}

impl TransformationRequest {
    /// Request a single-template transformation
    pub fn for_template(
        app_dir: PathBuf,
        config: TransformationConfig,
        template: Template,
    ) -> Result<Self, TransformationError> {
        Self::validate_app_dir(&app_dir)?;
        if template.is_empty() {
            return Err(TransformationError::Template(
                TemplateSystemError::EmptyTemplate {
                    template: template.name().to_string(),
                },
            ));
        }
        Ok(Self {
            app_dir,
            config,
            kind: RequestKind::Template(template),
            created_at: SystemTime::now(),
        })
    }

    /// Request an upgrade-path transformation
    pub fn for_upgrade(
        app_dir: PathBuf,
        config: TransformationConfig,
        path: UpgradePath,
    ) -> Result<Self, TransformationError> {
        Self::validate_app_dir(&app_dir)?;
        if !path.has_next() {
            return Err(TransformationError::InvalidRequest {
                reason: "upgrade path is already exhausted".to_string(),
            });
        }
        Ok(Self {
            app_dir,
            config,
            kind: RequestKind::Upgrade(path),
            created_at: SystemTime::now(),
        })
    }

    fn validate_app_dir(path: &Path) -> Result<(), TransformationError> {
        if !path.is_dir() {
            return Err(TransformationError::ApplicationNotFound {
                path: path.to_path_buf(),
            });
        }
        Ok(())
    }

    /// The application folder this request targets
    pub fn app_dir(&self) -> &Path {
        &self.app_dir
    }

    pub fn config(&self) -> &TransformationConfig {
        &self.config
    }

    pub fn created_at(&self) -> SystemTime {
        self.created_at
    }

    /// Whether this request runs an upgrade path
    pub fn is_upgrade(&self) -> bool {
        matches!(self.kind, RequestKind::Upgrade(_))
    }

    /// Consume the request for execution
    pub(crate) fn into_parts(self) -> (PathBuf, TransformationConfig, RequestKind) {
        (self.app_dir, self.config, self.kind)
    }
}
