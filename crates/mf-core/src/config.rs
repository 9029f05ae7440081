//! Configuration types and parsing for modelform.yml

use crate::catalog::format_namespace;
use crate::error::{CoreError, CoreResult};
use crate::namespace_name::NamespaceName;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Version prefix stripped from configured namespaces unless overridden
pub const DEFAULT_VERSION_PREFIX: &str = "apps.v1.";

/// Main project configuration from modelform.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Project name
    pub name: String,

    /// Namespaces ("apps") exposed for schema generation.
    ///
    /// Entries may carry a version prefix (`apps.v1.catalog`); the prefix is
    /// stripped before the host registry is queried.
    #[serde(default)]
    pub schema_apps: Vec<String>,

    /// Prefix removed from each `schema_apps` entry
    #[serde(default = "default_version_prefix")]
    pub version_prefix: String,

    /// Directories holding the model definitions, one sub-directory per namespace
    #[serde(default = "default_model_paths")]
    pub model_paths: Vec<String>,

    /// Optional model rendered on every namespace page for diagnostics
    #[serde(default)]
    pub test_model: Option<TestModelConfig>,
}

/// Diagnostic model override (`test_model` in modelform.yml)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TestModelConfig {
    /// Namespace the model is registered under
    pub app_name: String,
    /// Model name
    pub model: String,
}

fn default_version_prefix() -> String {
    DEFAULT_VERSION_PREFIX.to_string()
}

fn default_model_paths() -> Vec<String> {
    vec!["models".to_string()]
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config =
            serde_yaml::from_str(&content).map_err(|e| CoreError::ConfigParseError {
                message: format!("{}: {}", path.display(), e),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a project directory
    /// Looks for modelform.yml or modelform.yaml
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        let yml_path = dir.join("modelform.yml");
        let yaml_path = dir.join("modelform.yaml");

        if yml_path.exists() {
            Self::load(&yml_path)
        } else if yaml_path.exists() {
            Self::load(&yaml_path)
        } else {
            Err(CoreError::ConfigNotFound {
                path: yml_path.display().to_string(),
            })
        }
    }

    /// Validate the configuration
    pub(crate) fn validate(&self) -> CoreResult<()> {
        if self.name.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "Project name cannot be empty".to_string(),
            });
        }

        if self.model_paths.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "At least one model_paths entry must be specified".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for raw in &self.schema_apps {
            let formatted = format_namespace(raw, &self.version_prefix);
            if formatted.is_empty() {
                return Err(CoreError::ConfigInvalid {
                    message: format!("schema_apps entry '{}' names no app", raw),
                });
            }
            if !seen.insert(formatted) {
                return Err(CoreError::ConfigInvalid {
                    message: format!(
                        "schema_apps entry '{}' resolves to app '{}' which is already listed",
                        raw, formatted
                    ),
                });
            }
        }

        if let Some(test_model) = &self.test_model {
            if test_model.app_name.is_empty() || test_model.model.is_empty() {
                return Err(CoreError::ConfigInvalid {
                    message: "test_model requires both app_name and model".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Configured namespaces with the version prefix stripped, in
    /// declaration order.
    pub fn namespaces(&self) -> Vec<NamespaceName> {
        self.schema_apps
            .iter()
            .filter_map(|raw| NamespaceName::try_new(format_namespace(raw, &self.version_prefix)))
            .collect()
    }

    /// Find the configured (unformatted) entry for a formatted namespace.
    ///
    /// Used as the namespace's full name in the raw schema.
    pub fn full_namespace(&self, namespace: &str) -> Option<&str> {
        self.schema_apps
            .iter()
            .find(|raw| format_namespace(raw, &self.version_prefix) == namespace)
            .map(String::as_str)
    }

    /// Get absolute model paths relative to a project root
    pub fn model_paths_absolute(&self, root: &Path) -> Vec<PathBuf> {
        self.model_paths.iter().map(|p| root.join(p)).collect()
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
