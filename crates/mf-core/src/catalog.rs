//! Model catalog resolution
//!
//! Resolves the configured namespaces into the model types the host registers
//! under each of them.

use crate::config::Config;
use crate::error::{CoreError, CoreResult};
use crate::host::{HostRegistry, ModelDescriptor};
use crate::model_name::ModelName;
use crate::namespace_name::NamespaceName;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Strip a version prefix from a configured namespace identifier.
///
/// Everything up to and including the last occurrence of `prefix` is
/// removed; identifiers without the prefix are returned unchanged.
///
/// ```
/// use mf_core::format_namespace;
/// assert_eq!(format_namespace("apps.v1.core", "apps.v1."), "core");
/// assert_eq!(format_namespace("core", "apps.v1."), "core");
/// ```
pub fn format_namespace<'a>(raw: &'a str, prefix: &str) -> &'a str {
    if prefix.is_empty() {
        return raw;
    }
    match raw.rfind(prefix) {
        Some(idx) => &raw[idx + prefix.len()..],
        None => raw,
    }
}

/// Namespaces and their registered models, in configuration order
#[derive(Clone, Default)]
pub struct Catalog {
    entries: Vec<(NamespaceName, Vec<ModelDescriptor>)>,
}

impl Catalog {
    /// Resolve every namespace listed in `config.schema_apps`
    pub fn from_config(registry: &dyn HostRegistry, config: &Config) -> CoreResult<Self> {
        list_models(registry, &config.schema_apps, &config.version_prefix)
    }

    /// Namespaces in configuration order
    pub fn namespaces(&self) -> impl Iterator<Item = &NamespaceName> {
        self.entries.iter().map(|(name, _)| name)
    }

    /// Models of one namespace
    pub fn models(&self, namespace: &str) -> Option<&[ModelDescriptor]> {
        self.entries
            .iter()
            .find(|(name, _)| name == namespace)
            .map(|(_, models)| models.as_slice())
    }

    /// Iterate over `(namespace, models)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&NamespaceName, &[ModelDescriptor])> {
        self.entries
            .iter()
            .map(|(name, models)| (name, models.as_slice()))
    }

    /// Number of namespaces
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no namespace is configured
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of models across namespaces
    pub fn model_count(&self) -> usize {
        self.entries.iter().map(|(_, models)| models.len()).sum()
    }
}

impl Catalog {
    /// Model names per namespace, in configuration order
    pub fn model_names(&self) -> Vec<(&str, Vec<&str>)> {
        self.entries
            .iter()
            .map(|(name, models)| (name.as_str(), models.iter().map(|m| m.name()).collect()))
            .collect()
    }
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (name, models) in &self.entries {
            let names: Vec<&str> = models.iter().map(|m| m.name()).collect();
            map.entry(&name.as_str(), &names);
        }
        map.finish()
    }
}

/// Serializes as `{namespace: [modelName, ...]}` in configuration order.
impl Serialize for Catalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, models) in self.model_names() {
            map.serialize_entry(name, &models)?;
        }
        map.end()
    }
}

/// Resolve the models registered under each namespace.
///
/// Namespaces are formatted with [`format_namespace`] before lookup. A
/// namespace the host does not know fails with
/// [`CoreError::NamespaceNotFound`]; a known namespace without models yields
/// an empty list. Repeated namespaces keep their first position.
pub fn list_models<S: AsRef<str>>(
    registry: &dyn HostRegistry,
    namespaces: &[S],
    version_prefix: &str,
) -> CoreResult<Catalog> {
    let mut entries: Vec<(NamespaceName, Vec<ModelDescriptor>)> =
        Vec::with_capacity(namespaces.len());

    for raw in namespaces {
        let raw = raw.as_ref();
        let formatted = format_namespace(raw, version_prefix);
        let name =
            NamespaceName::try_new(formatted).ok_or_else(|| CoreError::NamespaceNotFound {
                namespace: raw.to_string(),
            })?;
        let models = registry
            .models(name.as_str())
            .ok_or_else(|| CoreError::NamespaceNotFound {
                namespace: name.to_string(),
            })?;
        log::debug!("App '{}' registers {} models", name, models.len());

        match entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = models,
            None => entries.push((name, models)),
        }
    }

    Ok(Catalog { entries })
}

/// Look up one model of a namespace.
///
/// An unregistered namespace fails with [`CoreError::NamespaceNotFound`],
/// a registered namespace without the model with
/// [`CoreError::ModelNotFound`].
pub fn resolve_model(
    registry: &dyn HostRegistry,
    namespace: &str,
    model: &ModelName,
) -> CoreResult<ModelDescriptor> {
    let models = registry
        .models(namespace)
        .ok_or_else(|| CoreError::NamespaceNotFound {
            namespace: namespace.to_string(),
        })?;
    models
        .into_iter()
        .find(|m| m.name() == model.as_str())
        .ok_or_else(|| CoreError::ModelNotFound {
            namespace: namespace.to_string(),
            model: model.to_string(),
        })
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
