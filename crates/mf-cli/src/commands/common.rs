//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use mf_core::{
    build_raw_schema, format_namespace, resolve_model, Catalog, Config, CoreResult, HostModel,
    ModelName,
};
use mf_host::YamlRegistry;
use mf_style::{Projection, Style};
use std::path::Path;

use crate::cli::GlobalArgs;

/// A loaded project: its configuration and the models it defines
pub(crate) struct Project {
    pub config: Config,
    pub registry: YamlRegistry,
}

impl Project {
    /// Strip the configured version prefix from an app identifier
    pub fn app_name<'a>(&self, namespace: &'a str) -> &'a str {
        format_namespace(namespace, &self.config.version_prefix)
    }

    /// Resolve the configured apps.
    ///
    /// Fails when a configured app is not registered with the host.
    pub fn catalog(&self) -> CoreResult<Catalog> {
        Catalog::from_config(&self.registry, &self.config)
    }

    /// Describe `fields` of `model` and project them into `style`.
    ///
    /// Requested fields the model does not declare are left out; without a
    /// style the raw descriptors are returned.
    pub fn schema<S: AsRef<str>>(
        &self,
        namespace: &str,
        model: &ModelName,
        fields: &[S],
        style: Option<Style>,
    ) -> CoreResult<Projection> {
        let app_name = self.app_name(namespace);
        let model = resolve_model(&self.registry, app_name, model)?;
        let full_name = self.config.full_namespace(app_name).unwrap_or(app_name);
        let raw = build_raw_schema(app_name, full_name, model.as_ref(), fields);
        Ok(mf_style::project(raw, style))
    }
}

/// Load the project configuration and its model registry
pub(crate) fn load_project(global: &GlobalArgs) -> Result<Project> {
    let root = Path::new(&global.project_dir);
    let config = match &global.config {
        Some(path) => Config::load(Path::new(path)),
        None => Config::load_from_dir(root),
    }
    .context("Failed to load project")?;

    let registry = YamlRegistry::from_config(root, &config)
        .with_context(|| format!("Failed to load models of project '{}'", config.name))?;
    log::debug!(
        "Loaded {} models for project '{}'",
        registry.model_count(),
        config.name
    );

    Ok(Project {
        config,
        registry,
    })
}

/// Names of the fields the host's default form for `model` includes
pub(crate) fn default_field_names(model: &dyn HostModel) -> Vec<String> {
    model
        .form_field_names()
        .into_iter()
        .map(String::from)
        .collect()
}

/// Split a comma-separated list, dropping blanks
pub(crate) fn parse_field_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field_list() {
        assert_eq!(parse_field_list("title, price,,sku "), vec!["title", "price", "sku"]);
        assert!(parse_field_list(" , ").is_empty());
    }
}
