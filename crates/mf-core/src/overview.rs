//! Per-namespace field overview
//!
//! Lists every model of a namespace with its declared fields, which is what
//! a user browses before choosing the fields to put in a schema.

use crate::config::TestModelConfig;
use crate::error::{CoreError, CoreResult};
use crate::host::{HostModel, HostRegistry, InternalType};
use serde::Serialize;

/// Summary of one declared field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSummary {
    pub name: String,
    pub internal_type: InternalType,
    pub is_relation: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_model: Option<String>,
    /// Form-field class, `""` when the field has no form representation
    pub form_field_type: String,
    pub is_in_default_model_form_fields: bool,
}

/// One model and its declared fields
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelOverview {
    pub name: String,
    pub fields: Vec<FieldSummary>,
}

/// Every model of a namespace, plus the configured diagnostic model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamespaceOverview {
    pub namespace: String,
    pub models: Vec<ModelOverview>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_model: Option<ModelOverview>,
}

impl ModelOverview {
    /// Summarize the declared fields of `model`
    pub fn of(model: &dyn HostModel) -> Self {
        let form_fields = model.form_field_names();
        let fields = model
            .fields()
            .into_iter()
            .map(|field| FieldSummary {
                name: field.name().to_string(),
                internal_type: field.internal_type(),
                is_relation: field.is_relation(),
                related_model: field.related_model(),
                form_field_type: field.form_field().map(|f| f.class).unwrap_or_default(),
                is_in_default_model_form_fields: form_fields.contains(&field.name()),
            })
            .collect();
        Self {
            name: model.name().to_string(),
            fields,
        }
    }
}

/// Build the overview of `namespace`.
///
/// Fails with [`CoreError::NamespaceNotFound`] for an unregistered
/// namespace. A `test_model` that cannot be found is logged and left out.
pub fn describe_namespace(
    registry: &dyn HostRegistry,
    namespace: &str,
    test_model: Option<&TestModelConfig>,
) -> CoreResult<NamespaceOverview> {
    let models = registry
        .models(namespace)
        .ok_or_else(|| CoreError::NamespaceNotFound {
            namespace: namespace.to_string(),
        })?;

    let test_model = test_model.and_then(|tm| {
        match registry.model(&tm.app_name, &tm.model) {
            Some(model) => Some(ModelOverview::of(model.as_ref())),
            None => {
                log::warn!(
                    "test_model '{}.{}' is not registered; skipping",
                    tm.app_name,
                    tm.model
                );
                None
            }
        }
    });

    Ok(NamespaceOverview {
        namespace: namespace.to_string(),
        models: models.iter().map(|m| ModelOverview::of(m.as_ref())).collect(),
        test_model,
    })
}
