//! mf-core - Core library for Modelform
//!
//! This crate provides the configuration, error types, host introspection
//! traits, the model catalog resolver, field descriptor extraction, and the
//! unprojected ("raw") schema shared by every Modelform component.

pub mod catalog;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod host;
pub mod model_name;
pub mod namespace_name;
mod newtype_string;
pub mod overview;
pub mod raw_schema;
#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;

pub use catalog::{format_namespace, list_models, resolve_model, Catalog};
pub use config::{Config, TestModelConfig};
pub use descriptor::{
    describe_field, describe_fields, ElementType, FieldDescriptor, HtmlFormElement, WidgetKind,
};
pub use error::{AttributeDerivationError, CoreError, CoreResult};
pub use host::{
    AttrResult, CallableOutput, Choice, FormFieldRepr, HostField, HostModel, HostRegistry,
    InitialCallable, InitialValue, InternalType, ModelDescriptor, WidgetChoices, WidgetRepr,
};
pub use model_name::ModelName;
pub use namespace_name::NamespaceName;
pub use overview::{describe_namespace, FieldSummary, ModelOverview, NamespaceOverview};
pub use raw_schema::{build_raw_schema, RawSchema};
