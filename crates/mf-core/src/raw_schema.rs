//! Unprojected field-descriptor schema
//!
//! Returned when a client asks for a schema without a known style. Shape:
//!
//! ```json
//! {"catalog": {"app_name": "catalog", "full_name": "apps.v1.catalog",
//!   "models": {"Product": {"model_name": "Product",
//!     "properties": {"title": { ...FieldDescriptor... }}}}}}
//! ```

use crate::descriptor::{describe_fields, FieldDescriptor};
use crate::host::HostModel;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Descriptors of the requested fields of one model
#[derive(Debug, Clone, PartialEq)]
pub struct RawSchema {
    /// Formatted namespace name
    pub app_name: String,
    /// Namespace as configured, version prefix included
    pub full_name: String,
    /// Model name
    pub model_name: String,
    /// Descriptors in request order
    pub properties: Vec<FieldDescriptor>,
}

/// Describe the requested fields of `model`.
///
/// Requested names the model does not declare are left out.
pub fn build_raw_schema<S: AsRef<str>>(
    app_name: &str,
    full_name: &str,
    model: &dyn HostModel,
    field_names: &[S],
) -> RawSchema {
    RawSchema {
        app_name: app_name.to_string(),
        full_name: full_name.to_string(),
        model_name: model.name().to_string(),
        properties: describe_fields(model, field_names),
    }
}

impl RawSchema {
    /// Names of the described fields, in order
    pub fn field_names(&self) -> Vec<&str> {
        self.properties.iter().map(|d| d.name.as_str()).collect()
    }
}

/// Serializes a single `{key: value}` object
struct Keyed<'a, T: Serialize>(&'a str, T);

impl<T: Serialize> Serialize for Keyed<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.0, &self.1)?;
        map.end()
    }
}

struct Properties<'a>(&'a [FieldDescriptor]);

impl Serialize for Properties<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for descriptor in self.0 {
            map.serialize_entry(&descriptor.name, descriptor)?;
        }
        map.end()
    }
}

#[derive(Serialize)]
struct ModelEntry<'a> {
    model_name: &'a str,
    properties: Properties<'a>,
}

#[derive(Serialize)]
struct AppEntry<'a> {
    app_name: &'a str,
    full_name: &'a str,
    models: Keyed<'a, ModelEntry<'a>>,
}

impl Serialize for RawSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entry = AppEntry {
            app_name: &self.app_name,
            full_name: &self.full_name,
            models: Keyed(
                &self.model_name,
                ModelEntry {
                    model_name: &self.model_name,
                    properties: Properties(&self.properties),
                },
            ),
        };
        Keyed(&self.app_name, entry).serialize(serializer)
    }
}
