//! Style-one form schema
//!
//! ```json
//! {"Product": {
//!   "attrs": {"visible": false, "size": "mini", "id": "Product", "rules": {"title": []}, ...},
//!   "FormFields": {
//!     "title": {"label": "Title",
//!               "formFieldType": {"type": "input", "attrs": {...}},
//!               "form_field_type_for_reference": "CharField",
//!               "help_text": ""}}}}
//! ```

use crate::dispatch::rule_for;
use mf_core::FieldDescriptor;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// One field of a style-one form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedField {
    pub label: String,

    #[serde(rename = "formFieldType")]
    pub form_field_type: FormFieldType,

    /// Host form-field class the field was rendered from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_field_type_for_reference: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
}

/// Widget description inside a [`RenderedField`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormFieldType {
    /// Frontend element (`input`, `textarea`, `select`, `url`, `unknown`)
    #[serde(rename = "type")]
    pub kind: String,

    /// Element attributes, in rendering order
    pub attrs: serde_json::Value,

    /// `[{label, value}]` for enumerated choices, or an iterator marker
    /// for choices backed by another model
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<serde_json::Value>,

    /// Rendering of an array field's element
    #[serde(rename = "baseFormField", skip_serializing_if = "Option::is_none")]
    pub base_form_field: Option<BaseFormField>,
}

/// Serializes as `{name: RenderedField}`, or `{}` when the array field
/// reports no element field
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BaseFormField(pub Option<(String, Box<RenderedField>)>);

impl BaseFormField {
    /// The rendered element field
    pub fn field(&self) -> Option<&RenderedField> {
        self.0.as_ref().map(|(_, field)| field.as_ref())
    }
}

impl Serialize for BaseFormField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.iter().len()))?;
        if let Some((name, field)) = &self.0 {
            map.serialize_entry(name, field)?;
        }
        map.end()
    }
}

/// Render one field.
///
/// The result carries the host form-field class and help text next to the
/// widget description.
pub fn render_style_one(field_name: &str, descriptor: &FieldDescriptor) -> RenderedField {
    let rule = rule_for(descriptor);
    log::debug!("Rendering '{}' with the {} rule", field_name, rule.name);
    let mut rendered = rule.render(field_name, descriptor);
    rendered.form_field_type_for_reference = Some(descriptor.form_field_type.clone());
    rendered.help_text = Some(descriptor.help_text.clone());
    rendered
}

/// A style-one form: rendered fields in request order
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub form_name: String,
    pub fields: Vec<(String, RenderedField)>,
}

impl Schema {
    /// Rendered field by name
    pub fn field(&self, name: &str) -> Option<&RenderedField> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, f)| f)
    }

    /// Field names in order
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|(n, _)| n.as_str()).collect()
    }
}

/// Render every descriptor into the form named `form_name`.
///
/// Each field gets an empty validation rule list.
pub fn project_style_one(form_name: &str, descriptors: &[FieldDescriptor]) -> Schema {
    Schema {
        form_name: form_name.to_string(),
        fields: descriptors
            .iter()
            .map(|d| (d.name.clone(), render_style_one(&d.name, d)))
            .collect(),
    }
}

const NO_RULES: [&str; 0] = [];

struct Rules<'a>(&'a [(String, RenderedField)]);

impl Serialize for Rules<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, _) in self.0 {
            map.serialize_entry(name, &NO_RULES)?;
        }
        map.end()
    }
}

struct FormFields<'a>(&'a [(String, RenderedField)]);

impl Serialize for FormFields<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, field) in self.0 {
            map.serialize_entry(name, field)?;
        }
        map.end()
    }
}

#[derive(Serialize)]
struct FormAttrs<'a> {
    visible: bool,
    action: &'a str,
    method: &'a str,
    size: &'a str,
    #[serde(rename = "label-width")]
    label_width: &'a str,
    #[serde(rename = "label-position")]
    label_position: &'a str,
    inline: bool,
    id: &'a str,
    #[serde(rename = "ref")]
    reference: &'a str,
    rules: Rules<'a>,
}

#[derive(Serialize)]
struct FormEntry<'a> {
    attrs: FormAttrs<'a>,
    #[serde(rename = "FormFields")]
    form_fields: FormFields<'a>,
}

impl Serialize for Schema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entry = FormEntry {
            attrs: FormAttrs {
                visible: false,
                action: "",
                method: "",
                size: "mini",
                label_width: "150px",
                label_position: "right",
                inline: false,
                id: &self.form_name,
                reference: &self.form_name,
                rules: Rules(&self.fields),
            },
            form_fields: FormFields(&self.fields),
        };
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.form_name, &entry)?;
        map.end()
    }
}

#[cfg(test)]
#[path = "form_test.rs"]
mod tests;
