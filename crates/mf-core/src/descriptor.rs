//! Field descriptor extraction
//!
//! Turns what the host reports about a model field (type tag, constraints,
//! default form field and widget) into a [`FieldDescriptor`], the typed value
//! the schema projector works from.

use crate::error::{AttributeDerivationError, CoreError, CoreResult};
use crate::host::{
    CallableOutput, Choice, FormFieldRepr, HostField, HostModel, InitialValue, InternalType,
    WidgetChoices,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Pattern applied to date-time initial values produced by a callable.
///
/// `%I` (12-hour clock) sits where minutes are expected. This is the
/// format existing consumers receive, so it is kept as is.
pub const INITIAL_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%I:%S %Z";

/// Form-field classes whose widget choices come from another model's rows
pub const CHOICE_SET_FORM_FIELDS: &[&str] = &[
    "ModelChoiceField",
    "ModelMultipleChoiceField",
    "TreeNodeMultipleChoiceField",
];

/// HTML element used to render a form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    /// `<input>`
    Input,
    /// `<select>`
    Select,
    /// `<textarea>`
    Textarea,
    /// No known element
    #[default]
    #[serde(rename = "")]
    Unknown,
}

/// Kind of widget within an element (the `<input type=...>` value)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WidgetKind {
    Text,
    Number,
    Email,
    Url,
    Password,
    Date,
    Time,
    File,
    Checkbox,
    #[serde(rename = "datetime-local")]
    DatetimeLocal,
    Select,
    /// No widget kind (textareas, unknown widgets)
    #[default]
    #[serde(rename = "")]
    None,
}

impl WidgetKind {
    /// Map an HTML input type to a widget kind.
    ///
    /// Returns `None` for input types outside the supported set (`hidden`,
    /// `radio`, ...).
    pub fn from_input_type(input_type: &str) -> Option<Self> {
        let kind = match input_type {
            "text" => WidgetKind::Text,
            "number" => WidgetKind::Number,
            "email" => WidgetKind::Email,
            "url" => WidgetKind::Url,
            "password" => WidgetKind::Password,
            "date" => WidgetKind::Date,
            "time" => WidgetKind::Time,
            "file" => WidgetKind::File,
            "checkbox" => WidgetKind::Checkbox,
            "datetime-local" => WidgetKind::DatetimeLocal,
            _ => return None,
        };
        Some(kind)
    }

    /// Input type string of this kind (`""` for [`WidgetKind::None`])
    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetKind::Text => "text",
            WidgetKind::Number => "number",
            WidgetKind::Email => "email",
            WidgetKind::Url => "url",
            WidgetKind::Password => "password",
            WidgetKind::Date => "date",
            WidgetKind::Time => "time",
            WidgetKind::File => "file",
            WidgetKind::Checkbox => "checkbox",
            WidgetKind::DatetimeLocal => "datetime-local",
            WidgetKind::Select => "select",
            WidgetKind::None => "",
        }
    }
}

/// How a field's form widget renders in HTML
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct HtmlFormElement {
    /// Element used for the field
    pub element_type: ElementType,
    /// Widget kind within the element
    pub widget_kind: WidgetKind,
    /// Host widget class (`TextInput`, `Textarea`, ...)
    pub widget_class: String,
    /// Whether several values can be selected
    pub allow_multiple: bool,
    /// Whether the frontend may autocomplete against the related model
    pub can_autocomplete: bool,
    /// Whether the frontend stores the related id when the form is saved
    pub set_id_on_save: bool,
    /// Materialized widget choices (absent for choice-set fields)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<Choice>>,
    /// Display format for date/time widgets
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Raw widget attributes
    pub raw_widget_attrs: serde_json::Map<String, serde_json::Value>,
}

impl HtmlFormElement {
    /// Widget attribute by name
    pub fn widget_attr(&self, name: &str) -> Option<&serde_json::Value> {
        self.raw_widget_attrs.get(name)
    }
}

/// Everything Modelform knows about one model field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDescriptor {
    /// Field name
    pub name: String,
    /// Host field-type tag
    pub internal_type: InternalType,
    /// Whether the field points at another model
    pub is_relation: bool,
    /// Qualified relation target, `""` when not a relation
    pub related_model: String,
    /// Minimum length, if the field type has one (serialized as `""` when
    /// absent)
    #[serde(serialize_with = "serialize_or_empty")]
    pub min_length: Option<u32>,
    /// Maximum length, if the field type has one
    pub max_length: Option<u32>,
    /// Declared choices in declaration order
    pub choices: Vec<Choice>,
    /// Form label, `""` when it cannot be derived
    pub label: String,
    /// Whether the form field is required, `false` when it cannot be derived
    pub required: bool,
    /// Initial value, `""` when it cannot be derived
    pub default: serde_json::Value,
    /// Help text, `""` when it cannot be derived
    pub help_text: String,
    /// Form-field class, `""` when the field has no form representation
    pub form_field_type: String,
    /// Rendering information for the form widget
    pub html_form_element: HtmlFormElement,
    /// Whether the model's default form includes this field
    pub is_in_default_model_form_fields: bool,
    /// Element field of an array field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_field: Option<Box<FieldDescriptor>>,
}

fn serialize_or_empty<S: serde::Serializer>(
    value: &Option<u32>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) => serializer.serialize_u32(*v),
        None => serializer.serialize_str(""),
    }
}

/// Extract the descriptor of `field_name` on `model`.
///
/// Fails with [`CoreError::FieldNotFound`] when the model does not declare
/// the field. Sub-attributes the host cannot derive never fail the call.
pub fn describe_field(model: &dyn HostModel, field_name: &str) -> CoreResult<FieldDescriptor> {
    let field = model
        .field(field_name)
        .ok_or_else(|| CoreError::FieldNotFound {
            model: model.name().to_string(),
            field: field_name.to_string(),
        })?;
    let in_default_form = model.form_field_names().contains(&field_name);
    Ok(extract(field, in_default_form))
}

/// Extract descriptors for a user-submitted list of field names.
///
/// Unknown names are skipped and duplicates keep their first position, so
/// the result lists exactly the requested fields the model declares, in
/// request order.
pub fn describe_fields<S: AsRef<str>>(
    model: &dyn HostModel,
    field_names: &[S],
) -> Vec<FieldDescriptor> {
    let mut seen = HashSet::new();
    let mut descriptors = Vec::with_capacity(field_names.len());
    for name in field_names {
        let name = name.as_ref();
        if !seen.insert(name) {
            continue;
        }
        match describe_field(model, name) {
            Ok(descriptor) => descriptors.push(descriptor),
            Err(e) => log::debug!("Skipping requested field: {}", e),
        }
    }
    descriptors
}

fn extract(field: &dyn HostField, in_default_form: bool) -> FieldDescriptor {
    let internal_type = field.internal_type();
    let form = field.form_field();
    let form_field_type = form.as_ref().map(|f| f.class.clone()).unwrap_or_default();

    let label = field.form_label().unwrap_or_else(soft_fail);
    let required = field.form_required().unwrap_or_else(soft_fail);
    let help_text = field.form_help_text().unwrap_or_else(soft_fail);
    let default = match field.form_initial() {
        Ok(initial) => resolve_initial(initial, &form_field_type),
        Err(e) => soft_fail::<String>(e).into(),
    };

    let base_field = if internal_type == InternalType::Array && form_field_type == "SimpleArrayField"
    {
        field
            .base_field()
            .map(|base| Box::new(extract(base, false)))
    } else {
        None
    };

    FieldDescriptor {
        name: field.name().to_string(),
        internal_type,
        is_relation: field.is_relation(),
        related_model: field.related_model().unwrap_or_default(),
        min_length: field.min_length(),
        max_length: field.max_length(),
        choices: field.choices(),
        label,
        required,
        default,
        help_text,
        html_form_element: html_form_element(form.as_ref()),
        form_field_type,
        is_in_default_model_form_fields: in_default_form,
        base_field,
    }
}

fn soft_fail<T: Default>(e: AttributeDerivationError) -> T {
    log::debug!("{}; using an empty placeholder", e);
    T::default()
}

/// Resolve a form field's initial value to JSON.
///
/// A callable producing a date-time on a `DateTimeField` form field is
/// evaluated and formatted with [`INITIAL_DATETIME_FORMAT`]; every other
/// callable resolves to `""`.
pub fn resolve_initial(initial: InitialValue, form_field_type: &str) -> serde_json::Value {
    match initial {
        InitialValue::Unset => serde_json::Value::Null,
        InitialValue::Static(value) => value,
        InitialValue::Callable(callable) if form_field_type == "DateTimeField" => {
            match callable.call() {
                CallableOutput::DateTime(dt) => {
                    serde_json::Value::String(dt.format(INITIAL_DATETIME_FORMAT).to_string())
                }
                CallableOutput::Value(_) => serde_json::Value::String(String::new()),
            }
        }
        InitialValue::Callable(callable) => {
            log::debug!("Initial callable '{}' is not resolved", callable.name());
            serde_json::Value::String(String::new())
        }
    }
}

/// Map a host form field to its HTML rendering information.
///
/// | widget                                   | element    | kind             |
/// |------------------------------------------|------------|------------------|
/// | `Textarea`                               | `textarea` | -                |
/// | `DateTimeInput` / `DateInput` / `TimeInput` | `input` | `datetime-local` / `date` / `time` |
/// | any widget enumerating choices           | `select`   | `select`         |
/// | input type in the supported set          | `input`    | the input type   |
/// | anything else                            | `""`       | -                |
pub fn html_form_element(form: Option<&FormFieldRepr>) -> HtmlFormElement {
    let Some(form) = form else {
        return HtmlFormElement::default();
    };
    let widget = &form.widget;
    let is_choice_set = CHOICE_SET_FORM_FIELDS.contains(&form.class.as_str());

    let choices = match &widget.choices {
        WidgetChoices::None => None,
        _ if is_choice_set => None,
        WidgetChoices::Static(choices) => Some(choices.clone()),
        WidgetChoices::Lazy => Some(Vec::new()),
    };

    let (element_type, widget_kind) = match widget.class.as_str() {
        "Textarea" => (ElementType::Textarea, WidgetKind::None),
        "DateTimeInput" => (ElementType::Input, WidgetKind::DatetimeLocal),
        "DateInput" => (ElementType::Input, WidgetKind::Date),
        "TimeInput" => (ElementType::Input, WidgetKind::Time),
        _ if widget.choices.is_enumerable() => (ElementType::Select, WidgetKind::Select),
        _ => match widget.input_type.as_deref().and_then(WidgetKind::from_input_type) {
            Some(kind) => (ElementType::Input, kind),
            None => (ElementType::Unknown, WidgetKind::None),
        },
    };

    HtmlFormElement {
        element_type,
        widget_kind,
        widget_class: widget.class.clone(),
        allow_multiple: widget.allow_multiple_selected.unwrap_or(false),
        can_autocomplete: is_choice_set && widget.choices.is_enumerable(),
        set_id_on_save: is_choice_set && widget.choices.is_enumerable(),
        choices,
        format: widget.format.clone(),
        raw_widget_attrs: widget.attrs.clone(),
    }
}

#[cfg(test)]
#[path = "descriptor_test.rs"]
mod tests;
