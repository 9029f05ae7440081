//! Style-one renderers, one per rule in [`crate::dispatch::RULES`]

use crate::form::{BaseFormField, FormFieldType, RenderedField};
use mf_core::FieldDescriptor;
use serde_json::{json, Value};

/// Choices marker for model-backed select fields
pub const MODEL_CHOICE_MARKER: &str = "ModelChoiceIterator";

/// Choices marker for tree-node multiple-select fields
pub const TREE_NODE_CHOICE_MARKER: &str = "TreeNodeMultipleChoiceIterator";

/// Values every renderer draws from
struct FieldValues<'a> {
    label: String,
    placeholder: &'a Value,
    max_length: Value,
    min_length: Value,
    name: &'a str,
}

impl<'a> FieldValues<'a> {
    fn of(field_name: &'a str, d: &'a FieldDescriptor) -> Self {
        Self {
            label: title_case(&d.label),
            placeholder: &d.default,
            max_length: d.max_length.map_or(Value::Null, Value::from),
            min_length: d.min_length.map_or_else(|| Value::from(""), Value::from),
            name: field_name,
        }
    }
}

fn field(label: String, kind: &str, attrs: Value) -> RenderedField {
    RenderedField {
        label,
        form_field_type: FormFieldType {
            kind: kind.to_string(),
            attrs,
            choices: None,
            base_form_field: None,
        },
        form_field_type_for_reference: None,
        help_text: None,
    }
}

/// Attributes shared by the single-line inputs
fn input_attrs(v: &FieldValues<'_>, input_type: &str) -> Value {
    json!({
        "visible": true,
        "type": input_type,
        "placeholder": v.placeholder,
        "autofocus": true,
        "maxlength": v.max_length,
        "minlength": v.min_length,
        "readonly": false,
        "name": v.name,
        "clearable": false,
        "disabled": false,
        "size": "medium",
        "suffix-icon": "",
        "prefix-icon": "",
        "id": v.name,
    })
}

pub(crate) fn text(field_name: &str, d: &FieldDescriptor) -> RenderedField {
    let v = FieldValues::of(field_name, d);
    let attrs = input_attrs(&v, "text");
    field(v.label, "input", attrs)
}

pub(crate) fn email(field_name: &str, d: &FieldDescriptor) -> RenderedField {
    let v = FieldValues::of(field_name, d);
    let attrs = input_attrs(&v, "email");
    field(v.label, "input", attrs)
}

pub(crate) fn number(field_name: &str, d: &FieldDescriptor) -> RenderedField {
    let v = FieldValues::of(field_name, d);
    let attrs = input_attrs(&v, "number");
    field(v.label, "input", attrs)
}

/// Url inputs are plain text inputs under their own element type
pub(crate) fn url(field_name: &str, d: &FieldDescriptor) -> RenderedField {
    let v = FieldValues::of(field_name, d);
    let attrs = input_attrs(&v, "text");
    field(v.label, "url", attrs)
}

pub(crate) fn image(field_name: &str, d: &FieldDescriptor) -> RenderedField {
    let v = FieldValues::of(field_name, d);
    let attrs = input_attrs(&v, "file");
    field(v.label, "input", attrs)
}

/// A text input carrying the rendering of its element field
pub(crate) fn simple_array(field_name: &str, d: &FieldDescriptor) -> RenderedField {
    let mut rendered = text(field_name, d);
    let base = d.base_field.as_ref().map(|base| {
        let rule = crate::dispatch::rule_for(base);
        (field_name.to_string(), Box::new(rule.render(field_name, base)))
    });
    rendered.form_field_type.base_form_field = Some(BaseFormField(base));
    rendered
}

pub(crate) fn textarea(field_name: &str, d: &FieldDescriptor) -> RenderedField {
    let v = FieldValues::of(field_name, d);
    let rows = d
        .html_form_element
        .widget_attr("rows")
        .cloned()
        .unwrap_or(Value::Null);
    let attrs = json!({
        "visible": true,
        "rows": "2",
        "autofocus": true,
        "maxlength": v.max_length,
        "minlength": v.min_length,
        "readonly": false,
        "name": v.name,
        "clearable": false,
        "disabled": false,
        "size": "medium",
        "placeholder": v.placeholder,
        "id": v.name,
        "autosize": {
            "minRows": rows,
            "maxRows": rows,
        },
    });
    field(v.label, "textarea", attrs)
}

pub(crate) fn checkbox(field_name: &str, d: &FieldDescriptor) -> RenderedField {
    let v = FieldValues::of(field_name, d);
    let attrs = json!({
        "visible": true,
        "type": "checkbox",
        "checked": v.placeholder,
        "name": v.name,
        "disabled": false,
        "size": "medium",
        "id": v.name,
    });
    field(v.label, "input", attrs)
}

/// Date and time pickers are labelled with the raw field name
fn picker(v: &FieldValues<'_>, picker_type: &str, format: &str, value_format: &str) -> Value {
    json!({
        "visible": true,
        "type": picker_type,
        "placeholder": v.placeholder,
        "autofocus": true,
        "default-value": "",
        "readonly": false,
        "name": v.name,
        "format": format,
        "value-format": value_format,
        "other-value-formats": "",
        "align": "right",
        "disabled": false,
        "clearable": true,
        "editable": true,
        "size": "medium",
        "clear-icon": "el-icon-circle-close",
        "prefix-icon": "el-icon-date",
        "picker-options": "",
        "id": v.name,
    })
}

pub(crate) fn date(field_name: &str, d: &FieldDescriptor) -> RenderedField {
    let v = FieldValues::of(field_name, d);
    let attrs = picker(&v, "date", "yyyy/MM/dd", "yyyy-MM-dd");
    field(field_name.to_string(), "input", attrs)
}

pub(crate) fn time(field_name: &str, d: &FieldDescriptor) -> RenderedField {
    let v = FieldValues::of(field_name, d);
    let attrs = picker(&v, "time", "HH:mm:ss", "HH:mm:ss");
    field(field_name.to_string(), "input", attrs)
}

pub(crate) fn datetime(field_name: &str, d: &FieldDescriptor) -> RenderedField {
    let v = FieldValues::of(field_name, d);
    let attrs = json!({
        "visible": true,
        "type": "datetime",
        "placeholder": v.placeholder,
        "autofocus": true,
        "default-value": "",
        "readonly": false,
        "name": v.name,
        "format": "yyyy-MM-dd HH:mm:ss",
        "value-format": "yyyy-MM-dd HH:mm:ss",
        "align": "right",
        "disabled": false,
        "clearable": true,
        "editable": true,
        "size": "medium",
        "clear-icon": "el-icon-circle-close",
        "prefix-icon": "el-icon-date",
        "id": v.name,
    });
    field(v.label, "input", attrs)
}

pub(crate) fn typed_choice(field_name: &str, d: &FieldDescriptor) -> RenderedField {
    let v = FieldValues::of(field_name, d);
    let attrs = json!({
        "visible": true,
        "id": v.name,
        "disabled": false,
        "clearable": true,
        "multiple": d.html_form_element.allow_multiple,
        "placeholder": v.placeholder,
        "collapse-tags": true,
        "is_model_choice_field": false,
    });
    let choices: Vec<Value> = d
        .html_form_element
        .choices
        .iter()
        .flatten()
        .map(|c| json!({"label": c.label, "value": c.value}))
        .collect();
    let mut rendered = field(v.label, "select", attrs);
    rendered.form_field_type.choices = Some(Value::Array(choices));
    rendered
}

fn model_select(v: FieldValues<'_>, d: &FieldDescriptor, multiple: bool, marker: &str) -> RenderedField {
    let attrs = json!({
        "visible": true,
        "id": v.name,
        "disabled": false,
        "clearable": true,
        "multiple": multiple,
        "placeholder": v.placeholder,
        "can_be_autocomplete": d.html_form_element.can_autocomplete,
        "set_id_on_form_save": d.html_form_element.set_id_on_save,
        "collapse-tags": true,
        "is_model_choice_field": true,
    });
    let mut rendered = field(v.label, "select", attrs);
    rendered.form_field_type.choices = Some(Value::from(marker));
    rendered
}

pub(crate) fn model_choice(field_name: &str, d: &FieldDescriptor) -> RenderedField {
    let multiple = d.html_form_element.allow_multiple;
    model_select(FieldValues::of(field_name, d), d, multiple, MODEL_CHOICE_MARKER)
}

pub(crate) fn tree_node_multiple_choice(field_name: &str, d: &FieldDescriptor) -> RenderedField {
    model_select(FieldValues::of(field_name, d), d, true, TREE_NODE_CHOICE_MARKER)
}

pub(crate) fn unknown(field_name: &str, d: &FieldDescriptor) -> RenderedField {
    let v = FieldValues::of(field_name, d);
    let attrs = json!({
        "visible": true,
        "rows": "2",
        "autofocus": true,
        "maxlength": v.max_length,
        "minlength": v.min_length,
        "readonly": false,
        "name": v.name,
        "clearable": false,
        "disabled": false,
        "size": "medium",
        "placeholder": v.placeholder,
        "id": v.name,
    });
    field(v.label, "unknown", attrs)
}

/// Capitalize the first letter of every word and lowercase the rest.
///
/// A word is a run of letters; digits and punctuation end it, so
/// `"e-mail address"` becomes `"E-Mail Address"`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("first name"), "First Name");
        assert_eq!(title_case("e-mail ADDRESS"), "E-Mail Address");
        assert_eq!(title_case("sku2go"), "Sku2Go");
        assert_eq!(title_case(""), "");
    }
}
