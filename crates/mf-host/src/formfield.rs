//! Default form-field derivation
//!
//! Mirrors how the host framework turns a model field into a form field:
//! which form-field class is used, which widget renders it, and which
//! widget attributes the field contributes (`maxlength`, `step`, ...).

use crate::schema::{FieldDef, ModelFieldType};
use mf_core::{Choice, FormFieldRepr, WidgetChoices, WidgetRepr};

/// Label of the empty choice offered by optional choice fields
pub const BLANK_CHOICE_LABEL: &str = "---------";

/// Form-field classes that store text and honor length limits
const TEXT_FORM_FIELDS: &[&str] = &[
    "CharField",
    "EmailField",
    "URLField",
    "SlugField",
    "UUIDField",
    "GenericIPAddressField",
];

/// Build the form field of `def`, or `None` when the field is not
/// editable through a form.
pub fn form_field(def: &FieldDef) -> Option<FormFieldRepr> {
    let (default_class, default_widget) = default_classes(def)?;
    let over = def.form_field.clone().unwrap_or_default();

    let class = over.class.unwrap_or_else(|| default_class.to_string());
    let mut widget = widget(over.widget.as_deref().unwrap_or(default_widget));

    if !widget.is_hidden() {
        widget.attrs.extend(field_widget_attrs(def, &class, &widget.class));
    }
    if widget.accepts_choices() {
        if let Some(choices) = field_choices(def, &class) {
            widget.choices = choices;
        }
    }
    widget.attrs.extend(over.attrs);

    Some(FormFieldRepr {
        class,
        widget: widget.into_repr(),
    })
}

/// Form label: `verbose_name` with its first letter capitalized
pub fn label(def: &FieldDef) -> String {
    if let Some(label) = def.form_field.as_ref().and_then(|f| f.label.clone()) {
        return label;
    }
    capfirst(&def.verbose_name())
}

/// Whether the form field is required
pub fn required(def: &FieldDef) -> bool {
    if let Some(required) = def.form_field.as_ref().and_then(|f| f.required) {
        return required;
    }
    match def.field_type {
        // Unchecked boxes submit nothing, so the form cannot insist on them
        ModelFieldType::BooleanField => false,
        _ => !def.blank,
    }
}

fn default_classes(def: &FieldDef) -> Option<(&'static str, &'static str)> {
    if !def.editable {
        return None;
    }
    if !def.choices.is_empty() && !def.field_type.is_relation() {
        return Some(("TypedChoiceField", "Select"));
    }
    let classes = match def.field_type {
        ModelFieldType::AutoField | ModelFieldType::BigAutoField | ModelFieldType::BinaryField => {
            return None
        }
        ModelFieldType::CharField => ("CharField", "TextInput"),
        ModelFieldType::TextField => ("CharField", "Textarea"),
        ModelFieldType::SlugField => ("SlugField", "TextInput"),
        ModelFieldType::EmailField => ("EmailField", "EmailInput"),
        ModelFieldType::URLField => ("URLField", "URLInput"),
        ModelFieldType::UUIDField => ("UUIDField", "TextInput"),
        ModelFieldType::GenericIPAddressField => ("GenericIPAddressField", "TextInput"),
        ModelFieldType::IntegerField
        | ModelFieldType::BigIntegerField
        | ModelFieldType::SmallIntegerField
        | ModelFieldType::PositiveIntegerField
        | ModelFieldType::PositiveSmallIntegerField => ("IntegerField", "NumberInput"),
        ModelFieldType::FloatField => ("FloatField", "NumberInput"),
        ModelFieldType::DecimalField => ("DecimalField", "NumberInput"),
        ModelFieldType::DurationField => ("DurationField", "TextInput"),
        ModelFieldType::BooleanField if def.null => ("NullBooleanField", "NullBooleanSelect"),
        ModelFieldType::BooleanField => ("BooleanField", "CheckboxInput"),
        ModelFieldType::NullBooleanField => ("NullBooleanField", "NullBooleanSelect"),
        ModelFieldType::DateField => ("DateField", "DateInput"),
        ModelFieldType::DateTimeField => ("DateTimeField", "DateTimeInput"),
        ModelFieldType::TimeField => ("TimeField", "TimeInput"),
        ModelFieldType::FileField => ("FileField", "ClearableFileInput"),
        ModelFieldType::ImageField => ("ImageField", "ClearableFileInput"),
        ModelFieldType::ForeignKey | ModelFieldType::OneToOneField => {
            ("ModelChoiceField", "Select")
        }
        ModelFieldType::ManyToManyField => ("ModelMultipleChoiceField", "SelectMultiple"),
        ModelFieldType::TreeForeignKey => ("TreeNodeChoiceField", "Select"),
        ModelFieldType::TreeManyToManyField => ("TreeNodeMultipleChoiceField", "SelectMultiple"),
        ModelFieldType::ArrayField => ("SimpleArrayField", "TextInput"),
    };
    Some(classes)
}

/// Attributes a form field adds to whatever widget renders it
fn field_widget_attrs(
    def: &FieldDef,
    class: &str,
    widget_class: &str,
) -> serde_json::Map<String, serde_json::Value> {
    let mut attrs = serde_json::Map::new();

    if TEXT_FORM_FIELDS.contains(&class) {
        if let Some(max) = def.max_length {
            attrs.insert("maxlength".to_string(), max.to_string().into());
        }
        if let Some(min) = def.min_length {
            attrs.insert("minlength".to_string(), min.to_string().into());
        }
    }

    if widget_class == "NumberInput" {
        match def.field_type {
            ModelFieldType::PositiveIntegerField | ModelFieldType::PositiveSmallIntegerField => {
                attrs.insert("min".to_string(), 0.into());
            }
            ModelFieldType::FloatField => {
                attrs.insert("step".to_string(), "any".into());
            }
            ModelFieldType::DecimalField => {
                attrs.insert("step".to_string(), decimal_step(def.decimal_places).into());
            }
            _ => {}
        }
    }

    attrs
}

fn field_choices(def: &FieldDef, class: &str) -> Option<WidgetChoices> {
    match class {
        "TypedChoiceField" => {
            let mut choices = Vec::with_capacity(def.choices.len() + 1);
            if def.blank || def.default.is_none() {
                choices.push(Choice::new("", BLANK_CHOICE_LABEL));
            }
            choices.extend(def.declared_choices());
            Some(WidgetChoices::Static(choices))
        }
        "ModelChoiceField"
        | "ModelMultipleChoiceField"
        | "TreeNodeChoiceField"
        | "TreeNodeMultipleChoiceField" => Some(WidgetChoices::Lazy),
        _ => None,
    }
}

/// Step of a decimal input: one unit in the last decimal place
pub fn decimal_step(decimal_places: Option<u32>) -> String {
    match decimal_places {
        None => "any".to_string(),
        Some(0) => "1".to_string(),
        Some(places) if places <= 6 => format!("0.{}1", "0".repeat(places as usize - 1)),
        Some(places) => format!("1E-{places}"),
    }
}

fn capfirst(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// A widget while its attributes are being assembled
struct Widget {
    class: String,
    input_type: Option<&'static str>,
    attrs: serde_json::Map<String, serde_json::Value>,
    choices: WidgetChoices,
    allow_multiple_selected: Option<bool>,
}

fn widget(class: &str) -> Widget {
    let input_type = match class {
        "TextInput" | "DateInput" | "DateTimeInput" | "TimeInput" => Some("text"),
        "NumberInput" => Some("number"),
        "EmailInput" => Some("email"),
        "URLInput" => Some("url"),
        "PasswordInput" => Some("password"),
        "HiddenInput" => Some("hidden"),
        "FileInput" | "ClearableFileInput" => Some("file"),
        "CheckboxInput" => Some("checkbox"),
        "Select" | "SelectMultiple" | "NullBooleanSelect" => Some("select"),
        "RadioSelect" => Some("radio"),
        "CheckboxSelectMultiple" => Some("checkbox"),
        _ => None,
    };

    let mut attrs = serde_json::Map::new();
    if class == "Textarea" {
        attrs.insert("cols".to_string(), "40".into());
        attrs.insert("rows".to_string(), "10".into());
    }

    let choices = match class {
        "NullBooleanSelect" => WidgetChoices::Static(vec![
            Choice::new("unknown", "Unknown"),
            Choice::new("true", "Yes"),
            Choice::new("false", "No"),
        ]),
        "Select" | "SelectMultiple" | "RadioSelect" | "CheckboxSelectMultiple" => {
            WidgetChoices::Static(Vec::new())
        }
        _ => WidgetChoices::None,
    };

    let allow_multiple_selected = match class {
        "SelectMultiple" | "CheckboxSelectMultiple" => Some(true),
        "Select" | "NullBooleanSelect" | "RadioSelect" => Some(false),
        _ => None,
    };

    Widget {
        class: class.to_string(),
        input_type,
        attrs,
        choices,
        allow_multiple_selected,
    }
}

impl Widget {
    fn is_hidden(&self) -> bool {
        self.input_type == Some("hidden")
    }

    fn accepts_choices(&self) -> bool {
        self.choices.is_enumerable()
    }

    fn into_repr(self) -> WidgetRepr {
        WidgetRepr {
            class: self.class,
            input_type: self.input_type.map(str::to_string),
            attrs: self.attrs,
            choices: self.choices,
            allow_multiple_selected: self.allow_multiple_selected,
            format: None,
        }
    }
}

#[cfg(test)]
#[path = "formfield_test.rs"]
mod tests;
