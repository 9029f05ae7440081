//! Ordered rule table for style-one rendering
//!
//! A field is rendered by the first rule whose predicate accepts its
//! descriptor. Fields no rule accepts fall through to [`UNKNOWN`].

use crate::form::RenderedField;
use crate::render;
use mf_core::{ElementType, FieldDescriptor, WidgetKind};

/// A predicate paired with the renderer it selects
pub struct Rule {
    /// Short name used in logs
    pub name: &'static str,
    predicate: fn(&FieldDescriptor) -> bool,
    renderer: fn(&str, &FieldDescriptor) -> RenderedField,
}

impl Rule {
    /// Whether this rule accepts `descriptor`
    pub fn matches(&self, descriptor: &FieldDescriptor) -> bool {
        (self.predicate)(descriptor)
    }

    /// Render `descriptor` under `field_name`
    pub fn render(&self, field_name: &str, descriptor: &FieldDescriptor) -> RenderedField {
        (self.renderer)(field_name, descriptor)
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

/// Rules in precedence order
pub static RULES: &[Rule] = &[
    Rule {
        name: "simple-array",
        predicate: is_simple_array,
        renderer: render::simple_array,
    },
    Rule {
        name: "image",
        predicate: is_image,
        renderer: render::image,
    },
    Rule {
        name: "text",
        predicate: is_text,
        renderer: render::text,
    },
    Rule {
        name: "textarea",
        predicate: is_textarea,
        renderer: render::textarea,
    },
    Rule {
        name: "checkbox",
        predicate: is_checkbox,
        renderer: render::checkbox,
    },
    Rule {
        name: "url",
        predicate: is_url,
        renderer: render::url,
    },
    Rule {
        name: "email",
        predicate: is_email,
        renderer: render::email,
    },
    Rule {
        name: "number",
        predicate: is_number,
        renderer: render::number,
    },
    Rule {
        name: "date",
        predicate: is_date,
        renderer: render::date,
    },
    Rule {
        name: "time",
        predicate: is_time,
        renderer: render::time,
    },
    Rule {
        name: "datetime",
        predicate: is_datetime,
        renderer: render::datetime,
    },
    Rule {
        name: "typed-choice",
        predicate: is_typed_choice,
        renderer: render::typed_choice,
    },
    Rule {
        name: "model-choice",
        predicate: is_model_choice,
        renderer: render::model_choice,
    },
    Rule {
        name: "tree-node-multiple-choice",
        predicate: is_tree_node_multiple_choice,
        renderer: render::tree_node_multiple_choice,
    },
];

/// Fallback for descriptors no rule in [`RULES`] accepts
pub static UNKNOWN: Rule = Rule {
    name: "unknown",
    predicate: always,
    renderer: render::unknown,
};

/// Select the rule that renders `descriptor`
pub fn rule_for(descriptor: &FieldDescriptor) -> &'static Rule {
    RULES
        .iter()
        .find(|rule| rule.matches(descriptor))
        .unwrap_or(&UNKNOWN)
}

fn always(_: &FieldDescriptor) -> bool {
    true
}

fn is_input(d: &FieldDescriptor, kind: WidgetKind) -> bool {
    d.html_form_element.element_type == ElementType::Input && d.html_form_element.widget_kind == kind
}

fn is_select(d: &FieldDescriptor, form_field_type: &str) -> bool {
    d.html_form_element.element_type == ElementType::Select && d.form_field_type == form_field_type
}

fn is_simple_array(d: &FieldDescriptor) -> bool {
    is_input(d, WidgetKind::Text) && d.form_field_type == "SimpleArrayField"
}

fn is_image(d: &FieldDescriptor) -> bool {
    is_input(d, WidgetKind::File) && d.form_field_type == "ImageField"
}

fn is_text(d: &FieldDescriptor) -> bool {
    is_input(d, WidgetKind::Text)
}

fn is_textarea(d: &FieldDescriptor) -> bool {
    d.html_form_element.element_type == ElementType::Textarea
}

fn is_checkbox(d: &FieldDescriptor) -> bool {
    is_input(d, WidgetKind::Checkbox)
}

fn is_url(d: &FieldDescriptor) -> bool {
    is_input(d, WidgetKind::Url)
}

fn is_email(d: &FieldDescriptor) -> bool {
    is_input(d, WidgetKind::Email)
}

fn is_number(d: &FieldDescriptor) -> bool {
    is_input(d, WidgetKind::Number)
}

fn is_date(d: &FieldDescriptor) -> bool {
    is_input(d, WidgetKind::Date)
}

fn is_time(d: &FieldDescriptor) -> bool {
    is_input(d, WidgetKind::Time)
}

fn is_datetime(d: &FieldDescriptor) -> bool {
    is_input(d, WidgetKind::DatetimeLocal)
}

fn is_typed_choice(d: &FieldDescriptor) -> bool {
    is_select(d, "TypedChoiceField")
}

fn is_model_choice(d: &FieldDescriptor) -> bool {
    is_select(d, "ModelChoiceField")
}

fn is_tree_node_multiple_choice(d: &FieldDescriptor) -> bool {
    is_select(d, "TreeNodeMultipleChoiceField")
}

#[cfg(test)]
#[path = "dispatch_test.rs"]
mod tests;
