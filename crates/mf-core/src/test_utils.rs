//! In-memory host implementations for tests.
//!
//! Enabled for this crate's own tests and, through the `test-support`
//! feature, for downstream crates.

use crate::error::AttributeDerivationError;
use crate::host::{
    AttrResult, Choice, FormFieldRepr, HostField, HostModel, HostRegistry, InitialValue,
    InternalType, ModelDescriptor, WidgetChoices, WidgetRepr,
};
use std::sync::Arc;

/// Registry backed by a list of namespaces
#[derive(Default)]
pub struct StubRegistry {
    namespaces: Vec<(String, Vec<ModelDescriptor>)>,
}

impl StubRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `models` under `namespace`
    pub fn with_namespace(mut self, namespace: &str, models: Vec<StubModel>) -> Self {
        let models = models
            .into_iter()
            .map(|m| Arc::new(m) as ModelDescriptor)
            .collect();
        self.namespaces.push((namespace.to_string(), models));
        self
    }
}

impl HostRegistry for StubRegistry {
    fn namespaces(&self) -> Vec<&str> {
        self.namespaces.iter().map(|(n, _)| n.as_str()).collect()
    }

    fn models(&self, namespace: &str) -> Option<Vec<ModelDescriptor>> {
        self.namespaces
            .iter()
            .find(|(n, _)| n == namespace)
            .map(|(_, models)| models.clone())
    }
}

/// Model with a fixed field list
pub struct StubModel {
    name: String,
    fields: Vec<StubField>,
}

impl StubModel {
    /// Model named `name` with the given fields
    pub fn new(name: &str, fields: Vec<StubField>) -> Self {
        Self {
            name: name.to_string(),
            fields,
        }
    }
}

impl HostModel for StubModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn fields(&self) -> Vec<&dyn HostField> {
        self.fields.iter().map(|f| f as &dyn HostField).collect()
    }
}

/// Field whose every answer is configured up front
#[derive(Debug, Clone)]
pub struct StubField {
    name: String,
    internal_type: InternalType,
    related_model: Option<String>,
    min_length: Option<u32>,
    max_length: Option<u32>,
    choices: Vec<Choice>,
    base_field: Option<Box<StubField>>,
    form: Option<FormFieldRepr>,
    label: AttrResult<String>,
    required: AttrResult<bool>,
    initial: AttrResult<InitialValue>,
    help_text: AttrResult<String>,
}

impl StubField {
    /// Field without a form representation
    pub fn new(name: &str, internal_type: InternalType) -> Self {
        Self {
            name: name.to_string(),
            internal_type,
            related_model: None,
            min_length: None,
            max_length: None,
            choices: Vec::new(),
            base_field: None,
            form: None,
            label: Ok(name.replace('_', " ")),
            required: Ok(true),
            initial: Ok(InitialValue::Unset),
            help_text: Ok(String::new()),
        }
    }

    /// Char field rendered with a `TextInput`
    pub fn text(name: &str, max_length: u32) -> Self {
        Self::new(name, InternalType::Char)
            .with_max_length(max_length)
            .with_form("CharField", widget("TextInput", Some("text")))
    }

    /// Attach a form representation
    pub fn with_form(mut self, class: &str, widget: WidgetRepr) -> Self {
        self.form = Some(FormFieldRepr {
            class: class.to_string(),
            widget,
        });
        self
    }

    pub fn with_max_length(mut self, max_length: u32) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn with_min_length(mut self, min_length: u32) -> Self {
        self.min_length = Some(min_length);
        self
    }

    pub fn with_choices(mut self, choices: Vec<Choice>) -> Self {
        self.choices = choices;
        self
    }

    pub fn with_related(mut self, related: &str) -> Self {
        self.related_model = Some(related.to_string());
        self
    }

    pub fn with_base_field(mut self, base: StubField) -> Self {
        self.base_field = Some(Box::new(base));
        self
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Ok(label.to_string());
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = Ok(required);
        self
    }

    pub fn with_initial(mut self, initial: InitialValue) -> Self {
        self.initial = Ok(initial);
        self
    }

    pub fn with_help_text(mut self, help_text: &str) -> Self {
        self.help_text = Ok(help_text.to_string());
        self
    }

    /// Make the named attribute (`label`, `required`, `initial`,
    /// `help_text`) fail to derive
    pub fn failing(mut self, attribute: &'static str) -> Self {
        let err = AttributeDerivationError::new(&self.name, attribute, "stub failure");
        match attribute {
            "label" => self.label = Err(err),
            "required" => self.required = Err(err),
            "initial" => self.initial = Err(err),
            "help_text" => self.help_text = Err(err),
            other => panic!("unknown stub attribute {other}"),
        }
        self
    }
}

/// Widget with a class and optional input type
pub fn widget(class: &str, input_type: Option<&str>) -> WidgetRepr {
    WidgetRepr {
        class: class.to_string(),
        input_type: input_type.map(str::to_string),
        ..WidgetRepr::default()
    }
}

/// `Select`-style widget
pub fn select_widget(class: &str, choices: WidgetChoices, multiple: bool) -> WidgetRepr {
    WidgetRepr {
        class: class.to_string(),
        input_type: Some("select".to_string()),
        choices,
        allow_multiple_selected: Some(multiple),
        ..WidgetRepr::default()
    }
}

impl HostField for StubField {
    fn name(&self) -> &str {
        &self.name
    }

    fn internal_type(&self) -> InternalType {
        self.internal_type
    }

    fn is_relation(&self) -> bool {
        self.internal_type.is_relation()
    }

    fn related_model(&self) -> Option<String> {
        self.related_model.clone()
    }

    fn min_length(&self) -> Option<u32> {
        self.min_length
    }

    fn max_length(&self) -> Option<u32> {
        self.max_length
    }

    fn choices(&self) -> Vec<Choice> {
        self.choices.clone()
    }

    fn base_field(&self) -> Option<&dyn HostField> {
        self.base_field.as_deref().map(|f| f as &dyn HostField)
    }

    fn form_field(&self) -> Option<FormFieldRepr> {
        self.form.clone()
    }

    fn form_label(&self) -> AttrResult<String> {
        self.label.clone()
    }

    fn form_required(&self) -> AttrResult<bool> {
        self.required.clone()
    }

    fn form_initial(&self) -> AttrResult<InitialValue> {
        self.initial.clone()
    }

    fn form_help_text(&self) -> AttrResult<String> {
        self.help_text.clone()
    }
}
