//! Host introspection capability
//!
//! Modelform never owns model definitions. Everything it knows about a model
//! comes through the traits in this module: a [`HostRegistry`] lists the
//! models registered under a namespace, a [`HostModel`] exposes declared
//! fields, and a [`HostField`] produces the field's default form
//! representation. `mf-host` provides a file-backed implementation; tests
//! provide in-memory ones.
//!
//! Form attributes that the host may fail to derive are returned as
//! [`AttrResult`] so that the caller decides how to degrade.

use crate::error::AttributeDerivationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Result of deriving one form attribute
pub type AttrResult<T> = Result<T, AttributeDerivationError>;

/// Shared handle to a host model, owned by the registry
pub type ModelDescriptor = Arc<dyn HostModel>;

/// Model registry provided by the host
pub trait HostRegistry: Send + Sync {
    /// Names of every registered namespace
    fn namespaces(&self) -> Vec<&str>;

    /// Models registered under `namespace`, in registration order.
    ///
    /// Returns `None` when the namespace is not registered at all, and
    /// `Some(vec![])` when it is registered but declares no models.
    fn models(&self, namespace: &str) -> Option<Vec<ModelDescriptor>>;

    /// Look up a single model by name
    fn model(&self, namespace: &str, name: &str) -> Option<ModelDescriptor> {
        self.models(namespace)?
            .into_iter()
            .find(|model| model.name() == name)
    }
}

/// A model type as seen through the host
pub trait HostModel: Send + Sync {
    /// Model name (e.g. `Product`)
    fn name(&self) -> &str;

    /// Declared fields in declaration order
    fn fields(&self) -> Vec<&dyn HostField>;

    /// Look up a declared field by name
    fn field(&self, name: &str) -> Option<&dyn HostField> {
        self.fields().into_iter().find(|field| field.name() == name)
    }

    /// Names of the fields the host's default model form would include
    fn form_field_names(&self) -> Vec<&str> {
        self.fields()
            .into_iter()
            .filter(|field| field.form_field().is_some())
            .map(|field| field.name())
            .collect()
    }
}

/// A single model field as seen through the host
pub trait HostField: Send + Sync {
    /// Field name
    fn name(&self) -> &str;

    /// Host field-type tag
    fn internal_type(&self) -> InternalType;

    /// Whether the field points at another model
    fn is_relation(&self) -> bool;

    /// Qualified `namespace.Model` of the relation target, if any
    fn related_model(&self) -> Option<String>;

    /// Minimum length constraint, if the field type has one
    fn min_length(&self) -> Option<u32>;

    /// Maximum length constraint, if the field type has one
    fn max_length(&self) -> Option<u32>;

    /// Declared (value, label) choices in declaration order
    fn choices(&self) -> Vec<Choice>;

    /// Element field of an array field
    fn base_field(&self) -> Option<&dyn HostField>;

    /// Default form representation, `None` when the field is not editable
    /// through a form (auto keys, non-editable fields)
    fn form_field(&self) -> Option<FormFieldRepr>;

    /// Form label
    fn form_label(&self) -> AttrResult<String>;

    /// Whether the form field is required
    fn form_required(&self) -> AttrResult<bool>;

    /// Initial value of the form field
    fn form_initial(&self) -> AttrResult<InitialValue>;

    /// Help text of the form field
    fn form_help_text(&self) -> AttrResult<String>;
}

/// Host field-type tag.
///
/// Serialized with the host's class-style name (`CharField`, `ForeignKey`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InternalType {
    #[serde(rename = "AutoField")]
    Auto,
    #[serde(rename = "BigAutoField")]
    BigAuto,
    #[serde(rename = "BigIntegerField")]
    BigInteger,
    #[serde(rename = "BinaryField")]
    Binary,
    #[serde(rename = "BooleanField")]
    Boolean,
    #[serde(rename = "CharField")]
    Char,
    #[serde(rename = "DateField")]
    Date,
    #[serde(rename = "DateTimeField")]
    DateTime,
    #[serde(rename = "DecimalField")]
    Decimal,
    #[serde(rename = "DurationField")]
    Duration,
    #[serde(rename = "FileField")]
    File,
    #[serde(rename = "FloatField")]
    Float,
    #[serde(rename = "IntegerField")]
    Integer,
    #[serde(rename = "GenericIPAddressField")]
    IpAddress,
    #[serde(rename = "NullBooleanField")]
    NullableBoolean,
    #[serde(rename = "PositiveIntegerField")]
    PositiveInteger,
    #[serde(rename = "PositiveSmallIntegerField")]
    PositiveSmallInteger,
    #[serde(rename = "SlugField")]
    Slug,
    #[serde(rename = "SmallIntegerField")]
    SmallInteger,
    #[serde(rename = "TextField")]
    Text,
    #[serde(rename = "TimeField")]
    Time,
    #[serde(rename = "UUIDField")]
    Uuid,
    #[serde(rename = "ForeignKey")]
    ForeignKey,
    #[serde(rename = "OneToOneField")]
    OneToOne,
    #[serde(rename = "ManyToManyField")]
    ManyToMany,
    #[serde(rename = "ArrayField")]
    Array,
}

impl InternalType {
    /// Host class-style name of the tag
    pub fn as_str(&self) -> &'static str {
        match self {
            InternalType::Auto => "AutoField",
            InternalType::BigAuto => "BigAutoField",
            InternalType::BigInteger => "BigIntegerField",
            InternalType::Binary => "BinaryField",
            InternalType::Boolean => "BooleanField",
            InternalType::Char => "CharField",
            InternalType::Date => "DateField",
            InternalType::DateTime => "DateTimeField",
            InternalType::Decimal => "DecimalField",
            InternalType::Duration => "DurationField",
            InternalType::File => "FileField",
            InternalType::Float => "FloatField",
            InternalType::Integer => "IntegerField",
            InternalType::IpAddress => "GenericIPAddressField",
            InternalType::NullableBoolean => "NullBooleanField",
            InternalType::PositiveInteger => "PositiveIntegerField",
            InternalType::PositiveSmallInteger => "PositiveSmallIntegerField",
            InternalType::Slug => "SlugField",
            InternalType::SmallInteger => "SmallIntegerField",
            InternalType::Text => "TextField",
            InternalType::Time => "TimeField",
            InternalType::Uuid => "UUIDField",
            InternalType::ForeignKey => "ForeignKey",
            InternalType::OneToOne => "OneToOneField",
            InternalType::ManyToMany => "ManyToManyField",
            InternalType::Array => "ArrayField",
        }
    }

    /// Returns true for relation tags
    pub fn is_relation(&self) -> bool {
        matches!(
            self,
            InternalType::ForeignKey | InternalType::OneToOne | InternalType::ManyToMany
        )
    }
}

impl fmt::Display for InternalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One enumerated choice, kept in the order the host lists it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    /// Raw stored value
    pub value: serde_json::Value,
    /// Human-readable label
    pub label: String,
}

impl Choice {
    /// Build a choice from a raw value and its label
    pub fn new(value: impl Into<serde_json::Value>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// The host's default form field for a model field
#[derive(Debug, Clone, PartialEq)]
pub struct FormFieldRepr {
    /// Form-field class name (`CharField`, `ModelChoiceField`, ...)
    pub class: String,
    /// Widget used to render the form field
    pub widget: WidgetRepr,
}

/// The widget attached to a host form field
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WidgetRepr {
    /// Widget class name (`TextInput`, `Textarea`, `Select`, ...)
    pub class: String,
    /// HTML input type, for widgets that render an `<input>` or `<select>`
    pub input_type: Option<String>,
    /// Raw widget attributes (`rows`, `cols`, `step`, ...)
    pub attrs: serde_json::Map<String, serde_json::Value>,
    /// Choices the widget can enumerate
    pub choices: WidgetChoices,
    /// Whether the widget accepts several selected values
    pub allow_multiple_selected: Option<bool>,
    /// Display format for date/time widgets
    pub format: Option<String>,
}

/// Choice enumeration exposed by a widget
#[derive(Debug, Clone, PartialEq, Default)]
pub enum WidgetChoices {
    /// The widget does not enumerate choices
    #[default]
    None,
    /// A fixed list of choices
    Static(Vec<Choice>),
    /// Choices backed by another model's rows; never materialized here
    Lazy,
}

impl WidgetChoices {
    /// Returns true when the widget exposes any kind of choice enumeration
    pub fn is_enumerable(&self) -> bool {
        !matches!(self, WidgetChoices::None)
    }
}

/// Initial value of a form field
#[derive(Debug, Clone)]
pub enum InitialValue {
    /// No initial value
    Unset,
    /// A literal value
    Static(serde_json::Value),
    /// A value computed on demand
    Callable(InitialCallable),
}

/// What an [`InitialCallable`] produced
#[derive(Debug, Clone, PartialEq)]
pub enum CallableOutput {
    /// A date-time
    DateTime(DateTime<Utc>),
    /// Anything else
    Value(serde_json::Value),
}

/// A named factory for initial values (`now`, `uuid4`, ...)
#[derive(Clone)]
pub struct InitialCallable {
    name: String,
    func: Arc<dyn Fn() -> CallableOutput + Send + Sync>,
}

impl InitialCallable {
    /// Wrap `func` under `name`
    pub fn new(
        name: impl Into<String>,
        func: impl Fn() -> CallableOutput + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    /// Name of the factory
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Evaluate the factory
    pub fn call(&self) -> CallableOutput {
        (self.func)()
    }
}

impl fmt::Debug for InitialCallable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InitialCallable")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
