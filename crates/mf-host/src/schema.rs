//! YAML model definition types
//!
//! One file per model:
//!
//! ```yaml
//! name: Product
//! fields:
//!   - name: title
//!     type: CharField
//!     max_length: 150
//!   - name: category
//!     type: ForeignKey
//!     to: Category
//!   - name: created
//!     type: DateTimeField
//!     default: { callable: now }
//! ```

use crate::serde_helpers::default_true;
use mf_core::{Choice, InternalType};
use serde::{Deserialize, Serialize};

/// Contents of one model file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelFile {
    /// Model name
    pub name: String,

    /// Human-readable model name
    #[serde(default)]
    pub verbose_name: Option<String>,

    /// Declared fields in declaration order
    #[serde(default)]
    pub fields: Vec<FieldDef>,
}

/// One declared model field
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDef {
    pub name: String,

    #[serde(rename = "type")]
    pub field_type: ModelFieldType,

    #[serde(default)]
    pub max_length: Option<u32>,

    #[serde(default)]
    pub min_length: Option<u32>,

    /// Decimal places of a `DecimalField`
    #[serde(default)]
    pub decimal_places: Option<u32>,

    /// Whether the field may be left empty in forms
    #[serde(default)]
    pub blank: bool,

    #[serde(default)]
    pub null: bool,

    /// Non-editable fields are left out of forms
    #[serde(default = "default_true")]
    pub editable: bool,

    #[serde(default)]
    pub default: Option<DefaultDef>,

    /// Enumerated `[value, label]` pairs
    #[serde(default)]
    pub choices: Vec<ChoiceDef>,

    #[serde(default)]
    pub verbose_name: Option<String>,

    #[serde(default)]
    pub help_text: Option<String>,

    /// Relation target, `Model` or `namespace.Model`
    #[serde(default)]
    pub to: Option<String>,

    /// Element field of an `ArrayField`
    #[serde(default)]
    pub base_field: Option<Box<FieldDef>>,

    /// Replaces parts of the derived form field
    #[serde(default)]
    pub form_field: Option<FormFieldOverride>,
}

/// Default of a field: a literal, or a named factory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultDef {
    Callable { callable: String },
    Value(serde_json::Value),
}

/// A choice written as `[value, label]` or `{value, label}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChoiceDef {
    Pair(serde_json::Value, String),
    Entry { value: serde_json::Value, label: String },
}

impl From<&ChoiceDef> for Choice {
    fn from(def: &ChoiceDef) -> Self {
        match def {
            ChoiceDef::Pair(value, label) | ChoiceDef::Entry { value, label } => {
                Choice::new(value.clone(), label.clone())
            }
        }
    }
}

/// Form-field settings that win over the derived defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormFieldOverride {
    /// Form-field class
    #[serde(default)]
    pub class: Option<String>,

    /// Widget class
    #[serde(default)]
    pub widget: Option<String>,

    /// Extra widget attributes, merged over the derived ones
    #[serde(default)]
    pub attrs: serde_json::Map<String, serde_json::Value>,

    #[serde(default)]
    pub label: Option<String>,

    #[serde(default)]
    pub required: Option<bool>,
}

/// Model field classes understood by the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelFieldType {
    AutoField,
    BigAutoField,
    BigIntegerField,
    BinaryField,
    BooleanField,
    CharField,
    DateField,
    DateTimeField,
    DecimalField,
    DurationField,
    EmailField,
    FileField,
    FloatField,
    GenericIPAddressField,
    ImageField,
    IntegerField,
    NullBooleanField,
    PositiveIntegerField,
    PositiveSmallIntegerField,
    SlugField,
    SmallIntegerField,
    TextField,
    TimeField,
    URLField,
    UUIDField,
    ForeignKey,
    OneToOneField,
    ManyToManyField,
    TreeForeignKey,
    TreeManyToManyField,
    ArrayField,
}

impl ModelFieldType {
    /// Type tag reported to Modelform.
    ///
    /// Subclasses report their storage parent (`EmailField` is stored as a
    /// `CharField`, `TreeForeignKey` as a `ForeignKey`).
    pub fn internal_type(&self) -> InternalType {
        match self {
            ModelFieldType::AutoField => InternalType::Auto,
            ModelFieldType::BigAutoField => InternalType::BigAuto,
            ModelFieldType::BigIntegerField => InternalType::BigInteger,
            ModelFieldType::BinaryField => InternalType::Binary,
            ModelFieldType::BooleanField => InternalType::Boolean,
            ModelFieldType::CharField
            | ModelFieldType::EmailField
            | ModelFieldType::URLField => InternalType::Char,
            ModelFieldType::DateField => InternalType::Date,
            ModelFieldType::DateTimeField => InternalType::DateTime,
            ModelFieldType::DecimalField => InternalType::Decimal,
            ModelFieldType::DurationField => InternalType::Duration,
            ModelFieldType::FileField | ModelFieldType::ImageField => InternalType::File,
            ModelFieldType::FloatField => InternalType::Float,
            ModelFieldType::GenericIPAddressField => InternalType::IpAddress,
            ModelFieldType::IntegerField => InternalType::Integer,
            ModelFieldType::NullBooleanField => InternalType::NullableBoolean,
            ModelFieldType::PositiveIntegerField => InternalType::PositiveInteger,
            ModelFieldType::PositiveSmallIntegerField => InternalType::PositiveSmallInteger,
            ModelFieldType::SlugField => InternalType::Slug,
            ModelFieldType::SmallIntegerField => InternalType::SmallInteger,
            ModelFieldType::TextField => InternalType::Text,
            ModelFieldType::TimeField => InternalType::Time,
            ModelFieldType::UUIDField => InternalType::Uuid,
            ModelFieldType::ForeignKey | ModelFieldType::TreeForeignKey => {
                InternalType::ForeignKey
            }
            ModelFieldType::OneToOneField => InternalType::OneToOne,
            ModelFieldType::ManyToManyField | ModelFieldType::TreeManyToManyField => {
                InternalType::ManyToMany
            }
            ModelFieldType::ArrayField => InternalType::Array,
        }
    }

    /// Returns true for field classes that point at another model
    pub fn is_relation(&self) -> bool {
        self.internal_type().is_relation()
    }

    /// Returns true for fields whose length is bounded by `max_length`
    pub fn has_length(&self) -> bool {
        matches!(
            self,
            ModelFieldType::CharField
                | ModelFieldType::EmailField
                | ModelFieldType::URLField
                | ModelFieldType::SlugField
                | ModelFieldType::TextField
                | ModelFieldType::FileField
                | ModelFieldType::ImageField
        )
    }
}

impl FieldDef {
    /// Declared choices as host choices
    pub fn declared_choices(&self) -> Vec<Choice> {
        self.choices.iter().map(Choice::from).collect()
    }

    /// Human-readable name: `verbose_name`, or the name with underscores
    /// replaced by spaces
    pub fn verbose_name(&self) -> String {
        self.verbose_name
            .clone()
            .unwrap_or_else(|| self.name.replace('_', " "))
    }
}

#[cfg(test)]
#[path = "schema_test.rs"]
mod tests;
