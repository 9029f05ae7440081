//! Error types for mf-core

use thiserror::Error;

/// Core error type for Modelform
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Failed to parse configuration file
    #[error("[E002] Failed to parse config: {message}")]
    ConfigParseError { message: String },

    /// E003: Invalid configuration value
    #[error("[E003] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E101: The host registry has no such namespace
    #[error("[E101] There is no such app '{namespace}'")]
    NamespaceNotFound { namespace: String },

    /// E102: The namespace exists but does not register the model
    #[error("[E102] Model '{model}' is not registered under app '{namespace}'")]
    ModelNotFound { namespace: String, model: String },

    /// E103: The model does not declare the field
    #[error("[E103] Model '{model}' has no field named '{field}'")]
    FieldNotFound { model: String, field: String },

    /// E014: IO error
    #[error("[E014] IO error: {0}")]
    Io(#[from] std::io::Error),

    /// E016: IO error with file path context
    #[error("[E016] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// E015: YAML parse error
    #[error("[E015] YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;

/// A single form-field attribute (label, help text, initial value, required
/// flag, ...) could not be derived by the host.
///
/// Never fatal: field extraction substitutes an empty placeholder for the
/// attribute and carries on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot derive '{attribute}' for field '{field}': {reason}")]
pub struct AttributeDerivationError {
    /// Field whose attribute failed
    pub field: String,
    /// Attribute name (`label`, `help_text`, `initial`, `required`, ...)
    pub attribute: &'static str,
    /// Host-provided reason
    pub reason: String,
}

impl AttributeDerivationError {
    /// Build an error for `attribute` of `field`.
    pub fn new(field: impl Into<String>, attribute: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            attribute,
            reason: reason.into(),
        }
    }
}
