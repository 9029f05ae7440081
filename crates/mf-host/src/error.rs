//! Error types for mf-host

use thiserror::Error;

/// Errors raised while loading model definitions
#[derive(Error, Debug)]
pub enum HostError {
    /// H001: A configured model path does not exist
    #[error("[H001] Model path not found: {path}")]
    ModelPathNotFound { path: String },

    /// H002: IO error with file path context
    #[error("[H002] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// H003: Model definition is not valid YAML for the model schema
    #[error("[H003] Failed to parse model file {path}: {message}")]
    ModelParseError { path: String, message: String },

    /// H004: Two files define the same model in one namespace
    #[error("[H004] Duplicate model '{model}' in app '{namespace}'")]
    DuplicateModel { namespace: String, model: String },

    /// H005: Two fields of a model share a name
    #[error("[H005] Duplicate field '{field}' on model '{model}'")]
    DuplicateField { model: String, field: String },

    /// H006: Field definition is inconsistent
    #[error("[H006] Invalid field '{field}' on model '{model}': {reason}")]
    InvalidField {
        model: String,
        field: String,
        reason: String,
    },
}

/// Result type alias for HostError
pub type HostResult<T> = Result<T, HostError>;
