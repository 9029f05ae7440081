//! Strongly-typed model name.

use crate::newtype_string::define_newtype_string;

define_newtype_string! {
    /// A non-empty model type name as registered with the host (e.g. `Product`).
    pub struct ModelName;
}

#[cfg(test)]
#[path = "model_name_test.rs"]
mod tests;
