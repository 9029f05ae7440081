//! mf-host - File-backed model registry for Modelform
//!
//! Model definitions live in YAML files, one directory per namespace:
//!
//! ```text
//! models/
//!   catalog/
//!     Product.yml
//!     Category.yml
//!   accounts/
//! ```
//!
//! [`YamlRegistry`] loads them and implements the `mf-core` host traits,
//! deriving each field's default form field the way the host framework
//! would (see [`formfield`]).

pub mod error;
pub mod formfield;
pub mod registry;
pub mod schema;
pub(crate) mod serde_helpers;

pub use error::{HostError, HostResult};
pub use registry::{YamlField, YamlModel, YamlRegistry};
pub use schema::{FieldDef, FormFieldOverride, ModelFieldType, ModelFile};
