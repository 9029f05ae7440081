//! mf-style - Schema projection for Modelform
//!
//! Turns the field descriptors of a model into the JSON form schema a
//! frontend form builder consumes. Each field is matched against an
//! ordered rule table ([`dispatch::RULES`]); the first matching rule
//! renders it.

pub mod dispatch;
pub mod form;
pub(crate) mod render;
pub mod style;

pub use dispatch::{rule_for, Rule};
pub use form::{
    project_style_one, render_style_one, BaseFormField, FormFieldType, RenderedField, Schema,
};
pub use style::{project, Projection, Style};
