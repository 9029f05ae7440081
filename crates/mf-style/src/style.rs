//! Output style selection

use crate::form::{project_style_one, Schema};
use mf_core::RawSchema;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Schema styles a client can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    /// Declarative form-builder schema
    One,
}

impl Style {
    /// Parse a requested style; unknown styles select the raw schema
    pub fn parse(s: &str) -> Option<Self> {
        s.parse().ok()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Style::One => "one",
        }
    }
}

impl FromStr for Style {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "one" => Ok(Style::One),
            other => Err(format!("unknown schema style '{other}'")),
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A schema in the requested style
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Projection {
    /// Unprojected field descriptors
    Raw(RawSchema),
    /// Style-one form
    StyleOne(Schema),
}

/// Project `raw` into `style`, or keep it raw when no style applies
pub fn project(raw: RawSchema, style: Option<Style>) -> Projection {
    match style {
        Some(Style::One) => Projection::StyleOne(project_style_one(&raw.model_name, &raw.properties)),
        None => Projection::Raw(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mf_core::build_raw_schema;
    use mf_core::test_utils::{StubField, StubModel};

    #[test]
    fn test_parse_style() {
        assert_eq!(Style::parse("one"), Some(Style::One));
        assert_eq!(Style::parse("two"), None);
        assert_eq!(Style::parse(""), None);
        assert_eq!(Style::One.to_string(), "one");
    }

    #[test]
    fn test_project_selects_shape() {
        let model = StubModel::new("Product", vec![StubField::text("title", 150)]);
        let raw = build_raw_schema("catalog", "apps.v1.catalog", &model, &["title"]);

        let value = serde_json::to_value(project(raw.clone(), None)).unwrap();
        assert_eq!(value["catalog"]["models"]["Product"]["model_name"], "Product");

        let value = serde_json::to_value(project(raw, Some(Style::One))).unwrap();
        assert_eq!(value["Product"]["attrs"]["id"], "Product");
        assert!(value["Product"]["FormFields"]["title"].is_object());
    }
}
