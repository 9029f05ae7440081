//! Schema command implementation

use anyhow::{Context, Result};
use mf_core::{resolve_model, ModelName};
use mf_style::Style;

use crate::cli::{GlobalArgs, SchemaArgs};
use crate::commands::common::{default_field_names, load_project, parse_field_list};

/// Execute the schema command
pub async fn execute(args: &SchemaArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let model = ModelName::try_new(args.model.as_str()).context("Model name cannot be empty")?;

    let fields = match &args.fields {
        Some(list) => parse_field_list(list),
        None => {
            let descriptor =
                resolve_model(&project.registry, project.app_name(&args.namespace), &model)?;
            default_field_names(descriptor.as_ref())
        }
    };

    let style = args.style.as_deref().and_then(|s| {
        let style = Style::parse(s);
        if style.is_none() {
            log::warn!("Unknown schema style '{}'; printing the raw schema", s);
        }
        style
    });

    let schema = project
        .schema(&args.namespace, &model, &fields, style)
        .with_context(|| format!("Failed to build schema for '{}'", args.model))?;
    println!("{}", serde_json::to_string_pretty(&schema)?);

    Ok(())
}
