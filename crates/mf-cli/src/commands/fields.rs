//! Fields command implementation

use anyhow::{Context, Result};
use mf_core::{describe_namespace, ModelOverview, NamespaceOverview};

use crate::cli::{FieldsArgs, GlobalArgs, ListOutput};
use crate::commands::common::load_project;

/// Execute the fields command
pub async fn execute(args: &FieldsArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let app_name = project.app_name(&args.namespace);
    let overview = describe_namespace(
        &project.registry,
        app_name,
        project.config.test_model.as_ref(),
    )
    .with_context(|| format!("Failed to describe app '{}'", args.namespace))?;

    match args.output {
        ListOutput::Table => print_overview(&overview),
        ListOutput::Json => println!("{}", serde_json::to_string_pretty(&overview)?),
    }

    Ok(())
}

fn print_overview(overview: &NamespaceOverview) {
    if overview.models.is_empty() {
        println!("App '{}' registers no models", overview.namespace);
    }
    for model in &overview.models {
        print_model(model);
    }
    if let Some(test_model) = &overview.test_model {
        println!("Test model:");
        print_model(test_model);
    }
}

/// Print one model's fields in table format
fn print_model(model: &ModelOverview) {
    let name_width = model
        .fields
        .iter()
        .map(|f| f.name.len())
        .max()
        .unwrap_or(4)
        .max(4);
    let type_width = 26;
    let form_width = 28;

    println!("{}", model.name);
    println!(
        "  {:<name_width$}  {:<type_width$}  {:<form_width$}  IN_FORM",
        "NAME",
        "TYPE",
        "FORM_FIELD",
        name_width = name_width,
        type_width = type_width,
        form_width = form_width
    );
    for field in &model.fields {
        let mut type_str = field.internal_type.to_string();
        if let Some(related) = &field.related_model {
            type_str = format!("{} -> {}", type_str, related);
        }
        let form_str = if field.form_field_type.is_empty() {
            "-"
        } else {
            field.form_field_type.as_str()
        };
        println!(
            "  {:<name_width$}  {:<type_width$}  {:<form_width$}  {}",
            field.name,
            type_str,
            form_str,
            if field.is_in_default_model_form_fields { "yes" } else { "no" },
            name_width = name_width,
            type_width = type_width,
            form_width = form_width
        );
    }
    println!();
}
