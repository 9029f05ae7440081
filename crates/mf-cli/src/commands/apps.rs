//! Apps command implementation

use anyhow::{Context, Result};
use mf_core::Catalog;

use crate::cli::{AppsArgs, GlobalArgs, ListOutput};
use crate::commands::common::load_project;

/// Execute the apps command
pub async fn execute(args: &AppsArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let catalog = project
        .catalog()
        .context("Failed to resolve configured apps")?;

    match args.output {
        ListOutput::Table => print_table(&catalog),
        ListOutput::Json => println!("{}", serde_json::to_string_pretty(&catalog)?),
    }

    Ok(())
}

/// Print apps in table format
fn print_table(catalog: &Catalog) {
    let names = catalog.model_names();
    let app_width = names
        .iter()
        .map(|(app, _)| app.len())
        .max()
        .unwrap_or(3)
        .max(3);

    println!("{:<app_width$}  MODELS", "APP", app_width = app_width);
    println!(
        "{:-<app_width$}  {}",
        "",
        "-".repeat(40),
        app_width = app_width
    );

    for (app, models) in &names {
        let models_str = if models.is_empty() {
            "-".to_string()
        } else {
            models.join(", ")
        };
        println!("{:<app_width$}  {}", app, models_str, app_width = app_width);
    }

    println!();
    println!(
        "Total: {} apps, {} models",
        catalog.len(),
        catalog.model_count()
    );
}
