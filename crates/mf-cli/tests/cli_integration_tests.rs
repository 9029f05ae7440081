//! CLI integration tests
//!
//! Runs `mf apps`, `mf fields` and `mf schema` against the sample project.

use serde_json::Value;
use std::process::{Command, Output};

/// Path to the compiled mf binary (resolved at compile time)
fn mf_bin() -> String {
    env!("CARGO_BIN_EXE_mf").to_string()
}

fn sample_project_dir() -> &'static str {
    "tests/fixtures/sample_project"
}

fn run_mf(args: &[&str]) -> Output {
    Command::new(mf_bin())
        .args(["--project-dir", sample_project_dir()])
        .args(args)
        .output()
        .expect("Failed to run mf")
}

fn stdout_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "mf should succeed.\nstdout: {}\nstderr: {}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

// ── mf apps ─────────────────────────────────────────────────────────────

#[test]
fn test_apps_json_lists_configured_apps_in_order() {
    let value = stdout_json(&run_mf(&["apps", "--output", "json"]));
    let apps: Vec<&String> = value.as_object().unwrap().keys().collect();
    assert_eq!(apps, vec!["catalog", "accounts"]);
    assert_eq!(value["catalog"], serde_json::json!(["Category", "Product"]));
    assert_eq!(value["accounts"], serde_json::json!([]));
}

#[test]
fn test_apps_table() {
    let output = run_mf(&["apps"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Category, Product"), "{}", stdout);
    assert!(stdout.contains("Total: 2 apps, 2 models"), "{}", stdout);
}

#[test]
fn test_missing_config_fails() {
    let output = Command::new(mf_bin())
        .args(["--project-dir", "tests/fixtures", "apps"])
        .output()
        .expect("Failed to run mf");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to load project"), "{}", stderr);
}

// ── mf fields ───────────────────────────────────────────────────────────

#[test]
fn test_fields_json_includes_test_model() {
    let value = stdout_json(&run_mf(&["fields", "apps.v1.catalog", "--output", "json"]));
    assert_eq!(value["namespace"], "catalog");
    assert_eq!(value["models"][1]["name"], "Product");
    assert_eq!(value["test_model"]["name"], "Category");

    let id = &value["models"][1]["fields"][0];
    assert_eq!(id["name"], "id");
    assert_eq!(id["is_in_default_model_form_fields"], false);
}

#[test]
fn test_fields_unknown_app_fails() {
    let output = run_mf(&["fields", "billing"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("There is no such app 'billing'"), "{}", stderr);
}

// ── mf schema ───────────────────────────────────────────────────────────

#[test]
fn test_schema_style_one() {
    let value = stdout_json(&run_mf(&[
        "schema",
        "catalog",
        "--model",
        "Product",
        "--fields",
        "title,category,nope",
        "--style",
        "one",
    ]));
    let form = &value["Product"];
    assert_eq!(form["attrs"]["id"], "Product");
    assert_eq!(
        form["attrs"]["rules"],
        serde_json::json!({"title": [], "category": []})
    );
    let category = &form["FormFields"]["category"];
    assert_eq!(category["formFieldType"]["choices"], "ModelChoiceIterator");
    assert_eq!(category["help_text"], "Primary category");
    assert!(form["FormFields"].get("nope").is_none());
}

#[test]
fn test_schema_defaults_to_form_fields_and_raw_style() {
    let value = stdout_json(&run_mf(&["schema", "catalog", "--model", "Category"]));
    let properties = value["catalog"]["models"]["Category"]["properties"]
        .as_object()
        .unwrap();
    let names: Vec<&String> = properties.keys().collect();
    assert_eq!(names, vec!["name", "parent"]);
    assert_eq!(properties["parent"]["related_model"], "catalog.Category");
}

#[test]
fn test_schema_unknown_model_fails() {
    let output = run_mf(&["schema", "catalog", "--model", "Order"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Model 'Order' is not registered"), "{}", stderr);
}
