use super::*;
use std::io::Write;

#[test]
fn test_parse_minimal_config() {
    let config: Config = serde_yaml::from_str("name: shop").unwrap();
    assert_eq!(config.name, "shop");
    assert!(config.schema_apps.is_empty());
    assert_eq!(config.version_prefix, "apps.v1.");
    let root = PathBuf::from("/tmp/shop");
    assert_eq!(config.model_paths_absolute(&root), vec![root.join("models")]);
    assert!(config.test_model.is_none());
}

#[test]
fn test_parse_full_config() {
    let yaml = r#"
name: shop
schema_apps:
  - apps.v1.catalog
  - accounts
version_prefix: "apps.v1."
model_paths:
  - definitions
test_model:
  app_name: catalog
  model: Product
"#;
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(config.schema_apps.len(), 2);
    assert_eq!(
        config.test_model,
        Some(TestModelConfig {
            app_name: "catalog".to_string(),
            model: "Product".to_string(),
        })
    );
    let namespaces = config.namespaces();
    assert_eq!(namespaces, vec![NamespaceName::new("catalog"), NamespaceName::new("accounts")]);
}

#[test]
fn test_full_namespace_keeps_prefix() {
    let config: Config =
        serde_yaml::from_str("name: shop\nschema_apps: [apps.v1.catalog, accounts]").unwrap();
    assert_eq!(config.full_namespace("catalog"), Some("apps.v1.catalog"));
    assert_eq!(config.full_namespace("accounts"), Some("accounts"));
    assert_eq!(config.full_namespace("billing"), None);
}

#[test]
fn test_custom_version_prefix() {
    let yaml = r#"
name: shop
version_prefix: "apps.v2."
schema_apps:
  - apps.v2.billing
  - apps.v1.catalog
"#;
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    let names: Vec<String> = config.namespaces().into_iter().map(|n| n.to_string()).collect();
    assert_eq!(names, vec!["billing", "apps.v1.catalog"]);
}

#[test]
fn test_unknown_field_rejected() {
    let result: Result<Config, _> = serde_yaml::from_str("name: shop\nlocal_apps: [core]");
    assert!(result.is_err());
}

#[test]
fn test_validate_empty_name() {
    let config: Config = serde_yaml::from_str("name: ''").unwrap();
    let err = config.validate().unwrap_err();
    assert!(matches!(err, CoreError::ConfigInvalid { .. }));
}

#[test]
fn test_validate_duplicate_namespace_after_formatting() {
    let config: Config =
        serde_yaml::from_str("name: shop\nschema_apps: [apps.v1.core, core]").unwrap();
    let err = config.validate().unwrap_err().to_string();
    assert!(err.contains("already listed"), "got: {err}");
}

#[test]
fn test_validate_prefix_only_entry() {
    let config: Config = serde_yaml::from_str("name: shop\nschema_apps: [apps.v1.]").unwrap();
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_incomplete_test_model() {
    let yaml = r#"
name: shop
test_model:
  app_name: catalog
  model: ""
"#;
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    assert!(config.validate().is_err());
}

#[test]
fn test_load_from_dir() {
    let dir = tempfile::tempdir().unwrap();
    let mut file = std::fs::File::create(dir.path().join("modelform.yml")).unwrap();
    writeln!(file, "name: shop\nschema_apps: [apps.v1.catalog]").unwrap();

    let config = Config::load_from_dir(dir.path()).unwrap();
    assert_eq!(config.name, "shop");
}

#[test]
fn test_load_from_dir_yaml_extension() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("modelform.yaml"), "name: shop\n").unwrap();
    assert!(Config::load_from_dir(dir.path()).is_ok());
}

#[test]
fn test_load_missing_config() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load_from_dir(dir.path()).unwrap_err();
    assert!(matches!(err, CoreError::ConfigNotFound { .. }));
}

#[test]
fn test_load_invalid_yaml() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("modelform.yml"), "name: [unclosed").unwrap();
    let err = Config::load_from_dir(dir.path()).unwrap_err();
    assert!(matches!(err, CoreError::ConfigParseError { .. }));
}
