//! Style-one projection of models defined through the YAML host

use mf_core::{build_raw_schema, describe_fields};
use mf_host::{ModelFile, YamlModel};
use mf_style::{project, project_style_one, Projection, Style};
use serde_json::json;

const ARTICLE: &str = r#"
name: Article
fields:
  - name: id
    type: AutoField
  - name: title
    type: CharField
    max_length: 120
    min_length: 5
  - name: body
    type: TextField
    help_text: Markdown is supported
  - name: featured
    type: BooleanField
    default: true
  - name: status
    type: CharField
    max_length: 1
    choices: [[d, Draft], [p, Published]]
    default: d
  - name: author
    type: ForeignKey
    to: accounts.Profile
  - name: cover
    type: ImageField
    max_length: 100
  - name: attachment
    type: FileField
  - name: published_on
    type: DateField
  - name: reminder
    type: TimeField
  - name: created
    type: DateTimeField
    default: { callable: now }
  - name: contact_emails
    type: ArrayField
    base_field: { name: contact_emails, type: EmailField, max_length: 254 }
  - name: site
    type: URLField
  - name: views
    type: PositiveIntegerField
  - name: categories
    type: TreeManyToManyField
    to: Category
"#;

fn article() -> YamlModel {
    let file: ModelFile = serde_yaml::from_str(ARTICLE).unwrap();
    YamlModel::from_file("blog", file).unwrap()
}

fn schema(fields: &[&str]) -> serde_json::Value {
    let model = article();
    let descriptors = describe_fields(&model, fields);
    serde_json::to_value(project_style_one("Article", &descriptors)).unwrap()
}

#[test]
fn test_every_declared_field_projects() {
    let all = [
        "id",
        "title",
        "body",
        "featured",
        "status",
        "author",
        "cover",
        "attachment",
        "published_on",
        "reminder",
        "created",
        "contact_emails",
        "site",
        "views",
        "categories",
    ];
    let value = schema(&all);
    let fields = &value["Article"]["FormFields"];

    let kinds: Vec<(&str, &str)> = all
        .iter()
        .map(|name| (*name, fields[*name]["formFieldType"]["type"].as_str().unwrap()))
        .collect();
    assert_eq!(
        kinds,
        vec![
            ("id", "unknown"),
            ("title", "input"),
            ("body", "textarea"),
            ("featured", "input"),
            ("status", "select"),
            ("author", "select"),
            ("cover", "input"),
            ("attachment", "unknown"),
            ("published_on", "input"),
            ("reminder", "input"),
            ("created", "input"),
            ("contact_emails", "input"),
            ("site", "url"),
            ("views", "input"),
            ("categories", "select"),
        ]
    );
}

#[test]
fn test_yaml_text_and_textarea() {
    let value = schema(&["title", "body"]);
    let fields = &value["Article"]["FormFields"];
    assert_eq!(fields["title"]["formFieldType"]["attrs"]["maxlength"], 120);
    assert_eq!(fields["title"]["formFieldType"]["attrs"]["minlength"], 5);
    assert_eq!(fields["title"]["label"], "Title");

    let body = &fields["body"];
    assert_eq!(body["formFieldType"]["attrs"]["autosize"]["minRows"], "10");
    assert_eq!(body["help_text"], "Markdown is supported");
    assert_eq!(body["form_field_type_for_reference"], "CharField");
}

#[test]
fn test_yaml_choices_and_relations() {
    let value = schema(&["status", "author", "categories"]);
    let fields = &value["Article"]["FormFields"];

    // A default on a choice field drops the blank choice
    assert_eq!(
        fields["status"]["formFieldType"]["choices"],
        json!([{"label": "Draft", "value": "d"}, {"label": "Published", "value": "p"}])
    );
    assert_eq!(fields["status"]["formFieldType"]["attrs"]["placeholder"], "d");

    assert_eq!(fields["author"]["formFieldType"]["choices"], "ModelChoiceIterator");
    assert_eq!(
        fields["categories"]["formFieldType"]["choices"],
        "TreeNodeMultipleChoiceIterator"
    );
}

#[test]
fn test_yaml_array_and_image() {
    let value = schema(&["contact_emails", "cover"]);
    let fields = &value["Article"]["FormFields"];
    let base = &fields["contact_emails"]["formFieldType"]["baseFormField"]["contact_emails"];
    assert_eq!(base["formFieldType"]["attrs"]["type"], "email");
    assert_eq!(base["label"], "Contact Emails");

    assert_eq!(fields["cover"]["formFieldType"]["attrs"]["type"], "file");
    assert_eq!(fields["cover"]["form_field_type_for_reference"], "ImageField");
}

#[test]
fn test_yaml_now_default_is_formatted() {
    let value = schema(&["created", "featured"]);
    let fields = &value["Article"]["FormFields"];
    let placeholder = fields["created"]["formFieldType"]["attrs"]["placeholder"]
        .as_str()
        .unwrap();
    assert!(placeholder.ends_with(" UTC"), "{placeholder}");
    assert_eq!(fields["featured"]["formFieldType"]["attrs"]["checked"], true);
}

#[test]
fn test_raw_projection_keeps_descriptors() {
    let model = article();
    let raw = build_raw_schema("blog", "apps.v1.blog", &model, &["title", "nope"]);
    match project(raw, Style::parse("three")) {
        Projection::Raw(raw) => assert_eq!(raw.field_names(), vec!["title"]),
        Projection::StyleOne(_) => panic!("unknown styles stay raw"),
    }
}
