use super::*;
use axum::body::Body;
use axum::http::Request;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;
use tower::ServiceExt;

const FIXTURE: &str = "tests/fixtures/sample_project";

fn app_for(project_dir: &str) -> Router {
    let global = GlobalArgs {
        verbose: false,
        project_dir: project_dir.to_string(),
        config: None,
    };
    let project = load_project(&global).unwrap();
    router(Arc::new(AppState::new(project).unwrap()))
}

fn app() -> Router {
    app_for(FIXTURE)
}

async fn get_body(uri: &str) -> (StatusCode, String) {
    get_body_from(app(), uri).await
}

async fn get_body_from(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn post_form(uri: &str, form: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri(uri)
        .method("POST")
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_apps_and_models() {
    let (status, body) = get_body("/apps-and-models").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"catalog":["Category","Product"],"accounts":[]}"#);
}

#[tokio::test]
async fn test_index_page() {
    let (status, body) = get_body("/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("sample_shop"));
    assert!(body.contains("/local-apps/style/one/"));
}

#[tokio::test]
async fn test_local_apps_pages() {
    let (status, body) = get_body("/local-apps/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"href="/local-apps/catalog/""#));
    assert!(body.contains("<li>Product</li>"));
    assert!(body.contains("No models"));

    let (status, body) = get_body("/local-apps/style/one/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"href="/local-apps/catalog/style/one/""#));
}

#[tokio::test]
async fn test_app_page_lists_fields_and_test_model() {
    let (status, body) = get_body("/local-apps/catalog/style/one/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"name="model-name" value="Product""#));
    assert!(body.contains(r#"name="title" value="on" checked"#));
    assert!(body.contains("Test model: Category"));
}

#[tokio::test]
async fn test_app_page_unknown_namespace() {
    let (status, body) = get_body("/local-apps/billing/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert!(body["error"].as_str().unwrap().contains("billing"));
}

#[tokio::test]
async fn test_post_style_one_schema() {
    let (status, body) = post_form(
        "/local-apps/catalog/style/one/",
        "model-name=Product&title=on&published=on&emails=on&missing=on",
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let fields = &body["Product"]["FormFields"];
    assert_eq!(
        fields.as_object().unwrap().keys().collect::<Vec<_>>(),
        vec!["title", "published", "emails"]
    );
    assert_eq!(fields["title"]["formFieldType"]["attrs"]["maxlength"], 150);
    assert_eq!(fields["title"]["formFieldType"]["attrs"]["minlength"], 30);
    assert_eq!(fields["published"]["formFieldType"]["attrs"]["checked"], true);
    assert_eq!(
        fields["emails"]["formFieldType"]["baseFormField"]["emails"]["formFieldType"]["attrs"]
            ["type"],
        "email"
    );
}

#[tokio::test]
async fn test_post_without_style_returns_raw_schema() {
    let (status, body) = post_form("/local-apps/apps.v1.catalog/", "model-name=Product&title=on").await;
    assert_eq!(status, StatusCode::OK);
    let app = &body["catalog"];
    assert_eq!(app["app_name"], "catalog");
    assert_eq!(app["full_name"], "apps.v1.catalog");
    assert_eq!(app["models"]["Product"]["properties"]["title"]["max_length"], 150);
}

#[tokio::test]
async fn test_post_unknown_style_returns_raw_schema() {
    let (status, body) = post_form("/local-apps/catalog/style/two/", "model-name=Product&size=on").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["catalog"]["models"]["Product"]["properties"]["size"].is_object());
}

#[tokio::test]
async fn test_post_errors() {
    let (status, body) = post_form("/local-apps/catalog/", "title=on").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing 'model-name'");

    let (status, _) = post_form("/local-apps/catalog/", "model-name=Order").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = post_form("/local-apps/accounts/", "model-name=Profile").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = post_form("/local-apps/billing/", "model-name=Product").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

/// Project whose config lists an app the model directories do not define
fn project_with_unregistered_app() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("modelform.yml"),
        "name: partial\nschema_apps: [catalog, billing]\n",
    )
    .unwrap();
    let catalog = dir.path().join("models/catalog");
    fs::create_dir_all(&catalog).unwrap();
    for file in ["category.yml", "product.yml"] {
        fs::copy(format!("{FIXTURE}/models/catalog/{file}"), catalog.join(file)).unwrap();
    }
    dir
}

#[tokio::test]
async fn test_unregistered_configured_app_only_fails_listings() {
    let dir = project_with_unregistered_app();
    let project_dir = dir.path().to_str().unwrap();

    let (status, body) = get_body_from(app_for(project_dir), "/apps-and-models").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert!(body["error"].as_str().unwrap().contains("billing"));

    let (status, _) = get_body_from(app_for(project_dir), "/local-apps/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = get_body_from(app_for(project_dir), "/local-apps/catalog/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"name="model-name" value="Product""#));
}
