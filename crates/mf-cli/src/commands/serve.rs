//! Schema browser and HTTP API using axum + embedded templates

use anyhow::{Context, Result};
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Form, Router};
use mf_core::{describe_namespace, CoreError, ModelName};
use mf_style::Style;
use minijinja::{context, Environment};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::cli::{GlobalArgs, ServeArgs};
use crate::commands::common::{load_project, Project};

/// Form key carrying the model name in schema requests
const MODEL_NAME_KEY: &str = "model-name";

/// Page templates compiled into the binary
const TEMPLATES: [(&str, &str); 4] = [
    ("base.html", include_str!("../../templates/base.html")),
    ("index.html", include_str!("../../templates/index.html")),
    ("apps.html", include_str!("../../templates/apps.html")),
    ("app.html", include_str!("../../templates/app.html")),
];

/// State shared across all handlers
pub(crate) struct AppState {
    project: Project,
    templates: Environment<'static>,
}

impl AppState {
    pub(crate) fn new(project: Project) -> Result<Self> {
        let mut templates = Environment::new();
        for (name, source) in TEMPLATES {
            templates
                .add_template(name, source)
                .with_context(|| format!("Invalid template '{}'", name))?;
        }

        Ok(Self {
            project,
            templates,
        })
    }
}

/// Path parameters of the per-app routes
#[derive(Debug, Deserialize)]
struct AppPath {
    namespace: String,
    #[serde(default)]
    style: Option<String>,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let state = Arc::new(AppState::new(project)?);
    log::info!(
        "Serving {} configured apps with {} models",
        state.project.config.schema_apps.len(),
        state.project.registry.model_count()
    );

    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .context("Invalid host:port")?;

    println!("Serving schemas at http://{}:{}", args.host, args.port);
    println!("Press Ctrl+C to stop.\n");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}:{}", args.host, args.port))?;
    axum::serve(listener, app)
        .await
        .context("HTTP server error")?;

    Ok(())
}

/// Build the application router
pub(crate) fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/apps-and-models", get(apps_and_models))
        .route("/local-apps/", get(local_apps))
        .route("/local-apps/style/one/", get(local_apps_style_one))
        .route("/local-apps/{namespace}/", get(app_fields).post(app_schema))
        .route(
            "/local-apps/{namespace}/style/{style}/",
            get(app_fields).post(app_schema),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// GET /
async fn index(State(state): State<Arc<AppState>>) -> Response {
    render_page(
        &state.templates,
        "index.html",
        context! { project => &state.project.config.name },
    )
}

/// GET /apps-and-models
async fn apps_and_models(State(state): State<Arc<AppState>>) -> Response {
    match state.project.catalog() {
        Ok(catalog) => json_response(&catalog),
        Err(e) => core_error_response(&e),
    }
}

/// GET /local-apps/
async fn local_apps(State(state): State<Arc<AppState>>) -> Response {
    render_apps(&state, None)
}

/// GET /local-apps/style/one/
async fn local_apps_style_one(State(state): State<Arc<AppState>>) -> Response {
    render_apps(&state, Some(Style::One))
}

fn render_apps(state: &AppState, style: Option<Style>) -> Response {
    let catalog = match state.project.catalog() {
        Ok(catalog) => catalog,
        Err(e) => return core_error_response(&e),
    };
    render_page(
        &state.templates,
        "apps.html",
        context! {
            apps => catalog.model_names(),
            style => style.map(|s| s.as_str()),
        },
    )
}

/// GET /local-apps/{namespace}/ and /local-apps/{namespace}/style/{style}/
async fn app_fields(State(state): State<Arc<AppState>>, Path(path): Path<AppPath>) -> Response {
    let project = &state.project;
    let overview = describe_namespace(
        &project.registry,
        project.app_name(&path.namespace),
        project.config.test_model.as_ref(),
    );
    match overview {
        Ok(overview) => render_page(
            &state.templates,
            "app.html",
            context! { overview => overview, style => path.style },
        ),
        Err(e) => core_error_response(&e),
    }
}

/// POST /local-apps/{namespace}/ and /local-apps/{namespace}/style/{style}/
///
/// The form carries `model-name` and one key per selected field.
async fn app_schema(
    State(state): State<Arc<AppState>>,
    Path(path): Path<AppPath>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Response {
    let mut model = None;
    let mut fields: Vec<String> = Vec::new();
    for (key, value) in pairs {
        if key == MODEL_NAME_KEY {
            model = ModelName::try_new(value);
        } else if !fields.contains(&key) {
            fields.push(key);
        }
    }

    let Some(model) = model else {
        return json_error(
            StatusCode::BAD_REQUEST,
            &format!("Missing '{}'", MODEL_NAME_KEY),
        );
    };

    let style = path.style.as_deref().and_then(Style::parse);
    if style.is_none() {
        log::debug!("No known style requested; returning the raw schema");
    }

    match state.project.schema(&path.namespace, &model, &fields, style) {
        Ok(schema) => json_response(&schema),
        Err(e) => core_error_response(&e),
    }
}

fn render_page<S: Serialize>(templates: &Environment<'static>, name: &str, ctx: S) -> Response {
    match templates.get_template(name).and_then(|t| t.render(ctx)) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            log::error!("Failed to render {}: {}", name, e);
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page")
        }
    }
}

fn json_response<T: Serialize>(value: &T) -> Response {
    match serde_json::to_string(value) {
        Ok(json) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            json,
        )
            .into_response(),
        Err(e) => json_error(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()),
    }
}

fn json_error(status: StatusCode, message: &str) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        serde_json::json!({ "error": message }).to_string(),
    )
        .into_response()
}

fn core_error_response(err: &CoreError) -> Response {
    let status = match err {
        CoreError::NamespaceNotFound { .. } | CoreError::ModelNotFound { .. } => {
            StatusCode::NOT_FOUND
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    json_error(status, &err.to_string())
}

#[cfg(test)]
#[path = "serve_test.rs"]
mod tests;
