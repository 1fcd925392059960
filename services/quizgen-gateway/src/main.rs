//! Axum-based HTTP boundary for question synthesis. Config-driven via CoreConfig.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use quizgen_core::{
    CoreConfig, FactSource, FullQuestion, QuestionGenerator, SynthesisError, TemplateCatalog,
    TemplateStore,
};
use quizgen_facts::{HttpTemplateStore, StaticTemplateStore, WikidataClient};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load .env file if present (before any env::var calls)
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("[quizgen-gateway] .env not loaded: {} (using system environment)", e);
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Arc::new(CoreConfig::load().expect("load CoreConfig"));
    let timeout = Duration::from_millis(config.fetch_timeout_ms);

    let facts: Arc<dyn FactSource> = Arc::new(WikidataClient::new(&config.fact_endpoint, timeout));
    let templates: Arc<dyn TemplateStore> = match config.template_store_url.as_deref() {
        Some(url) => Arc::new(HttpTemplateStore::new(url, timeout)),
        None => {
            tracing::info!("no template store configured, using the built-in set");
            Arc::new(StaticTemplateStore::builtin())
        }
    };

    let catalog = Arc::new(TemplateCatalog::builtin());
    let generator = Arc::new(QuestionGenerator::new(
        Arc::clone(&catalog),
        facts,
        templates,
    ));

    let app = build_app(AppState { catalog, generator });

    let addr = std::net::SocketAddr::from(([127, 0, 0, 1], config.port));
    tracing::info!("{} listening on {}", config.app_name, addr);
    axum::serve(tokio::net::TcpListener::bind(addr).await.unwrap(), app)
        .await
        .unwrap();
}

fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/question", get(full_question))
        .route("/api/v1/templates", get(template_kinds))
        .route("/api/v1/health", get(health))
        .with_state(state)
}

#[derive(Clone)]
struct AppState {
    catalog: Arc<TemplateCatalog>,
    generator: Arc<QuestionGenerator>,
}

/// Maps the core taxonomy onto HTTP statuses. Upstream faults (transport
/// or bad source data) are 502; a catalog/store disagreement is 500.
struct ApiError(SynthesisError);

impl From<SynthesisError> for ApiError {
    fn from(err: SynthesisError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            SynthesisError::UnknownTemplateType(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SynthesisError::SourceUnavailable(_)
            | SynthesisError::StoreUnavailable(_)
            | SynthesisError::LabelResolutionFailure { .. }
            | SynthesisError::InsufficientDistinctAnswers { .. } => StatusCode::BAD_GATEWAY,
        };
        tracing::warn!(error = %self.0, "question generation failed");
        (status, Json(serde_json::json!({ "error": self.0.to_string() }))).into_response()
    }
}

/// GET /api/v1/question – runs the full pipeline and returns one question.
async fn full_question(State(state): State<AppState>) -> Result<Json<FullQuestion>, ApiError> {
    let question = state.generator.generate().await?;
    Ok(Json(question))
}

/// GET /api/v1/templates – lists the question types the catalog can serve.
async fn template_kinds(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "kinds": state.catalog.kinds() }))
}

/// GET /api/v1/health – liveness check for the proxy and scripts.
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
