//! Thin REST surface over the chat analysis engine.
//!
//! The server owns no storage and no analysis logic; it validates the wire
//! shapes, delegates to the engine, and maps error kinds to HTTP statuses.

use analysis_core::AnalysisError;
use analysis_orchestrator::{ChatAnalysisEngine, EngineError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use classifier_client::{ClassifierClient, ClassifierConfig};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod analysis_routes;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ChatAnalysisEngine>,
}

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<EngineError> for ApiError {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::Analysis(inner) => ApiError::Analysis(inner),
            other => ApiError::Internal(anyhow::anyhow!(other.to_string())),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Analysis(AnalysisError::InputTooSmall(_)) => StatusCode::BAD_REQUEST,
            ApiError::Analysis(AnalysisError::InputTooLarge(_)) => StatusCode::PAYLOAD_TOO_LARGE,
            // The request itself is well-formed; the content bytes are not
            // decodable as text.
            ApiError::Analysis(AnalysisError::BadEncoding) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(serde_json::json!({ "detail": self.to_string() }));
        (status, body).into_response()
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        analysis_routes::analyze_message,
        analysis_routes::analyze_conversation,
    ),
    components(schemas(
        analysis_routes::AnalyzeMessageRequest,
        analysis_routes::AnalyzeMessageResponse,
        analysis_routes::AnalyzeConversationRequest,
        analysis_routes::AnalyzeConversationResponse,
    ))
)]
struct ApiDoc;

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Build the full application router for the given state.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(analysis_routes::routes())
        .route("/health", get(health))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn build_engine() -> ChatAnalysisEngine {
    let engine = ChatAnalysisEngine::new();
    let config = ClassifierConfig::default();
    if std::env::var("CLASSIFIER_URL").map_or(false, |url| !url.trim().is_empty()) {
        match ClassifierClient::new(config.url.clone(), config.timeout) {
            Ok(client) => {
                tracing::info!(url = %config.url, "neural classifier enabled");
                return engine
                    .with_classifier(Arc::new(client))
                    .with_classifier_timeout(config.timeout);
            }
            Err(error) => {
                tracing::warn!(%error, "classifier client unavailable; running lexical-only");
            }
        }
    }
    engine
}

pub async fn run_server() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let state = AppState {
        engine: Arc::new(build_engine()),
    };

    let addr =
        std::env::var("CHATSCOPE_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "api server listening");
    axum::serve(listener, app(state)).await?;
    Ok(())
}
