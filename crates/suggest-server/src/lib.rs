pub mod config;

use std::sync::Arc;

use axum::{
    extract::{Extension, Json},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tracing::info;

use suggest::SuggestionOrchestrator;

pub use config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<SuggestionOrchestrator>,
    pub min_description_length: usize,
}

impl AppState {
    pub fn new(orchestrator: SuggestionOrchestrator, min_description_length: usize) -> Self {
        Self { orchestrator: Arc::new(orchestrator), min_description_length }
    }
}

#[derive(Debug, Deserialize)]
pub struct SuggestFieldsRequest {
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct SummaryRequest {
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/ai/suggest-fields", post(suggest_fields))
        .route("/api/ai/summary", post(generate_summary))
        .route("/api/ai/health", get(health_check))
        .layer(CorsLayer::permissive())
        .layer(Extension(state))
}

async fn suggest_fields(
    Extension(state): Extension<AppState>,
    Json(req): Json<SuggestFieldsRequest>,
) -> Response {
    let min = state.min_description_length;
    if req.description.chars().count() < min {
        return (StatusCode::BAD_REQUEST, Json(json!({
            "message": format!("Description must be at least {} characters for AI suggestions", min)
        })))
            .into_response();
    }

    let suggestion = state.orchestrator.suggest_fields(&req.description).await;
    info!(
        confidence = %suggestion.confidence,
        processing_time_ms = suggestion.processing_time_ms,
        "served field suggestion"
    );
    (StatusCode::OK, Json(suggestion)).into_response()
}

async fn generate_summary(
    Extension(state): Extension<AppState>,
    Json(req): Json<SummaryRequest>,
) -> impl IntoResponse {
    let summary = state.orchestrator.generate_summary(&req.content).await;
    Json(SummaryResponse { summary })
}

async fn health_check(Extension(state): Extension<AppState>) -> impl IntoResponse {
    Json(json!({
        "provider": state.orchestrator.provider_name(),
        "status": "online",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
