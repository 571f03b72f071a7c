//! Analysis Routes
//!
//! API endpoints for single-message sentiment scoring and full conversation
//! analysis.

use crate::{ApiError, AppState};
use analysis_core::{ChatAnalysis, Diagnostic, Emotion, EmojiAnalysis, Platform, SentimentLabel};
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Request to score a single message.
#[derive(Deserialize, ToSchema)]
pub struct AnalyzeMessageRequest {
    pub message: String,
}

/// Sentiment result for a single message.
#[derive(Serialize, ToSchema)]
pub struct AnalyzeMessageResponse {
    pub sentiment: SentimentLabel,
    pub confidence: f64,
    pub emotions: Option<BTreeMap<Emotion, f64>>,
    pub emoji_analysis: Option<EmojiAnalysis>,
    pub timestamp: DateTime<Utc>,
    pub analysis_id: String,
}

/// Request to analyse a full conversation export.
#[derive(Deserialize, ToSchema)]
pub struct AnalyzeConversationRequest {
    pub content: String,
    #[serde(default)]
    pub format_type: Option<Platform>,
    #[serde(default)]
    pub current_user_name: Option<String>,
}

/// Full conversation analysis plus non-fatal diagnostics.
#[derive(Serialize, ToSchema)]
pub struct AnalyzeConversationResponse {
    #[serde(flatten)]
    pub analysis: ChatAnalysis,
    pub total_messages_analyzed: usize,
    pub diagnostics: Vec<Diagnostic>,
}

/// Create analysis routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/analysis/message", post(analyze_message))
        .route("/api/analysis/conversation", post(analyze_conversation))
}

/// Score one message.
#[utoipa::path(
    post,
    path = "/api/analysis/message",
    request_body = AnalyzeMessageRequest,
    responses(
        (status = 200, description = "Sentiment result", body = AnalyzeMessageResponse),
        (status = 400, description = "Empty message"),
        (status = 413, description = "Message exceeds the length limit"),
    )
)]
pub(crate) async fn analyze_message(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeMessageRequest>,
) -> Result<Json<AnalyzeMessageResponse>, ApiError> {
    let result = state.engine.analyze_message(&request.message).await?;

    Ok(Json(AnalyzeMessageResponse {
        sentiment: result.label,
        confidence: result.confidence,
        emotions: result.emotions,
        emoji_analysis: result.emoji_analysis,
        timestamp: Utc::now(),
        analysis_id: uuid::Uuid::new_v4().to_string(),
    }))
}

/// Analyse a raw conversation export.
#[utoipa::path(
    post,
    path = "/api/analysis/conversation",
    request_body = AnalyzeConversationRequest,
    responses(
        (status = 200, description = "Conversation analysis", body = AnalyzeConversationResponse),
        (status = 400, description = "Input too small"),
        (status = 413, description = "Input exceeds the upload limit"),
        (status = 422, description = "Content not decodable as text"),
    )
)]
pub(crate) async fn analyze_conversation(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeConversationRequest>,
) -> Result<Json<AnalyzeConversationResponse>, ApiError> {
    let report = state
        .engine
        .analyze_conversation(
            &request.content,
            request.format_type,
            request.current_user_name.as_deref(),
            None,
            None,
        )
        .await?;

    let total_messages_analyzed = report.analysis.total_messages;
    Ok(Json(AnalyzeConversationResponse {
        analysis: report.analysis,
        total_messages_analyzed,
        diagnostics: report.diagnostics,
    }))
}
