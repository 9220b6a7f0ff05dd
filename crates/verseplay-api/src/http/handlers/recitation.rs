//! Recitation HTTP handlers.
//!
//! Endpoints:
//! - POST /api/v1/recitation                    - Create a session
//! - POST /api/v1/recitation/{id}/submit        - Score a typed recitation
//! - POST /api/v1/recitation/{id}/submit-audio  - Score a spoken recitation (raw WAV bytes)

use std::time::Instant;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use serde::Deserialize;
use uuid::Uuid;

use verseplay_core::transcriber::Transcriber;
use verseplay_types::report::{RecitationCreated, RecitationReport};

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Request body for a recitation. `poem_index` repositions the session
/// before scoring; absent means the current poem.
#[derive(Debug, Deserialize)]
pub struct SubmitRecitationRequest {
    pub text: String,
    #[serde(default)]
    pub poem_index: Option<usize>,
}

/// POST /api/v1/recitation - Create a recitation session.
pub async fn create(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<RecitationCreated>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let created = state.recitation.create().await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(created, request_id, elapsed)))
}

/// POST /api/v1/recitation/{id}/submit - Score a typed recitation.
pub async fn submit(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(body): Json<SubmitRecitationRequest>,
) -> Result<Json<ApiResponse<RecitationReport>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let report = state
        .recitation
        .submit(&session_id, body.poem_index, &body.text)
        .await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(report, request_id, elapsed)))
}

/// POST /api/v1/recitation/{id}/submit-audio - Score a spoken recitation.
pub async fn submit_audio(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    audio: Bytes,
) -> Result<Json<ApiResponse<RecitationReport>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let text = state.transcriber.transcribe(&audio).await?;
    tracing::info!(%session_id, recognized = %text, "spoken recitation transcribed");

    let mut report = state.recitation.submit(&session_id, None, &text).await?;
    report.recognized_text = Some(text);

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(report, request_id, elapsed)))
}
