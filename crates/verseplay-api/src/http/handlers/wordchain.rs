//! Word-chain game HTTP handlers.
//!
//! Endpoints:
//! - POST /api/v1/wordchain                    - Create a session
//! - POST /api/v1/wordchain/{id}/submit        - Submit a line of verse
//! - POST /api/v1/wordchain/{id}/submit-audio  - Submit spoken verse (raw WAV bytes)

use std::time::Instant;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use serde::Deserialize;
use uuid::Uuid;

use verseplay_core::transcriber::Transcriber;
use verseplay_types::report::{WordChainCreated, WordChainReport};

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Request body for session creation. The whole body is optional; an
/// absent or empty body uses the default keyword pool.
#[derive(Debug, Default, Deserialize)]
pub struct CreateWordChainRequest {
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
}

/// Request body for a text submission.
#[derive(Debug, Deserialize)]
pub struct SubmitWordChainRequest {
    pub text: String,
}

/// POST /api/v1/wordchain - Create a word-chain session.
pub async fn create(
    State(state): State<AppState>,
    body: Option<Json<CreateWordChainRequest>>,
) -> Result<Json<ApiResponse<WordChainCreated>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let keywords = body.and_then(|Json(b)| b.keywords);
    let created = state.wordchain.create(keywords)?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(created, request_id, elapsed)))
}

/// POST /api/v1/wordchain/{id}/submit - Submit a line of verse.
pub async fn submit(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(body): Json<SubmitWordChainRequest>,
) -> Result<Json<ApiResponse<WordChainReport>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let report = state.wordchain.submit(&session_id, &body.text).await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(report, request_id, elapsed)))
}

/// POST /api/v1/wordchain/{id}/submit-audio - Transcribe then submit.
///
/// Recognition failure is surfaced as 422 so the caller can resubmit
/// the line as text; it is never silently treated as a wrong answer.
pub async fn submit_audio(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    audio: Bytes,
) -> Result<Json<ApiResponse<WordChainReport>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let text = state.transcriber.transcribe(&audio).await?;
    tracing::info!(%session_id, recognized = %text, "audio submission transcribed");

    let mut report = state.wordchain.submit(&session_id, &text).await?;
    report.recognized_text = Some(text);

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(report, request_id, elapsed)))
}
