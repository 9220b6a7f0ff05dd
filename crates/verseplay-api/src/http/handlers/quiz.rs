//! Nine-grid quiz HTTP handlers.
//!
//! Endpoints:
//! - POST /api/v1/quiz                    - Create a session
//! - POST /api/v1/quiz/{id}/submit        - Answer a question
//! - POST /api/v1/quiz/{id}/submit-audio  - Answer by voice (raw WAV bytes)

use std::time::Instant;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use serde::Deserialize;
use uuid::Uuid;

use verseplay_core::transcriber::Transcriber;
use verseplay_types::report::{QuizCreated, QuizReport};

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Request body for a quiz answer. `question_index` repositions the
/// session before judging; absent means the current question.
#[derive(Debug, Deserialize)]
pub struct SubmitQuizRequest {
    pub answer: String,
    #[serde(default)]
    pub question_index: Option<usize>,
}

/// POST /api/v1/quiz - Create a quiz session.
pub async fn create(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<QuizCreated>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let created = state.quiz.create().await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(created, request_id, elapsed)))
}

/// POST /api/v1/quiz/{id}/submit - Answer a question.
pub async fn submit(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(body): Json<SubmitQuizRequest>,
) -> Result<Json<ApiResponse<QuizReport>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let report = state
        .quiz
        .submit(&session_id, body.question_index, &body.answer)
        .await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(report, request_id, elapsed)))
}

/// POST /api/v1/quiz/{id}/submit-audio - Answer the current question by voice.
pub async fn submit_audio(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    audio: Bytes,
) -> Result<Json<ApiResponse<QuizReport>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let text = state.transcriber.transcribe(&audio).await?;
    tracing::info!(%session_id, recognized = %text, "audio answer transcribed");

    let mut report = state.quiz.submit(&session_id, None, &text).await?;
    report.recognized_text = Some(text);

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(report, request_id, elapsed)))
}
