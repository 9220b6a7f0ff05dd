//! Application error type mapping to HTTP status codes and envelope format.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use verseplay_types::error::{GameError, TranscribeError};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Game engine errors.
    Game(GameError),
    /// Speech recognition errors.
    Transcribe(TranscribeError),
}

impl From<GameError> for AppError {
    fn from(e: GameError) -> Self {
        AppError::Game(e)
    }
}

impl From<TranscribeError> for AppError {
    fn from(e: TranscribeError) -> Self {
        AppError::Transcribe(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Game(GameError::SessionNotFound) => (
                StatusCode::NOT_FOUND,
                "SESSION_NOT_FOUND",
                "Session not found".to_string(),
            ),
            AppError::Game(GameError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Game(GameError::Upstream(msg)) => {
                (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", msg.clone())
            }
            AppError::Game(GameError::Internal(msg)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                msg.clone(),
            ),
            AppError::Transcribe(TranscribeError::RecognitionFailed) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "RECOGNITION_FAILED",
                "Speech could not be recognized; retry or resubmit as text".to_string(),
            ),
            AppError::Transcribe(TranscribeError::Request(msg)) => {
                (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", msg.clone())
            }
        };

        let body = json!({
            "data": null,
            "meta": {
                "request_id": "",
                "timestamp": chrono::Utc::now().to_rfc3339(),
                "response_time_ms": 0
            },
            "errors": [{
                "code": code,
                "message": message,
            }]
        });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_not_found_maps_to_404() {
        let resp = AppError::Game(GameError::SessionNotFound).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn recognition_failure_maps_to_422() {
        let resp = AppError::Transcribe(TranscribeError::RecognitionFailed).into_response();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn validation_maps_to_400() {
        let resp = AppError::Game(GameError::Validation("empty".to_string())).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
