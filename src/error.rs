/*
 * Responsibility
 * - Application-wide AppError
 * - IntoResponse (HTTP status + `{"error_message": ...}` body)
 * - Converts repo / auth errors into one shape
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::repos::error::RepoError;
use crate::services::auth::RejectReason;

/// Error messages are cut to this many characters before leaving the process.
pub const MAX_ERROR_MESSAGE_CHARS: usize = 200;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error_message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("unauthorized: {0}")]
    Unauthorized(RejectReason),
    // No principal on the request and no gate reason to report.
    #[error("unauthorized")]
    Unauthenticated,
    #[error("not found: {resource}")]
    NotFound { resource: &'static str },
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }
}

pub fn truncate_message(message: &str) -> String {
    message.chars().take(MAX_ERROR_MESSAGE_CHARS).collect()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            AppError::Unauthorized(reason) => {
                (StatusCode::UNAUTHORIZED, reason.message().to_string())
            }
            AppError::Unauthenticated => {
                (StatusCode::UNAUTHORIZED, "authentication required".to_string())
            }
            AppError::NotFound { resource } => {
                (StatusCode::NOT_FOUND, format!("{resource} not found."))
            }
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal server error".to_string(),
            ),
        };

        let body = ErrorResponse {
            error_message: truncate_message(&message),
        };

        (status, Json(body)).into_response()
    }
}

impl From<RejectReason> for AppError {
    fn from(reason: RejectReason) -> Self {
        AppError::Unauthorized(reason)
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        tracing::error!(error = ?e, "repository failure");
        match e {
            RepoError::Db(_) => AppError::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let res = err.into_response();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn truncate_message_caps_length() {
        let long = "x".repeat(500);
        assert_eq!(truncate_message(&long).chars().count(), 200);
        assert_eq!(truncate_message("short"), "short");
    }

    #[test]
    fn truncate_message_respects_char_boundaries() {
        let long = "é".repeat(300);
        let cut = truncate_message(&long);
        assert_eq!(cut.chars().count(), 200);
        assert!(cut.chars().all(|c| c == 'é'));
    }

    #[tokio::test]
    async fn unauthorized_renders_401_with_reason() {
        let (status, body) = body_json(AppError::Unauthorized(RejectReason::MissingHeader)).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error_message"], "Authorization header is missing");
        assert_eq!(body.as_object().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn reject_reason_converts_to_401() {
        let err: AppError = RejectReason::MalformedHeader.into();
        assert!(matches!(
            err,
            AppError::Unauthorized(RejectReason::MalformedHeader)
        ));

        let (status, body) = body_json(err).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            body["error_message"],
            "Authorization header must be 'Bearer <token>'"
        );
    }

    #[tokio::test]
    async fn unauthenticated_is_a_neutral_401() {
        let (status, body) = body_json(AppError::Unauthenticated).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error_message"], "authentication required");
    }

    #[tokio::test]
    async fn long_messages_are_truncated() {
        let (status, body) = body_json(AppError::BadRequest("y".repeat(1000))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error_message"].as_str().unwrap().len(), 200);
    }

    #[tokio::test]
    async fn not_found_and_internal() {
        let (status, body) = body_json(AppError::not_found("user")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error_message"], "user not found.");

        let (status, _) = body_json(AppError::from(RepoError::Db(sqlx::Error::PoolClosed))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
