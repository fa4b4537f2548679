use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use validator::ValidationErrors;

use crate::shared::constants::{LOGIN_PATH, UNAUTHORIZED_PATH};
use crate::shared::types::ApiResponse;
use crate::shared::validation::field_messages;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Form-level validation failure, one message per offending field
    #[error("Invalid input: {}", .0.join(", "))]
    InvalidInput(Vec<String>),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    /// No usable session; the client is sent back to the login page
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Logged in but the role is not allowed; the client is sent to the unauthorized page
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::InvalidInput(field_messages(&errors))
    }
}

impl AppError {
    /// Replace the detail of a backend failure with a user-facing message.
    /// Other variants pass through untouched.
    pub fn or_external(self, message: &str) -> Self {
        match self {
            AppError::ExternalServiceError(detail) => {
                tracing::error!("{}: {}", message, detail);
                AppError::ExternalServiceError(message.to_string())
            }
            other => other,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, errors, redirect) = match self {
            AppError::NotFound(ref msg) => (StatusCode::NOT_FOUND, msg.clone(), None, None),
            AppError::Validation(ref msg) => (
                StatusCode::BAD_REQUEST,
                msg.clone(),
                Some(vec![msg.clone()]),
                None,
            ),
            AppError::InvalidInput(ref messages) => (
                StatusCode::BAD_REQUEST,
                "Data yang dikirim tidak valid".to_string(),
                Some(messages.clone()),
                None,
            ),
            AppError::BadRequest(ref msg) => (StatusCode::BAD_REQUEST, msg.clone(), None, None),
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                    None,
                )
            }
            AppError::Unauthorized(ref msg) => (
                StatusCode::UNAUTHORIZED,
                msg.clone(),
                None,
                Some(LOGIN_PATH),
            ),
            AppError::Forbidden(ref msg) => (
                StatusCode::FORBIDDEN,
                msg.clone(),
                None,
                Some(UNAUTHORIZED_PATH),
            ),
            AppError::ExternalServiceError(ref msg) => {
                tracing::error!("External service error: {}", msg);
                (StatusCode::BAD_GATEWAY, msg.clone(), None, None)
            }
        };

        let mut body = ApiResponse::<()>::error(Some(message), errors);
        body.redirect = redirect.map(String::from);

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_of(error: AppError) -> (StatusCode, ApiResponse<()>) {
        let response = error.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_every_variant_maps_to_a_status() {
        let cases = [
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (AppError::InvalidInput(vec!["x".into()]), StatusCode::BAD_REQUEST),
            (AppError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (AppError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::Unauthorized("x".into()), StatusCode::UNAUTHORIZED),
            (AppError::Forbidden("x".into()), StatusCode::FORBIDDEN),
            (AppError::ExternalServiceError("x".into()), StatusCode::BAD_GATEWAY),
        ];

        for (error, expected) in cases {
            let (status, body) = body_of(error).await;
            assert_eq!(status, expected);
            assert!(!body.success);
        }
    }

    #[tokio::test]
    async fn test_session_failures_carry_redirects() {
        let (_, body) = body_of(AppError::Unauthorized("Sesi berakhir".into())).await;
        assert_eq!(body.redirect.as_deref(), Some(LOGIN_PATH));

        let (_, body) = body_of(AppError::Forbidden("Akses ditolak".into())).await;
        assert_eq!(body.redirect.as_deref(), Some(UNAUTHORIZED_PATH));

        let (_, body) = body_of(AppError::NotFound("x".into())).await;
        assert!(body.redirect.is_none());
    }

    #[tokio::test]
    async fn test_internal_detail_is_hidden() {
        let (_, body) = body_of(AppError::Internal("db password leaked".into())).await;
        assert_eq!(body.message.as_deref(), Some("Internal server error"));
    }

    #[test]
    fn test_or_external_replaces_only_backend_detail() {
        let swapped = AppError::ExternalServiceError("500 from backend".into())
            .or_external("Gagal memuat data");
        assert!(matches!(swapped, AppError::ExternalServiceError(ref m) if m == "Gagal memuat data"));

        let kept = AppError::NotFound("Laporan tidak ditemukan".into()).or_external("Gagal");
        assert!(matches!(kept, AppError::NotFound(ref m) if m == "Laporan tidak ditemukan"));
    }
}
