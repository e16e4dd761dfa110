use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use crm_client::ClientError;
use crm_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`ClientError`] for failed
/// upstream calls. Implements [`IntoResponse`] to produce consistent JSON
/// error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `crm_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The upstream CRM API failed or answered with something unusable.
    #[error(transparent)]
    Upstream(#[from] ClientError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::Validation(msg) => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "VALIDATION_ERROR",
                    msg.clone(),
                ),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            AppError::Upstream(err) => classify_upstream_error(err),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Every upstream failure is a 502; only the message varies.
fn classify_upstream_error(err: &ClientError) -> (StatusCode, &'static str, String) {
    match err {
        ClientError::Rejected { status, message } => {
            tracing::warn!(status, %message, "Upstream rejected request");
            (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", message.clone())
        }
        ClientError::Transport(e) => {
            tracing::error!(error = %e, "Upstream unreachable");
            (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_UNAVAILABLE",
                "The CRM API is unreachable".to_string(),
            )
        }
        ClientError::Decode(msg) => {
            tracing::error!(error = %msg, "Malformed upstream response");
            (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_ERROR",
                "The CRM API returned an unexpected response".to_string(),
            )
        }
    }
}
