use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use panel_core::AgentOutput;
use thiserror::Error;

/// Failures surfaced by the chat endpoints. Clients only ever see the
/// generic "Server error" payload; the detail goes to the log.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("unreadable request body: {0}")]
    UnreadableBody(#[from] BytesRejection),
    #[error("malformed request body: {0}")]
    MalformedRequest(#[from] serde_json::Error),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::UnreadableBody(error) => tracing::warn!(error = %error, "rejected chat request"),
            Self::MalformedRequest(error) => tracing::warn!(error = %error, "rejected chat request"),
            Self::Internal(error) => tracing::error!(error = ?error, "chat request failed"),
        }

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(AgentOutput::server_error()),
        )
            .into_response()
    }
}
