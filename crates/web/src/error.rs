use arena_lobby::LobbyError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::any::Any;
use std::fmt;

/// Errors surfaced to HTTP clients. Every variant renders as `{"error": "..."}`.
#[derive(Debug)]
pub enum ApiError {
    /// Missing, malformed or unknown bearer token.
    Unauthorized,
    /// The player has no cards to battle with.
    EmptyDeck,
    /// The player is already waiting in the lobby.
    AlreadyWaiting,
    /// No opponent arrived within the configured wait timeout.
    WaitTimedOut,
    /// Anything else. The detail is logged, never sent to the client.
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::EmptyDeck => StatusCode::BAD_REQUEST,
            ApiError::AlreadyWaiting => StatusCode::CONFLICT,
            ApiError::WaitTimedOut => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> &'static str {
        match self {
            ApiError::Unauthorized => "Unauthorized",
            ApiError::EmptyDeck => "Deck is empty. Configure a deck before battling.",
            ApiError::AlreadyWaiting => "Already waiting for an opponent.",
            ApiError::WaitTimedOut => "No opponent found in time.",
            ApiError::Internal(_) => "Internal server error",
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Internal(detail) => write!(f, "internal error: {detail}"),
            other => f.write_str(other.public_message()),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<LobbyError> for ApiError {
    fn from(err: LobbyError) -> Self {
        match err {
            LobbyError::AlreadyWaiting { .. } => ApiError::AlreadyWaiting,
            LobbyError::WaitTimedOut { .. } => ApiError::WaitTimedOut,
            LobbyError::Abandoned => ApiError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(detail) = &self {
            tracing::error!(%detail, "request failed");
        }
        let body = Json(json!({ "error": self.public_message() }));
        (self.status(), body).into_response()
    }
}

/// Renders a handler panic as a generic 500.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(text) = panic.downcast_ref::<String>() {
        text.clone()
    } else if let Some(text) = panic.downcast_ref::<&str>() {
        (*text).to_string()
    } else {
        "unknown panic".to_string()
    };
    ApiError::Internal(detail).into_response()
}
