//! HTTP translation of domain errors
//!
//! Domain-rule violations surface with their message and the status code
//! from the error taxonomy; anything else is a 500 with the detail kept
//! out of the response body.

use crate::error::LobbyError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

/// Handler result carrying an error that knows its status code
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Wrapper so `?` works on anything anyhow can hold while the response
/// mapping stays in one place
pub struct ApiError(anyhow::Error);

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        ApiError(err.into())
    }
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self.0.downcast_ref::<LobbyError>() {
            Some(LobbyError::InvalidRequest { .. }) => StatusCode::BAD_REQUEST,
            Some(
                LobbyError::LobbyNotFound { .. }
                | LobbyError::PlayerNotFound { .. }
                | LobbyError::ClubNotFound { .. },
            ) => StatusCode::NOT_FOUND,
            Some(
                LobbyError::LobbyFull { .. }
                | LobbyError::PlayerAlreadyPresent { .. }
                | LobbyError::PlayerNotInLobby { .. },
            ) => StatusCode::CONFLICT,
            Some(LobbyError::ConfigurationError { .. } | LobbyError::InternalError { .. })
            | None => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("Request failed: {:#}", self.0);
            return (status, Json(json!({ "error": "Internal server error" }))).into_response();
        }

        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

/// Shorthand for a 400 with field-level detail
pub fn bad_request(reason: impl Into<String>) -> ApiError {
    ApiError(
        LobbyError::InvalidRequest {
            reason: reason.into(),
        }
        .into(),
    )
}
