//! `/connection-details` handlers.

use crate::AppState;
use axum::{
    body::Bytes,
    extract::{Extension, Json},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use thiserror::Error;
use voxroom_types::{
    ConnectionDetails, ConnectionRequest, ErrorBody, INTERNAL_ERROR_MESSAGE,
    MISSING_PARAMETERS_MESSAGE,
};
use voxroom_voice::{ExplicitCredentials, VoiceError};

/// API error type mapping to HTTP status codes with a JSON `{ "error" }` body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid input: {0}")]
    BadRequest(String),
    #[error("internal server error: {0}")]
    InternalServerError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(ErrorBody::new(message))).into_response()
    }
}

impl From<VoiceError> for ApiError {
    fn from(err: VoiceError) -> Self {
        match err {
            VoiceError::MissingParameters => {
                ApiError::BadRequest(MISSING_PARAMETERS_MESSAGE.to_string())
            }
            other => {
                tracing::error!("failed to issue participant token: {}", other);
                ApiError::InternalServerError(INTERNAL_ERROR_MESSAGE.to_string())
            }
        }
    }
}

fn no_store(details: ConnectionDetails) -> Response {
    ([(header::CACHE_CONTROL, "no-store")], Json(details)).into_response()
}

/// Handler for `GET /connection-details`.
///
/// Mints a token for a freshly named participant and room using the server's
/// own LiveKit credentials. Failures are reported as `500 text/plain`.
pub async fn get_connection_details_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Response, (StatusCode, String)> {
    match state.issuer.issue(None) {
        Ok(details) => Ok(no_store(details)),
        Err(e @ VoiceError::MissingConfig(_)) => {
            tracing::error!("{}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
        Err(e) => {
            tracing::error!("failed to issue participant token: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                INTERNAL_ERROR_MESSAGE.to_string(),
            ))
        }
    }
}

/// Handler for `POST /connection-details`.
///
/// The body carries the LiveKit endpoint, key pair, identity and room. The
/// body is parsed regardless of `Content-Type`; anything that does not yield
/// all five non-empty strings is a `400`.
pub async fn post_connection_details_handler(
    Extension(state): Extension<Arc<AppState>>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let request: ConnectionRequest = serde_json::from_slice(&body).map_err(|e| {
        tracing::debug!("rejecting unparseable connection request: {}", e);
        ApiError::BadRequest(MISSING_PARAMETERS_MESSAGE.to_string())
    })?;

    let creds = ExplicitCredentials::try_from(request)?;
    let details = state.issuer.issue(Some(creds))?;

    Ok(no_store(details))
}
