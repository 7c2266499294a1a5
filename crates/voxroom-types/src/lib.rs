//! Wire types shared across the voxroom crates.
//!
//! These are the JSON shapes exchanged between the browser client and the
//! `/connection-details` endpoint. Field names are camelCase on the wire
//! because the LiveKit front-end components consume them directly.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Message returned when an explicit-mode request is missing a field.
pub const MISSING_PARAMETERS_MESSAGE: &str = "Missing required parameters";

/// Generic message returned for unexpected server-side failures.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Everything a browser client needs to join a LiveKit room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionDetails {
    /// LiveKit server URL the client should connect to.
    pub server_url: String,
    /// Name of the room the token grants access to.
    pub room_name: String,
    /// Participant identity embedded in the token.
    pub participant_name: String,
    /// Signed access token.
    pub participant_token: String,
}

/// Body of `POST /connection-details`.
///
/// Every field is optional at the parse level so that absence can be reported
/// as a validation failure rather than a deserialization failure.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionRequest {
    #[serde(default)]
    pub live_kit_url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub api_secret: Option<String>,
    #[serde(default)]
    pub identity: Option<String>,
    #[serde(default)]
    pub room_name: Option<String>,
}

impl fmt::Debug for ConnectionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionRequest")
            .field("live_kit_url", &self.live_kit_url)
            .field("api_key", &self.api_key)
            .field("api_secret", &self.api_secret.as_ref().map(|_| "[REDACTED]"))
            .field("identity", &self.identity)
            .field("room_name", &self.room_name)
            .finish()
    }
}

/// JSON error body: `{ "error": "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
