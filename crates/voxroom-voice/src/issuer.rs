use crate::config::{LiveKitConfig, API_KEY_VAR, API_SECRET_VAR, URL_VAR};
use crate::error::VoiceError;
use crate::grant::AccessGrant;
use rand::Rng;
use std::fmt;
use tracing::info;
use voxroom_types::{ConnectionDetails, ConnectionRequest};

/// Exclusive upper bound of the numeric suffix on generated names.
pub const NAME_SUFFIX_RANGE: u32 = 10_000;

const IDENTITY_PREFIX: &str = "voice_assistant_user_";
const ROOM_PREFIX: &str = "voice_assistant_room_";

/// Caller-supplied LiveKit endpoint, key pair, identity and room.
#[derive(Clone, PartialEq, Eq)]
pub struct ExplicitCredentials {
    pub url: String,
    pub api_key: String,
    pub api_secret: String,
    pub identity: String,
    pub room_name: String,
}

impl fmt::Debug for ExplicitCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExplicitCredentials")
            .field("url", &self.url)
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .field("identity", &self.identity)
            .field("room_name", &self.room_name)
            .finish()
    }
}

impl TryFrom<ConnectionRequest> for ExplicitCredentials {
    type Error = VoiceError;

    /// Fails with [`VoiceError::MissingParameters`] if any field is absent or empty.
    fn try_from(req: ConnectionRequest) -> Result<Self, Self::Error> {
        fn required(value: Option<String>) -> Result<String, VoiceError> {
            value
                .filter(|v| !v.is_empty())
                .ok_or(VoiceError::MissingParameters)
        }

        Ok(Self {
            url: required(req.live_kit_url)?,
            api_key: required(req.api_key)?,
            api_secret: required(req.api_secret)?,
            identity: required(req.identity)?,
            room_name: required(req.room_name)?,
        })
    }
}

/// Mints participant tokens for voice sessions.
///
/// Holds only read-only configuration, so one instance can serve concurrent
/// requests behind an `Arc`.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    config: LiveKitConfig,
}

impl TokenIssuer {
    pub fn new(config: LiveKitConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LiveKitConfig {
        &self.config
    }

    /// Issues connection details for one participant in one room.
    ///
    /// With `None`, the server's own credentials are used and a fresh identity
    /// and room name are generated. With `Some`, the caller's endpoint, key
    /// pair, identity and room are used as given. Both paths build the same
    /// [`AccessGrant::voice_session`].
    pub fn issue(
        &self,
        explicit: Option<ExplicitCredentials>,
    ) -> Result<ConnectionDetails, VoiceError> {
        let ttl = self.config.token_ttl()?;
        let creds = match explicit {
            Some(creds) => creds,
            None => self.generated_credentials()?,
        };

        let grant =
            AccessGrant::voice_session(creds.identity.as_str(), creds.room_name.as_str(), ttl);
        let token = grant.sign(&creds.api_key, &creds.api_secret)?;

        info!(
            room = grant.room(),
            identity = grant.identity(),
            ttl_secs = grant.ttl().as_secs(),
            "issued participant token"
        );

        Ok(ConnectionDetails {
            server_url: creds.url,
            room_name: creds.room_name,
            participant_name: creds.identity,
            participant_token: token,
        })
    }

    fn generated_credentials(&self) -> Result<ExplicitCredentials, VoiceError> {
        let present = |value: &str, var: &'static str| {
            if value.trim().is_empty() {
                Err(VoiceError::MissingConfig(var))
            } else {
                Ok(value.to_string())
            }
        };

        let url = present(&self.config.url, URL_VAR)?;
        let api_key = present(&self.config.api_key, API_KEY_VAR)?;
        let api_secret = present(&self.config.api_secret, API_SECRET_VAR)?;

        // Suffixes are not checked for collisions; rooms are single-use by convention.
        let mut rng = rand::thread_rng();
        let identity = format!("{IDENTITY_PREFIX}{}", rng.gen_range(0..NAME_SUFFIX_RANGE));
        let room_name = format!("{ROOM_PREFIX}{}", rng.gen_range(0..NAME_SUFFIX_RANGE));

        Ok(ExplicitCredentials {
            url,
            api_key,
            api_secret,
            identity,
            room_name,
        })
    }
}
