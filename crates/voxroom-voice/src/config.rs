use crate::error::VoiceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Default lifetime of an issued participant token: 15 minutes. Also the
/// longest lifetime the issuer accepts.
pub const DEFAULT_TOKEN_TTL_SECONDS: u64 = 15 * 60;

/// Canonical variable names, used in configuration error messages.
pub const URL_VAR: &str = "LIVEKIT_URL";
pub const API_KEY_VAR: &str = "LIVEKIT_API_KEY";
pub const API_SECRET_VAR: &str = "LIVEKIT_API_SECRET";

/// Prefix used by the browser build for mirrored variables.
const PUBLIC_PREFIX: &str = "NEXT_PUBLIC_";

fn default_token_ttl_seconds() -> u64 {
    DEFAULT_TOKEN_TTL_SECONDS
}

/// Server-side LiveKit credentials.
///
/// Any field may be blank; the issuer reports a blank field as missing
/// configuration at request time rather than refusing to start.
#[derive(Clone, Serialize, Deserialize)]
pub struct LiveKitConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default, skip_serializing)]
    pub api_secret: String,
    /// JWT token TTL in seconds for participant tokens. Default and maximum:
    /// 900 (15 minutes). Zero is rejected.
    #[serde(default = "default_token_ttl_seconds")]
    pub token_ttl_seconds: u64,
}

impl Default for LiveKitConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            api_key: String::new(),
            api_secret: String::new(),
            token_ttl_seconds: default_token_ttl_seconds(),
        }
    }
}

impl fmt::Debug for LiveKitConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiveKitConfig")
            .field("url", &self.url)
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .field("token_ttl_seconds", &self.token_ttl_seconds)
            .finish()
    }
}

impl LiveKitConfig {
    pub fn new(
        url: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            token_ttl_seconds: default_token_ttl_seconds(),
        }
    }

    /// Returns the token TTL, rejecting values outside `1..=DEFAULT_TOKEN_TTL_SECONDS`.
    pub fn token_ttl(&self) -> Result<Duration, VoiceError> {
        if (1..=DEFAULT_TOKEN_TTL_SECONDS).contains(&self.token_ttl_seconds) {
            Ok(Duration::from_secs(self.token_ttl_seconds))
        } else {
            Err(VoiceError::InvalidTokenTtl(self.token_ttl_seconds))
        }
    }

    /// Returns `true` when URL, key and secret are all present.
    pub fn is_complete(&self) -> bool {
        !self.url.trim().is_empty()
            && !self.api_key.trim().is_empty()
            && !self.api_secret.trim().is_empty()
    }

    /// Overlays credentials found through `lookup`.
    ///
    /// Each value is read from its unprefixed variable first and from the
    /// `NEXT_PUBLIC_` mirror second. Blank values count as unset. Fields with
    /// no non-blank source keep their current value.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = resolve_var(&lookup, URL_VAR) {
            self.url = url;
        }
        if let Some(key) = resolve_var(&lookup, API_KEY_VAR) {
            self.api_key = key;
        }
        if let Some(secret) = resolve_var(&lookup, API_SECRET_VAR) {
            self.api_secret = secret;
        }
    }
}

fn resolve_var<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
    non_blank(name).or_else(|| non_blank(&format!("{PUBLIC_PREFIX}{name}")))
}
