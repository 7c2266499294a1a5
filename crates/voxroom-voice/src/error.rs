use thiserror::Error;

#[derive(Error, Debug)]
pub enum VoiceError {
    #[error("LiveKit API error: {0}")]
    LiveKit(#[from] livekit_api::access_token::AccessTokenError),

    /// A server-side credential is unset or blank.
    #[error("{0} is not defined")]
    MissingConfig(&'static str),

    /// Token TTL is zero or longer than the 15-minute maximum.
    #[error("token TTL of {0}s is outside 1..=900 seconds")]
    InvalidTokenTtl(u64),

    /// A caller-supplied field is absent or empty.
    #[error("Missing required parameters")]
    MissingParameters,
}
