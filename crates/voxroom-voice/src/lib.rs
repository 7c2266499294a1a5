//! LiveKit token issuance for voxroom.
//!
//! The browser never sees the LiveKit API secret. It asks the server for
//! connection details, and this crate assembles a single-room, short-lived
//! [`AccessGrant`] and signs it with the configured (or caller-supplied) key
//! pair. Media transport, room state and noise suppression all live in the
//! LiveKit SDKs.

pub mod config;
pub mod error;
pub mod grant;
pub mod issuer;

pub use config::{LiveKitConfig, DEFAULT_TOKEN_TTL_SECONDS};
pub use error::VoiceError;
pub use grant::{AccessGrant, Capability, VOICE_SESSION_CAPABILITIES};
pub use issuer::{ExplicitCredentials, TokenIssuer, NAME_SUFFIX_RANGE};
