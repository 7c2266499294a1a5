//! Access grants: what a participant token allows.

use crate::error::VoiceError;
use livekit_api::access_token::{AccessToken, VideoGrants};
use std::fmt;
use std::time::Duration;

/// Track source a voice-session participant may publish.
const MICROPHONE_SOURCE: &str = "microphone";

/// Room capabilities that can appear in a grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Join the target room.
    Join,
    /// Publish a microphone track.
    PublishAudio,
    /// Publish data messages.
    PublishData,
    /// Subscribe to other participants' tracks.
    Subscribe,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Join => write!(f, "join"),
            Capability::PublishAudio => write!(f, "publish_audio"),
            Capability::PublishData => write!(f, "publish_data"),
            Capability::Subscribe => write!(f, "subscribe"),
        }
    }
}

/// The capability set handed to every voice-session participant.
pub const VOICE_SESSION_CAPABILITIES: [Capability; 4] = [
    Capability::Join,
    Capability::PublishAudio,
    Capability::PublishData,
    Capability::Subscribe,
];

/// One identity, one room, a fixed capability set and a TTL.
///
/// Grants are built per request and consumed by [`AccessGrant::sign`]; they
/// are never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessGrant {
    identity: String,
    room: String,
    capabilities: Vec<Capability>,
    ttl: Duration,
}

impl AccessGrant {
    /// Grant for a browser participant talking to the voice agent.
    pub fn voice_session(
        identity: impl Into<String>,
        room: impl Into<String>,
        ttl: Duration,
    ) -> Self {
        Self {
            identity: identity.into(),
            room: room.into(),
            capabilities: VOICE_SESSION_CAPABILITIES.to_vec(),
            ttl,
        }
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn room(&self) -> &str {
        &self.room
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn capabilities(&self) -> &[Capability] {
        &self.capabilities
    }

    pub fn allows(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    fn video_grants(&self) -> VideoGrants {
        let can_publish = self.allows(Capability::PublishAudio);
        VideoGrants {
            room_join: self.allows(Capability::Join),
            room: self.room.clone(),
            can_publish,
            can_publish_sources: if can_publish {
                vec![MICROPHONE_SOURCE.to_string()]
            } else {
                Vec::new()
            },
            can_publish_data: self.allows(Capability::PublishData),
            can_subscribe: self.allows(Capability::Subscribe),
            ..Default::default()
        }
    }

    /// Signs the grant with a LiveKit API key pair, returning the JWT.
    pub fn sign(&self, api_key: &str, api_secret: &str) -> Result<String, VoiceError> {
        let token = AccessToken::with_api_key(api_key, api_secret)
            .with_identity(&self.identity)
            .with_name(&self.identity)
            .with_grants(self.video_grants())
            .with_ttl(self.ttl);

        token.to_jwt().map_err(VoiceError::LiveKit)
    }
}
