use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use std::collections::HashSet;
use std::time::{SystemTime, UNIX_EPOCH};
use voxroom_types::ConnectionRequest;
use voxroom_voice::{ExplicitCredentials, LiveKitConfig, TokenIssuer, VoiceError};

const DEFAULT_URL: &str = "ws://localhost:7880";
const DEFAULT_KEY: &str = "devkey";
const DEFAULT_SECRET: &str = "secret";

#[derive(Deserialize)]
struct Claims {
    sub: String,
    iss: String,
    exp: u64,
    video: VideoClaims,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoClaims {
    room: String,
    #[serde(default)]
    room_join: bool,
    #[serde(default)]
    can_publish: bool,
    #[serde(default)]
    can_publish_data: bool,
    #[serde(default)]
    can_subscribe: bool,
    #[serde(default)]
    can_publish_sources: Vec<String>,
    #[serde(default)]
    room_create: bool,
    #[serde(default)]
    room_admin: bool,
    #[serde(default)]
    room_list: bool,
    #[serde(default)]
    room_record: bool,
}

fn decode_claims(token: &str, secret: &str) -> Claims {
    let validation = Validation::new(Algorithm::HS256);
    let key = DecodingKey::from_secret(secret.as_bytes());
    decode::<Claims>(token, &key, &validation)
        .expect("Failed to decode token")
        .claims
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

fn server_issuer() -> TokenIssuer {
    TokenIssuer::new(LiveKitConfig::new(DEFAULT_URL, DEFAULT_KEY, DEFAULT_SECRET))
}

#[test]
fn test_generated_token_permissions() {
    let details = server_issuer().issue(None).expect("Failed to issue token");
    let claims = decode_claims(&details.participant_token, DEFAULT_SECRET);

    assert_eq!(claims.sub, details.participant_name);
    assert_eq!(claims.iss, DEFAULT_KEY);
    assert_eq!(claims.video.room, details.room_name);
    assert!(claims.video.room_join, "roomJoin should be true");
    assert!(claims.video.can_publish, "canPublish should be true");
    assert!(claims.video.can_publish_data, "canPublishData should be true");
    assert!(claims.video.can_subscribe, "canSubscribe should be true");
    assert_eq!(claims.video.can_publish_sources, vec!["microphone"]);
    assert!(!claims.video.room_create);
    assert!(!claims.video.room_admin);
    assert!(!claims.video.room_list);
    assert!(!claims.video.room_record);
}

#[test]
fn test_token_expires_after_fifteen_minutes() {
    let before = now_secs();
    let details = server_issuer().issue(None).expect("Failed to issue token");
    let claims = decode_claims(&details.participant_token, DEFAULT_SECRET);

    let lifetime = claims.exp.saturating_sub(before);
    assert!(
        (895..=905).contains(&lifetime),
        "expected ~900s lifetime, got {lifetime}"
    );
}

#[test]
fn test_custom_ttl_is_honored() {
    let mut config = LiveKitConfig::new(DEFAULT_URL, DEFAULT_KEY, DEFAULT_SECRET);
    config.token_ttl_seconds = 60;
    let before = now_secs();
    let details = TokenIssuer::new(config).issue(None).unwrap();
    let claims = decode_claims(&details.participant_token, DEFAULT_SECRET);

    let lifetime = claims.exp.saturating_sub(before);
    assert!((55..=65).contains(&lifetime), "got {lifetime}");
}

#[test]
fn test_repeated_issuance_varies_names_and_tokens() {
    let issuer = server_issuer();
    let mut rooms = HashSet::new();
    let mut identities = HashSet::new();
    let mut tokens = HashSet::new();

    for _ in 0..20 {
        let details = issuer.issue(None).unwrap();
        rooms.insert(details.room_name);
        identities.insert(details.participant_name);
        tokens.insert(details.participant_token);
    }

    // 20 draws from 10_000 values: a full collision is effectively impossible.
    assert!(rooms.len() > 1);
    assert!(identities.len() > 1);
    assert!(tokens.len() > 1);
}

#[test]
fn test_explicit_credentials_are_echoed() {
    let request = ConnectionRequest {
        live_kit_url: Some("wss://x".to_string()),
        api_key: Some("k".to_string()),
        api_secret: Some("s".to_string()),
        identity: Some("user".to_string()),
        room_name: Some("test-room".to_string()),
    };
    let creds = ExplicitCredentials::try_from(request).unwrap();

    // Server config is irrelevant in explicit mode, even when empty.
    let issuer = TokenIssuer::new(LiveKitConfig::default());
    let details = issuer.issue(Some(creds)).unwrap();

    assert_eq!(details.room_name, "test-room");
    assert_eq!(details.participant_name, "user");
    assert_eq!(details.server_url, "wss://x");

    let claims = decode_claims(&details.participant_token, "s");
    assert_eq!(claims.sub, "user");
    assert_eq!(claims.iss, "k");
    assert_eq!(claims.video.room, "test-room");
    assert!(claims.video.room_join);
}

#[test]
fn test_explicit_token_not_signed_with_server_secret() {
    let creds = ExplicitCredentials {
        url: "wss://x".to_string(),
        api_key: "k".to_string(),
        api_secret: "caller-secret".to_string(),
        identity: "user".to_string(),
        room_name: "room".to_string(),
    };
    let details = server_issuer().issue(Some(creds)).unwrap();

    let key = DecodingKey::from_secret(DEFAULT_SECRET.as_bytes());
    let result = decode::<Claims>(
        &details.participant_token,
        &key,
        &Validation::new(Algorithm::HS256),
    );
    assert!(result.is_err());
}

#[test]
fn test_missing_config_never_yields_token() {
    for config in [
        LiveKitConfig::new("", DEFAULT_KEY, DEFAULT_SECRET),
        LiveKitConfig::new(DEFAULT_URL, "", DEFAULT_SECRET),
        LiveKitConfig::new(DEFAULT_URL, DEFAULT_KEY, ""),
    ] {
        let result = TokenIssuer::new(config).issue(None);
        assert!(matches!(result, Err(VoiceError::MissingConfig(_))));
    }
}

#[test]
fn test_livekit_config_from_toml() {
    let toml_str = r#"
        url = "ws://localhost:7880"
        api_key = "key"
        api_secret = "secret"
        token_ttl_seconds = 120
    "#;

    let config: LiveKitConfig = toml::from_str(toml_str).expect("parse TOML");
    assert_eq!(config.url, "ws://localhost:7880");
    assert_eq!(config.token_ttl_seconds, 120);
    assert!(config.is_complete());
}

#[test]
fn test_livekit_config_toml_defaults() {
    let config: LiveKitConfig = toml::from_str("").expect("parse TOML");
    assert!(!config.is_complete());
    assert_eq!(config.token_ttl_seconds, 900);
}

#[test]
fn test_livekit_config_serialization_omits_secret() {
    let config = LiveKitConfig::new(DEFAULT_URL, DEFAULT_KEY, DEFAULT_SECRET);
    let json = serde_json::to_value(&config).expect("serialize");
    assert!(json.get("api_secret").is_none());
    assert_eq!(json["api_key"], DEFAULT_KEY);
}
