//! Server configuration loading from file and environment variables.

use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use thiserror::Error;
use voxroom_voice::{LiveKitConfig, DEFAULT_TOKEN_TTL_SECONDS};

/// Top-level server configuration.
///
/// Built once at startup and handed to [`crate::AppState::from_config`];
/// request handlers never consult the process environment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server network settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// LiveKit credentials used for generated sessions.
    #[serde(default)]
    pub livekit: LiveKitConfig,

    /// Static front-end settings.
    #[serde(default)]
    pub client: ClientConfig,
}

/// Network configuration for the HTTP server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "voxroom_server=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

/// Location of the built browser client.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Directory holding `index.html` and assets. Skipped if absent.
    #[serde(default = "default_client_dir")]
    pub dir: String,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_client_dir() -> String {
    "client/dist".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            dir: default_client_dir(),
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// `livekit.token_ttl_seconds` is zero or above the 15-minute maximum.
    #[error("livekit.token_ttl_seconds must be between 1 and {max}, got {0}", max = DEFAULT_TOKEN_TTL_SECONDS)]
    InvalidTokenTtl(u64),
}

/// Loads configuration from a TOML file, falling back to defaults, then
/// applies environment overrides from the process environment.
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed, or
/// if the resulting configuration fails [`validate`].
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = p, "config file not found, using defaults");
                Config::default()
            }
            Err(e) => return Err(ConfigError::FileRead(e)),
        },
        None => Config::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate(&config)?;
    Ok(config)
}

/// Rejects settings the issuer cannot honor.
///
/// # Errors
///
/// Returns `ConfigError::InvalidTokenTtl` unless the token TTL is within
/// `1..=DEFAULT_TOKEN_TTL_SECONDS`.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    config
        .livekit
        .token_ttl()
        .map(|_| ())
        .map_err(|_| ConfigError::InvalidTokenTtl(config.livekit.token_ttl_seconds))
}

/// Applies environment overrides read through `lookup`.
///
/// - `VOXROOM_HOST` overrides `server.host`
/// - `VOXROOM_PORT` overrides `server.port`
/// - `VOXROOM_LOG_LEVEL` overrides `logging.level`
/// - `VOXROOM_LOG_JSON` overrides `logging.json` (set to "true" or "1" to enable)
/// - `VOXROOM_CLIENT_DIR` overrides `client.dir`
/// - `VOXROOM_TOKEN_TTL_SECONDS` overrides `livekit.token_ttl_seconds`
/// - `LIVEKIT_URL`, `LIVEKIT_API_KEY`, `LIVEKIT_API_SECRET` (or their
///   `NEXT_PUBLIC_` mirrors) override the `livekit` credentials
///
/// Unparseable numeric or address values are ignored.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(host) = lookup("VOXROOM_HOST") {
        if let Ok(parsed) = host.parse() {
            config.server.host = parsed;
        }
    }
    if let Some(port) = lookup("VOXROOM_PORT") {
        if let Ok(parsed) = port.parse() {
            config.server.port = parsed;
        }
    }
    if let Some(level) = lookup("VOXROOM_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(json) = lookup("VOXROOM_LOG_JSON") {
        config.logging.json = json == "true" || json == "1";
    }
    if let Some(dir) = lookup("VOXROOM_CLIENT_DIR") {
        config.client.dir = dir;
    }
    if let Some(ttl) = lookup("VOXROOM_TOKEN_TTL_SECONDS") {
        if let Ok(parsed) = ttl.parse() {
            config.livekit.token_ttl_seconds = parsed;
        }
    }

    config.livekit.apply_env(&lookup);
}
