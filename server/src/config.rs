//! Server configuration parsed from environment variables.
//!
//! DESIGN
//! ======
//! Parsing goes through [`ServerConfig::from_lookup`], which takes a plain
//! key lookup function. Startup feeds it the process environment (after
//! `.env` is loaded); tests feed it a map and never touch process env.

use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_SQLITE_PATH: &str = "polylaunch.sqlite";
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_SECRET: &str = "dev-secret-change-me-please-change-me-32";
pub const DEFAULT_SESSION_TTL_SECS: i64 = 60 * 60 * 24 * 7;
pub const DEFAULT_SESSION_SWEEP_SECS: u64 = 60 * 60;
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

/// Minimum secret length accepted for cookie key derivation.
pub const MIN_SECRET_LEN: usize = 32;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
    #[error("AUTH_URL must start with http:// or https://, got {0:?}")]
    BaseUrl(String),
    #[error("AUTH_SECRET must be at least {MIN_SECRET_LEN} bytes, got {0}")]
    SecretTooShort(usize),
}

/// Client credentials for the Google identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleCredentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Authentication configuration, immutable after startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// Location of the embedded SQLite database file.
    pub sqlite_path: PathBuf,
    /// Public origin of the site, without trailing slash.
    pub base_url: String,
    /// Secret the signed-cookie key is derived from.
    pub secret: String,
    /// `None` disables Google sign-in; everything else keeps working.
    pub google: Option<GoogleCredentials>,
    pub session_ttl_secs: i64,
    pub cookie_secure: bool,
}

impl AuthConfig {
    /// OAuth redirect URI registered with a provider.
    #[must_use]
    pub fn callback_url(&self, provider: &str) -> String {
        format!("{}/api/auth/callback/{provider}", self.base_url)
    }

    /// Whether the secret is the built-in development value.
    #[must_use]
    pub fn uses_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub db_max_connections: u32,
    pub session_sweep_secs: u64,
    pub auth: AuthConfig,
}

impl ServerConfig {
    /// Load `.env` (if present) and parse the process environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any present value is malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Parse configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any present value is malformed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let port = parse_or("PORT", get("PORT"), DEFAULT_PORT)?;
        let db_max_connections = parse_or("DB_MAX_CONNECTIONS", get("DB_MAX_CONNECTIONS"), DEFAULT_DB_MAX_CONNECTIONS)?;
        let session_sweep_secs = parse_or("SESSION_SWEEP_SECS", get("SESSION_SWEEP_SECS"), DEFAULT_SESSION_SWEEP_SECS)?;
        let session_ttl_secs = parse_or("SESSION_TTL_SECS", get("SESSION_TTL_SECS"), DEFAULT_SESSION_TTL_SECS)?;
        if session_ttl_secs <= 0 {
            return Err(ConfigError::Invalid { key: "SESSION_TTL_SECS", value: session_ttl_secs.to_string() });
        }

        // Short names win; the BETTER_AUTH_* spellings are honored as aliases.
        let get_auth = |key: &str| get(key).or_else(|| get(&format!("BETTER_{key}")));

        let sqlite_path = get_auth("AUTH_SQLITE_PATH").map_or_else(|| PathBuf::from(DEFAULT_SQLITE_PATH), PathBuf::from);

        let base_url = normalize_base_url(&get_auth("AUTH_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()))?;

        let secret = get_auth("AUTH_SECRET").unwrap_or_else(|| DEFAULT_SECRET.to_owned());
        if secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::SecretTooShort(secret.len()));
        }

        let google = match (get("GOOGLE_CLIENT_ID"), get("GOOGLE_CLIENT_SECRET")) {
            (Some(client_id), Some(client_secret)) => Some(GoogleCredentials { client_id, client_secret }),
            _ => None,
        };

        let cookie_secure = match get("COOKIE_SECURE") {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::Invalid { key: "COOKIE_SECURE", value: raw })?,
            None => base_url.starts_with("https://"),
        };

        Ok(Self {
            port,
            db_max_connections,
            session_sweep_secs,
            auth: AuthConfig { sqlite_path, base_url, secret, google, session_ttl_secs, cookie_secure },
        })
    }
}

fn parse_or<T: std::str::FromStr>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value.parse::<T>().map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    if !(raw.starts_with("http://") || raw.starts_with("https://")) {
        return Err(ConfigError::BaseUrl(raw.to_owned()));
    }
    Ok(raw.trim_end_matches('/').to_owned())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
