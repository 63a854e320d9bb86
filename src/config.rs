//! Environment-derived configuration for the proxy.

use secrecy::{ExposeSecret, SecretString};

/// Default upstream base URL.
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
/// Default model requested from the upstream provider.
const DEFAULT_MODEL: &str = "gpt-4o-mini";
/// Default completion token limit.
const DEFAULT_MAX_TOKENS: u32 = 8192;
/// Default listen port.
const DEFAULT_PORT: u16 = 80;

/// API key wrapper that redacts in Debug/Display and zeroizes on drop.
///
/// The inner `SecretString` ensures the key value is:
/// - Zeroized in memory when dropped
/// - Never exposed via Debug or Display
/// - Only accessible via `.expose_secret()` (grep-auditable)
#[derive(Clone)]
pub struct ApiKey(SecretString);

impl ApiKey {
    /// Access the raw key value. Every call site is auditable via `grep expose_secret`.
    pub fn expose_secret(&self) -> &str {
        self.0.expose_secret()
    }

    /// True when no key was supplied (the default is an empty string).
    pub fn is_empty(&self) -> bool {
        self.0.expose_secret().is_empty()
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl std::fmt::Display for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl From<String> for ApiKey {
    fn from(s: String) -> Self {
        ApiKey(SecretString::from(s))
    }
}

impl From<&str> for ApiKey {
    fn from(s: &str) -> Self {
        ApiKey(SecretString::from(s))
    }
}

/// Process-wide configuration snapshot.
///
/// Loaded once at startup from the environment and never mutated afterwards,
/// so it needs no synchronization beyond the `Arc` it lives behind.
#[derive(Debug, Clone)]
pub struct Config {
    /// Upstream provider base URL (e.g., "https://api.openai.com/v1")
    pub base_url: String,
    /// Secret bearer token for the upstream provider
    pub api_key: ApiKey,
    /// Model name forwarded in every outbound payload
    pub model: String,
    /// Completion token limit forwarded in every outbound payload
    pub max_tokens: u32,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Environment variable '{var}' is not a valid {expected}: '{value}'")]
    Invalid {
        var: String,
        expected: &'static str,
        value: String,
    },
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// A missing `API_KEY` is not an error here; it is detected lazily when
    /// the first chat request arrives.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through a custom lookup function.
    ///
    /// The closure-based design makes this testable without touching global
    /// env state.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_tokens = match lookup("MAX_TOKENS") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                var: "MAX_TOKENS".to_string(),
                expected: "integer",
                value: raw,
            })?,
            None => DEFAULT_MAX_TOKENS,
        };

        Ok(Config {
            base_url: lookup("API_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_key: ApiKey::from(lookup("API_KEY").unwrap_or_default()),
            model: lookup("MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            max_tokens,
        })
    }

    /// Whether an API key has been provided.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

/// Read the listen port from the environment (`PORT`, default 80).
///
/// Only consulted at bind time; it is not part of [`Config`].
pub fn port_from_env() -> Result<u16, ConfigError> {
    port_from_lookup(|name| std::env::var(name).ok())
}

fn port_from_lookup<F>(lookup: F) -> Result<u16, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup("PORT") {
        Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
            var: "PORT".to_string(),
            expected: "port number",
            value: raw,
        }),
        None => Ok(DEFAULT_PORT),
    }
}
