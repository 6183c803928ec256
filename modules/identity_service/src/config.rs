//! Configuration for identity service module

use serde::Deserialize;
use std::time::Duration;

/// Identity service configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Lifetime of a login session
    #[serde(default = "default_session_ttl", with = "humantime_serde")]
    pub session_ttl: Duration,

    /// Base URL of the external auth backend; local-only login when unset
    #[serde(default)]
    pub backend_url: Option<String>,

    /// Request timeout for the external auth backend
    #[serde(default = "default_backend_timeout", with = "humantime_serde")]
    pub backend_timeout: Duration,

    /// Mark the session cookie `Secure`
    #[serde(default)]
    pub secure_cookies: bool,

    /// How often expired sessions are purged
    #[serde(default = "default_purge_interval", with = "humantime_serde")]
    pub session_purge_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            session_ttl: default_session_ttl(),
            backend_url: None,
            backend_timeout: default_backend_timeout(),
            secure_cookies: false,
            session_purge_interval: default_purge_interval(),
        }
    }
}

fn default_session_ttl() -> Duration {
    Duration::from_secs(7 * 24 * 60 * 60)
}

fn default_backend_timeout() -> Duration {
    Duration::from_secs(5)
}

fn default_purge_interval() -> Duration {
    Duration::from_secs(60 * 60)
}
