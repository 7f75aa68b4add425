//! Service configuration types.
//!
//! `ServiceConfig` represents the top-level `danmaku.toml` that controls
//! the listen address, the token secret, and the posting rate limit.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the danmaku service.
///
/// Loaded from `{data_dir}/danmaku.toml`. All fields have defaults so an
/// absent or partial file still yields a runnable configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Listen host for the HTTP server.
    #[serde(default = "default_host")]
    pub host: String,

    /// Listen port for the HTTP server.
    #[serde(default = "default_port")]
    pub port: u16,

    /// HS256 secret used to validate (and mint) bearer tokens.
    ///
    /// The built-in default exists so a fresh checkout runs; any real
    /// deployment must override it.
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,

    /// Posting rate limit applied per submitter key.
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_jwt_secret() -> String {
    "danmaku-dev-secret".to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            jwt_secret: default_jwt_secret(),
            rate_limit: RateLimitConfig::default(),
        }
    }
}

/// Per-submitter posting window.
///
/// The limiter key is `key_prefix + <submitter ip>`, so deployments behind
/// shared NAT can widen or re-scope the key by changing the prefix alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Seconds a submitter key stays live after a post.
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,

    /// Prefix prepended to the submitter ip to form the limiter key.
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

fn default_window_secs() -> u64 {
    5
}

fn default_key_prefix() -> String {
    "danmaku:frequent:ip:".to_string()
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_secs: default_window_secs(),
            key_prefix: default_key_prefix(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_config_default_values() {
        let config = ServiceConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.rate_limit.window_secs, 5);
        assert_eq!(config.rate_limit.key_prefix, "danmaku:frequent:ip:");
    }

    #[test]
    fn test_service_config_deserialize_empty_uses_defaults() {
        let config: ServiceConfig = toml::from_str("").unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rate_limit.window_secs, 5);
    }

    #[test]
    fn test_service_config_deserialize_partial_override() {
        let toml_str = r#"
port = 9000
jwt_secret = "s3cret"

[rate_limit]
window_secs = 10
"#;
        let config: ServiceConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.jwt_secret, "s3cret");
        assert_eq!(config.rate_limit.window_secs, 10);
        // Unset nested field keeps its default
        assert_eq!(config.rate_limit.key_prefix, "danmaku:frequent:ip:");
    }

    #[test]
    fn test_service_config_serde_roundtrip() {
        let config = ServiceConfig {
            host: "0.0.0.0".to_string(),
            port: 8443,
            jwt_secret: "abc".to_string(),
            rate_limit: RateLimitConfig {
                window_secs: 30,
                key_prefix: "dm:ip:".to_string(),
            },
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: ServiceConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.host, "0.0.0.0");
        assert_eq!(parsed.rate_limit.key_prefix, "dm:ip:");
    }
}
