//! Process configuration read from the environment at startup.

use std::net::SocketAddr;

use chrono::Duration;
use thiserror::Error;

use brewops_auth::DEFAULT_ACCESS_TOKEN_TTL_MINUTES;

pub const JWT_SECRET_ENV: &str = "JWT_SECRET";
pub const ACCESS_TOKEN_TTL_ENV: &str = "ACCESS_TOKEN_TTL_MINUTES";
pub const BIND_ADDR_ENV: &str = "BIND_ADDR";
pub const USE_PERSISTENT_STORES_ENV: &str = "USE_PERSISTENT_STORES";
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const RECOMMENDED_SECRET_BYTES: usize = 32;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {var}: {message}")]
    Invalid { var: &'static str, message: String },
}

/// HMAC signing secret. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct JwtSecret(String);

impl JwtSecret {
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl core::fmt::Debug for JwtSecret {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("JwtSecret(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    InMemory,
    Postgres { database_url: String },
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub jwt_secret: JwtSecret,
    pub access_token_ttl: Duration,
    pub bind_addr: SocketAddr,
    pub store: StoreBackend,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup (the process environment
    /// in production, a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup(JWT_SECRET_ENV).ok_or(ConfigError::Missing(JWT_SECRET_ENV))?;
        if secret.is_empty() {
            return Err(ConfigError::Invalid {
                var: JWT_SECRET_ENV,
                message: "must not be empty".to_string(),
            });
        }
        if secret.len() < RECOMMENDED_SECRET_BYTES {
            tracing::warn!(
                bytes = secret.len(),
                recommended = RECOMMENDED_SECRET_BYTES,
                "JWT_SECRET is shorter than recommended"
            );
        }

        let ttl_minutes = match lookup(ACCESS_TOKEN_TTL_ENV) {
            None => DEFAULT_ACCESS_TOKEN_TTL_MINUTES,
            Some(raw) => match raw.trim().parse::<i64>() {
                Ok(m) if m > 0 => m,
                _ => {
                    return Err(ConfigError::Invalid {
                        var: ACCESS_TOKEN_TTL_ENV,
                        message: format!("expected a positive number of minutes, got {raw:?}"),
                    });
                }
            },
        };

        let bind_raw = lookup(BIND_ADDR_ENV).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                var: BIND_ADDR_ENV,
                message: e.to_string(),
            })?;

        let use_persistent = lookup(USE_PERSISTENT_STORES_ENV)
            .unwrap_or_else(|| "false".to_string())
            .trim()
            .parse::<bool>()
            .map_err(|e| ConfigError::Invalid {
                var: USE_PERSISTENT_STORES_ENV,
                message: e.to_string(),
            })?;

        let store = if use_persistent {
            let database_url =
                lookup(DATABASE_URL_ENV).ok_or(ConfigError::Missing(DATABASE_URL_ENV))?;
            StoreBackend::Postgres { database_url }
        } else {
            StoreBackend::InMemory
        };

        Ok(Self {
            jwt_secret: JwtSecret(secret),
            access_token_ttl: Duration::minutes(ttl_minutes),
            bind_addr,
            store,
        })
    }
}
