use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Username;

/// Access token claims (registered JWT claim names).
///
/// Timestamps are whole Unix seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject: the username the token was issued to.
    pub sub: String,

    /// Issued-at.
    pub iat: i64,

    /// Expiry. The token is valid while `now < exp`.
    pub exp: i64,
}

impl AccessClaims {
    /// Claims for `subject`, issued at `now` (truncated to the second) and
    /// expiring `ttl` later.
    pub fn new(subject: &Username, now: DateTime<Utc>, ttl: Duration) -> Self {
        let iat = now.timestamp();
        Self {
            sub: subject.as_str().to_string(),
            iat,
            exp: iat.saturating_add(ttl.num_seconds()),
        }
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.iat, 0)
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClaimsError {
    #[error("token has expired")]
    Expired,

    #[error("invalid token time window (exp <= iat)")]
    InvalidTimeWindow,

    #[error("token subject is empty")]
    MissingSubject,
}

/// Deterministically validate decoded claims against `now`.
///
/// Signature verification happens before this, in [`crate::Hs256Jwt`].
pub fn validate_claims(claims: &AccessClaims, now: DateTime<Utc>) -> Result<(), ClaimsError> {
    if claims.sub.is_empty() {
        return Err(ClaimsError::MissingSubject);
    }
    if claims.exp <= claims.iat {
        return Err(ClaimsError::InvalidTimeWindow);
    }
    if now.timestamp() >= claims.exp {
        return Err(ClaimsError::Expired);
    }
    Ok(())
}
