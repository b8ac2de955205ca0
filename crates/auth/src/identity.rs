//! Credential identity model.

use serde::{Deserialize, Serialize};

use brewops_core::{DomainError, IdentityId};

// ─────────────────────────────────────────────────────────────────────────────
// Username
// ─────────────────────────────────────────────────────────────────────────────

/// Unique, immutable login name.
///
/// Stored trimmed; 1..=64 characters, no control characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    pub const MAX_CHARS: usize = 64;

    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("username cannot be empty"));
        }
        if trimmed.chars().count() > Self::MAX_CHARS {
            return Err(DomainError::validation(format!(
                "username cannot exceed {} characters",
                Self::MAX_CHARS
            )));
        }
        if trimmed.chars().any(char::is_control) {
            return Err(DomainError::validation(
                "username cannot contain control characters",
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Username {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Password (plaintext)
// ─────────────────────────────────────────────────────────────────────────────

/// Plaintext password as received from a caller.
///
/// Never serialized and never printed: `Debug` is redacted.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Password(String);

impl Password {
    pub const MAX_BYTES: usize = 1024;

    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.0.is_empty() {
            return Err(DomainError::validation("password cannot be empty"));
        }
        if self.0.len() > Self::MAX_BYTES {
            return Err(DomainError::validation(format!(
                "password cannot exceed {} bytes",
                Self::MAX_BYTES
            )));
        }
        Ok(())
    }
}

impl core::fmt::Debug for Password {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Password(***)")
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Password hash
// ─────────────────────────────────────────────────────────────────────────────

/// Salted one-way hash in PHC string format (`$argon2id$...`).
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap a PHC string loaded from storage. Not validated here: a malformed
    /// value simply never verifies.
    pub fn from_phc(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Identity
// ─────────────────────────────────────────────────────────────────────────────

/// A stored identity. Created on registration, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: IdentityId,
    pub username: Username,
    pub password_hash: PasswordHash,
}

/// Identity ready to be inserted (id assigned by the store).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIdentity {
    pub username: Username,
    pub password_hash: PasswordHash,
}
