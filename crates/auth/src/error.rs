use thiserror::Error;

/// Outcome taxonomy of the credential protocol.
///
/// `Display` strings are generic on purpose: they are safe to return to
/// callers and never say which credential check failed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Malformed username/password input.
    #[error("{0}")]
    Validation(String),

    /// The username is already registered.
    #[error("username already registered")]
    Conflict,

    /// Bad credentials, or an invalid/expired/tampered token.
    #[error("could not validate credentials")]
    Unauthenticated,

    /// Store or hashing failure. The payload is for logs only.
    #[error("internal error")]
    Internal(String),
}

impl AuthError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
