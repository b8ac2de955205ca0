//! Register / login / authenticate protocol.
//!
//! Flow: Hasher → Credential Store → Token Issuer on the way in; Token
//! Validator → Credential Store on every protected request.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use brewops_core::StoreError;

use crate::{
    AccessToken, Argon2Hasher, AuthError, CredentialStore, Hs256Jwt, Identity, JwtIssuer,
    JwtValidator, NewIdentity, Password, PasswordHash, Username,
};

/// Credential service shared by all request handlers.
///
/// Holds no per-request state; every method is safe to call concurrently.
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn CredentialStore>,
    hasher: Arc<Argon2Hasher>,
    issuer: Arc<dyn JwtIssuer>,
    validator: Arc<dyn JwtValidator>,
    access_token_ttl: Duration,
}

impl AuthService {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        hasher: Arc<Argon2Hasher>,
        jwt: Arc<Hs256Jwt>,
        access_token_ttl: Duration,
    ) -> Self {
        Self {
            store,
            hasher,
            issuer: jwt.clone(),
            validator: jwt,
            access_token_ttl,
        }
    }

    pub fn access_token_ttl(&self) -> Duration {
        self.access_token_ttl
    }

    /// Create a new identity and hand back its first access token.
    ///
    /// Not idempotent: a second call with the same username is `Conflict`.
    pub async fn register(
        &self,
        username: &str,
        password: Password,
        now: DateTime<Utc>,
    ) -> Result<AccessToken, AuthError> {
        let username =
            Username::parse(username).map_err(|e| AuthError::validation(e.to_string()))?;
        password
            .validate()
            .map_err(|e| AuthError::validation(e.to_string()))?;

        if self
            .store
            .find_by_username(&username)
            .await
            .map_err(store_failure)?
            .is_some()
        {
            return Err(AuthError::Conflict);
        }

        let password_hash = self.hash(password).await?;

        // The store's uniqueness constraint settles concurrent registrations.
        let identity = self
            .store
            .insert(NewIdentity {
                username,
                password_hash,
            })
            .await
            .map_err(|e| match e {
                StoreError::Duplicate(_) => AuthError::Conflict,
                other => store_failure(other),
            })?;

        tracing::info!(identity_id = %identity.id, username = %identity.username, "identity registered");
        self.issue(&identity.username, now)
    }

    /// Check a username/password pair and issue a fresh access token.
    pub async fn login(
        &self,
        username: &str,
        password: Password,
        now: DateTime<Utc>,
    ) -> Result<AccessToken, AuthError> {
        // Out-of-bounds passwords never match a stored hash; swap in an empty
        // stand-in so the decoy check costs the same whatever the input size.
        let (password, in_bounds) = match password.validate() {
            Ok(()) => (password, true),
            Err(_) => (Password::new(String::new()), false),
        };

        let identity = match Username::parse(username) {
            Ok(username) if in_bounds => self
                .store
                .find_by_username(&username)
                .await
                .map_err(store_failure)?,
            _ => None,
        };

        let stored_hash = identity.as_ref().map(|i| i.password_hash.clone());
        if !self.verify(password, stored_hash).await? {
            return Err(AuthError::Unauthenticated);
        }

        // `verify` only succeeds against a stored hash.
        let identity = identity.ok_or(AuthError::Unauthenticated)?;
        tracing::info!(identity_id = %identity.id, username = %identity.username, "login succeeded");
        self.issue(&identity.username, now)
    }

    /// Resolve a bearer token to a stored identity.
    ///
    /// Signature, structure, expiry and subject failures all collapse into
    /// `Unauthenticated`. Only a store failure surfaces as `Internal`.
    pub async fn authenticate(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Identity, AuthError> {
        let claims = self.validator.validate(token, now).map_err(|e| {
            tracing::debug!(reason = %e, "access token rejected");
            AuthError::Unauthenticated
        })?;

        let username = Username::parse(&claims.sub).map_err(|_| AuthError::Unauthenticated)?;

        match self
            .store
            .find_by_username(&username)
            .await
            .map_err(store_failure)?
        {
            Some(identity) => Ok(identity),
            None => {
                tracing::debug!(username = %username, "token subject no longer resolves");
                Err(AuthError::Unauthenticated)
            }
        }
    }

    fn issue(&self, username: &Username, now: DateTime<Utc>) -> Result<AccessToken, AuthError> {
        self.issuer
            .issue(username, now, self.access_token_ttl)
            .map_err(|e| AuthError::internal(e.to_string()))
    }

    async fn hash(&self, password: Password) -> Result<PasswordHash, AuthError> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AuthError::internal(format!("hashing task failed: {e}")))?
    }

    /// Verify on the blocking pool. With no stored hash, the decoy is checked
    /// instead so both miss paths cost the same.
    async fn verify(
        &self,
        password: Password,
        stored: Option<PasswordHash>,
    ) -> Result<bool, AuthError> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || match stored {
            Some(hash) => hasher.verify(&password, &hash),
            None => hasher.verify_decoy(&password),
        })
        .await
        .map_err(|e| AuthError::internal(format!("verification task failed: {e}")))
    }
}

fn store_failure(err: StoreError) -> AuthError {
    tracing::error!(error = %err, "credential store failure");
    AuthError::internal(err.to_string())
}
