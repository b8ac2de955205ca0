//! Credential issuance and validation.
//!
//! Password hashing, signed access tokens and the register/login/authenticate
//! protocol. Decoupled from HTTP; storage is reached only through the
//! [`CredentialStore`] trait.

pub mod claims;
pub mod error;
pub mod identity;
pub mod password;
pub mod service;
pub mod store;
pub mod token;

pub use claims::{AccessClaims, ClaimsError, validate_claims};
pub use error::AuthError;
pub use identity::{Identity, NewIdentity, Password, PasswordHash, Username};
pub use password::Argon2Hasher;
pub use service::AuthService;
pub use store::CredentialStore;
pub use token::{
    AccessToken, DEFAULT_ACCESS_TOKEN_TTL_MINUTES, Hs256Jwt, JwtIssuer, JwtValidator, TokenError,
    default_access_token_ttl,
};
