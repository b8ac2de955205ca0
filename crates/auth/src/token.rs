//! Signed access tokens (JWT, HS256).

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind};
use serde::Serialize;
use thiserror::Error;

use crate::{AccessClaims, ClaimsError, Username, validate_claims};

/// The single default access-token lifetime. Configuration may override it.
pub const DEFAULT_ACCESS_TOKEN_TTL_MINUTES: i64 = 30;

pub fn default_access_token_ttl() -> Duration {
    Duration::minutes(DEFAULT_ACCESS_TOKEN_TTL_MINUTES)
}

/// Compact-serialized bearer token. `Debug` is redacted.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl core::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("AccessToken(..)")
    }
}

/// Why a token was refused. Internal detail: callers only ever see a
/// uniform "unauthenticated" outcome.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("malformed token")]
    Malformed,

    #[error("signature verification failed")]
    BadSignature,

    #[error(transparent)]
    Claims(#[from] ClaimsError),

    #[error("token encoding failed: {0}")]
    Encode(String),
}

pub trait JwtIssuer: Send + Sync {
    fn issue(
        &self,
        subject: &Username,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<AccessToken, TokenError>;
}

pub trait JwtValidator: Send + Sync {
    /// Verify signature and structure, then check the claims against `now`.
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<AccessClaims, TokenError>;
}

/// HS256 issuer/validator around one process-wide secret.
pub struct Hs256Jwt {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl Hs256Jwt {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        let secret = secret.as_ref();

        // Only HS256 is accepted, whatever the token header claims.
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked by `validate_claims` against the caller's clock.
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["sub", "exp"]);

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }
}

impl core::fmt::Debug for Hs256Jwt {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Hs256Jwt").finish_non_exhaustive()
    }
}

impl JwtIssuer for Hs256Jwt {
    fn issue(
        &self,
        subject: &Username,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<AccessToken, TokenError> {
        let claims = AccessClaims::new(subject, now, ttl);
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map(AccessToken)
            .map_err(|e| TokenError::Encode(e.to_string()))
    }
}

impl JwtValidator for Hs256Jwt {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<AccessClaims, TokenError> {
        let data = jsonwebtoken::decode::<AccessClaims>(token, &self.decoding, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    TokenError::BadSignature
                }
                _ => TokenError::Malformed,
            })?;

        validate_claims(&data.claims, now)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
    use proptest::prelude::*;

    const SECRET: &str = "test-secret-with-enough-entropy-000";

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    fn alice() -> Username {
        Username::parse("alice").unwrap()
    }

    fn flip_signature_bit(token: &str, bit: usize) -> String {
        let (signing_input, sig) = token.rsplit_once('.').unwrap();
        let mut bytes = URL_SAFE_NO_PAD.decode(sig).unwrap();
        let bit = bit % (bytes.len() * 8);
        bytes[bit / 8] ^= 1 << (bit % 8);
        format!("{signing_input}.{}", URL_SAFE_NO_PAD.encode(bytes))
    }

    #[test]
    fn issued_token_validates_and_carries_subject() {
        let jwt = Hs256Jwt::new(SECRET);
        let token = jwt
            .issue(&alice(), at(1_000), default_access_token_ttl())
            .unwrap();

        let claims = jwt.validate(token.as_str(), at(1_001)).unwrap();
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.exp, 1_000 + 30 * 60);
    }

    #[test]
    fn token_from_another_secret_is_rejected() {
        let token = Hs256Jwt::new("other-secret")
            .issue(&alice(), at(1_000), Duration::minutes(5))
            .unwrap();
        let err = Hs256Jwt::new(SECRET)
            .validate(token.as_str(), at(1_001))
            .unwrap_err();
        assert_eq!(err, TokenError::BadSignature);
    }

    #[test]
    fn expired_token_is_rejected() {
        let jwt = Hs256Jwt::new(SECRET);
        let token = jwt.issue(&alice(), at(1_000), Duration::seconds(10)).unwrap();
        assert_eq!(
            jwt.validate(token.as_str(), at(1_010)).unwrap_err(),
            TokenError::Claims(ClaimsError::Expired)
        );
    }

    #[test]
    fn garbage_is_malformed() {
        let jwt = Hs256Jwt::new(SECRET);
        assert_eq!(jwt.validate("", at(0)).unwrap_err(), TokenError::Malformed);
        assert_eq!(
            jwt.validate("not.a.jwt", at(0)).unwrap_err(),
            TokenError::Malformed
        );
    }

    #[test]
    fn unsigned_alg_none_token_is_rejected() {
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"none","typ":"JWT"}"#);
        let claims = URL_SAFE_NO_PAD.encode(r#"{"sub":"alice","iat":1000,"exp":99999999999}"#);
        let forged = format!("{header}.{claims}.");
        assert!(Hs256Jwt::new(SECRET).validate(&forged, at(1_001)).is_err());
    }

    #[test]
    fn other_hmac_algorithm_is_rejected() {
        let claims = AccessClaims::new(&alice(), at(1_000), Duration::minutes(5));
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        assert_eq!(
            Hs256Jwt::new(SECRET).validate(&token, at(1_001)).unwrap_err(),
            TokenError::BadSignature
        );
    }

    #[test]
    fn token_debug_is_redacted() {
        let token = Hs256Jwt::new(SECRET)
            .issue(&alice(), at(1_000), Duration::minutes(5))
            .unwrap();
        assert_eq!(format!("{token:?}"), "AccessToken(..)");
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            ..ProptestConfig::default()
        })]

        /// Property: issued at `t` with ttl `T`, the token is valid at every
        /// instant in `[t, t+T)` and invalid from `t+T` on.
        #[test]
        fn valid_exactly_until_expiry(
            t in 0i64..4_000_000_000,
            ttl in 1i64..172_800,
            before in 0i64..172_800,
            after in 0i64..172_800,
        ) {
            let jwt = Hs256Jwt::new(SECRET);
            let token = jwt.issue(&alice(), at(t), Duration::seconds(ttl)).unwrap();

            let inside = t + (before % ttl);
            prop_assert!(jwt.validate(token.as_str(), at(inside)).is_ok());

            let outside = t + ttl + after;
            prop_assert_eq!(
                jwt.validate(token.as_str(), at(outside)).unwrap_err(),
                TokenError::Claims(ClaimsError::Expired)
            );
        }

        /// Property: flipping any single bit of the signature invalidates it.
        #[test]
        fn any_signature_bit_flip_is_rejected(bit in 0usize..256) {
            let jwt = Hs256Jwt::new(SECRET);
            let token = jwt.issue(&alice(), at(1_000), Duration::minutes(5)).unwrap();
            let tampered = flip_signature_bit(token.as_str(), bit);
            prop_assert_ne!(&tampered, token.as_str());
            prop_assert_eq!(
                jwt.validate(&tampered, at(1_001)).unwrap_err(),
                TokenError::BadSignature
            );
        }
    }
}
