//! Argon2id password hashing.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        PasswordHash as PhcHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use crate::{AuthError, Password, PasswordHash};

/// Salted, adaptive one-way hasher.
///
/// Every `hash` call draws a fresh salt from the OS RNG. Verification goes
/// through `password-hash`, whose output comparison is constant-time.
///
/// A decoy hash is computed once at construction so a lookup miss can burn
/// the same verification cost as a wrong password.
#[derive(Debug, Clone)]
pub struct Argon2Hasher {
    params: Params,
    decoy: PasswordHash,
}

const DECOY_PLAINTEXT: &str = "brewops-decoy-credential";

impl Argon2Hasher {
    /// Hasher with the `argon2` crate's recommended cost parameters.
    pub fn new() -> Result<Self, AuthError> {
        Self::with_params(Params::default())
    }

    /// Hasher with explicit cost parameters (memory KiB, iterations, lanes).
    pub fn with_params(params: Params) -> Result<Self, AuthError> {
        let mut hasher = Self {
            params,
            decoy: PasswordHash::from_phc(String::new()),
        };
        hasher.decoy = hasher.hash(&Password::new(DECOY_PLAINTEXT))?;
        Ok(hasher)
    }

    /// Cheapest parameters argon2 accepts. For tests and local tooling only.
    pub fn insecure_fast() -> Result<Self, AuthError> {
        let params = Params::new(
            Params::MIN_M_COST,
            Params::MIN_T_COST,
            Params::MIN_P_COST,
            None,
        )
        .map_err(|e| AuthError::internal(format!("argon2 params: {e}")))?;
        Self::with_params(params)
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    pub fn hash(&self, password: &Password) -> Result<PasswordHash, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2()
            .hash_password(password.expose().as_bytes(), &salt)
            .map(|phc| PasswordHash::from_phc(phc.to_string()))
            .map_err(|e| AuthError::internal(format!("password hashing failed: {e}")))
    }

    /// True iff `password` matches `hash`. A malformed hash never matches.
    ///
    /// Cost parameters are read from the PHC string, so hashes produced
    /// under older parameters keep verifying.
    pub fn verify(&self, password: &Password, hash: &PasswordHash) -> bool {
        match PhcHash::new(hash.as_str()) {
            Ok(parsed) => self
                .argon2()
                .verify_password(password.expose().as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }

    /// Run a verification that always fails, at full cost.
    pub fn verify_decoy(&self, password: &Password) -> bool {
        let _ = self.verify(password, &self.decoy);
        false
    }
}
