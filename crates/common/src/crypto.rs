//! Password hashing shared across storefront crates
//!
//! Argon2id with a random salt per password, stored as a PHC string
//! (`$argon2id$v=19$...`). Verification is constant-time inside argon2.

use std::sync::LazyLock;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Errors from password hashing
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("Password cannot be empty")]
    Empty,

    #[error("Failed to hash password: {0}")]
    Hashing(String),
}

/// Hash a password using Argon2id with default parameters.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    if password.is_empty() {
        return Err(PasswordError::Empty);
    }

    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::Hashing(e.to_string()))
}

/// Verify a candidate password against a stored PHC hash.
///
/// A malformed stored hash never matches.
pub fn verify_password(candidate: &str, stored_hash: &str) -> bool {
    let parsed = match PasswordHash::new(stored_hash) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!(error = %e, "Stored password hash is not a valid PHC string");
            return false;
        }
    };

    Argon2::default()
        .verify_password(candidate.as_bytes(), &parsed)
        .is_ok()
}

/// Throwaway hash verified when a login names no known account
static DECOY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("decoy-password-for-unknown-accounts").ok());

/// Spend the same Argon2 work as a real verification, then fail.
///
/// Call on the unknown-account branch of a login so it costs as much as
/// a wrong password.
pub fn verify_password_without_account(candidate: &str) -> bool {
    if let Some(hash) = DECOY_HASH.as_deref() {
        let _ = verify_password(candidate, hash);
    }
    false
}
