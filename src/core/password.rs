//! Password hashing - Argon2id with a fresh random salt per hash.
//!
//! Hashes are stored as PHC strings (`$argon2id$v=19$...`), which carry the
//! salt and parameters needed to verify them later.

use crate::errors::{Error, Result};
use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

/// Hashes `plaintext` into a PHC string.
pub fn hash_password(plaintext: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| Error::Hashing {
            message: e.to_string(),
        })
}

/// Checks `plaintext` against a stored PHC string.
///
/// A wrong password is `Ok(false)`; only a malformed hash is an error.
pub fn verify_password(plaintext: &str, stored_hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(stored_hash).map_err(|e| Error::Hashing {
        message: format!("stored hash is not a valid PHC string: {e}"),
    })?;
    Ok(Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_hash_never_equals_plaintext_and_verifies() {
        let hash = hash_password("secret").unwrap();
        assert_ne!(hash, "secret");
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("secret", &hash).unwrap());
        assert!(!verify_password("Secret", &hash).unwrap());
    }

    #[test]
    fn test_same_password_gets_different_salts() {
        let a = hash_password("secret").unwrap();
        let b = hash_password("secret").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        let result = verify_password("secret", "secret");
        assert!(matches!(result, Err(Error::Hashing { .. })));
    }
}
