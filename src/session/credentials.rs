//! Password hashing.
//!
//! Passwords are stored and configured as salted Argon2id hashes in PHC string form
//! (`$argon2id$v=19$m=...,t=...,p=...$<salt>$<hash>`).

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use serde::Deserialize;
use tracing::warn;

use crate::error::{EngineError, EngineResult};

/// Login credentials as submitted by a client.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    /// Admin username or approver employee ID.
    pub username: String,
    /// Plaintext password.
    pub password: String,
}

/// Hashes `password` with Argon2id and a fresh random salt.
///
/// # Examples
///
/// ```
/// use attendance_engine::session::{hash_password, verify_password};
///
/// let hash = hash_password("admin").unwrap();
/// assert!(hash.starts_with("$argon2id$"));
/// assert!(verify_password("admin", &hash));
/// ```
pub fn hash_password(password: &str) -> EngineResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| EngineError::PasswordHash {
            message: e.to_string(),
        })
}

/// Checks that `hash` is a well-formed PHC password hash.
pub fn validate_password_hash(hash: &str) -> EngineResult<()> {
    PasswordHash::new(hash)
        .map(|_| ())
        .map_err(|e| EngineError::PasswordHash {
            message: e.to_string(),
        })
}

/// Checks `password` against a stored PHC hash.
///
/// A stored value that does not parse never matches.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed = match PasswordHash::new(hash) {
        Ok(parsed) => parsed,
        Err(err) => {
            warn!(error = %err, "Stored password hash is malformed");
            return false;
        }
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    // sha256("admin") in hex, the format the old configuration carried.
    const LEGACY_DIGEST: &str = "8c6976e5b5410415bde908bd4dee15dfb167a9c873fc4bb8a81f6f2ab448a918";

    #[test]
    fn test_hash_password_is_salted_argon2id() {
        let first = hash_password("pass").unwrap();
        let second = hash_password("pass").unwrap();

        assert!(first.starts_with("$argon2id$v=19$"));
        assert_ne!(first, second);
        assert!(verify_password("pass", &first));
        assert!(verify_password("pass", &second));
    }

    #[test]
    fn test_verify_password_accepts_match() {
        let hash = hash_password("s3cret").unwrap();
        assert!(verify_password("s3cret", &hash));
    }

    #[test]
    fn test_verify_password_rejects_mismatch() {
        let hash = hash_password("s3cret").unwrap();
        assert!(!verify_password("S3cret", &hash));
        assert!(!verify_password("s3cret", "abc"));
    }

    #[test]
    fn test_unsalted_hex_digest_never_verifies() {
        assert!(!verify_password("admin", LEGACY_DIGEST));
        assert!(validate_password_hash(LEGACY_DIGEST).is_err());
    }

    #[test]
    fn test_shipped_admin_hash_verifies() {
        let loader = crate::config::ConfigLoader::load("./config/default").unwrap();
        let hash = &loader.service().admin.password_hash;

        assert!(validate_password_hash(hash).is_ok());
        assert!(verify_password("admin", hash));
        assert!(!verify_password("Admin", hash));
    }
}
