//! Password hashing and validation.
//!
//! Uses Argon2id; hashes are stored as PHC strings carrying their own salt
//! and parameters.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand_core::OsRng;

use crate::{DepotError, Result};

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length.
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Validate password length requirements.
pub fn validate_password(password: &str) -> Result<()> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(DepotError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(DepotError::Validation(format!(
            "password must be at most {MAX_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Hash a password with Argon2id and a fresh random salt.
pub fn hash_password(password: &str) -> Result<String> {
    validate_password(password)?;

    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| DepotError::Config(format!("password hashing failed: {e}")))?;

    Ok(hash.to_string())
}

/// Verify a password against a stored PHC hash.
///
/// Any failure — malformed hash or mismatch — collapses into `Unauthorized`
/// so the caller cannot tell which check failed.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<()> {
    let parsed = PasswordHash::new(stored_hash).map_err(|_| DepotError::Unauthorized)?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| DepotError::Unauthorized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_produces_phc_string() {
        let hash = hash_password("correct_horse").unwrap();
        assert!(hash.starts_with("$argon2id$"));
    }

    #[test]
    fn test_same_password_different_salts() {
        let h1 = hash_password("same_password").unwrap();
        let h2 = hash_password("same_password").unwrap();
        assert_ne!(h1, h2);
    }

    #[test]
    fn test_verify_roundtrip() {
        let hash = hash_password("my_password_1").unwrap();
        assert!(verify_password("my_password_1", &hash).is_ok());
    }

    #[test]
    fn test_verify_wrong_password() {
        let hash = hash_password("my_password_1").unwrap();
        let result = verify_password("my_password_2", &hash);
        assert!(matches!(result, Err(DepotError::Unauthorized)));
    }

    #[test]
    fn test_verify_garbage_hash_is_unauthorized() {
        let result = verify_password("whatever", "not-a-phc-hash");
        assert!(matches!(result, Err(DepotError::Unauthorized)));
    }

    #[test]
    fn test_validate_too_short() {
        assert!(matches!(
            validate_password("short"),
            Err(DepotError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_bounds() {
        assert!(validate_password(&"a".repeat(MIN_PASSWORD_LENGTH)).is_ok());
        assert!(validate_password(&"a".repeat(MAX_PASSWORD_LENGTH)).is_ok());
        assert!(validate_password(&"a".repeat(MAX_PASSWORD_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_hash_rejects_invalid_length() {
        assert!(hash_password("short").is_err());
    }
}
