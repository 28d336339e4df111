//! Password hashing and the shared password policy.
//!
//! Hashing uses Argon2id with OWASP-recommended parameters. The policy is
//! shared by registration, invitation issuance and the reset flows: a
//! minimum-strength check plus a similarity gate against the email local
//! part and the user's first name.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use thiserror::Error;

use crate::similarity::similarity_ratio;

/// Error type for password operations.
#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Failed to hash password: {0}")]
    HashError(String),

    #[error("Failed to verify password: {0}")]
    VerifyError(String),

    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

/// A policy violation, keyed by the field it should surface under.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct PolicyViolation {
    pub field: &'static str,
    pub message: String,
}

/// Minimum accepted password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Similarity ratio at or above which a password is rejected.
pub const SIMILARITY_THRESHOLD: f64 = 0.5;

/// Argon2id parameters (OWASP 2024): 19 MiB memory, 2 iterations, p=1.
const MEMORY_COST: u32 = 19456;
const TIME_COST: u32 = 2;
const PARALLELISM: u32 = 1;
const OUTPUT_LEN: usize = 32;

fn create_argon2() -> Result<Argon2<'static>, PasswordError> {
    let params = Params::new(MEMORY_COST, TIME_COST, PARALLELISM, Some(OUTPUT_LEN))
        .map_err(|e| PasswordError::HashError(format!("Failed to create Argon2 params: {}", e)))?;

    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hashes a password using Argon2id.
///
/// Returns a PHC-formatted string including algorithm, parameters, salt and
/// hash, so the stored value stays self-describing across upgrades.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = create_argon2()?;

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::HashError(e.to_string()))
}

/// Verifies a password against a stored PHC hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| PasswordError::InvalidHashFormat)?;

    // The stored hash carries its own parameters
    let argon2 = Argon2::default();

    match argon2.verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::VerifyError(e.to_string())),
    }
}

/// Validates a candidate password against the shared policy.
///
/// `email` contributes its local part to the similarity gate; `first_name`
/// is checked when present. Strength is checked first, so a weak password
/// fails before any similarity comparison.
pub fn validate_password_policy(
    password: &str,
    email: &str,
    first_name: Option<&str>,
) -> Result<(), PolicyViolation> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(PolicyViolation {
            field: "password",
            message: format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            ),
        });
    }

    if password.chars().all(|c| c.is_ascii_digit()) {
        return Err(PolicyViolation {
            field: "password",
            message: "Password cannot be entirely numeric".to_string(),
        });
    }

    let local_part = email.split('@').next().unwrap_or(email);
    if similarity_ratio(local_part, password) >= SIMILARITY_THRESHOLD {
        return Err(PolicyViolation {
            field: "password",
            message: "Password is too similar to email".to_string(),
        });
    }

    if let Some(name) = first_name {
        if similarity_ratio(name, password) >= SIMILARITY_THRESHOLD {
            return Err(PolicyViolation {
                field: "password",
                message: "Password is too similar to username".to_string(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password_returns_phc_format() {
        let hash = hash_password("J8#mKp2!xQ").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(hash.contains("m=19456"));
        assert!(hash.contains("t=2"));
    }

    #[test]
    fn test_hash_is_salted() {
        let hash1 = hash_password("same password").unwrap();
        let hash2 = hash_password("same password").unwrap();
        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_verify_password_roundtrip() {
        let hash = hash_password("zK4!plausible").unwrap();
        assert!(verify_password("zK4!plausible", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn test_verify_password_invalid_hash() {
        let result = verify_password("password", "not-a-phc-hash");
        assert!(matches!(result, Err(PasswordError::InvalidHashFormat)));
    }

    #[test]
    fn test_policy_rejects_short_password() {
        let err = validate_password_policy("short1", "a@x.com", None).unwrap_err();
        assert_eq!(err.field, "password");
        assert!(err.message.contains("at least 8"));
    }

    #[test]
    fn test_policy_rejects_numeric_password() {
        let err = validate_password_policy("12345678", "a@x.com", None).unwrap_err();
        assert!(err.message.contains("numeric"));
    }

    #[test]
    fn test_policy_rejects_password_similar_to_email_local_part() {
        let err = validate_password_policy("abc12345", "abc@x.com", None).unwrap_err();
        assert_eq!(err.message, "Password is too similar to email");
    }

    #[test]
    fn test_policy_rejects_password_similar_to_first_name() {
        let err =
            validate_password_policy("alice123", "someone@example.com", Some("alice")).unwrap_err();
        assert_eq!(err.message, "Password is too similar to username");
    }

    #[test]
    fn test_policy_accepts_strong_unrelated_password() {
        validate_password_policy("quartz-lamp-39", "alice@example.com", Some("Alice")).unwrap();
    }

    #[test]
    fn test_policy_checks_strength_before_similarity() {
        // "alice12" is both short and similar; strength should win
        let err =
            validate_password_policy("alice12", "someone@example.com", Some("alice")).unwrap_err();
        assert!(err.message.contains("at least 8"));
    }
}
