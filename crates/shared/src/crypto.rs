//! Code and token generation plus hashing helpers.

use rand::Rng;
use sha2::{Digest, Sha256};

/// Length of the numeric one-time code sent on invitation issuance.
pub const OTP_LENGTH: usize = 4;

/// Computes SHA-256 of the input and returns it as a hex string.
///
/// Used for storing password-reset tokens (only the digest is persisted)
/// and for the constant-shape admin key comparison.
pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Generates a fresh numeric one-time code.
///
/// Four digits, drawn from the thread RNG on every call. Codes are not
/// unique across the invitation ledger; redemption matches on the
/// (email, code, unused) triple so a cross-email collision is harmless.
pub fn generate_otp() -> String {
    let mut rng = rand::thread_rng();
    (0..OTP_LENGTH)
        .map(|_| char::from(b'0' + rng.gen_range(0..10)))
        .collect()
}

/// Generates a URL-safe password-reset token.
///
/// 32 random bytes, base64 URL-safe without padding. The caller stores
/// `sha256_hex(token)` and mails the raw token.
pub fn generate_reset_token() -> String {
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

    let mut bytes = [0u8; 32];
    rand::thread_rng().fill(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_hex_known_vector() {
        assert_eq!(
            sha256_hex("test"),
            "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08"
        );
    }

    #[test]
    fn test_sha256_hex_deterministic() {
        assert_eq!(sha256_hex("same"), sha256_hex("same"));
        assert_ne!(sha256_hex("a"), sha256_hex("b"));
    }

    #[test]
    fn test_generate_otp_format() {
        for _ in 0..50 {
            let otp = generate_otp();
            assert_eq!(otp.len(), OTP_LENGTH);
            assert!(otp.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_generate_otp_is_fresh() {
        // 4 digits collide sometimes; 20 draws all identical would mean
        // the RNG is not being consulted.
        let first = generate_otp();
        let all_same = (0..20).all(|_| generate_otp() == first);
        assert!(!all_same);
    }

    #[test]
    fn test_generate_reset_token() {
        let token = generate_reset_token();
        assert_eq!(token.len(), 43); // 32 bytes, base64 no-pad
        assert_ne!(token, generate_reset_token());
        assert!(!token.contains('='));
        assert!(!token.contains('+'));
        assert!(!token.contains('/'));
    }
}
