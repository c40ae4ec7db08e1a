//! Password hashing and the registration password policy.

use crate::error::ApiError;

/// Hashes a plaintext password with bcrypt at the given work factor.
///
/// # Errors
///
/// Returns [`ApiError::PasswordHash`] if hashing fails.
pub fn hash(plaintext: &str, cost: u32) -> Result<String, ApiError> {
    Ok(bcrypt::hash(plaintext, cost)?)
}

/// Verifies a plaintext password against a stored bcrypt hash.
///
/// # Errors
///
/// Returns [`ApiError::PasswordHash`] if the stored hash is malformed.
pub fn verify(plaintext: &str, stored_hash: &str) -> Result<bool, ApiError> {
    Ok(bcrypt::verify(plaintext, stored_hash)?)
}

/// Registration password policy: at least 8 characters with one lowercase
/// letter, one uppercase letter, and one digit.
#[must_use]
pub fn meets_policy(plaintext: &str) -> bool {
    plaintext.chars().count() >= 8
        && plaintext.chars().any(|c| c.is_ascii_lowercase())
        && plaintext.chars().any(|c| c.is_ascii_uppercase())
        && plaintext.chars().any(|c| c.is_ascii_digit())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    // Minimum bcrypt cost keeps the test fast; production cost comes from
    // config.
    const TEST_COST: u32 = 4;

    #[test]
    fn hash_then_verify_round_trip() {
        let Ok(hashed) = hash("Secret123", TEST_COST) else {
            panic!("hashing failed");
        };
        assert_ne!(hashed, "Secret123");
        assert_eq!(verify("Secret123", &hashed).ok(), Some(true));
        assert_eq!(verify("Secret124", &hashed).ok(), Some(false));
    }

    #[test]
    fn policy_requires_length_and_character_classes() {
        assert!(meets_policy("Secret123"));
        assert!(!meets_policy("Short1A"));
        assert!(!meets_policy("alllowercase1"));
        assert!(!meets_policy("ALLUPPERCASE1"));
        assert!(!meets_policy("NoDigitsHere"));
    }

    #[test]
    fn verify_rejects_malformed_hash() {
        assert!(verify("Secret123", "not-a-bcrypt-hash").is_err());
    }
}
