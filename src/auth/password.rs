//! # Password Hashing
//!
//! bcrypt wrapper for the credential codec. Hashes are salted and
//! cost-parameterized (default cost 10, overridable via `BCRYPT_COST`).
//!
//! Neither the plaintext nor the hash is ever logged or returned
//! outside this component; callers get only the hash string they asked
//! for, or a boolean from verification.

use super::AuthError;

/// Hash a plaintext password with the given bcrypt cost factor.
///
/// bcrypt generates a fresh random salt per call, so hashing the same
/// plaintext twice yields different hashes.
pub fn hash_password(plaintext: &str, cost: u32) -> Result<String, AuthError> {
    bcrypt::hash(plaintext, cost).map_err(|e| AuthError::Hashing(e.to_string()))
}

/// Verify a plaintext password against a stored bcrypt hash.
pub fn verify_password(plaintext: &str, hash: &str) -> Result<bool, AuthError> {
    bcrypt::verify(plaintext, hash).map_err(|e| AuthError::Hashing(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimum cost keeps the tests fast; production uses the configured
    // cost (default 10).
    const TEST_COST: u32 = 4;

    #[test]
    fn hash_verifies_and_differs_from_plaintext() {
        let hash = hash_password("Abcdef1!", TEST_COST).unwrap();
        assert_ne!(hash, "Abcdef1!");
        assert!(verify_password("Abcdef1!", &hash).unwrap());
    }

    #[test]
    fn wrong_password_fails_verification() {
        let hash = hash_password("Abcdef1!", TEST_COST).unwrap();
        assert!(!verify_password("Abcdef1?", &hash).unwrap());
    }

    #[test]
    fn same_plaintext_hashes_differently() {
        let a = hash_password("Abcdef1!", TEST_COST).unwrap();
        let b = hash_password("Abcdef1!", TEST_COST).unwrap();
        assert_ne!(a, b);
    }
}
