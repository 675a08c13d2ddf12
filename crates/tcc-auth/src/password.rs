//! bcrypt password hashing.
//!
//! Both functions are CPU-bound; async callers should run them on a blocking
//! thread.

use crate::error::AuthError;

/// Hash `password` with the given bcrypt cost (4..=31).
///
/// # Errors
///
/// Returns [`AuthError::PasswordHash`] when the cost is out of range.
pub fn hash_password(password: &str, cost: u32) -> Result<String, AuthError> {
    Ok(bcrypt::hash(password, cost)?)
}

/// Check `password` against a stored bcrypt hash.
///
/// A malformed stored hash is an error, not a mismatch.
///
/// # Errors
///
/// Returns [`AuthError::PasswordHash`] if `hash` is not a valid bcrypt string.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    Ok(bcrypt::verify(password, hash)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_COST: u32 = 4;

    #[test]
    fn hash_then_verify() {
        let hash = hash_password("s3cret!", TEST_COST).unwrap();
        assert!(hash.starts_with("$2"));
        assert!(verify_password("s3cret!", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("same", TEST_COST).unwrap();
        let b = hash_password("same", TEST_COST).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_hash_is_error() {
        assert!(verify_password("pw", "not-a-bcrypt-hash").is_err());
    }

    #[test]
    fn cost_out_of_range_is_error() {
        assert!(hash_password("pw", 2).is_err());
    }
}
