//! Password hashing and verification.
//!
//! bcrypt with a fixed work factor; each hash carries its own random salt.
//! Plaintext passwords never leave this boundary and are never logged.

use bcrypt::BcryptError;

/// bcrypt work factor. Fixed; changing it only affects newly stored hashes.
pub const HASH_COST: u32 = 10;

/// Hash a plaintext password into a salted bcrypt digest.
pub fn hash_password(plaintext: &str) -> Result<String, BcryptError> {
    bcrypt::hash(plaintext, HASH_COST)
}

/// Check a candidate plaintext against a stored bcrypt digest.
pub fn verify_password(plaintext: &str, stored_hash: &str) -> Result<bool, BcryptError> {
    bcrypt::verify(plaintext, stored_hash)
}
