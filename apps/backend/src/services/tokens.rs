//! Bearer token issuing and hashing.
//!
//! Only the SHA-256 hash of a token is stored; the plain token is returned
//! to the client once, at registration.

use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Generate a fresh bearer token.
pub fn generate_token() -> String {
    Uuid::new_v4().to_string()
}

/// Hex-encoded SHA-256 of a token.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}
