//! Credential hashing
//!
//! One-way SHA-256 digest of PIN/password strings. Digests are compared as
//! byte-exact lowercase hex strings; no plaintext secret is ever stored.

use sha2::{Digest, Sha256};

/// Compute the lowercase hex SHA-256 digest of a secret
///
/// Deterministic and unsalted: the same secret always produces the same
/// 64-character digest, which is what the record store persists and what
/// login compares against. No secret material is retained after the call.
pub fn digest(secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}
