//! Content hashing for generated metric identifiers.

use sha2::{Digest, Sha256};

/// Hash of a generated metric definition.
///
/// The inputs are joined in order as `expression#title#format` and digested
/// with SHA-256. Returns a 64-character lowercase hexadecimal string.
pub fn definition_hash(expression: &str, title: &str, format: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(expression.as_bytes());
    hasher.update(b"#");
    hasher.update(title.as_bytes());
    hasher.update(b"#");
    hasher.update(format.as_bytes());
    format!("{:x}", hasher.finalize())
}
