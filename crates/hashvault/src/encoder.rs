//! The digest primitive: SHA-512 plus standard base64.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use sha2::{Digest, Sha512};

/// Returns the standard padded base64 encoding of the 512-bit SHA digest of
/// `plaintext`'s raw UTF-8 bytes.
///
/// Deterministic: equal inputs always produce equal output, including the
/// empty string.
pub fn encode(plaintext: &str) -> String {
    let digest = Sha512::digest(plaintext.as_bytes());
    STANDARD.encode(digest)
}
