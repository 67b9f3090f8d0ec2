//! Content hashing for artifact integrity.
//!
//! The published meta file records the SHA-256 of the uncompressed trimmed
//! JSON so consumers can verify the gzip artifact after download.

use sha2::{Digest, Sha256};

/// Full lowercase hex SHA-256 digest of `content`.
pub fn sha256_hex(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_known_input_when_hashing_then_matches_reference_digest() {
        // sha256("abc") test vector
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn given_empty_input_when_hashing_then_returns_empty_digest() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
