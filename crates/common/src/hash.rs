//! Content digests for generated documents.

use sha2::{Digest, Sha256};

/// Compute SHA256 hash of bytes.
pub fn sha256_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Compute SHA256 hash of a string.
pub fn sha256_str(s: &str) -> String {
    sha256_bytes(s.as_bytes())
}

/// Short form of a digest used in log lines and summaries.
pub fn short_digest(digest: &str) -> &str {
    &digest[..digest.len().min(12)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_bytes() {
        let hash = sha256_bytes(b"hello world");
        assert_eq!(
            hash,
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn test_sha256_str_matches_bytes() {
        assert_eq!(sha256_str("service: {}"), sha256_bytes(b"service: {}"));
    }

    #[test]
    fn test_short_digest() {
        let hash = sha256_str("hello world");
        assert_eq!(short_digest(&hash), "b94d27b9934d");
        assert_eq!(short_digest("abc"), "abc");
    }
}
