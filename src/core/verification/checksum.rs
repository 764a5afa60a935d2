//! Checksum calculation for data verification
//!
//! Artifacts are checksummed over their exact encoded bytes, so a receipt
//! taken at write time can be compared against the file read back later.

use crate::domain::Result;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Calculate SHA-256 checksum of raw bytes
///
/// # Arguments
///
/// * `data` - The raw bytes to calculate checksum for
///
/// # Returns
///
/// Returns a hex-encoded SHA-256 checksum string (64 characters).
///
/// # Examples
///
/// ```
/// use keyport::core::verification::checksum::calculate_checksum_bytes;
///
/// let checksum = calculate_checksum_bytes(br#"{"realm":"acme"}"#);
/// assert_eq!(checksum.len(), 64); // SHA-256 produces 64 hex characters
/// ```
pub fn calculate_checksum_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    format!("{result:x}")
}

/// Calculate SHA-256 checksum of a file's contents
///
/// # Errors
///
/// Returns `KeyportError::Io` if the file cannot be read.
pub fn checksum_file(path: impl AsRef<Path>) -> Result<String> {
    let data = std::fs::read(path.as_ref())?;
    Ok(calculate_checksum_bytes(&data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_checksum_bytes() {
        let data = b"Hello, World!";
        let checksum = calculate_checksum_bytes(data);

        // Verify it's a valid hex string of correct length
        assert_eq!(checksum.len(), 64);
        assert!(checksum.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_calculate_checksum_bytes_deterministic() {
        let data = b"Test data";
        assert_eq!(calculate_checksum_bytes(data), calculate_checksum_bytes(data));
    }

    #[test]
    fn test_calculate_checksum_known_value() {
        assert_eq!(
            calculate_checksum_bytes(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_whitespace_changes_checksum() {
        assert_ne!(
            calculate_checksum_bytes(br#"{"a":1}"#),
            calculate_checksum_bytes(br#"{ "a": 1 }"#)
        );
    }

    #[test]
    fn test_checksum_file_matches_bytes() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("acme-realm.json");
        std::fs::write(&path, b"payload").unwrap();

        assert_eq!(
            checksum_file(&path).unwrap(),
            calculate_checksum_bytes(b"payload")
        );
    }

    #[test]
    fn test_checksum_missing_file_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(checksum_file(dir.path().join("missing.json")).is_err());
    }
}
