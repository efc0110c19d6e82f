//! Checksum calculation for job output
//!
//! Every generated document, and the job manifest itself, is recorded with a
//! hex-encoded SHA-256 digest so a finished job can be audited later.

use crate::domain::{Result, RollError};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Calculate SHA-256 checksum of raw bytes
///
/// # Returns
///
/// Returns a hex-encoded SHA-256 checksum string (64 characters).
///
/// # Examples
///
/// ```
/// use rollforge::core::verification::checksum::calculate_checksum_bytes;
///
/// let checksum = calculate_checksum_bytes(b"");
/// assert_eq!(
///     checksum,
///     "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
/// );
/// ```
pub fn calculate_checksum_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    format!("{result:x}")
}

/// Calculate SHA-256 checksum and size of a file
///
/// The file is streamed, never held in memory as a whole.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn checksum_file(path: impl AsRef<Path>) -> Result<(String, u64)> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| RollError::Io(format!("Failed to open {}: {}", path.display(), e)))?;
    let mut reader = BufReader::new(file);

    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 64 * 1024];
    let mut size = 0u64;
    loop {
        let n = reader
            .read(&mut buffer)
            .map_err(|e| RollError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
        size += n as u64;
    }

    let result = hasher.finalize();
    Ok((format!("{result:x}"), size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_calculate_checksum_bytes() {
        let checksum = calculate_checksum_bytes(b"Hello, World!");

        assert_eq!(checksum.len(), 64);
        assert!(checksum.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(
            checksum,
            "dffd6021bb2bd5b0af676290809ec3a53191dd81c7f70a4b28688a362182986f"
        );
    }

    #[test]
    fn test_calculate_checksum_bytes_deterministic() {
        let data = b"Test data";
        assert_eq!(calculate_checksum_bytes(data), calculate_checksum_bytes(data));
        assert_ne!(calculate_checksum_bytes(data), calculate_checksum_bytes(b"Test datb"));
    }

    #[test]
    fn test_checksum_file_matches_bytes() {
        let content: Vec<u8> = (0..200_000u32).map(|i| (i % 251) as u8).collect();
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&content).unwrap();
        file.flush().unwrap();

        let (hash, size) = checksum_file(file.path()).unwrap();
        assert_eq!(size, content.len() as u64);
        assert_eq!(hash, calculate_checksum_bytes(&content));
    }

    #[test]
    fn test_checksum_missing_file() {
        assert!(matches!(
            checksum_file("/nonexistent/file.txt"),
            Err(RollError::Io(_))
        ));
    }
}
