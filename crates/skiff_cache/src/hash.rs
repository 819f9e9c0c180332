//! Content hashing for archive integrity checks.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 128-bit XXH3 content hash.
///
/// Stored in every archive header as a checksum over the payload sections;
/// a mismatch on read means the archive is corrupt.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentHash([u8; 16]);

impl ContentHash {
    /// Computes a content hash from a byte slice using XXH3-128.
    pub fn from_bytes(data: &[u8]) -> Self {
        let hash = xxhash_rust::xxh3::xxh3_128(data);
        Self(hash.to_le_bytes())
    }

    /// Computes a hash over two sections without concatenating them.
    pub fn from_sections(a: &[u8], b: &[u8]) -> Self {
        let mut hasher = xxhash_rust::xxh3::Xxh3::new();
        hasher.update(a);
        hasher.update(b);
        Self(hasher.digest128().to_le_bytes())
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({:02x}{:02x}..)", self.0[0], self.0[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic() {
        assert_eq!(
            ContentHash::from_bytes(b"emitted code"),
            ContentHash::from_bytes(b"emitted code")
        );
    }

    #[test]
    fn different_inputs_differ() {
        assert_ne!(
            ContentHash::from_bytes(b"code"),
            ContentHash::from_bytes(b"type data")
        );
    }

    #[test]
    fn sections_match_concatenation() {
        let whole = ContentHash::from_bytes(b"code+types");
        let split = ContentHash::from_sections(b"code+", b"types");
        assert_eq!(whole, split);
    }

    #[test]
    fn display_is_hex() {
        let s = format!("{}", ContentHash::from_bytes(b"x"));
        assert_eq!(s.len(), 32);
        assert!(s.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
