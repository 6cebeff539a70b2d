//! Tagging strategies: derive a revision key from its payload.

use sha2::{Digest, Sha256};

/// Shortest digest prefix accepted for revision keys.
pub const MIN_DIGEST_LEN: usize = 7;

/// Full length of a hex-encoded SHA-256 digest.
pub const MAX_DIGEST_LEN: usize = 64;

/// Derives the revision key for a payload.
///
/// Implementations must be deterministic: the same payload always yields
/// the same tag, so re-uploading an existing revision is detected as a
/// duplicate.
pub trait TaggingStrategy: Send + Sync {
    fn create_tag(&self, manifest: &str, payload: &str) -> String;
}

/// SHA-256 content digest, optionally shortened and prefixed with the
/// manifest name (`staging:3f2a9c1d0b7e`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDigest {
    length: usize,
    prefix_manifest: bool,
}

impl ContentDigest {
    /// Full 64-character digest, no prefix.
    pub fn new() -> Self {
        Self {
            length: MAX_DIGEST_LEN,
            prefix_manifest: false,
        }
    }

    /// Keep only the first `length` hex characters, clamped to
    /// `MIN_DIGEST_LEN..=MAX_DIGEST_LEN`.
    pub fn short(mut self, length: usize) -> Self {
        self.length = length.clamp(MIN_DIGEST_LEN, MAX_DIGEST_LEN);
        self
    }

    pub fn with_manifest_prefix(mut self, prefix_manifest: bool) -> Self {
        self.prefix_manifest = prefix_manifest;
        self
    }
}

impl Default for ContentDigest {
    fn default() -> Self {
        Self::new()
    }
}

impl TaggingStrategy for ContentDigest {
    fn create_tag(&self, manifest: &str, payload: &str) -> String {
        let digest = hex::encode(Sha256::digest(payload.as_bytes()));
        let digest = &digest[..self.length];
        if self.prefix_manifest {
            format!("{manifest}:{digest}")
        } else {
            digest.to_string()
        }
    }
}
