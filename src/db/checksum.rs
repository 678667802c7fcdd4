//! Content checksums for uploaded images.

use sha2::{Digest, Sha256};

/// SHA-256 checksum of raw image bytes, hex encoded.
///
/// Upload files are stored under this name, so identical uploads
/// deduplicate to a single file on disk.
pub fn image_checksum(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let result = hasher.finalize();
    hex::encode(result)
}
