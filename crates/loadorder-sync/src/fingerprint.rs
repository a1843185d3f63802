//! Blake3 content fingerprints for plugin list files.
//!
//! Fingerprints are stored in the format `"blake3:<hex>"` for easy
//! identification and future algorithm upgrades. The writer keeps the
//! fingerprint of the last committed content per path and skips commits
//! that would not change file bytes.

/// Calculates the Blake3 fingerprint for the given content.
///
/// # Examples
///
/// ```
/// use loadorder_sync::fingerprint::content_fingerprint;
///
/// let fingerprint = content_fingerprint(b"# header\r\nSkyrim.esm\r\n");
/// assert!(fingerprint.starts_with("blake3:"));
/// assert_eq!(fingerprint.len(), 71); // "blake3:" + 64 hex chars
/// ```
#[must_use]
pub fn content_fingerprint(data: &[u8]) -> String {
    let hash = blake3::hash(data);
    format!("blake3:{}", hash.to_hex())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_deterministic() {
        let data = b"Skyrim.esm\r\n";
        assert_eq!(content_fingerprint(data), content_fingerprint(data));
    }

    #[test]
    fn test_fingerprint_distinguishes_content() {
        assert_ne!(
            content_fingerprint(b"Skyrim.esm\r\n"),
            content_fingerprint(b"skyrim.esm\r\n")
        );
    }

    #[test]
    fn test_fingerprint_of_empty_content() {
        let fingerprint = content_fingerprint(b"");
        assert!(fingerprint.starts_with("blake3:"));
        assert_eq!(fingerprint.len(), 71);
    }
}
