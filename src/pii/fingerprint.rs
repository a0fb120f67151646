//! Swappable PII fingerprint strategies
//!
//! Anchors embed an 8-hex-char fingerprint of the matched substring so that
//! remote agents can correlate occurrences without receiving raw values.
//! The fingerprint only needs to be deterministic and collision-resistant
//! enough for demo inputs; raw PII never crosses the network regardless of
//! which strategy is in use.

use sha2::{Digest, Sha256};

/// Deterministic fingerprint of a matched PII substring.
pub trait Fingerprint: Send + Sync {
    /// Digest `input` into 8 lowercase hex characters.
    fn digest(&self, input: &str) -> String;

    /// Human-readable strategy name (used in logs).
    fn name(&self) -> &str;
}

/// Default strategy: 32-bit FNV-style rolling hash.
///
/// Computed over UTF-16 code units. Not cryptographically secure;
/// collisions are rare enough not to conflate distinct values in typical
/// inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fnv32;

impl Fingerprint for Fnv32 {
    fn digest(&self, input: &str) -> String {
        let mut h: u32 = 0x811c_9dc5;
        for unit in input.encode_utf16() {
            h ^= u32::from(unit);
            h = h.wrapping_add(
                (h << 1)
                    .wrapping_add(h << 4)
                    .wrapping_add(h << 7)
                    .wrapping_add(h << 8)
                    .wrapping_add(h << 24),
            );
        }
        format!("{:08x}", h)
    }

    fn name(&self) -> &str {
        "fnv32"
    }
}

/// Strong strategy: first four bytes of the SHA-256 digest.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Fingerprint;

impl Fingerprint for Sha256Fingerprint {
    fn digest(&self, input: &str) -> String {
        let digest = Sha256::digest(input.as_bytes());
        digest[..4].iter().map(|b| format!("{:02x}", b)).collect()
    }

    fn name(&self) -> &str {
        "sha256"
    }
}
