//! PII detection and masking
//!
//! Scans free text for email, phone, NRIC and address-like substrings and
//! replaces each with an opaque anchor token (`[[EMAIL#1a2b3c4d]]`), so
//! downstream agents can join on fingerprints without ever seeing raw values.
//!
//! - Regex-based masker with a fixed pass order
//! - Swappable fingerprint strategies (fast rolling hash, SHA-256)

pub mod fingerprint;
pub mod masker;

pub use fingerprint::{Fingerprint, Fnv32, Sha256Fingerprint};
pub use masker::{MaskOutcome, PiiKind, PiiMasker, PiiToken};
