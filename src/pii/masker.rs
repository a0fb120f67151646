//! PII masker: replaces detected substrings with anchor tokens

use crate::error::{Error, Result};
use crate::pii::fingerprint::{Fingerprint, Fnv32};
use regex::Regex;
use std::fmt;
use std::sync::Arc;

/// Category of a detected PII substring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PiiKind {
    Email,
    Phone,
    Nric,
    Address,
}

impl PiiKind {
    /// Lowercase category name.
    pub fn as_str(&self) -> &'static str {
        match self {
            PiiKind::Email => "email",
            PiiKind::Phone => "phone",
            PiiKind::Nric => "nric",
            PiiKind::Address => "address",
        }
    }

    /// Uppercase label used inside anchor tokens.
    pub fn anchor_label(&self) -> &'static str {
        match self {
            PiiKind::Email => "EMAIL",
            PiiKind::Phone => "PHONE",
            PiiKind::Nric => "NRIC",
            PiiKind::Address => "ADDRESS",
        }
    }
}

impl fmt::Display for PiiKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One masked substring: category, the original text and its fingerprint.
///
/// Deliberately not serializable: `raw` exists only in memory for the
/// duration of one masking call. Transports build their own hash-only wire
/// records from this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PiiToken {
    pub kind: PiiKind,
    pub raw: String,
    pub hash: String,
}

/// Result of one masking call.
#[derive(Debug, Clone)]
pub struct MaskOutcome {
    /// Input text with every match replaced by an anchor token.
    pub masked: String,
    /// One token per match, in pass order (email, phone, nric, address).
    pub tokens: Vec<PiiToken>,
}

/// Regex-based PII masker with a fixed pass order.
///
/// Each pass rewrites the text produced by the previous pass, so matches
/// never overlap. Masking is total: any input produces an outcome.
pub struct PiiMasker {
    passes: Vec<(PiiKind, Regex)>,
    fingerprint: Arc<dyn Fingerprint>,
}

// Singapore-flavored demo patterns.
const EMAIL_PATTERN: &str = r"(?i)[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}";
const PHONE_PATTERN: &str = r"(?:\+65\s?)?(?:[689]\d{7})\b";
const NRIC_PATTERN: &str = r"(?i)\b[STFGM]\d{7}[A-Z]\b";
const ADDRESS_PATTERN: &str =
    r"(?i)(Blk\s?\d+|\d+\s+\w+\s+(Street|St|Ave|Road|Rd|Drive|Dr|Lane|Ln|Crescent|Cres|Close|Cl|Walk|Way))";

impl PiiMasker {
    /// Create a masker with the built-in patterns and the default
    /// fingerprint strategy.
    pub fn new() -> Result<Self> {
        Self::with_fingerprint(Arc::new(Fnv32))
    }

    /// Create a masker with a caller-supplied fingerprint strategy.
    pub fn with_fingerprint(fingerprint: Arc<dyn Fingerprint>) -> Result<Self> {
        let patterns = [
            (PiiKind::Email, EMAIL_PATTERN),
            (PiiKind::Phone, PHONE_PATTERN),
            (PiiKind::Nric, NRIC_PATTERN),
            (PiiKind::Address, ADDRESS_PATTERN),
        ];

        let passes = patterns
            .into_iter()
            .map(|(kind, pattern)| {
                let re = Regex::new(pattern).map_err(|e| {
                    Error::Pii(format!("Invalid pattern for '{}': {}", kind, e))
                })?;
                Ok((kind, re))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            passes,
            fingerprint,
        })
    }

    /// Mask all detected PII in `text`.
    ///
    /// Pure function of the input: identical text yields identical anchors
    /// and token hashes across calls and processes.
    pub fn mask(&self, text: &str) -> MaskOutcome {
        let mut tokens = Vec::new();
        let mut masked = text.to_string();

        for (kind, re) in &self.passes {
            masked = re
                .replace_all(&masked, |caps: &regex::Captures<'_>| {
                    let raw = caps[0].to_string();
                    let hash = self.fingerprint.digest(&raw);
                    let anchor = format!("[[{}#{}]]", kind.anchor_label(), hash);
                    tokens.push(PiiToken {
                        kind: *kind,
                        raw,
                        hash,
                    });
                    anchor
                })
                .into_owned();
        }

        MaskOutcome { masked, tokens }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pii::fingerprint::Sha256Fingerprint;

    fn masker() -> PiiMasker {
        PiiMasker::new().unwrap()
    }

    #[test]
    fn test_mask_empty() {
        let out = masker().mask("");
        assert_eq!(out.masked, "");
        assert!(out.tokens.is_empty());
    }

    #[test]
    fn test_mask_no_match() {
        let out = masker().mask("nothing sensitive here");
        assert_eq!(out.masked, "nothing sensitive here");
        assert!(out.tokens.is_empty());
    }

    #[test]
    fn test_mask_email() {
        let out = masker().mask("contact me at jane.doe@example.com please");
        assert_eq!(out.tokens.len(), 1);
        let token = &out.tokens[0];
        assert_eq!(token.kind, PiiKind::Email);
        assert_eq!(token.raw, "jane.doe@example.com");
        assert_eq!(token.hash.len(), 8);
        assert!(out.masked.contains(&format!("[[EMAIL#{}]]", token.hash)));
        assert!(!out.masked.contains("jane.doe@example.com"));
    }

    #[test]
    fn test_mask_deterministic() {
        let text = "mail a@b.com, call 91234567, id S1234567A, Blk 123";
        let first = masker().mask(text);
        let second = masker().mask(text);
        assert_eq!(first.masked, second.masked);
        let hashes: Vec<_> = first.tokens.iter().map(|t| t.hash.clone()).collect();
        let hashes2: Vec<_> = second.tokens.iter().map(|t| t.hash.clone()).collect();
        assert_eq!(hashes, hashes2);
    }

    #[test]
    fn test_mask_pass_order() {
        let out = masker().mask("a@b.com then 91234567 then S1234567A then Blk 42");
        let kinds: Vec<_> = out.tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![PiiKind::Email, PiiKind::Phone, PiiKind::Nric, PiiKind::Address]
        );
    }

    #[test]
    fn test_mask_phone_with_country_code() {
        let out = masker().mask("reach me on +65 91234567");
        assert_eq!(out.tokens.len(), 1);
        assert_eq!(out.tokens[0].kind, PiiKind::Phone);
        assert_eq!(out.tokens[0].raw, "+65 91234567");
        assert!(out.masked.contains("[[PHONE#"));
    }

    #[test]
    fn test_mask_address_cues() {
        let out = masker().mask("I live at 71 Orchard Road nearby");
        assert_eq!(out.tokens.len(), 1);
        assert_eq!(out.tokens[0].kind, PiiKind::Address);
        assert!(out.masked.contains("[[ADDRESS#"));
        assert!(!out.masked.contains("Orchard Road"));
    }

    #[test]
    fn test_mask_multiple_emails_distinct_hashes() {
        let out = masker().mask("a@b.com and c@d.com");
        assert_eq!(out.tokens.len(), 2);
        assert_ne!(out.tokens[0].hash, out.tokens[1].hash);
    }

    #[test]
    fn test_mask_with_sha256_strategy() {
        let masker = PiiMasker::with_fingerprint(Arc::new(Sha256Fingerprint)).unwrap();
        let out = masker.mask("ping a@b.com");
        assert_eq!(out.tokens.len(), 1);
        assert_eq!(out.tokens[0].hash.len(), 8);
        assert!(out.masked.contains("[[EMAIL#"));
        // Different strategy, different hash than the default.
        let default_out = PiiMasker::new().unwrap().mask("ping a@b.com");
        assert_ne!(out.tokens[0].hash, default_out.tokens[0].hash);
    }

    #[test]
    fn test_mask_nric() {
        let out = masker().mask("my id is S1234567A ok");
        assert_eq!(out.tokens.len(), 1);
        assert_eq!(out.tokens[0].kind, PiiKind::Nric);
        assert_eq!(out.tokens[0].raw, "S1234567A");
    }
}
