//! ShareSentry - Privacy risk scanner for social media posts
//!
//! ShareSentry takes a composed post (text plus photos/videos), runs it
//! through a set of privacy-risk analysis agents, and aggregates their
//! findings into a single 0-100 danger score so the user can decide how to
//! proceed.
//!
//! ## Architecture
//!
//! ```text
//! Submission (text + media)
//!        │
//!        ▼
//! ┌──────────────────┐     mock ──► simulated delay + synthesized findings
//! │  Agent Registry  │────┤
//! │  (config + mode) │     http ──► PII-masked POST per agent endpoint
//! └──────────────────┘
//!        │  AgentOutput[] (config order preserved)
//!        ▼
//! ┌──────────────────┐
//! │  Danger Score    │──► { value: 0-100, reasons: [...] }
//! └──────────────────┘
//! ```
//!
//! Raw PII never leaves the process: the HTTP transport masks the text
//! first and sends anchor tokens (`[[EMAIL#1a2b3c4d]]`) with hash-only
//! token records, and media is referenced by file name only.
//!
//! ## Modules
//!
//! - [`pii`]: PII masking and fingerprint strategies
//! - [`agents`]: transport strategies and the agent registry
//! - [`score`]: danger score aggregation
//! - [`store`]: injected key-value configuration store
//! - [`types`]: submissions, configs, findings, outputs, scores

pub mod agents;
pub mod error;
pub mod pii;
pub mod score;
pub mod store;
pub mod types;

pub use agents::{AgentRegistry, AgentTransport, HttpTransport, MockTransport};
pub use error::{Error, Result};
pub use pii::{MaskOutcome, PiiMasker, PiiToken};
pub use score::{compute_danger, compute_danger_with, ScoreWeights};
pub use store::{ConfigStore, FileStore, MemoryStore};
pub use types::{
    AgentConfig, AgentFinding, AgentId, AgentOutput, DangerScore, MediaKind, Severity,
    Submission, TransportMode, UploadedMedia,
};
