//! Analysis agents: transport strategies and the registry
//!
//! Three fixed agents (text-leak, reverse-image, redaction) run behind one
//! [`AgentTransport`] contract with two interchangeable strategies:
//! - [`MockTransport`]: simulated latency and synthesized findings, no network
//! - [`HttpTransport`]: one POST per agent against its configured endpoint
//!
//! The [`AgentRegistry`] owns per-agent configuration, persists it through an
//! injected [`crate::store::ConfigStore`], and dispatches scans to the
//! selected transport.

pub mod http;
pub mod mock;
pub mod registry;
pub mod transport;

pub use http::HttpTransport;
pub use mock::MockTransport;
pub use registry::AgentRegistry;
pub use transport::AgentTransport;
