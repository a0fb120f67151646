//! Pluggable agent transport contract

use crate::error::Result;
use crate::types::{AgentConfig, AgentOutput, Submission};
use async_trait::async_trait;

/// Strategy for obtaining agent outputs for one scan.
///
/// Implementations must preserve the order of `agents` in the returned
/// output list and must not mutate the submission. A failure of any single
/// agent fails the whole run (joint-await policy); callers see either a
/// complete result set or one error.
#[async_trait]
pub trait AgentTransport: Send + Sync {
    /// Run every agent in `agents` against `submission`.
    async fn run(
        &self,
        submission: &Submission,
        agents: &[AgentConfig],
    ) -> Result<Vec<AgentOutput>>;

    /// Human-readable transport name (used in logs).
    fn name(&self) -> &str;
}
