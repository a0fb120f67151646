//! Mock agent transport with simulated latency and synthesized findings

use crate::error::{Error, Result};
use crate::types::{AgentConfig, AgentFinding, AgentId, AgentOutput, Severity, Submission};
use async_trait::async_trait;
use rand::Rng;
use regex::Regex;
use std::collections::HashMap;
use std::time::Duration;

/// Default artificial latency range, in milliseconds.
const DEFAULT_DELAY_MS: (u64, u64) = (400, 1000);

/// Transport that fabricates plausible agent outputs without any network.
///
/// One shared delay is applied per run (not per agent), then each enabled
/// agent synthesizes findings from coarse signals in the submission.
pub struct MockTransport {
    delay_ms: (u64, u64),
    // Masked-anchor shape ("[[EMAIL#...") left behind by the PII masker.
    anchor_signal: Regex,
}

impl MockTransport {
    /// Create a transport with the default latency range.
    pub fn new() -> Result<Self> {
        Self::with_delay_range(DEFAULT_DELAY_MS.0, DEFAULT_DELAY_MS.1)
    }

    /// Create a transport with a custom latency range (min..max ms).
    ///
    /// Tests pass `(0, 0)` to skip the wait.
    pub fn with_delay_range(min_ms: u64, max_ms: u64) -> Result<Self> {
        let anchor_signal = Regex::new(r"\[\[[A-Z]+#")
            .map_err(|e| Error::Config(format!("Invalid anchor pattern: {}", e)))?;
        Ok(Self {
            delay_ms: (min_ms, max_ms),
            anchor_signal,
        })
    }

    fn leak_signal(&self, text: &str) -> bool {
        text.contains('@') || self.anchor_signal.is_match(text)
    }

    fn text_leak_output(&self, submission: &Submission) -> AgentOutput {
        let mut findings = Vec::new();
        if self.leak_signal(&submission.text) {
            findings.push(
                AgentFinding::new(
                    AgentId::TextLeak,
                    "Possible email linked on data broker site",
                    Severity::High,
                )
                .with_url("https://example-broker.tld/profile/abc"),
            );
            findings.push(
                AgentFinding::new(
                    AgentId::TextLeak,
                    "Phone number indexed on classifieds",
                    Severity::Medium,
                )
                .with_url("https://classifieds.tld/user/xyz"),
            );
        }
        output_with_stat(AgentId::TextLeak, findings, "leaks")
    }

    fn reverse_image_output(&self, submission: &Submission) -> AgentOutput {
        let matches = if submission.media.is_empty() {
            0
        } else {
            rand::thread_rng().gen_range(0..=3)
        };
        let findings = (0..matches)
            .map(|i| {
                let severity = if i == 0 { Severity::High } else { Severity::Low };
                AgentFinding::new(
                    AgentId::ReverseImage,
                    format!("Image match #{} on forum", i + 1),
                    severity,
                )
                .with_url("https://imageboard.tld/thread/123")
            })
            .collect();
        output_with_stat(AgentId::ReverseImage, findings, "matches")
    }

    fn redaction_output(&self, submission: &Submission) -> AgentOutput {
        let findings = if submission.media.is_empty() {
            Vec::new()
        } else {
            vec![AgentFinding::new(
                AgentId::Redaction,
                "Detected car plate in frame",
                Severity::High,
            )
            .with_description("Plate: SGP1234A")]
        };
        output_with_stat(AgentId::Redaction, findings, "redactions")
    }
}

fn output_with_stat(agent: AgentId, findings: Vec<AgentFinding>, stat_key: &str) -> AgentOutput {
    let mut stats = HashMap::new();
    stats.insert(stat_key.to_string(), findings.len() as u32);
    AgentOutput {
        agent,
        findings,
        stats: Some(stats),
    }
}

#[async_trait]
impl super::transport::AgentTransport for MockTransport {
    async fn run(
        &self,
        submission: &Submission,
        agents: &[AgentConfig],
    ) -> Result<Vec<AgentOutput>> {
        let (min_ms, max_ms) = self.delay_ms;
        let wait = if max_ms > min_ms {
            rand::thread_rng().gen_range(min_ms..max_ms)
        } else {
            min_ms
        };
        if wait > 0 {
            tokio::time::sleep(Duration::from_millis(wait)).await;
        }

        let outputs = agents
            .iter()
            .map(|cfg| match cfg.id {
                AgentId::TextLeak => self.text_leak_output(submission),
                AgentId::ReverseImage => self.reverse_image_output(submission),
                AgentId::Redaction => self.redaction_output(submission),
            })
            .collect();
        Ok(outputs)
    }

    fn name(&self) -> &str {
        "mock"
    }
}
