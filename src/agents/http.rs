//! HTTP agent transport
//!
//! One POST per enabled agent against its configured base URL. The
//! submission text is passed through the PII masker before anything leaves
//! the process: the text-leak endpoint receives masked text plus hash-only
//! tokens, and the media agents receive file names only (real deployments
//! would upload bytes out of band via presigned URLs).

use crate::error::{Error, Result};
use crate::pii::{MaskOutcome, PiiMasker};
use crate::types::{AgentConfig, AgentId, AgentOutput, Submission};
use async_trait::async_trait;
use serde::Serialize;

/// Hash-only view of a PII token; `raw` never crosses this boundary.
#[derive(Debug, Serialize)]
struct WireToken<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    hash: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ScanTextRequest<'a> {
    text: &'a str,
    tokens: Vec<WireToken<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MediaScanRequest<'a> {
    media_names: &'a [String],
}

/// Transport that calls real agent endpoints over HTTP.
pub struct HttpTransport {
    client: reqwest::Client,
    masker: PiiMasker,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: reqwest::Client::new(),
            masker: PiiMasker::new()?,
        })
    }

    /// Endpoint path for an agent, relative to its base URL.
    fn endpoint_path(agent: AgentId) -> &'static str {
        match agent {
            AgentId::TextLeak => "scan-text",
            AgentId::ReverseImage => "reverse-search",
            AgentId::Redaction => "redaction-scan",
        }
    }

    fn request_body(
        agent: AgentId,
        outcome: &MaskOutcome,
        media_names: &[String],
    ) -> Result<serde_json::Value> {
        let body = match agent {
            AgentId::TextLeak => serde_json::to_value(ScanTextRequest {
                text: &outcome.masked,
                tokens: outcome
                    .tokens
                    .iter()
                    .map(|t| WireToken {
                        kind: t.kind.as_str(),
                        hash: &t.hash,
                    })
                    .collect(),
            })?,
            AgentId::ReverseImage | AgentId::Redaction => {
                serde_json::to_value(MediaScanRequest { media_names })?
            }
        };
        Ok(body)
    }

    async fn call_agent(
        &self,
        cfg: &AgentConfig,
        base_url: &str,
        outcome: &MaskOutcome,
        media_names: &[String],
    ) -> Result<AgentOutput> {
        let url = format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            Self::endpoint_path(cfg.id)
        );
        let body = Self::request_body(cfg.id, outcome, media_names)?;

        let mut request = self.client.post(&url).json(&body);
        if let Some(key) = cfg.api_key.as_deref().filter(|k| !k.is_empty()) {
            request = request.bearer_auth(key);
        }

        tracing::debug!(agent = %cfg.id, %url, "Calling agent endpoint");

        let response = request.send().await.map_err(|e| Error::Transport {
            agent: cfg.id,
            status: 0,
            message: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("unknown");
            let body = response.text().await.unwrap_or_default();
            let message = if body.is_empty() {
                reason.to_string()
            } else {
                format!("{}: {}", reason, body)
            };
            return Err(Error::Transport {
                agent: cfg.id,
                status: status.as_u16(),
                message,
            });
        }

        let output: AgentOutput = response.json().await.map_err(|e| Error::Transport {
            agent: cfg.id,
            status: status.as_u16(),
            message: format!("Invalid response body: {}", e),
        })?;

        // Validate the tag before the score calculator trusts the output.
        if output.agent != cfg.id {
            return Err(Error::Transport {
                agent: cfg.id,
                status: status.as_u16(),
                message: format!("Response tagged for agent '{}'", output.agent),
            });
        }

        Ok(output)
    }
}

#[async_trait]
impl super::transport::AgentTransport for HttpTransport {
    async fn run(
        &self,
        submission: &Submission,
        agents: &[AgentConfig],
    ) -> Result<Vec<AgentOutput>> {
        // Every agent must be routable before any request is issued.
        let mut routed = Vec::with_capacity(agents.len());
        for cfg in agents {
            match cfg.base_url.as_deref().map(str::trim) {
                Some(url) if !url.is_empty() => routed.push((cfg, url)),
                _ => {
                    return Err(Error::Config(format!(
                        "Agent '{}' has no baseUrl configured",
                        cfg.id
                    )))
                }
            }
        }

        // Mask once per run; only anchors and hashes go out.
        let outcome = self.masker.mask(&submission.text);
        let media_names = submission.media_names();

        let calls = routed
            .into_iter()
            .map(|(cfg, url)| self.call_agent(cfg, url, &outcome, &media_names));

        // Joint await: one failed agent fails the scan, order is preserved.
        futures::future::try_join_all(calls).await
    }

    fn name(&self) -> &str {
        "http"
    }
}
