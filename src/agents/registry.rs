//! Agent registry: configuration ownership, persistence and scan dispatch

use crate::agents::http::HttpTransport;
use crate::agents::mock::MockTransport;
use crate::agents::transport::AgentTransport;
use crate::error::{Error, Result};
use crate::store::{ConfigStore, AGENT_CONFIGS_KEY, TRANSPORT_MODE_KEY};
use crate::types::{AgentConfig, AgentId, AgentOutput, Submission, TransportMode};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Registry of the three fixed agents.
///
/// Holds one [`AgentConfig`] per [`AgentId`] in a stable order, reads
/// persisted overrides once at construction, and rewrites the full set on
/// every update. The backing [`ConfigStore`] is injected; the registry owns
/// no ambient singleton.
pub struct AgentRegistry {
    store: Arc<dyn ConfigStore>,
    configs: RwLock<Vec<AgentConfig>>,
    mock: Box<dyn AgentTransport>,
    http: Box<dyn AgentTransport>,
    // Held for the duration of a scan; a second scan is rejected while busy.
    scan_lock: Mutex<()>,
}

impl AgentRegistry {
    /// Create a registry with the built-in transports.
    ///
    /// Missing or malformed persisted configuration never fails
    /// construction; defaults apply.
    pub fn new(store: Arc<dyn ConfigStore>) -> Result<Self> {
        let mock = Box::new(MockTransport::new()?);
        let http = Box::new(HttpTransport::new()?);
        Ok(Self::with_transports(store, mock, http))
    }

    /// Create a registry with caller-supplied transports.
    pub fn with_transports(
        store: Arc<dyn ConfigStore>,
        mock: Box<dyn AgentTransport>,
        http: Box<dyn AgentTransport>,
    ) -> Self {
        let configs = load_configs(store.as_ref());
        Self {
            store,
            configs: RwLock::new(configs),
            mock,
            http,
            scan_lock: Mutex::new(()),
        }
    }

    /// All agent configurations in fixed order (text-leak, reverse-image,
    /// redaction).
    pub async fn list(&self) -> Vec<AgentConfig> {
        self.configs.read().await.clone()
    }

    /// Configuration for one agent.
    pub async fn get(&self, id: AgentId) -> Option<AgentConfig> {
        self.configs.read().await.iter().find(|c| c.id == id).cloned()
    }

    /// Replace the configuration record for `cfg.id` and persist the full
    /// set. Idempotent; persistence failures are logged, never surfaced.
    pub async fn update(&self, cfg: AgentConfig) {
        let snapshot = {
            let mut configs = self.configs.write().await;
            if let Some(slot) = configs.iter_mut().find(|c| c.id == cfg.id) {
                *slot = cfg;
            }
            configs.clone()
        };

        match serde_json::to_string(&snapshot) {
            Ok(json) => {
                if let Err(e) = self.store.set(AGENT_CONFIGS_KEY, &json) {
                    tracing::warn!("Failed to persist agent configs: {}", e);
                }
            }
            Err(e) => tracing::warn!("Failed to serialize agent configs: {}", e),
        }
    }

    /// Run every enabled agent against `submission` using the transport for
    /// `mode`.
    ///
    /// Resolves to an empty list without touching a transport when nothing
    /// is enabled. While one scan is in flight a second request is rejected
    /// with [`Error::ScanInFlight`], so two scans' findings can never
    /// intermix in one result set.
    pub async fn run_all(
        &self,
        submission: &Submission,
        mode: TransportMode,
    ) -> Result<Vec<AgentOutput>> {
        let _guard = self.scan_lock.try_lock().map_err(|_| Error::ScanInFlight)?;

        let enabled: Vec<AgentConfig> = self
            .list()
            .await
            .into_iter()
            .filter(|c| c.enabled)
            .collect();
        if enabled.is_empty() {
            tracing::debug!("No agents enabled; skipping scan");
            return Ok(Vec::new());
        }

        let transport: &dyn AgentTransport = match mode {
            TransportMode::Mock => self.mock.as_ref(),
            TransportMode::Http => self.http.as_ref(),
        };

        tracing::info!(
            transport = transport.name(),
            agents = enabled.len(),
            media = submission.media.len(),
            "Starting scan"
        );
        let outputs = transport.run(submission, &enabled).await?;
        tracing::info!(
            outputs = outputs.len(),
            findings = outputs.iter().map(|o| o.findings.len()).sum::<usize>(),
            "Scan complete"
        );
        Ok(outputs)
    }

    /// Persisted transport mode; absent or unreadable values default to
    /// mock.
    pub fn mode(&self) -> TransportMode {
        match self.store.get(TRANSPORT_MODE_KEY) {
            Ok(Some(value)) => value.parse().unwrap_or(TransportMode::Mock),
            Ok(None) => TransportMode::Mock,
            Err(e) => {
                tracing::warn!("Failed to read transport mode: {}", e);
                TransportMode::Mock
            }
        }
    }

    /// Persist the transport mode for future scans.
    pub fn set_mode(&self, mode: TransportMode) {
        if let Err(e) = self.store.set(TRANSPORT_MODE_KEY, &mode.to_string()) {
            tracing::warn!("Failed to persist transport mode: {}", e);
        }
    }
}

/// Built-in defaults: all three agents enabled, no endpoints configured.
fn default_configs() -> Vec<AgentConfig> {
    AgentId::ALL
        .into_iter()
        .map(|id| AgentConfig {
            id,
            name: default_name(id).to_string(),
            base_url: None,
            api_key: None,
            enabled: true,
        })
        .collect()
}

fn default_name(id: AgentId) -> &'static str {
    match id {
        AgentId::TextLeak => "Text Leak Scanner",
        AgentId::ReverseImage => "Reverse Image Search",
        AgentId::Redaction => "Redaction & Warning",
    }
}

/// Defaults overlaid with persisted records; bad data degrades to defaults.
fn load_configs(store: &dyn ConfigStore) -> Vec<AgentConfig> {
    let mut configs = default_configs();

    let raw = match store.get(AGENT_CONFIGS_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return configs,
        Err(e) => {
            tracing::warn!("Failed to read agent configs: {}", e);
            return configs;
        }
    };

    match serde_json::from_str::<Vec<AgentConfig>>(&raw) {
        Ok(saved) => {
            for record in saved {
                if let Some(slot) = configs.iter_mut().find(|c| c.id == record.id) {
                    *slot = record;
                }
            }
        }
        Err(e) => tracing::warn!("Malformed agent configs, using defaults: {}", e),
    }

    configs
}
