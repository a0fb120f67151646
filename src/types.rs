//! Core data model for submissions, agents, findings and scores
//!
//! Wire types use camelCase JSON names; agent and severity tags serialize
//! as the kebab-case / lowercase strings the agent endpoints expect.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

/// Closed set of analysis agents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentId {
    /// Scans post text for leaked personal data already indexed elsewhere
    #[serde(rename = "text-leak")]
    TextLeak,
    /// Reverse-searches attached media for prior appearances
    #[serde(rename = "reverse-image")]
    ReverseImage,
    /// Flags identifying regions in media that should be redacted
    #[serde(rename = "redaction")]
    Redaction,
}

impl AgentId {
    /// All agent ids in their fixed display/dispatch order.
    pub const ALL: [AgentId; 3] = [AgentId::TextLeak, AgentId::ReverseImage, AgentId::Redaction];

    /// The kebab-case wire name for this agent.
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentId::TextLeak => "text-leak",
            AgentId::ReverseImage => "reverse-image",
            AgentId::Redaction => "redaction",
        }
    }

    /// Parse a wire name back into an id.
    pub fn parse(s: &str) -> Option<AgentId> {
        match s {
            "text-leak" => Some(AgentId::TextLeak),
            "reverse-image" => Some(AgentId::ReverseImage),
            "redaction" => Some(AgentId::Redaction),
            _ => None,
        }
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of an uploaded media item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

/// A photo or video attached to a submission.
///
/// The core never reads media bytes; `path` is the local content handle the
/// composer owns, and transports only ever send `file_name`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedMedia {
    pub id: String,
    pub file_name: String,
    pub kind: MediaKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl UploadedMedia {
    /// Build a media record from a local file path, guessing the kind from
    /// the extension (videos: mp4/mov/webm/mkv/avi, everything else image).
    pub fn from_path(path: PathBuf) -> Self {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        let kind = match path.extension().and_then(|e| e.to_str()) {
            Some("mp4") | Some("mov") | Some("webm") | Some("mkv") | Some("avi") => {
                MediaKind::Video
            }
            _ => MediaKind::Image,
        };
        Self {
            id: format!("m_{}", short_id()),
            file_name,
            kind,
            preview_url: None,
            path: Some(path),
        }
    }
}

/// A finalized compose action: text plus attached media.
///
/// Immutable once handed to a transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub text: String,
    pub media: Vec<UploadedMedia>,
}

impl Submission {
    pub fn new(text: impl Into<String>, media: Vec<UploadedMedia>) -> Self {
        Self {
            text: text.into(),
            media,
        }
    }

    /// File names of all attached media, in attachment order.
    pub fn media_names(&self) -> Vec<String> {
        self.media.iter().map(|m| m.file_name.clone()).collect()
    }
}

/// Per-agent configuration held by the registry.
///
/// Exactly one record exists per [`AgentId`]; `id` never changes after
/// creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentConfig {
    pub id: AgentId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub enabled: bool,
}

/// Severity of a single finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        };
        f.write_str(s)
    }
}

/// One flagged issue produced by an agent run. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentFinding {
    pub id: String,
    pub agent: AgentId,
    pub title: String,
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<HashMap<String, serde_json::Value>>,
}

impl AgentFinding {
    /// New finding with a fresh random id.
    pub fn new(agent: AgentId, title: impl Into<String>, severity: Severity) -> Self {
        Self {
            id: format!("f_{}", short_id()),
            agent,
            title: title.into(),
            severity,
            description: None,
            url: None,
            extra: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Everything one agent produced for one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentOutput {
    pub agent: AgentId,
    pub findings: Vec<AgentFinding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<HashMap<String, u32>>,
}

impl AgentOutput {
    /// Look up a stat counter, treating a missing map or key as zero.
    pub fn stat(&self, key: &str) -> u32 {
        self.stats
            .as_ref()
            .and_then(|s| s.get(key))
            .copied()
            .unwrap_or(0)
    }
}

/// Aggregate 0-100 risk metric for one scan. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DangerScore {
    pub value: u32,
    pub reasons: Vec<String>,
}

/// Strategy used to obtain agent outputs for a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Mock,
    Http,
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportMode::Mock => f.write_str("mock"),
            TransportMode::Http => f.write_str("http"),
        }
    }
}

impl std::str::FromStr for TransportMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "mock" => Ok(TransportMode::Mock),
            "http" => Ok(TransportMode::Http),
            other => Err(format!("unknown transport mode '{}'", other)),
        }
    }
}

/// Short random id suffix for findings and media records.
fn short_id() -> String {
    let simple = uuid::Uuid::new_v4().simple().to_string();
    simple[..7].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_id_wire_names() {
        assert_eq!(
            serde_json::to_string(&AgentId::TextLeak).unwrap(),
            "\"text-leak\""
        );
        assert_eq!(AgentId::parse("reverse-image"), Some(AgentId::ReverseImage));
        assert_eq!(AgentId::parse("bogus"), None);
        assert_eq!(AgentId::Redaction.to_string(), "redaction");
    }

    #[test]
    fn test_severity_serialization() {
        assert_eq!(serde_json::to_string(&Severity::High).unwrap(), "\"high\"");
        let s: Severity = serde_json::from_str("\"medium\"").unwrap();
        assert_eq!(s, Severity::Medium);
    }

    #[test]
    fn test_agent_config_camel_case() {
        let cfg = AgentConfig {
            id: AgentId::TextLeak,
            name: "Text Leak Scanner".to_string(),
            base_url: Some("https://agents.example".to_string()),
            api_key: None,
            enabled: true,
        };
        let json = serde_json::to_string(&cfg).unwrap();
        assert!(json.contains("\"baseUrl\":\"https://agents.example\""));
        assert!(!json.contains("apiKey"));
        assert!(json.contains("\"enabled\":true"));
    }

    #[test]
    fn test_agent_output_lenient_parse() {
        // Findings may omit optional fields; stats may be absent entirely.
        let json = r#"{"agent":"redaction","findings":[{"id":"f_1","agent":"redaction","title":"x","severity":"high"}]}"#;
        let out: AgentOutput = serde_json::from_str(json).unwrap();
        assert_eq!(out.agent, AgentId::Redaction);
        assert_eq!(out.findings.len(), 1);
        assert_eq!(out.stat("redactions"), 0);
    }

    #[test]
    fn test_media_kind_from_extension() {
        let m = UploadedMedia::from_path(PathBuf::from("/tmp/clip.mp4"));
        assert_eq!(m.kind, MediaKind::Video);
        assert_eq!(m.file_name, "clip.mp4");

        let m = UploadedMedia::from_path(PathBuf::from("/tmp/photo.jpg"));
        assert_eq!(m.kind, MediaKind::Image);
    }

    #[test]
    fn test_submission_media_names() {
        let sub = Submission::new(
            "hello",
            vec![
                UploadedMedia::from_path(PathBuf::from("a.jpg")),
                UploadedMedia::from_path(PathBuf::from("b.mp4")),
            ],
        );
        assert_eq!(sub.media_names(), vec!["a.jpg", "b.mp4"]);
    }

    #[test]
    fn test_finding_ids_unique() {
        let a = AgentFinding::new(AgentId::TextLeak, "t", Severity::Low);
        let b = AgentFinding::new(AgentId::TextLeak, "t", Severity::Low);
        assert_ne!(a.id, b.id);
        assert!(a.id.starts_with("f_"));
    }
}
