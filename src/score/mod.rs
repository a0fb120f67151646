//! Danger score aggregation
//!
//! Folds every finding from a scan into a single 0-100 score with
//! human-readable reasons. Weights are product-tuning constants, not
//! invariants; callers that need different tuning pass their own
//! [`ScoreWeights`].

use crate::types::{AgentId, AgentOutput, DangerScore, Severity};

/// Upper bound of the danger score.
pub const MAX_SCORE: u32 = 100;

/// Severity weights and heuristic boost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreWeights {
    pub high: u32,
    pub medium: u32,
    pub low: u32,
    /// Extra points when reverse-image matches exceed `reverse_threshold`.
    pub reverse_boost: u32,
    pub reverse_threshold: u32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            high: 20,
            medium: 10,
            low: 5,
            reverse_boost: 10,
            reverse_threshold: 3,
        }
    }
}

impl ScoreWeights {
    fn for_severity(&self, severity: Severity) -> u32 {
        match severity {
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
        }
    }
}

/// Compute the danger score with the default weights.
pub fn compute_danger(outputs: &[AgentOutput]) -> DangerScore {
    compute_danger_with(&ScoreWeights::default(), outputs)
}

/// Compute the danger score with caller-supplied weights.
///
/// Deterministic pure function: reasons follow encounter order (agent order,
/// then finding order within each agent), the severity sum is clamped to
/// [0, 100] after summation, and the reverse-image boost re-clamps.
pub fn compute_danger_with(weights: &ScoreWeights, outputs: &[AgentOutput]) -> DangerScore {
    let mut sum: u32 = 0;
    let mut reasons = Vec::new();

    for out in outputs {
        for finding in &out.findings {
            sum = sum.saturating_add(weights.for_severity(finding.severity));
            reasons.push(format!(
                "{}: {} ({})",
                out.agent, finding.title, finding.severity
            ));
        }
    }

    let mut value = sum.min(MAX_SCORE);

    let reverse = outputs.iter().find(|o| o.agent == AgentId::ReverseImage);
    if let Some(reverse) = reverse {
        if reverse.stat("matches") > weights.reverse_threshold {
            value = value.saturating_add(weights.reverse_boost).min(MAX_SCORE);
            reasons.push("Multiple reverse-image matches detected".to_string());
        }
    }

    DangerScore { value, reasons }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AgentFinding;
    use std::collections::HashMap;

    fn output(agent: AgentId, severities: &[Severity], stats: &[(&str, u32)]) -> AgentOutput {
        let findings = severities
            .iter()
            .enumerate()
            .map(|(i, s)| AgentFinding::new(agent, format!("finding {}", i + 1), *s))
            .collect();
        let stats: HashMap<String, u32> =
            stats.iter().map(|(k, v)| (k.to_string(), *v)).collect();
        AgentOutput {
            agent,
            findings,
            stats: if stats.is_empty() { None } else { Some(stats) },
        }
    }

    #[test]
    fn test_empty_outputs_score_zero() {
        let score = compute_danger(&[]);
        assert_eq!(score.value, 0);
        assert!(score.reasons.is_empty());
    }

    #[test]
    fn test_severity_weights() {
        let outputs = vec![output(
            AgentId::TextLeak,
            &[Severity::High, Severity::Medium, Severity::Low],
            &[("leaks", 3)],
        )];
        let score = compute_danger(&outputs);
        assert_eq!(score.value, 35);
        assert_eq!(score.reasons.len(), 3);
        assert_eq!(score.reasons[0], "text-leak: finding 1 (high)");
        assert_eq!(score.reasons[2], "text-leak: finding 3 (low)");
    }

    #[test]
    fn test_clamped_to_100() {
        // Six high findings sum to 120, clamped after summation.
        let outputs = vec![output(AgentId::Redaction, &[Severity::High; 6], &[])];
        let score = compute_danger(&outputs);
        assert_eq!(score.value, 100);
        assert_eq!(score.reasons.len(), 6);
    }

    #[test]
    fn test_reverse_image_boost_fires_above_threshold() {
        let outputs = vec![output(
            AgentId::ReverseImage,
            &[Severity::High],
            &[("matches", 4)],
        )];
        let score = compute_danger(&outputs);
        assert_eq!(score.value, 30);
        assert_eq!(score.reasons.len(), 2);
        assert_eq!(
            score.reasons.last().unwrap(),
            "Multiple reverse-image matches detected"
        );
    }

    #[test]
    fn test_reverse_image_boost_not_at_threshold() {
        let outputs = vec![output(
            AgentId::ReverseImage,
            &[Severity::High],
            &[("matches", 3)],
        )];
        let score = compute_danger(&outputs);
        assert_eq!(score.value, 20);
        assert_eq!(score.reasons.len(), 1);
    }

    #[test]
    fn test_reverse_image_missing_stats_defaults_zero() {
        let outputs = vec![output(AgentId::ReverseImage, &[Severity::Low], &[])];
        let score = compute_danger(&outputs);
        assert_eq!(score.value, 5);
        assert_eq!(score.reasons.len(), 1);
    }

    #[test]
    fn test_boost_reclamps() {
        let mut outputs = vec![output(AgentId::TextLeak, &[Severity::High; 5], &[])];
        outputs.push(output(
            AgentId::ReverseImage,
            &[Severity::High],
            &[("matches", 10)],
        ));
        let score = compute_danger(&outputs);
        assert_eq!(score.value, 100);
        // 6 finding reasons plus the boost reason.
        assert_eq!(score.reasons.len(), 7);
    }

    #[test]
    fn test_reason_order_follows_agent_order() {
        let outputs = vec![
            output(AgentId::TextLeak, &[Severity::Medium], &[]),
            output(AgentId::Redaction, &[Severity::High], &[]),
        ];
        let score = compute_danger(&outputs);
        assert!(score.reasons[0].starts_with("text-leak:"));
        assert!(score.reasons[1].starts_with("redaction:"));
    }

    #[test]
    fn test_custom_weights() {
        let weights = ScoreWeights {
            high: 50,
            medium: 25,
            low: 1,
            reverse_boost: 0,
            reverse_threshold: 0,
        };
        let outputs = vec![output(AgentId::TextLeak, &[Severity::High, Severity::Low], &[])];
        let score = compute_danger_with(&weights, &outputs);
        assert_eq!(score.value, 51);
    }

    #[test]
    fn test_deterministic() {
        let outputs = vec![output(
            AgentId::ReverseImage,
            &[Severity::High, Severity::Low],
            &[("matches", 5)],
        )];
        assert_eq!(compute_danger(&outputs), compute_danger(&outputs));
    }
}
