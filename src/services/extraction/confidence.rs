//! Confidence Scorer
//!
//! Heuristic confidence for a produced batch, plus the one-line batch
//! summary shared by every strategy. Confidence is a bounded quality
//! estimate, not a probability: the ceiling is 0.95 so the engine never
//! reports full certainty.

use crate::models::task::{TaskRecord, TaskType};

/// Upper bound for any reported confidence.
pub const CONFIDENCE_CEILING: f64 = 0.95;

/// Fixed confidence for the local heuristic strategy, which has no
/// token-usage signal to feed the formula.
pub const LOCAL_CONFIDENCE: f64 = 0.8;

/// Fixed confidence for manually relayed agent output. Human-curated
/// hand-offs are trusted more than pure heuristics, but not treated as
/// certain.
pub const RELAY_CONFIDENCE: f64 = 0.9;

/// Batch size range that earns the size bonus.
const IDEAL_BATCH: std::ops::RangeInclusive<usize> = 3..=8;

/// Token usage reported by the remote service, with the request budget
/// it was measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenUsage {
    pub tokens_used: u32,
    pub max_tokens: u32,
}

/// Score a batch of produced tasks.
///
/// Base 0.5, plus a bonus for a plausibly-sized batch, plus a bonus
/// proportional to the fraction of well-formed tasks, plus a bonus when
/// remote token usage sits in a healthy band. Clamped to [0, 0.95].
pub fn score(tasks: &[TaskRecord], usage: Option<TokenUsage>) -> f64 {
    let mut confidence = 0.5;

    if IDEAL_BATCH.contains(&tasks.len()) {
        confidence += 0.2;
    }

    if !tasks.is_empty() {
        let valid = tasks
            .iter()
            .filter(|t| t.title.chars().count() > 5 && t.description.chars().count() > 10)
            .count();
        confidence += valid as f64 / tasks.len() as f64 * 0.2;
    }

    if let Some(usage) = usage {
        if usage.max_tokens > 0 {
            let ratio = f64::from(usage.tokens_used) / f64::from(usage.max_tokens);
            if ratio > 0.3 && ratio < 0.8 {
                confidence += 0.1;
            }
        }
    }

    confidence.clamp(0.0, CONFIDENCE_CEILING)
}

/// One-line description of a batch, shared by every strategy.
pub fn batch_summary(tasks: &[TaskRecord]) -> String {
    if tasks.is_empty() {
        return "No tasks identified".to_string();
    }

    let features = tasks
        .iter()
        .filter(|t| t.task_type == TaskType::Feature)
        .count();
    let issues = tasks.len() - features;

    format!(
        "{} tasks identified ({} features, {} issues)",
        tasks.len(),
        features,
        issues
    )
}
