//! Type & Module Classifiers
//!
//! Keyword-driven labeling of extraction units. Both classifiers are
//! deterministic substring matchers over the fixed tables in
//! [`super::keywords`]; no statistical model is involved, so the same
//! unit text always yields the same labels.

use crate::models::task::TaskType;

use super::keywords::{
    count_matches, first_match, ACTION_KEYWORDS, FEATURE_KEYWORDS, ISSUE_KEYWORDS,
    MODULE_KEYWORDS, MODULE_OTHER,
};

/// Label a unit Feature or Issue.
///
/// Issue keywords dominate feature keywords even when both are present
/// in the same unit; a bug report mentioning a feature stays an Issue.
/// Action keywords only break the tie when neither category matched:
/// more than one distinct action verb reads as feature work, anything
/// else defaults to Issue.
pub fn classify_type(text: &str) -> TaskType {
    let lower = text.to_lowercase();

    if first_match(&lower, ISSUE_KEYWORDS).is_some() {
        return TaskType::Issue;
    }
    if first_match(&lower, FEATURE_KEYWORDS).is_some() {
        return TaskType::Feature;
    }
    if count_matches(&lower, ACTION_KEYWORDS) > 1 {
        TaskType::Feature
    } else {
        TaskType::Issue
    }
}

/// Label a unit with a subsystem tag.
///
/// The module table is iterated in declared order and the first module
/// with any keyword match wins; iteration stops immediately. Returns
/// "Other" when nothing matches.
pub fn classify_module(text: &str) -> String {
    let lower = text.to_lowercase();

    for (label, keywords) in MODULE_KEYWORDS {
        if keywords.iter().any(|kw| lower.contains(kw)) {
            return (*label).to_string();
        }
    }

    MODULE_OTHER.to_string()
}
