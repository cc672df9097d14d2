//! Title & Summary Generator
//!
//! Derives a short title and summary for an extraction unit. This is a
//! deterministic, explainable heuristic rather than a generative step:
//! the same unit text always yields the same title and summary.

use super::keywords::{first_match, ACTION_KEYWORDS, FEATURE_KEYWORDS, ISSUE_KEYWORDS};

/// Character budget for the token-based title fallback.
const TITLE_FALLBACK_MAX: usize = 20;

/// Character budget for the summary fallback.
const SUMMARY_FALLBACK_MAX: usize = 15;

/// Titles shorter than this get the project name prefixed.
const SHORT_TITLE_LEN: usize = 10;

/// Summaries use at most this many matched keywords.
const SUMMARY_MAX_KEYWORDS: usize = 3;

/// Derive a title and summary for one unit of text.
pub fn generate(project_name: &str, text: &str) -> (String, String) {
    let title = derive_title(project_name, text);
    let summary = derive_summary(text);
    (title, summary)
}

/// Derive a short title.
///
/// Preference order: an action keyword paired with the first category
/// keyword after it, then the action keyword with its following token,
/// then "Implement {feature}" / "Fix {issue}", then the first three
/// tokens truncated. Short results get the project name prefixed so the
/// title stays meaningful out of context.
fn derive_title(project_name: &str, text: &str) -> String {
    let tokens = tokenize(text);

    let raw = action_title(&tokens)
        .or_else(|| category_title(text))
        .unwrap_or_else(|| {
            let head: Vec<&str> = tokens.iter().take(3).map(String::as_str).collect();
            truncate_with_ellipsis(&head.join(" "), TITLE_FALLBACK_MAX)
        });

    let title = capitalize(&raw);
    if title.chars().count() < SHORT_TITLE_LEN {
        format!("{} - {}", project_name, title)
    } else {
        title
    }
}

/// Title from an action keyword paired with a category keyword or the
/// token that follows the action word.
fn action_title(tokens: &[String]) -> Option<String> {
    let (idx, action) = tokens.iter().enumerate().find_map(|(i, token)| {
        first_match(token, ACTION_KEYWORDS).map(|kw| (i, kw))
    })?;

    let category = tokens.iter().skip(idx + 1).find_map(|token| {
        first_match(token, FEATURE_KEYWORDS).or_else(|| first_match(token, ISSUE_KEYWORDS))
    });

    match category {
        Some(kw) => Some(format!("{} {}", action, kw)),
        None => match tokens.get(idx + 1) {
            Some(next) => Some(format!("{} {}", action, next)),
            None => Some(action.to_string()),
        },
    }
}

/// Title from a bare category keyword when no action keyword exists.
fn category_title(text: &str) -> Option<String> {
    let lower = text.to_lowercase();
    if let Some(feature) = first_match(&lower, FEATURE_KEYWORDS) {
        return Some(format!("implement {}", feature));
    }
    first_match(&lower, ISSUE_KEYWORDS).map(|issue| format!("fix {}", issue))
}

/// Derive a short summary: the first few matched keywords in text order,
/// or a truncated slice of the unit text when nothing matches.
pub(crate) fn derive_summary(text: &str) -> String {
    let mut matched: Vec<&str> = Vec::new();

    for token in tokenize(text) {
        let hit = first_match(&token, ISSUE_KEYWORDS)
            .or_else(|| first_match(&token, FEATURE_KEYWORDS))
            .or_else(|| first_match(&token, ACTION_KEYWORDS));
        if let Some(kw) = hit {
            if !matched.contains(&kw) {
                matched.push(kw);
            }
            if matched.len() == SUMMARY_MAX_KEYWORDS {
                break;
            }
        }
    }

    if matched.is_empty() {
        truncate_with_ellipsis(text.trim(), SUMMARY_FALLBACK_MAX)
    } else {
        matched.join(" ")
    }
}

/// Lowercased tokens split on whitespace and punctuation.
fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| c.is_whitespace() || c.is_ascii_punctuation())
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Uppercase the first character.
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Truncate to a character budget, marking the cut with an ellipsis.
pub(crate) fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let head: String = text.chars().take(max_chars).collect();
        format!("{}...", head)
    }
}
