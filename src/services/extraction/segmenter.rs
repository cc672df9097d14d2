//! Unit Segmenter
//!
//! Splits raw description text into candidate task units. Two passes in
//! priority order: numbered-list markers with sentence re-splitting,
//! then plain newline boundaries. The first pass that yields at least
//! one non-trivial unit wins. Entirely deterministic; the same input
//! always produces the same unit sequence.

use regex::Regex;
use tracing::debug;

/// Minimum trimmed length for sentence-level units (numbered-list pass).
const MIN_SENTENCE_LEN: usize = 10;

/// Minimum trimmed length for line-level units (newline pass).
const MIN_LINE_LEN: usize = 5;

/// A candidate piece of work extracted from input text.
///
/// Created by the segmenter and consumed immediately by the classifiers;
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionUnit {
    /// Trimmed, non-empty candidate text
    pub text: String,
}

/// Split raw text into candidate task units.
///
/// Ordering follows discovery order in the input; textually identical
/// units are kept, not deduplicated. Zero units is a valid outcome and
/// means "nothing extracted", not an error.
pub fn segment(text: &str) -> Vec<ExtractionUnit> {
    if let Some(marker) = numbered_marker() {
        if marker.is_match(text) {
            let units = segment_numbered(text, &marker);
            if !units.is_empty() {
                debug!(units = units.len(), "segmenter: numbered-list pass");
                return units;
            }
        }
    }

    let units = segment_lines(text);
    debug!(units = units.len(), "segmenter: line pass");
    units
}

/// A leading integer followed by a period at a line start, e.g. "1." or "12."
fn numbered_marker() -> Option<Regex> {
    Regex::new(r"(?m)^\s*\d+\.").ok()
}

/// Split on numbered-list markers, then re-split every chunk on
/// sentence-terminal punctuation.
fn segment_numbered(text: &str, marker: &Regex) -> Vec<ExtractionUnit> {
    marker
        .split(text)
        .flat_map(|chunk| chunk.split(['.', '!', '?']))
        .filter_map(|fragment| retain(fragment, MIN_SENTENCE_LEN))
        .collect()
}

/// Split on newline boundaries. Input without any newline degrades to a
/// single unit covering the whole trimmed text, subject to the same
/// length check.
fn segment_lines(text: &str) -> Vec<ExtractionUnit> {
    text.lines()
        .filter_map(|line| retain(line, MIN_LINE_LEN))
        .collect()
}

/// Keep a fragment only if its trimmed length exceeds the threshold.
/// Discards stray punctuation and empty fragments.
fn retain(fragment: &str, min_len: usize) -> Option<ExtractionUnit> {
    let trimmed = fragment.trim();
    if trimmed.chars().count() > min_len {
        Some(ExtractionUnit {
            text: trimmed.to_string(),
        })
    } else {
        None
    }
}
