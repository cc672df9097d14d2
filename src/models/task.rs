//! Task Models
//!
//! Value types produced by the extraction engine. All of these are plain
//! data, immutable after construction; the caller takes full ownership of
//! a result once it is returned.

use serde::{Deserialize, Serialize};

/// Initial status every produced record carries. Downstream trackers may
/// move a task through their own lifecycle; the engine always emits this.
pub const STATUS_NOT_START: &str = "Not start";

/// Category of a produced work item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskType {
    Feature,
    Issue,
}

impl std::fmt::Display for TaskType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskType::Feature => write!(f, "Feature"),
            TaskType::Issue => write!(f, "Issue"),
        }
    }
}

/// A fully classified, titled, described piece of work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Short derived title, bounded length
    pub title: String,
    /// The originating unit text, or a richer remote-provided description
    pub description: String,
    /// Feature or Issue
    #[serde(rename = "type")]
    pub task_type: TaskType,
    /// One of the fixed module label set, or "Other"
    pub module: String,
    /// Short summary, bounded length
    pub summary: String,
    /// Always "Not start" when the engine emits the record
    pub status: String,
}

/// Usage statistics reported by the remote extraction service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteStats {
    /// Model the service says it used
    pub model: String,
    /// Tokens consumed by the service call
    pub tokens_used: u32,
    /// Wall-clock processing time reported by the service
    pub processing_time_ms: u64,
}

/// The return value of any extraction strategy.
///
/// `tasks` preserves discovery order in the input; the engine never
/// reorders or deduplicates. `stats` is present only for remote-backed
/// strategies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub tasks: Vec<TaskRecord>,
    /// One-line description of the batch
    pub summary: String,
    /// Heuristic quality estimate in [0, 0.95]
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<RemoteStats>,
}
