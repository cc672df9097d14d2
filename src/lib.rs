//! TaskLens - Task Extraction Engine
//!
//! Turns free-form project descriptions into structured, classified task
//! records ready to track. Three interchangeable strategies converge on
//! one result contract:
//! - Local: deterministic keyword heuristics, no network
//! - RemoteService: a remote task-extraction service over HTTP
//! - AgentRelay: a generated prompt handed to an external reasoning
//!   agent by hand, whose pasted reply is parsed back into tasks
//!
//! The engine owns no state past a call and never persists anything;
//! the host application takes full ownership of every result.

pub mod models;
pub mod services;
pub mod utils;

// Re-export the public surface at the crate root
pub use models::task::{ExtractionResult, RemoteStats, TaskRecord, TaskType, STATUS_NOT_START};
pub use services::extraction::types::{
    EngineConfig, ExtractionRequest, ExtractionStrategy, RequestOptions,
};
pub use services::extraction::{ExtractionEngine, ExtractionOutcome, StrategyAvailability};
pub use utils::error::{ExtractError, ExtractResult};
