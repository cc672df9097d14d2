//! Services
//!
//! Business logic services for the extraction engine.

pub mod extraction;

pub use extraction::{ExtractionEngine, ExtractionOutcome, StrategyAvailability};
