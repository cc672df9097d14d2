//! Data Models
//!
//! Contains the value types produced by the extraction engine.

pub mod task;

pub use task::*;
