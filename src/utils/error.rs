//! Error Handling
//!
//! Unified error types for the extraction engine.
//! Uses thiserror for ergonomic error definitions.

use thiserror::Error;

/// Maximum number of characters of offending content carried inside a
/// `MalformedResponse` error.
pub const EXCERPT_MAX_CHARS: usize = 200;

/// Engine-wide error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// Input rejected before any strategy ran
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Remote or agent-adjacent strategy selected without a configured credential
    #[error("Credential missing: {message}")]
    CredentialMissing { message: String },

    /// Remote call failed at the network level or returned a non-success status
    #[error("Service unavailable: {message}")]
    ServiceUnavailable {
        message: String,
        status: Option<u16>,
    },

    /// Remote or relay response could not be parsed into any valid task
    #[error("Malformed response: {message} (content starts with: {excerpt:?})")]
    MalformedResponse { message: String, excerpt: String },
}

/// Result type alias for extraction errors
pub type ExtractResult<T> = Result<T, ExtractError>;

impl ExtractError {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: msg.into(),
        }
    }

    /// Create a credential missing error
    pub fn credential_missing(msg: impl Into<String>) -> Self {
        Self::CredentialMissing {
            message: msg.into(),
        }
    }

    /// Create a service unavailable error
    pub fn service_unavailable(msg: impl Into<String>, status: Option<u16>) -> Self {
        Self::ServiceUnavailable {
            message: msg.into(),
            status,
        }
    }

    /// Create a malformed response error carrying a truncated excerpt of
    /// the content that failed to parse, to support manual recovery.
    pub fn malformed_response(msg: impl Into<String>, content: &str) -> Self {
        Self::MalformedResponse {
            message: msg.into(),
            excerpt: excerpt(content),
        }
    }
}

/// Truncate content to the excerpt budget.
pub fn excerpt(content: &str) -> String {
    content.trim().chars().take(EXCERPT_MAX_CHARS).collect()
}
