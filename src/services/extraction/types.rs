//! Extraction Types
//!
//! Configuration, strategy selection, and request types for the
//! extraction engine.

use serde::{Deserialize, Serialize};

/// The three interchangeable extraction backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionStrategy {
    /// Pure keyword heuristics, no network.
    Local,
    /// Remote task-extraction service over HTTP.
    RemoteService,
    /// Manual hand-off to an external reasoning agent.
    AgentRelay,
}

impl std::fmt::Display for ExtractionStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractionStrategy::Local => write!(f, "local"),
            ExtractionStrategy::RemoteService => write!(f, "remote_service"),
            ExtractionStrategy::AgentRelay => write!(f, "agent_relay"),
        }
    }
}

/// Remote model catalogue entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelSpec {
    /// Identifier accepted by the remote service
    pub id: &'static str,
    /// Response token budget, used by the confidence formula
    pub max_tokens: u32,
}

/// The small fixed catalogue of model identifiers the remote service
/// accepts.
pub const MODEL_CATALOGUE: &[ModelSpec] = &[
    ModelSpec {
        id: "glm-4-flash",
        max_tokens: 4096,
    },
    ModelSpec {
        id: "glm-4-air",
        max_tokens: 8192,
    },
    ModelSpec {
        id: "glm-4-plus",
        max_tokens: 8192,
    },
];

/// Look up a catalogue entry by identifier.
pub fn model_spec(id: &str) -> Option<ModelSpec> {
    MODEL_CATALOGUE.iter().copied().find(|spec| spec.id == id)
}

fn default_model() -> String {
    "glm-4-flash".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

fn default_max_tasks() -> u32 {
    5
}

fn default_context() -> String {
    "Tasks belong to an enterprise software development project.".to_string()
}

/// Engine configuration, injected at construction.
///
/// Carries the shared credential for the remote/agent-adjacent service
/// so individual extraction calls stay referentially transparent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Credential for the remote extraction service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Base URL override for the remote service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Remote model identifier, one of [`MODEL_CATALOGUE`]
    #[serde(default = "default_model")]
    pub model: String,
    /// Language hint forwarded to the service
    #[serde(default = "default_language")]
    pub language: String,
    /// Advisory upper bound on extracted tasks, not strictly enforced
    /// by the service
    #[serde(default = "default_max_tasks")]
    pub max_tasks: u32,
    /// Free-text context hint forwarded to the service
    #[serde(default = "default_context")]
    pub context: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            model: default_model(),
            language: default_language(),
            max_tasks: default_max_tasks(),
            context: default_context(),
        }
    }
}

impl EngineConfig {
    /// Whether a non-blank credential is configured.
    pub fn has_credential(&self) -> bool {
        self.api_key
            .as_deref()
            .map(str::trim)
            .is_some_and(|key| !key.is_empty())
    }
}

/// Per-request overrides for remote extraction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestOptions {
    /// Optional model override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_override: Option<String>,
    /// Optional max-tasks override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tasks_override: Option<u32>,
    /// Optional language override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_override: Option<String>,
    /// Optional context override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_override: Option<String>,
}

/// A single extraction request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionRequest {
    /// Project the tasks belong to
    pub project_name: String,
    /// Free-form description text
    pub text: String,
    /// Which backend to dispatch to
    pub strategy: ExtractionStrategy,
    /// Per-request overrides
    #[serde(default)]
    pub options: RequestOptions,
}

impl ExtractionRequest {
    /// Convenience constructor with default options.
    pub fn new(
        project_name: impl Into<String>,
        text: impl Into<String>,
        strategy: ExtractionStrategy,
    ) -> Self {
        Self {
            project_name: project_name.into(),
            text: text.into(),
            strategy,
            options: RequestOptions::default(),
        }
    }
}
