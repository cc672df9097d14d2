//! Task Extraction Engine
//!
//! Coordinates the three extraction strategies and converges their
//! output on a single result contract. Strategy dispatch is a plain enum
//! match with one normalization path per arm; only the remote transport
//! hides behind a trait, so tests can script it.
//!
//! The engine is stateless per call. The shared credential lives in the
//! injected [`EngineConfig`]; concurrent `extract` calls are independent
//! and never block each other.

pub mod classifier;
pub mod confidence;
pub mod generator;
pub mod keywords;
pub mod relay;
pub mod remote;
pub mod segmenter;
pub mod types;

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::models::task::{ExtractionResult, RemoteStats, TaskRecord, TaskType, STATUS_NOT_START};
use crate::utils::error::{ExtractError, ExtractResult};

use self::confidence::TokenUsage;
use self::keywords::MODULE_OTHER;
use self::remote::{HttpRemoteExtractor, RemoteExtractor, RemoteRequest, RemoteTask};
use self::types::{EngineConfig, ExtractionRequest, ExtractionStrategy};

/// Outcome of a single `extract` call.
#[derive(Debug, Clone)]
pub enum ExtractionOutcome {
    /// Tasks were produced directly (Local and RemoteService).
    Completed(ExtractionResult),
    /// AgentRelay step one: hand this prompt to an external agent, then
    /// feed the pasted reply to
    /// [`ExtractionEngine::parse_relay_response`].
    RelayPrompt(String),
}

/// Which strategies are currently usable.
#[derive(Debug, Clone, Serialize)]
pub struct StrategyAvailability {
    /// Always true; the local heuristics have no external dependency
    pub local: bool,
    /// Credential configured and the service health check passed
    pub remote_service: bool,
    /// Credential configured
    pub agent_relay: bool,
}

/// The extraction coordinator.
pub struct ExtractionEngine {
    config: EngineConfig,
    remote: Option<Arc<dyn RemoteExtractor>>,
}

impl ExtractionEngine {
    /// Create an engine from configuration. A remote client is built
    /// only when a credential is configured.
    pub fn new(config: EngineConfig) -> Self {
        let remote = if config.has_credential() {
            config.api_key.clone().map(|key| {
                Arc::new(HttpRemoteExtractor::new(key, config.base_url.clone()))
                    as Arc<dyn RemoteExtractor>
            })
        } else {
            None
        };
        Self { config, remote }
    }

    /// Create an engine with an explicit remote transport. Tests use
    /// this to inject a scripted service.
    pub fn with_remote(config: EngineConfig, remote: Arc<dyn RemoteExtractor>) -> Self {
        Self {
            config,
            remote: Some(remote),
        }
    }

    /// Single entry point: dispatch to the selected strategy.
    ///
    /// Input validation and the credential gate run before any strategy
    /// work; neither failure reaches a backend.
    pub async fn extract(&self, request: &ExtractionRequest) -> ExtractResult<ExtractionOutcome> {
        validate(request)?;

        let needs_credential = matches!(
            request.strategy,
            ExtractionStrategy::RemoteService | ExtractionStrategy::AgentRelay
        );
        if needs_credential && !self.config.has_credential() {
            return Err(ExtractError::credential_missing(format!(
                "strategy {} requires a configured credential",
                request.strategy
            )));
        }

        info!(
            strategy = %request.strategy,
            project = %request.project_name,
            "extraction started"
        );

        match request.strategy {
            ExtractionStrategy::Local => {
                Ok(ExtractionOutcome::Completed(self.extract_local(request)))
            }
            ExtractionStrategy::RemoteService => self
                .extract_remote(request)
                .await
                .map(ExtractionOutcome::Completed),
            ExtractionStrategy::AgentRelay => Ok(ExtractionOutcome::RelayPrompt(
                relay::build_prompt(&request.project_name, &request.text),
            )),
        }
    }

    /// AgentRelay step two: parse the reply the user pasted back and
    /// normalize it into the shared result contract.
    pub fn parse_relay_response(&self, pasted: &str) -> ExtractResult<ExtractionResult> {
        let tasks = relay::parse_response(pasted)?;
        let summary = confidence::batch_summary(&tasks);

        info!(tasks = tasks.len(), "relay extraction finished");

        Ok(ExtractionResult {
            tasks,
            summary,
            confidence: confidence::RELAY_CONFIDENCE,
            stats: None,
        })
    }

    /// Report which strategies are currently usable. For the remote
    /// strategy this performs the credential health check against the
    /// service.
    pub async fn strategy_availability(&self) -> StrategyAvailability {
        let has_credential = self.config.has_credential();

        let remote_service = match &self.remote {
            Some(remote) if has_credential => match remote.health_check().await {
                Ok(()) => true,
                Err(e) => {
                    warn!(error = %e, "strategy availability: remote health check failed");
                    false
                }
            },
            _ => false,
        };

        StrategyAvailability {
            local: true,
            remote_service,
            agent_relay: has_credential,
        }
    }

    /// Local strategy: segment, classify, and title every unit.
    fn extract_local(&self, request: &ExtractionRequest) -> ExtractionResult {
        let units = segmenter::segment(&request.text);

        let tasks: Vec<TaskRecord> = units
            .into_iter()
            .map(|unit| {
                let task_type = classifier::classify_type(&unit.text);
                let module = classifier::classify_module(&unit.text);
                let (title, summary) = generator::generate(&request.project_name, &unit.text);
                TaskRecord {
                    title,
                    description: unit.text,
                    task_type,
                    module,
                    summary,
                    status: STATUS_NOT_START.to_string(),
                }
            })
            .collect();

        let summary = confidence::batch_summary(&tasks);

        info!(tasks = tasks.len(), "local extraction finished");

        ExtractionResult {
            tasks,
            summary,
            confidence: confidence::LOCAL_CONFIDENCE,
            stats: None,
        }
    }

    /// Remote strategy: forward the request, normalize the response.
    async fn extract_remote(&self, request: &ExtractionRequest) -> ExtractResult<ExtractionResult> {
        let remote = self.remote.as_ref().ok_or_else(|| {
            ExtractError::credential_missing("remote extraction service is not configured")
        })?;

        let options = &request.options;
        let model = options
            .model_override
            .clone()
            .unwrap_or_else(|| self.config.model.clone());
        let spec = types::model_spec(&model)
            .ok_or_else(|| ExtractError::invalid_input(format!("unknown model: {}", model)))?;

        let wire = RemoteRequest {
            text: request.text.clone(),
            project_name: request.project_name.clone(),
            language: options
                .language_override
                .clone()
                .unwrap_or_else(|| self.config.language.clone()),
            model: model.clone(),
            max_tasks: options.max_tasks_override.unwrap_or(self.config.max_tasks),
            context: options
                .context_override
                .clone()
                .unwrap_or_else(|| self.config.context.clone()),
        };

        let response = remote.extract(&wire).await?;

        let received = response.tasks.len();
        let tasks: Vec<TaskRecord> = response
            .tasks
            .into_iter()
            .filter_map(|task| normalize_remote_task(&request.project_name, task))
            .collect();

        // A service that found nothing is a valid empty batch; a service
        // that returned only garbage objects is not.
        if received > 0 && tasks.is_empty() {
            return Err(ExtractError::malformed_response(
                format!("none of {} returned task objects were usable", received),
                &wire.text,
            ));
        }

        let usage = response.tokens_used.map(|tokens_used| TokenUsage {
            tokens_used,
            max_tokens: spec.max_tokens,
        });
        let confidence = confidence::score(&tasks, usage);

        let summary = response
            .summary
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| confidence::batch_summary(&tasks));

        let stats = Some(RemoteStats {
            model: response.model.unwrap_or(model),
            tokens_used: response.tokens_used.unwrap_or(0),
            processing_time_ms: response.processing_time_ms.unwrap_or(0),
        });

        info!(tasks = tasks.len(), "remote extraction finished");

        Ok(ExtractionResult {
            tasks,
            summary,
            confidence,
            stats,
        })
    }
}

/// Reject empty input before any strategy runs.
fn validate(request: &ExtractionRequest) -> ExtractResult<()> {
    if request.project_name.trim().is_empty() {
        return Err(ExtractError::invalid_input("project name must not be empty"));
    }
    if request.text.trim().is_empty() {
        return Err(ExtractError::invalid_input(
            "description text must not be empty",
        ));
    }
    Ok(())
}

/// Normalize one remote task object into a `TaskRecord`, filling
/// defaults and forcing the initial status. Objects with neither a
/// title nor a description are dropped.
fn normalize_remote_task(project_name: &str, task: RemoteTask) -> Option<TaskRecord> {
    let title = non_blank(task.title);
    let description = non_blank(task.description);

    let (title, description) = match (title, description) {
        (Some(t), Some(d)) => (t, d),
        (Some(t), None) => (t.clone(), t),
        (None, Some(d)) => (generator::generate(project_name, &d).0, d),
        (None, None) => return None,
    };

    let task_type = match task.task_type.map(|t| t.to_lowercase()).as_deref() {
        Some("issue") => TaskType::Issue,
        Some("feature") => TaskType::Feature,
        _ => classifier::classify_type(&description),
    };

    let module = non_blank(task.module).unwrap_or_else(|| MODULE_OTHER.to_string());
    let summary =
        non_blank(task.summary).unwrap_or_else(|| generator::derive_summary(&description));

    Some(TaskRecord {
        title,
        description,
        task_type,
        module,
        summary,
        status: STATUS_NOT_START.to_string(),
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
