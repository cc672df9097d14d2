//! Remote Strategy Integration Tests
//!
//! Exercises the remote dispatch path against a scripted transport; no
//! network access is involved. Covers normalization, confidence
//! computation from token usage, and error translation.

use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;

use tasklens::services::extraction::remote::{
    RemoteExtractor, RemoteRequest, RemoteResponse, RemoteTask,
};
use tasklens::{
    EngineConfig, ExtractError, ExtractResult, ExtractionEngine, ExtractionOutcome,
    ExtractionRequest, ExtractionResult, ExtractionStrategy, RequestOptions, TaskType,
    STATUS_NOT_START,
};

/// Scripted transport: returns a canned response and records the last
/// request it saw.
struct ScriptedRemote {
    response: ExtractResult<RemoteResponse>,
    seen: Mutex<Option<RemoteRequest>>,
}

impl ScriptedRemote {
    fn new(response: ExtractResult<RemoteResponse>) -> Arc<Self> {
        Arc::new(Self {
            response,
            seen: Mutex::new(None),
        })
    }
}

#[async_trait]
impl RemoteExtractor for ScriptedRemote {
    async fn extract(&self, request: &RemoteRequest) -> ExtractResult<RemoteResponse> {
        *self.seen.lock().unwrap() = Some(request.clone());
        self.response.clone()
    }

    async fn health_check(&self) -> ExtractResult<()> {
        self.response.as_ref().map(|_| ()).map_err(Clone::clone)
    }
}

fn config_with_credential() -> EngineConfig {
    EngineConfig {
        api_key: Some("test-key".to_string()),
        ..EngineConfig::default()
    }
}

fn remote_request(text: &str) -> ExtractionRequest {
    ExtractionRequest::new("CRM", text, ExtractionStrategy::RemoteService)
}

fn sample_response() -> RemoteResponse {
    let tasks: Vec<RemoteTask> = serde_json::from_str(
        r#"[
            {"title":"Add CSV export","description":"Users want to export reports as CSV","type":"Feature","module":"Backend","status":"In progress"},
            {"title":"Fix session drop","description":"Sessions expire too early on mobile","taskType":"Issue"},
            {"title":"Harden audit log","description":"Keep an immutable audit trail"}
        ]"#,
    )
    .unwrap();
    RemoteResponse {
        tasks,
        summary: Some("3 tasks identified (2 features, 1 issues)".to_string()),
        model: Some("glm-4-flash".to_string()),
        tokens_used: Some(2048),
        processing_time_ms: Some(740),
    }
}

async fn completed(
    engine: &ExtractionEngine,
    request: &ExtractionRequest,
) -> ExtractionResult {
    match engine.extract(request).await.unwrap() {
        ExtractionOutcome::Completed(result) => result,
        ExtractionOutcome::RelayPrompt(_) => panic!("Expected Completed outcome"),
    }
}

// ============================================================================
// Normalization
// ============================================================================

#[tokio::test]
async fn test_remote_tasks_are_normalized() {
    let remote = ScriptedRemote::new(Ok(sample_response()));
    let engine = ExtractionEngine::with_remote(config_with_credential(), remote);

    let result = completed(&engine, &remote_request("raw description")).await;

    assert_eq!(result.tasks.len(), 3);
    // Status is forced regardless of what the service said.
    for task in &result.tasks {
        assert_eq!(task.status, STATUS_NOT_START);
        assert!(!task.summary.is_empty());
    }
    assert_eq!(result.tasks[0].module, "Backend");
    assert_eq!(result.tasks[0].task_type, TaskType::Feature);
    // "taskType" spelling is accepted.
    assert_eq!(result.tasks[1].task_type, TaskType::Issue);
    // Missing module defaults to Other; missing type falls back to the
    // local classifier.
    assert_eq!(result.tasks[2].module, "Other");
}

#[tokio::test]
async fn test_remote_stats_and_confidence() {
    let remote = ScriptedRemote::new(Ok(sample_response()));
    let engine = ExtractionEngine::with_remote(config_with_credential(), remote);

    let result = completed(&engine, &remote_request("raw description")).await;

    let stats = result.stats.expect("remote results carry stats");
    assert_eq!(stats.model, "glm-4-flash");
    assert_eq!(stats.tokens_used, 2048);
    assert_eq!(stats.processing_time_ms, 740);

    // 3 well-formed tasks: 0.5 base + 0.2 size + 0.2 validity, plus 0.1
    // for 2048/4096 = 0.5 token ratio, clamped to the 0.95 ceiling.
    assert!((result.confidence - 0.95).abs() < 1e-9);
}

#[tokio::test]
async fn test_remote_request_carries_configured_fields() {
    let remote = ScriptedRemote::new(Ok(sample_response()));
    let engine = ExtractionEngine::with_remote(
        config_with_credential(),
        Arc::clone(&remote) as Arc<dyn RemoteExtractor>,
    );

    let mut request = remote_request("raw description");
    request.options = RequestOptions {
        max_tasks_override: Some(8),
        ..RequestOptions::default()
    };
    let _ = completed(&engine, &request).await;

    let seen = remote.seen.lock().unwrap().clone().expect("request sent");
    assert_eq!(seen.project_name, "CRM");
    assert_eq!(seen.language, "en");
    assert_eq!(seen.model, "glm-4-flash");
    assert_eq!(seen.max_tasks, 8);
    assert!(!seen.context.is_empty());
}

#[tokio::test]
async fn test_remote_empty_batch_is_valid() {
    let remote = ScriptedRemote::new(Ok(RemoteResponse::default()));
    let engine = ExtractionEngine::with_remote(config_with_credential(), remote);

    let result = completed(&engine, &remote_request("raw description")).await;
    assert!(result.tasks.is_empty());
    assert_eq!(result.summary, "No tasks identified");
}

// ============================================================================
// Error translation
// ============================================================================

#[tokio::test]
async fn test_service_failure_is_surfaced_not_retried() {
    let remote = ScriptedRemote::new(Err(ExtractError::service_unavailable(
        "connection refused",
        None,
    )));
    let engine = ExtractionEngine::with_remote(config_with_credential(), remote);

    let err = engine
        .extract(&remote_request("raw description"))
        .await
        .unwrap_err();
    assert!(matches!(err, ExtractError::ServiceUnavailable { .. }));
}

#[tokio::test]
async fn test_all_garbage_tasks_is_malformed() {
    let response = RemoteResponse {
        tasks: vec![RemoteTask::default(), RemoteTask::default()],
        ..RemoteResponse::default()
    };
    let remote = ScriptedRemote::new(Ok(response));
    let engine = ExtractionEngine::with_remote(config_with_credential(), remote);

    let err = engine
        .extract(&remote_request("raw description"))
        .await
        .unwrap_err();
    assert!(matches!(err, ExtractError::MalformedResponse { .. }));
}

#[tokio::test]
async fn test_unknown_model_is_rejected_before_dispatch() {
    let remote = ScriptedRemote::new(Ok(sample_response()));
    let engine = ExtractionEngine::with_remote(
        config_with_credential(),
        Arc::clone(&remote) as Arc<dyn RemoteExtractor>,
    );

    let mut request = remote_request("raw description");
    request.options.model_override = Some("gpt-99".to_string());

    let err = engine.extract(&request).await.unwrap_err();
    assert!(matches!(err, ExtractError::InvalidInput { .. }));
    assert!(remote.seen.lock().unwrap().is_none());
}

// ============================================================================
// Strategy availability
// ============================================================================

#[tokio::test]
async fn test_availability_reflects_health_check() {
    let healthy = ScriptedRemote::new(Ok(RemoteResponse::default()));
    let engine = ExtractionEngine::with_remote(config_with_credential(), healthy);
    let availability = engine.strategy_availability().await;
    assert!(availability.local);
    assert!(availability.remote_service);
    assert!(availability.agent_relay);

    let unhealthy = ScriptedRemote::new(Err(ExtractError::service_unavailable(
        "boom",
        Some(503),
    )));
    let engine = ExtractionEngine::with_remote(config_with_credential(), unhealthy);
    let availability = engine.strategy_availability().await;
    assert!(!availability.remote_service);
}
