//! Local Extraction Integration Tests
//!
//! Exercises the full local pipeline (segmenter, classifiers, title and
//! summary generation, batch summary) through the engine's single entry
//! point. No network is involved anywhere in these tests.

use tasklens::{
    EngineConfig, ExtractError, ExtractionEngine, ExtractionOutcome, ExtractionRequest,
    ExtractionResult, ExtractionStrategy, TaskType, STATUS_NOT_START,
};

fn engine() -> ExtractionEngine {
    ExtractionEngine::new(EngineConfig::default())
}

fn local_request(text: &str) -> ExtractionRequest {
    ExtractionRequest::new("CRM", text, ExtractionStrategy::Local)
}

async fn extract_local(text: &str) -> ExtractionResult {
    match engine().extract(&local_request(text)).await.unwrap() {
        ExtractionOutcome::Completed(result) => result,
        ExtractionOutcome::RelayPrompt(_) => panic!("Expected Completed outcome"),
    }
}

// ============================================================================
// Numbered-list round trip
// ============================================================================

#[tokio::test]
async fn test_numbered_list_round_trip() {
    let result = extract_local("1. Fix login bug\n2. Add export button").await;

    assert_eq!(result.tasks.len(), 2);
    assert_eq!(result.tasks[0].description, "Fix login bug");
    assert_eq!(result.tasks[0].task_type, TaskType::Issue);
    assert_eq!(result.tasks[1].description, "Add export button");
    assert_eq!(result.tasks[1].task_type, TaskType::Feature);
    assert_eq!(result.summary, "2 tasks identified (1 features, 1 issues)");
}

#[tokio::test]
async fn test_every_record_is_fully_populated() {
    let result = extract_local("1. Fix login bug\n2. Add export button").await;

    for task in &result.tasks {
        assert!(!task.title.is_empty());
        assert!(!task.description.is_empty());
        assert!(!task.module.is_empty());
        assert!(!task.summary.is_empty());
        assert_eq!(task.status, STATUS_NOT_START);
    }
}

// ============================================================================
// Determinism and idempotence
// ============================================================================

#[tokio::test]
async fn test_local_extraction_is_idempotent() {
    let text = "1. Fix login bug\n2. Add export button\n3. Update the compliance report";
    let first = extract_local(text).await;
    let second = extract_local(text).await;
    assert_eq!(first, second);
}

// ============================================================================
// Module classification ordering
// ============================================================================

#[tokio::test]
async fn test_module_priority_order_is_respected() {
    // "user" and "compliance" keywords both match; Compliance is
    // declared earlier in the module table and must win.
    let result = extract_local("users need a compliance matrix for the audit").await;
    assert_eq!(result.tasks.len(), 1);
    assert_eq!(result.tasks[0].module, "Compliance");
}

#[tokio::test]
async fn test_unmatched_module_defaults_to_other() {
    let result = extract_local("miscellaneous housekeeping chores everywhere").await;
    assert_eq!(result.tasks.len(), 1);
    assert_eq!(result.tasks[0].module, "Other");
}

// ============================================================================
// Confidence and empty batches
// ============================================================================

#[tokio::test]
async fn test_local_confidence_is_fixed() {
    let result = extract_local("1. Fix login bug\n2. Add export button").await;
    assert!((result.confidence - 0.8).abs() < 1e-9);
    assert!(result.stats.is_none());
}

#[tokio::test]
async fn test_confidence_stays_within_bounds() {
    let inputs = [
        "1. Fix login bug",
        "a\nb\nc",
        "implement the new dashboard with charts and filters",
        "1. one\n2. two\n3. three\n4. four\n5. five\n6. six\n7. seven\n8. eight\n9. nine",
    ];
    for input in inputs {
        let result = extract_local(input).await;
        assert!(result.confidence >= 0.0, "input {:?}", input);
        assert!(result.confidence <= 0.95, "input {:?}", input);
    }
}

#[tokio::test]
async fn test_empty_batch_is_not_an_error() {
    // Nothing passes the minimum-length thresholds.
    let result = extract_local("a. b.").await;
    assert!(result.tasks.is_empty());
    assert_eq!(result.summary, "No tasks identified");
}

// ============================================================================
// Input validation
// ============================================================================

#[tokio::test]
async fn test_blank_text_is_rejected() {
    let err = engine().extract(&local_request("   ")).await.unwrap_err();
    assert!(matches!(err, ExtractError::InvalidInput { .. }));
}

#[tokio::test]
async fn test_blank_project_name_is_rejected() {
    let request = ExtractionRequest::new("  ", "fix the bug", ExtractionStrategy::Local);
    let err = engine().extract(&request).await.unwrap_err();
    assert!(matches!(err, ExtractError::InvalidInput { .. }));
}

// ============================================================================
// Strategy availability
// ============================================================================

#[tokio::test]
async fn test_availability_without_credential() {
    let availability = engine().strategy_availability().await;
    assert!(availability.local);
    assert!(!availability.remote_service);
    assert!(!availability.agent_relay);
}
