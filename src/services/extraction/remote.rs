//! Remote Extraction Service Client
//!
//! HTTP client for the remote task-extraction service, behind a trait so
//! the coordinator can be exercised without network access. The client
//! performs no retries and no backoff: a failed call is surfaced
//! immediately and the caller decides whether to try another strategy.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::utils::error::{excerpt, ExtractError, ExtractResult};

/// Default base URL of the extraction service.
const DEFAULT_BASE_URL: &str = "https://api.tasklens.app/v1";

/// Request payload for the remote service.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteRequest {
    pub text: String,
    pub project_name: String,
    pub language: String,
    pub model: String,
    pub max_tasks: u32,
    pub context: String,
}

/// A task-like object as the service returns it. Field names are
/// tolerated in several spellings; normalization into a `TaskRecord`
/// happens in the coordinator.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemoteTask {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "type", alias = "taskType")]
    pub task_type: Option<String>,
    #[serde(default)]
    pub module: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Response body from the extraction service.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemoteResponse {
    #[serde(default)]
    pub tasks: Vec<RemoteTask>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub tokens_used: Option<u32>,
    #[serde(default)]
    pub processing_time_ms: Option<u64>,
}

/// Transport to the remote extraction service.
///
/// Tests inject a scripted implementation; production uses
/// [`HttpRemoteExtractor`].
#[async_trait]
pub trait RemoteExtractor: Send + Sync {
    /// Submit text for extraction.
    async fn extract(&self, request: &RemoteRequest) -> ExtractResult<RemoteResponse>;

    /// Check that the service is reachable and accepts the configured
    /// credential.
    async fn health_check(&self) -> ExtractResult<()>;
}

/// Reqwest-backed extraction service client.
pub struct HttpRemoteExtractor {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl HttpRemoteExtractor {
    /// Create a new client with the given credential and optional base
    /// URL override.
    pub fn new(api_key: String, base_url: Option<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl RemoteExtractor for HttpRemoteExtractor {
    async fn extract(&self, request: &RemoteRequest) -> ExtractResult<RemoteResponse> {
        let response = self
            .client
            .post(self.endpoint("extract"))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| ExtractError::service_unavailable(e.to_string(), None))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ExtractError::service_unavailable(e.to_string(), None))?;

        if !(200..300).contains(&status) {
            warn!(status, "remote extractor: service returned non-success");
            return Err(http_status_error(status, &body));
        }

        debug!(bytes = body.len(), "remote extractor: response received");

        serde_json::from_str(&body).map_err(|e| {
            ExtractError::malformed_response(
                format!("failed to parse service response: {}", e),
                &body,
            )
        })
    }

    async fn health_check(&self) -> ExtractResult<()> {
        let response = self
            .client
            .get(self.endpoint("health"))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await
            .map_err(|e| ExtractError::service_unavailable(e.to_string(), None))?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            let body = response.text().await.unwrap_or_default();
            return Err(http_status_error(status, &body));
        }
        Ok(())
    }
}

/// Map a non-success HTTP status to an engine error.
pub fn http_status_error(status: u16, body: &str) -> ExtractError {
    let reason = match status {
        401 | 403 => "service rejected the configured credential".to_string(),
        429 => "service rate limit exceeded".to_string(),
        500..=599 => "service reported an internal error".to_string(),
        _ => format!("service returned HTTP {}", status),
    };
    ExtractError::service_unavailable(format!("{}: {}", reason, excerpt(body)), Some(status))
}
