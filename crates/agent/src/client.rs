//! HTTP client for the orchestrator's worker endpoints.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use distcalc_core::TaskResultRequest;

use crate::error::AgentError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// A task as received over the wire. The operator stays a raw symbol so an
/// unknown one is reported as a failed evaluation rather than a decode error.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReceivedTask {
    pub id: String,
    pub arg1: f64,
    pub arg2: f64,
    pub operation: String,
    #[serde(default)]
    pub operation_time: u64,
}

#[derive(Deserialize)]
struct TaskEnvelope {
    task: ReceivedTask,
}

/// Where workers pull tasks from and push results to.
#[async_trait]
pub trait TaskSource: Send + Sync {
    /// `Ok(None)` means the queue is empty right now.
    async fn fetch_task(&self) -> Result<Option<ReceivedTask>, AgentError>;

    async fn submit_result(&self, result: &TaskResultRequest) -> Result<(), AgentError>;
}

/// Client for the orchestrator REST API.
pub struct OrchestratorClient {
    base_url: String,
    http: reqwest::Client,
}

impl OrchestratorClient {
    pub fn new(base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        let http = reqwest::Client::new();
        Self { base_url, http }
    }

    fn task_url(&self) -> String {
        format!("{}/internal/task", self.base_url)
    }

    async fn error_from(resp: reqwest::Response) -> AgentError {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        AgentError::Status { status, body }
    }
}

#[async_trait]
impl TaskSource for OrchestratorClient {
    async fn fetch_task(&self) -> Result<Option<ReceivedTask>, AgentError> {
        let resp = self
            .http
            .get(self.task_url())
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !resp.status().is_success() {
            return Err(Self::error_from(resp).await);
        }

        let envelope: TaskEnvelope = resp.json().await?;
        Ok(Some(envelope.task))
    }

    async fn submit_result(&self, result: &TaskResultRequest) -> Result<(), AgentError> {
        let resp = self
            .http
            .post(self.task_url())
            .timeout(REQUEST_TIMEOUT)
            .json(result)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(Self::error_from(resp).await);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_task_envelope() {
        let body = r#"{"task":{"id":"4","arg1":13,"arg2":7,"operation":"*","operation_time":250}}"#;
        let envelope: TaskEnvelope = serde_json::from_str(body).unwrap();
        assert_eq!(
            envelope.task,
            ReceivedTask {
                id: "4".into(),
                arg1: 13.0,
                arg2: 7.0,
                operation: "*".into(),
                operation_time: 250,
            }
        );
    }

    #[test]
    fn trims_trailing_slash() {
        let client = OrchestratorClient::new("http://localhost:8080/");
        assert_eq!(client.task_url(), "http://localhost:8080/internal/task");
    }
}
