use thiserror::Error;

/// Failures talking to the orchestrator. Workers log these and retry.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("orchestrator returned {status}: {body}")]
    Status { status: u16, body: String },
}
