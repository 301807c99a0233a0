//! Seam between task generation and whichever language-model provider is configured.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum CompletionError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("timeout")]
    Timeout,
    #[error("http {status}: {body}")]
    Http { status: u16, body: String },
    #[error("rate limited")]
    RateLimited,
    #[error("invalid api key")]
    InvalidApiKey,
    #[error("json error: {0}")]
    Serde(String),
    #[error("empty response from model")]
    EmptyResponse,
    #[error("missing api key")]
    MissingApiKey,
}

/// A single-turn text completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: Option<String>,
    pub prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Returns the model's raw text output. One attempt, no retries.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError>;
}
