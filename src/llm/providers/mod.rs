use crate::llm::ChatMessage;
use async_trait::async_trait;
use std::fmt::Debug;

pub mod chat_completions;

/// Errors raised while talking to a completion endpoint
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("endpoint answered with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("response body is not JSON: {0}")]
    InvalidBody(String),
}

#[async_trait]
pub trait LlmProvider: Debug + Send + Sync {
    /// Sends `messages` and returns the content of the first completion
    async fn call_llm_api(&self, messages: Vec<ChatMessage>) -> Result<String, LlmError>;
}
