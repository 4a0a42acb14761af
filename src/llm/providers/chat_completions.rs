use super::{LlmError, LlmProvider};
use crate::constants::{PLANNER_TEMPERATURE, PLANNER_TIMEOUT};
use crate::llm::ChatMessage;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Provider for any endpoint speaking the OpenAI chat completions protocol
#[derive(Debug)]
pub struct ChatCompletionsProvider {
    client: Client,
    /// Full URL of the chat completions route
    endpoint: Url,
    /// Model identifier sent with each request
    model: String,
    /// Bearer token, when the endpoint needs one
    api_key: Option<String>,
}

impl ChatCompletionsProvider {
    /// Creates a provider whose requests are bounded by the planner timeout
    pub fn new(endpoint: Url, model: &str, api_key: Option<String>) -> Result<Self, LlmError> {
        Self::with_timeout(endpoint, model, api_key, PLANNER_TIMEOUT)
    }

    pub fn with_timeout(
        endpoint: Url,
        model: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(ChatCompletionsProvider {
            client,
            endpoint,
            model: model.to_string(),
            api_key,
        })
    }
}

#[async_trait]
impl LlmProvider for ChatCompletionsProvider {
    /// Posts the conversation and returns `choices[0].message.content`.
    /// A response without that field yields an empty string.
    async fn call_llm_api(&self, messages: Vec<ChatMessage>) -> Result<String, LlmError> {
        let request_body = json!({
          "model": self.model,
          "messages": messages,
          "temperature": PLANNER_TEMPERATURE
        });

        let mut request = self.client.post(self.endpoint.clone()).json(&request_body);
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let res = request.send().await?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            return Err(LlmError::Status { status, body });
        }

        let text = res.text().await?;
        let json_resp: serde_json::Value =
            serde_json::from_str(&text).map_err(|e| LlmError::InvalidBody(e.to_string()))?;
        debug!("Chat completion response: {}", json_resp);

        Ok(json_resp["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or_default()
            .to_string())
    }
}
