use super::{
    build_validator, validate_document, ChatCompletionsProvider, ChatMessage, LlmError,
    LlmProvider, TASK_SCHEMA,
};
use crate::config::LlmSettings;
use crate::constants::PLANNER_SYSTEM_PROMPT;
use crate::core::{Task, TaskSource};
use crate::utils::extract_json_blob;
use jsonschema::Validator;
use serde_json::json;
use std::fmt;
use tracing::{debug, error, info, warn};

/// Why remote planning produced no task
#[derive(Debug, thiserror::Error)]
pub enum UnavailableReason {
    #[error("remote planning is not configured")]
    NotConfigured,
    #[error(transparent)]
    Request(#[from] LlmError),
    #[error("model output is not JSON")]
    NotJson,
    #[error("model output has no steps")]
    MissingSteps,
    #[error("model output does not describe a task: {0}")]
    InvalidShape(String),
}

/// Result of a plan generation attempt
#[derive(Debug)]
pub enum PlanOutcome {
    Plan(Task),
    Unavailable(UnavailableReason),
}

/// Generates bespoke plans through a language model.
///
/// Every failure (missing configuration, network trouble, unusable output)
/// ends up as [`PlanOutcome::Unavailable`]; nothing is propagated as an error.
pub struct PlanProvider {
    backend: Option<Backend>,
}

/// A model together with the compiled schema its answers are checked against
struct Backend {
    provider: Box<dyn LlmProvider>,
    validator: Validator,
}

impl fmt::Debug for PlanProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlanProvider")
            .field("provider", &self.backend.as_ref().map(|b| &b.provider))
            .finish()
    }
}

impl PlanProvider {
    /// Builds the provider from settings; without endpoint and model it stays disabled
    pub fn from_settings(settings: &LlmSettings) -> Self {
        let Some((endpoint, model)) = settings.required() else {
            debug!("Remote planning disabled: endpoint or model missing");
            return Self::disabled();
        };

        match ChatCompletionsProvider::new(endpoint.clone(), model, settings.api_key.clone()) {
            Ok(provider) => {
                info!("Remote planning enabled with model {} at {}", model, endpoint);
                Self::with_provider(Box::new(provider))
            }
            Err(e) => {
                warn!("Remote planning disabled: {}", e);
                Self::disabled()
            }
        }
    }

    /// Wraps `provider`, compiling the plan schema once for all later answers
    pub fn with_provider(provider: Box<dyn LlmProvider>) -> Self {
        match build_validator(TASK_SCHEMA) {
            Ok(validator) => PlanProvider {
                backend: Some(Backend {
                    provider,
                    validator,
                }),
            },
            Err(e) => {
                error!("Remote planning disabled: plan schema does not compile: {}", e);
                Self::disabled()
            }
        }
    }

    pub fn disabled() -> Self {
        PlanProvider { backend: None }
    }

    pub fn is_configured(&self) -> bool {
        self.backend.is_some()
    }

    /// Asks the model for a plan matching `request`
    ///
    /// # Arguments
    /// * `request` - The user's free-text request
    ///
    /// # Returns
    /// * `PlanOutcome` - A task tagged `llm`, or the reason none is available
    pub async fn generate(&self, request: &str) -> PlanOutcome {
        let Some(backend) = &self.backend else {
            return PlanOutcome::Unavailable(UnavailableReason::NotConfigured);
        };

        let outcome = match backend.provider.call_llm_api(build_messages(request)).await {
            Ok(content) => parse_plan(&backend.validator, &content),
            Err(e) => Err(UnavailableReason::from(e)),
        };

        match outcome {
            Ok(task) => {
                info!("Generated plan '{}' with {} steps", task.title, task.step_count());
                PlanOutcome::Plan(task)
            }
            Err(reason) => {
                warn!("Remote plan unavailable: {}", reason);
                PlanOutcome::Unavailable(reason)
            }
        }
    }
}

/// System and user messages for a plan request
pub fn build_messages(request: &str) -> Vec<ChatMessage> {
    let schema_hint = json!({
        "title": "Task title",
        "description": "Short explanation",
        "steps": [
            {
                "instruction": "What user should do",
                "target": {"x": 0.3, "y": 0.3, "w": 0.2, "h": 0.1},
                "actions": [{"type": "open_url", "value": "https://example.com"}]
            }
        ]
    });

    vec![
        ChatMessage::system(PLANNER_SYSTEM_PROMPT),
        ChatMessage::user(&format!(
            "Create a UI guidance plan for: {}\nJSON schema sample: {}",
            request, schema_hint
        )),
    ]
}

/// Turns raw model output into a task
fn parse_plan(validator: &Validator, content: &str) -> Result<Task, UnavailableReason> {
    let blob = extract_json_blob(content).ok_or(UnavailableReason::NotJson)?;
    if blob.get("steps").is_none() {
        return Err(UnavailableReason::MissingSteps);
    }

    validate_document(validator, &blob).map_err(UnavailableReason::InvalidShape)?;

    Task::from_value(blob, TaskSource::Llm)
        .map_err(|e| UnavailableReason::InvalidShape(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{ENV_LLM_MODEL, ENV_LLM_URL};
    use async_trait::async_trait;
    use mockito::Server;
    use std::time::{Duration, Instant};
    use tokio::net::TcpListener;
    use url::Url;

    #[derive(Debug)]
    struct CannedProvider(String);

    #[async_trait]
    impl LlmProvider for CannedProvider {
        async fn call_llm_api(&self, _messages: Vec<ChatMessage>) -> Result<String, LlmError> {
            Ok(self.0.clone())
        }
    }

    fn canned(content: &str) -> PlanProvider {
        PlanProvider::with_provider(Box::new(CannedProvider(content.to_string())))
    }

    fn plan(outcome: PlanOutcome) -> Task {
        match outcome {
            PlanOutcome::Plan(task) => task,
            PlanOutcome::Unavailable(reason) => panic!("no plan: {}", reason),
        }
    }

    fn http_planner(endpoint: &str, timeout: Duration) -> PlanProvider {
        let endpoint = Url::parse(endpoint).unwrap();
        let provider =
            ChatCompletionsProvider::with_timeout(endpoint, "test-model", None, timeout).unwrap();
        PlanProvider::with_provider(Box::new(provider))
    }

    #[tokio::test]
    async fn test_unavailable_without_configuration() {
        for pairs in [
            vec![],
            vec![(ENV_LLM_URL, "http://localhost:1/v1/chat/completions")],
            vec![(ENV_LLM_MODEL, "m")],
        ] {
            let settings = LlmSettings::from_lookup(|key| {
                pairs
                    .iter()
                    .find(|(k, _)| *k == key)
                    .map(|(_, v)| v.to_string())
            });
            let provider = PlanProvider::from_settings(&settings);
            assert!(!provider.is_configured());
            assert!(matches!(
                provider.generate("connect to wifi").await,
                PlanOutcome::Unavailable(UnavailableReason::NotConfigured)
            ));
        }
    }

    #[tokio::test]
    async fn test_fenced_plan_becomes_llm_task() {
        let provider = canned(
            "```json\n{\"title\": \"Mute audio\", \"description\": \"Silence the speakers\", \"steps\": [{\"instruction\": \"Press mute\", \"actions\": [{\"type\": \"hotkey\", \"value\": \"volumemute\"}]}]}\n```",
        );

        let task = plan(provider.generate("mute my sound").await);
        assert_eq!(task.title, "Mute audio");
        assert_eq!(task.source, TaskSource::Llm);
        assert_eq!(task.steps()[0].actions[0].value, "volumemute");
    }

    #[tokio::test]
    async fn test_unusable_output_is_unavailable() {
        let cases = [
            ("I cannot help with that.", "not json"),
            ("{\"title\": \"t\", \"description\": \"d\"}", "missing steps"),
            ("{\"title\": \"t\", \"steps\": [{\"instruction\": \"i\"}]}", "missing description"),
            ("{\"title\": \"t\", \"description\": \"d\", \"steps\": []}", "empty steps"),
            ("{\"title\": \"t\", \"description\": \"d\", \"steps\": [{\"text\": \"i\"}]}", "no instruction"),
        ];

        for (content, label) in cases {
            assert!(
                matches!(canned(content).generate("x").await, PlanOutcome::Unavailable(_)),
                "{} should be unavailable",
                label
            );
        }
    }

    #[test]
    fn test_messages_embed_request_and_schema() {
        let messages = build_messages("connect to the printer");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[0].content, PLANNER_SYSTEM_PROMPT);
        assert_eq!(messages[1].role, "user");
        assert!(messages[1]
            .content
            .starts_with("Create a UI guidance plan for: connect to the printer\nJSON schema sample: {"));
        assert!(messages[1].content.contains("\"instruction\":\"What user should do\""));
    }

    #[tokio::test]
    async fn test_generate_over_http() {
        let mut server = Server::new_async().await;
        let content = "{\"title\": \"Open mail\", \"description\": \"Start the mail client\", \"steps\": [{\"instruction\": \"Open it\"}, {\"instruction\": \"Read\"}]}";
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_body(json!({"choices": [{"message": {"role": "assistant", "content": content}}]}).to_string())
            .create_async()
            .await;

        let settings = LlmSettings::from_lookup(|key| match key {
            ENV_LLM_URL => Some(format!("{}/v1/chat/completions", server.url())),
            ENV_LLM_MODEL => Some("test-model".to_string()),
            _ => None,
        });
        let provider = PlanProvider::from_settings(&settings);

        let task = plan(provider.generate("check my email").await);
        assert_eq!(task.step_count(), 2);
        assert_eq!(task.source, TaskSource::Llm);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_server_error_is_unavailable() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(500)
            .create_async()
            .await;

        let settings = LlmSettings::from_lookup(|key| match key {
            ENV_LLM_URL => Some(format!("{}/v1/chat/completions", server.url())),
            ENV_LLM_MODEL => Some("test-model".to_string()),
            _ => None,
        });

        assert!(matches!(
            PlanProvider::from_settings(&settings).generate("x").await,
            PlanOutcome::Unavailable(UnavailableReason::Request(_))
        ));
    }

    #[tokio::test]
    async fn test_stalled_endpoint_times_out() {
        // Accepts connections but never answers
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let planner = http_planner(
            &format!("http://{}/v1/chat/completions", addr),
            Duration::from_millis(300),
        );

        let started = Instant::now();
        let outcome = planner.generate("connect to wifi").await;

        assert!(matches!(
            outcome,
            PlanOutcome::Unavailable(UnavailableReason::Request(LlmError::Transport(_)))
        ));
        assert!(started.elapsed() < Duration::from_secs(5));
        drop(listener);
    }

    #[tokio::test]
    async fn test_refused_connection_is_unavailable() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let planner = http_planner(
            &format!("http://{}/v1/chat/completions", addr),
            Duration::from_secs(5),
        );

        assert!(matches!(
            planner.generate("connect to wifi").await,
            PlanOutcome::Unavailable(UnavailableReason::Request(LlmError::Transport(_)))
        ));
    }

    #[test]
    fn test_schema_violation_names_the_problem() {
        let validator = build_validator(TASK_SCHEMA).unwrap();
        let content = "{\"title\": \"t\", \"description\": \"d\", \"steps\": [{\"instruction\": 7}]}";

        match parse_plan(&validator, content) {
            Err(UnavailableReason::InvalidShape(message)) => assert!(message.contains('7')),
            other => panic!("unexpected result: {:?}", other),
        }

        let ok = "{\"title\": \"t\", \"description\": \"d\", \"steps\": [{\"instruction\": \"i\"}]}";
        assert_eq!(parse_plan(&validator, ok).unwrap().step_count(), 1);
        assert_eq!(parse_plan(&validator, ok).unwrap().source, TaskSource::Llm);
    }
}
