use std::time::Duration;

/// System prompt sent with every plan generation request
pub const PLANNER_SYSTEM_PROMPT: &str = "You are a tech support planner. Return JSON only with title, description, steps[]. Keep coordinates normalized 0..1.";

/// Sampling temperature for plan generation, kept low for stable structured output
pub const PLANNER_TEMPERATURE: f64 = 0.2;

/// Upper bound for a single plan generation round trip
pub const PLANNER_TIMEOUT: Duration = Duration::from_secs(20);

/// Environment variable holding the chat completions endpoint
pub const ENV_LLM_URL: &str = "STEP_GUIDE_LLM_URL";
/// Environment variable holding the model identifier
pub const ENV_LLM_MODEL: &str = "STEP_GUIDE_LLM_MODEL";
/// Environment variable holding the optional bearer token
pub const ENV_LLM_API_KEY: &str = "STEP_GUIDE_LLM_API_KEY";

/// Default override file looked up in the working directory
pub const DEFAULT_TASKS_FILE: &str = "tasks.json";

/// Directory name used under the platform config dir
pub const APP_DIR_NAME: &str = "step-guide";

/// Maximum number of suggestions offered by the prompt
pub const MAX_SUGGESTIONS: usize = 6;

/// Ordered keyword table used by request inference. Earlier entries win ties.
pub const KEYWORDS: &[(&str, &[&str])] = &[
    ("wifi", &["wifi", "wi-fi", "wireless", "internet", "network"]),
    ("vpn", &["vpn", "remote", "tunnel", "secure access"]),
];

pub const NO_ACTIONS_MESSAGE: &str = "No automatic actions on this step.";

pub const EMPTY_REQUEST_MESSAGE: &str = "Please enter a request.";
pub const LLM_FALLBACK_MESSAGE: &str =
    "LLM unavailable or returned invalid JSON. Falling back to local library.";
pub const NOT_RECOGNIZED_MESSAGE: &str =
    "Task not recognized yet. Add tasks in tasks.json, pick a suggestion, or enable LLM.";
