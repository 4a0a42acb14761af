mod parser;

use crate::constants::{APP_DIR_NAME, DEFAULT_TASKS_FILE, ENV_LLM_API_KEY, ENV_LLM_MODEL, ENV_LLM_URL};
use std::path::{Path, PathBuf};
use tracing::warn;
use url::Url;

pub use parser::load_task_document;

/// Connection settings for remote plan generation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LlmSettings {
    /// Chat completions endpoint
    pub endpoint: Option<Url>,
    /// Model identifier sent with every request
    pub model: Option<String>,
    /// Optional bearer token
    pub api_key: Option<String>,
}

impl LlmSettings {
    /// Reads the settings from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup.
    /// Values are trimmed and empty values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let endpoint = read(ENV_LLM_URL).and_then(|raw| match Url::parse(&raw) {
            Ok(url) => Some(url),
            Err(e) => {
                warn!("Ignoring invalid {} '{}': {}", ENV_LLM_URL, raw, e);
                None
            }
        });

        LlmSettings {
            endpoint,
            model: read(ENV_LLM_MODEL),
            api_key: read(ENV_LLM_API_KEY),
        }
    }

    /// Endpoint and model, when both are present
    pub fn required(&self) -> Option<(&Url, &str)> {
        match (&self.endpoint, &self.model) {
            (Some(endpoint), Some(model)) => Some((endpoint, model.as_str())),
            _ => None,
        }
    }
}

/// Picks the override file: the explicit path, else `tasks.json` in the
/// working directory, else the one under the user config directory.
pub fn resolve_tasks_file(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    let local = PathBuf::from(DEFAULT_TASKS_FILE);
    if local.exists() {
        return local;
    }

    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME).join(DEFAULT_TASKS_FILE))
        .filter(|path| path.exists())
        .unwrap_or(local)
}
