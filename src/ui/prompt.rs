use super::{display_header, display_status};
use crate::constants::{LLM_FALLBACK_MESSAGE, MAX_SUGGESTIONS};
use crate::core::{Resolution, Session, Task};
use crate::errors::Result;
use colored::*;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use indicatif::ProgressBar;
use std::time::Duration;
use tracing::debug;

/// Asks what the user needs help with until a task is found.
///
/// # Arguments
/// * `session` - Session holding library, planner and agent
/// * `initial_request` - Request passed on the command line, used for the first round
/// * `use_llm` - Whether to try the planner before the library
///
/// # Returns
/// * `Result<Task>` - The task to guide the user through
pub async fn prompt_for_task(
    session: &Session,
    initial_request: Option<String>,
    use_llm: bool,
) -> Result<Task> {
    let mut pending = initial_request;

    loop {
        display_header("🛟 What do you want help with?");
        println!(
            "{}\n",
            "Examples: \"connect to vpn\", \"connect to wifi\". Configure an LLM to generate a custom flow."
                .italic()
        );

        let request = match pending.take() {
            Some(request) => request,
            None => Input::<String>::with_theme(&ColorfulTheme::default())
                .with_prompt("📝 Your request")
                .allow_empty(true)
                .interact_text()?,
        };

        if use_llm && session.planner_configured() && !request.trim().is_empty() {
            let spinner = ProgressBar::new_spinner();
            spinner.set_message("Generating a plan...");
            spinner.enable_steady_tick(Duration::from_millis(120));
            let resolution = session.resolve(&request, None, true).await;
            spinner.finish_and_clear();

            match resolution {
                Resolution::Generated(task) => return Ok(task),
                Resolution::Library { llm_fallback, .. }
                | Resolution::NotRecognized { llm_fallback }
                    if llm_fallback =>
                {
                    display_status(LLM_FALLBACK_MESSAGE)
                }
                _ => {}
            }
        }

        let selected = pick_suggestion(session, &request)?;
        let resolution = session.resolve(&request, selected.as_deref(), false).await;

        if let Some(message) = resolution.status_message() {
            display_status(message);
        }
        match resolution {
            Resolution::Generated(task) => return Ok(task),
            Resolution::Library { id, task, .. } => {
                debug!("Starting library guide '{}'", id);
                return Ok(task);
            }
            _ => {}
        }

        Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt("Press enter to try again")
            .allow_empty(true)
            .interact_text()?;
    }
}

/// Offers the best matching library tasks; `None` means match on keywords instead
fn pick_suggestion(session: &Session, request: &str) -> Result<Option<String>> {
    if request.trim().is_empty() {
        return Ok(None);
    }

    let suggestions: Vec<String> = session
        .suggest(request)
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .collect();

    let mut items: Vec<String> = suggestions
        .iter()
        .filter_map(|id| {
            session
                .library()
                .get(id)
                .map(|task| format!("{}  [{}]", task.title, id))
        })
        .collect();
    items.push("None of these (match my words)".to_string());

    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Suggested guides")
        .items(&items)
        .default(0)
        .interact()?;

    Ok(suggestions.get(choice).cloned())
}
