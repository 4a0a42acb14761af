use super::library::TaskLibrary;
use super::matcher::{infer_task_key, suggest_tasks};
use super::sequencer::StepSequencer;
use super::task::Task;
use crate::agents::ActionAgent;
use crate::constants::{
    EMPTY_REQUEST_MESSAGE, KEYWORDS, LLM_FALLBACK_MESSAGE, NOT_RECOGNIZED_MESSAGE,
};
use crate::llm::{PlanOutcome, PlanProvider};
use tracing::{debug, info};

/// How a request was turned into a task, if at all
#[derive(Debug)]
pub enum Resolution {
    /// The model produced a bespoke plan
    Generated(Task),
    /// A library task was picked; `llm_fallback` is set when the model was asked first
    Library {
        id: String,
        task: Task,
        llm_fallback: bool,
    },
    /// Nothing matched the request
    NotRecognized { llm_fallback: bool },
    /// The request was blank
    EmptyRequest,
}

impl Resolution {
    /// Status line to show the user for this outcome
    pub fn status_message(&self) -> Option<&'static str> {
        match self {
            Resolution::EmptyRequest => Some(EMPTY_REQUEST_MESSAGE),
            Resolution::NotRecognized { .. } => Some(NOT_RECOGNIZED_MESSAGE),
            Resolution::Library {
                llm_fallback: true, ..
            } => Some(LLM_FALLBACK_MESSAGE),
            _ => None,
        }
    }
}

/// Composition root: owns the library, the planner and the agent for one user
#[derive(Debug)]
pub struct Session {
    library: TaskLibrary,
    planner: PlanProvider,
    agent: ActionAgent,
    keywords: &'static [(&'static str, &'static [&'static str])],
}

impl Session {
    pub fn new(library: TaskLibrary, planner: PlanProvider, agent: ActionAgent) -> Self {
        Session {
            library,
            planner,
            agent,
            keywords: KEYWORDS,
        }
    }

    pub fn library(&self) -> &TaskLibrary {
        &self.library
    }

    pub fn agent(&self) -> &ActionAgent {
        &self.agent
    }

    pub fn planner_configured(&self) -> bool {
        self.planner.is_configured()
    }

    /// Library ids ranked against the request
    pub fn suggest(&self, request: &str) -> Vec<String> {
        suggest_tasks(request, &self.library)
    }

    /// Resolves a request into a task.
    ///
    /// When `use_llm` is set the planner is tried first. Otherwise, or when it
    /// is unavailable, `selected` (a suggestion the user picked) is used, and
    /// failing that the task inferred from keywords.
    pub async fn resolve(&self, request: &str, selected: Option<&str>, use_llm: bool) -> Resolution {
        let query = request.trim();
        if query.is_empty() {
            return Resolution::EmptyRequest;
        }

        let mut llm_fallback = false;
        if use_llm {
            match self.planner.generate(query).await {
                PlanOutcome::Plan(task) => return Resolution::Generated(task),
                PlanOutcome::Unavailable(reason) => {
                    debug!("Falling back to the library: {}", reason);
                    llm_fallback = true;
                }
            }
        }

        let key = match selected {
            Some(id) => Some(id.to_string()),
            None => infer_task_key(query, self.keywords),
        };

        match key.and_then(|id| self.library.get(&id).map(|task| (id, task.clone()))) {
            Some((id, task)) => {
                info!("Resolved request to library task '{}'", id);
                Resolution::Library {
                    id,
                    task,
                    llm_fallback,
                }
            }
            None => Resolution::NotRecognized { llm_fallback },
        }
    }

    /// Starts guidance for `task` at its first step
    pub fn start(&self, task: Task) -> StepSequencer {
        StepSequencer::new(task)
    }
}
