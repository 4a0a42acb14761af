use serde::Deserialize;
use serde_json::Value;
use std::fmt;

/// An automatable side effect attached to a step.
///
/// `action_type` is an open tag; [`Action::kind`] classifies it into the set of
/// actions the agent knows how to run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Action {
    /// Raw action tag as written in the plan (e.g. "open_url")
    #[serde(rename = "type")]
    pub action_type: String,
    /// Payload whose meaning depends on the tag
    #[serde(default)]
    pub value: String,
}

/// Closed view over the action tags understood by the agent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind<'a> {
    OpenUrl(&'a str),
    OpenApp(&'a str),
    Hotkey(&'a str),
    Unrecognized(&'a str),
}

impl Action {
    /// Classifies the raw tag, carrying the value (or the unknown tag) along
    pub fn kind(&self) -> ActionKind<'_> {
        match self.action_type.as_str() {
            "open_url" => ActionKind::OpenUrl(&self.value),
            "open_app" => ActionKind::OpenApp(&self.value),
            "hotkey" => ActionKind::Hotkey(&self.value),
            other => ActionKind::Unrecognized(other),
        }
    }
}

/// Screen region expressed as fractions of the screen width and height.
/// Values are passed through untouched; interpreting them is up to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Target {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "x={:.2} y={:.2} w={:.2} h={:.2}",
            self.x, self.y, self.w, self.h
        )
    }
}

/// One instruction of a plan
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Step {
    /// Text shown to the user
    pub instruction: String,
    /// Optional region of the screen to highlight
    #[serde(default)]
    pub target: Option<Target>,
    /// Actions the agent may run for this step
    #[serde(default)]
    pub actions: Vec<Action>,
}

/// Where a task came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskSource {
    Library,
    Llm,
}

impl fmt::Display for TaskSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskSource::Library => write!(f, "library"),
            TaskSource::Llm => write!(f, "llm"),
        }
    }
}

/// Serialized shape of a task, as found in override files and LLM responses
#[derive(Debug, Clone, Deserialize)]
pub struct TaskDefinition {
    pub title: String,
    pub description: String,
    pub steps: Vec<Step>,
}

#[derive(Debug, thiserror::Error)]
pub enum TaskBuildError {
    #[error("{0}")]
    Shape(#[from] serde_json::Error),
    #[error("a task needs at least one step")]
    NoSteps,
}

/// A titled, ordered plan of steps
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub title: String,
    pub description: String,
    pub source: TaskSource,
    /// Never empty
    steps: Vec<Step>,
}

impl Task {
    /// Creates a task, rejecting an empty step list
    pub fn new(
        title: &str,
        description: &str,
        steps: Vec<Step>,
        source: TaskSource,
    ) -> Result<Self, TaskBuildError> {
        if steps.is_empty() {
            return Err(TaskBuildError::NoSteps);
        }
        Ok(Task {
            title: title.to_string(),
            description: description.to_string(),
            source,
            steps,
        })
    }

    pub fn from_definition(
        definition: TaskDefinition,
        source: TaskSource,
    ) -> Result<Self, TaskBuildError> {
        Self::new(
            &definition.title,
            &definition.description,
            definition.steps,
            source,
        )
    }

    /// Builds a task from an untyped JSON value
    ///
    /// # Arguments
    /// * `value` - Object carrying `title`, `description` and `steps`
    /// * `source` - Origin tag stored on the task
    ///
    /// # Returns
    /// * `Result<Task, TaskBuildError>` - The task, or why the value does not describe one
    pub fn from_value(value: Value, source: TaskSource) -> Result<Self, TaskBuildError> {
        let definition: TaskDefinition = serde_json::from_value(value)?;
        Self::from_definition(definition, source)
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn action(action_type: &str, value: &str) -> Action {
        Action {
            action_type: action_type.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn test_from_value_keeps_actions_in_order() {
        let value = json!({
            "title": "Print a page",
            "description": "Send the current page to the printer",
            "steps": [
                {"instruction": "Open the print dialog", "actions": [{"type": "hotkey", "value": "ctrl+p"}]},
                {"instruction": "Read the manual", "actions": [{"type": "open_url", "value": "https://example.com/print"}]}
            ]
        });

        let task = Task::from_value(value, TaskSource::Llm).unwrap();

        assert_eq!(task.source, TaskSource::Llm);
        assert_eq!(task.step_count(), 2);
        assert_eq!(task.steps()[0].actions[0].action_type, "hotkey");
        assert_eq!(task.steps()[0].actions[0].value, "ctrl+p");
        assert_eq!(task.steps()[1].actions[0].action_type, "open_url");
        assert_eq!(task.steps()[1].actions[0].value, "https://example.com/print");
    }

    #[test]
    fn test_missing_action_value_defaults_to_empty() {
        let value = json!({
            "title": "t",
            "description": "d",
            "steps": [{"instruction": "i", "actions": [{"type": "open_app"}]}]
        });

        let task = Task::from_value(value, TaskSource::Library).unwrap();
        assert_eq!(task.steps()[0].actions[0].value, "");
        assert!(task.steps()[0].target.is_none());
    }

    #[test]
    fn test_empty_steps_is_rejected() {
        let value = json!({"title": "t", "description": "d", "steps": []});
        assert!(matches!(
            Task::from_value(value, TaskSource::Library),
            Err(TaskBuildError::NoSteps)
        ));
    }

    #[test]
    fn test_missing_instruction_is_a_shape_error() {
        let value = json!({"title": "t", "description": "d", "steps": [{"target": null}]});
        assert!(matches!(
            Task::from_value(value, TaskSource::Llm),
            Err(TaskBuildError::Shape(_))
        ));
    }

    #[test]
    fn test_action_kind_classification() {
        assert_eq!(
            action("open_url", "https://a.b").kind(),
            ActionKind::OpenUrl("https://a.b")
        );
        assert_eq!(action("hotkey", "win+a").kind(), ActionKind::Hotkey("win+a"));
        assert_eq!(
            action("teleport", "x").kind(),
            ActionKind::Unrecognized("teleport")
        );
    }
}
