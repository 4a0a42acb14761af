use super::task::{Step, Target, Task, TaskSource};
use crate::agents::ActionAgent;

/// Cursor over the steps of a task.
///
/// The index always stays within `0..task.step_count()`. Moving to another
/// step clears the status message left by the previous one.
#[derive(Debug, Clone)]
pub struct StepSequencer {
    task: Task,
    index: usize,
    status: Option<String>,
}

/// Everything a renderer needs to draw the current step
#[derive(Debug, Clone, PartialEq)]
pub struct GuideView<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub source: TaskSource,
    /// 1-based position of the current step
    pub position: usize,
    pub total: usize,
    pub instruction: &'a str,
    pub target: Option<Target>,
    pub status: Option<&'a str>,
    pub is_first: bool,
    pub is_last: bool,
}

impl StepSequencer {
    pub fn new(task: Task) -> Self {
        StepSequencer {
            task,
            index: 0,
            status: None,
        }
    }

    pub fn task(&self) -> &Task {
        &self.task
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn total(&self) -> usize {
        self.task.step_count()
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.total()
    }

    pub fn current_step(&self) -> &Step {
        &self.task.steps()[self.index]
    }

    /// Advances one step. Returns false (and changes nothing) on the last step.
    pub fn next(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.index += 1;
        self.status = None;
        true
    }

    /// Goes back one step. Returns false (and changes nothing) on the first step.
    pub fn prev(&mut self) -> bool {
        if self.is_first() {
            return false;
        }
        self.index -= 1;
        self.status = None;
        true
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn set_status(&mut self, message: String) {
        self.status = Some(message);
    }

    /// Runs the agent on the current step and keeps its log as the status message
    pub fn execute_current(&mut self, agent: &ActionAgent) -> Vec<String> {
        let logs = agent.execute_step(self.current_step());
        self.set_status(logs.join(" | "));
        logs
    }

    pub fn view(&self) -> GuideView<'_> {
        let step = self.current_step();
        GuideView {
            title: &self.task.title,
            description: &self.task.description,
            source: self.task.source,
            position: self.index() + 1,
            total: self.total(),
            instruction: &step.instruction,
            target: step.target,
            status: self.status(),
            is_first: self.is_first(),
            is_last: self.is_last(),
        }
    }
}
