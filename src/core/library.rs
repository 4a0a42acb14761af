use super::task::{Task, TaskSource};
use crate::config::load_task_document;
use crate::errors::{Error, Result};
use indexmap::IndexMap;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info, warn};

/// Built-in task definitions shipped with the binary
static DEFAULT_LIBRARY: &str = include_str!("../templates/default_tasks.json");

/// Lookup table of known tasks, keyed by task identifier.
///
/// Iteration follows table order: built-in tasks first, then tasks that only
/// exist in the override document, in document order.
#[derive(Debug, Clone)]
pub struct TaskLibrary {
    tasks: IndexMap<String, Task>,
}

impl TaskLibrary {
    /// Library made of the built-in tasks only
    pub fn defaults() -> Result<Self> {
        Self::from_raw(default_definitions()?)
    }

    /// Loads the built-in tasks and applies the override document at `override_path`.
    ///
    /// Entries of the override replace built-in tasks with the same identifier
    /// as a whole; unknown identifiers are appended. A missing file leaves the
    /// defaults untouched. A document whose top level is not a mapping is ignored.
    ///
    /// # Errors
    ///
    /// * `Error::Parse` - the file exists but is not well-formed
    /// * `Error::InvalidTask` - an entry does not describe a task
    pub fn load(override_path: &Path) -> Result<Self> {
        let mut library = Self::defaults()?;

        match load_task_document(override_path)? {
            None => debug!(
                "No task overrides at {}, using defaults",
                override_path.display()
            ),
            Some(Value::Object(entries)) => {
                info!("Merging {} task override(s)", entries.len());
                for (id, definition) in entries {
                    library.insert(id, definition)?;
                }
            }
            Some(_) => warn!(
                "Ignoring {}: top level is not a mapping of tasks",
                override_path.display()
            ),
        }

        Ok(library)
    }

    fn from_raw(raw: IndexMap<String, Value>) -> Result<Self> {
        let mut library = TaskLibrary {
            tasks: IndexMap::with_capacity(raw.len()),
        };
        for (id, definition) in raw {
            library.insert(id, definition)?;
        }
        Ok(library)
    }

    /// Builds a task from `definition` and stores it under `id`.
    /// An existing id keeps its position in the table.
    fn insert(&mut self, id: String, definition: Value) -> Result<()> {
        let task = Task::from_value(definition, TaskSource::Library).map_err(|e| {
            Error::InvalidTask {
                id: id.clone(),
                reason: e.to_string(),
            }
        })?;
        self.tasks.insert(id, task);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.get(id)
    }

    /// Task identifiers in table order
    pub fn ids(&self) -> Vec<String> {
        self.tasks.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Task)> {
        self.tasks.iter()
    }
}

fn default_definitions() -> Result<IndexMap<String, Value>> {
    Ok(serde_json::from_str(DEFAULT_LIBRARY)?)
}
