//! Task list persisted under the `tasks` key.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{KeyValueStore, StoreError};

/// Storage key for the task list
pub const TASKS_KEY: &str = "tasks";

/// A single task on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique id (UUID v4)
    pub id: String,
    /// Short title
    pub title: String,
    /// Optional longer description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the task is done
    #[serde(default)]
    pub completed: bool,
}

/// Task CRUD on top of a `KeyValueStore`.
pub struct TaskStore<S> {
    store: S,
}

impl<S: KeyValueStore> TaskStore<S> {
    /// Wraps `store`; tasks live under the `tasks` key.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns all tasks in insertion order.
    ///
    /// Unreadable task data is logged and treated as an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    pub fn list(&self) -> Result<Vec<Task>, StoreError> {
        let Some(value) = self.store.get(TASKS_KEY)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_value(value) {
            Ok(tasks) => Ok(tasks),
            Err(e) => {
                tracing::warn!("保存済みタスクを読み込めませんでした: {}", e);
                Ok(Vec::new())
            }
        }
    }

    /// Adds a task and returns it.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::EmptyTitle` if the title is blank.
    pub fn add(&self, title: &str, description: Option<&str>) -> Result<Task, StoreError> {
        let title = normalize_title(title)?;
        let task = Task {
            id: Uuid::new_v4().to_string(),
            title,
            description: normalize_description(description),
            completed: false,
        };

        let mut tasks = self.list()?;
        tasks.push(task.clone());
        self.save(&tasks)?;

        tracing::debug!(id = %task.id, "Task added");
        Ok(task)
    }

    /// Changes the title and/or description of a task.
    ///
    /// An empty description clears it.
    ///
    /// # Errors
    ///
    /// Returns an error if the task does not exist or the new title is blank.
    pub fn update(
        &self,
        id: &str,
        title: Option<&str>,
        description: Option<&str>,
    ) -> Result<Task, StoreError> {
        let title = title.map(normalize_title).transpose()?;

        self.modify(id, |task| {
            if let Some(title) = title {
                task.title = title;
            }
            if description.is_some() {
                task.description = normalize_description(description);
            }
        })
    }

    /// Flips the completed flag of a task.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::TaskNotFound` if the task does not exist.
    pub fn toggle(&self, id: &str) -> Result<Task, StoreError> {
        self.modify(id, |task| task.completed = !task.completed)
    }

    /// Removes a task and returns it.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::TaskNotFound` if the task does not exist.
    pub fn remove(&self, id: &str) -> Result<Task, StoreError> {
        let mut tasks = self.list()?;
        let index = position(&tasks, id)?;
        let task = tasks.remove(index);
        self.save(&tasks)?;
        Ok(task)
    }

    /// Resolves a full id or a unique id prefix to a full id.
    ///
    /// # Errors
    ///
    /// Returns `TaskNotFound` when nothing matches and `AmbiguousTaskId`
    /// when more than one task matches.
    pub fn resolve_id(&self, prefix: &str) -> Result<String, StoreError> {
        let tasks = self.list()?;

        if let Some(task) = tasks.iter().find(|task| task.id == prefix) {
            return Ok(task.id.clone());
        }

        let mut matches = tasks.iter().filter(|task| task.id.starts_with(prefix));
        match (matches.next(), matches.next()) {
            (Some(task), None) if !prefix.is_empty() => Ok(task.id.clone()),
            (Some(_), _) => Err(StoreError::AmbiguousTaskId(prefix.to_string())),
            (None, _) => Err(StoreError::TaskNotFound(prefix.to_string())),
        }
    }

    fn modify(&self, id: &str, change: impl FnOnce(&mut Task)) -> Result<Task, StoreError> {
        let mut tasks = self.list()?;
        let index = position(&tasks, id)?;
        change(&mut tasks[index]);
        let task = tasks[index].clone();
        self.save(&tasks)?;
        Ok(task)
    }

    fn save(&self, tasks: &[Task]) -> Result<(), StoreError> {
        self.store.set(TASKS_KEY, serde_json::to_value(tasks)?)
    }
}

fn position(tasks: &[Task], id: &str) -> Result<usize, StoreError> {
    tasks
        .iter()
        .position(|task| task.id == id)
        .ok_or_else(|| StoreError::TaskNotFound(id.to_string()))
}

fn normalize_title(title: &str) -> Result<String, StoreError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(StoreError::EmptyTitle);
    }
    Ok(title.to_string())
}

fn normalize_description(description: Option<&str>) -> Option<String> {
    description
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
}
