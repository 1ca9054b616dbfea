//! Task and subtask records.
//!
//! Tasks move through three lanes: `backlog` -> `current` -> `historical`.
//! `current` is capped by per-type and global WIP limits (see `service`).
//! Records persist as one JSON object per line in `tasks.jsonl`.

use chrono::Local;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Task type used when a create request does not name one.
pub const DEFAULT_TASK_TYPE: &str = "customer engagement";

/// Lane a task currently sits in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Backlog,
    Current,
    Historical,
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TaskStatus::Backlog => "backlog",
            TaskStatus::Current => "current",
            TaskStatus::Historical => "historical",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Subtask {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

impl Subtask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            title: title.into(),
            completed: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub task_type: String,
    pub status: TaskStatus,
    pub created_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_date: Option<String>,
    #[serde(default)]
    pub time_estimate: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub links: Vec<String>,
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
    #[serde(default)]
    pub order: i64,
}

/// Fields for a new task; ids, dates, and order are assigned by the service.
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub title: String,
    pub task_type: String,
    pub status: Option<TaskStatus>,
    pub time_estimate: String,
    pub notes: String,
    pub links: Vec<String>,
}

/// Allow-listed patch for the generic update operation.
///
/// Status, dates, and subtasks are deliberately absent; those change only
/// through the dedicated complete/move/subtask operations.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskPatch {
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub task_type: Option<String>,
    pub time_estimate: Option<String>,
    pub notes: Option<String>,
    pub links: Option<Vec<String>>,
    pub order: Option<i64>,
}

impl TaskPatch {
    /// Apply the provided fields to a task, leaving the rest untouched.
    pub fn apply(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(task_type) = &self.task_type {
            task.task_type = task_type.clone();
        }
        if let Some(time_estimate) = &self.time_estimate {
            task.time_estimate = time_estimate.clone();
        }
        if let Some(notes) = &self.notes {
            task.notes = notes.clone();
        }
        if let Some(links) = &self.links {
            task.links = links.clone();
        }
        if let Some(order) = self.order {
            task.order = order;
        }
    }
}

/// Tasks partitioned by lane, each lane in display order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GroupedTasks {
    pub historical: Vec<Task>,
    pub current: Vec<Task>,
    pub backlog: Vec<Task>,
}

impl GroupedTasks {
    /// Partition tasks by status and order each lane.
    ///
    /// Historical sorts by finish date descending; a task with no finish
    /// date counts as the empty string and lands at the end. Current and
    /// backlog sort by `order` ascending. Sorts are stable, so ties keep
    /// their on-disk order.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let mut grouped = GroupedTasks::default();
        for task in tasks {
            match task.status {
                TaskStatus::Historical => grouped.historical.push(task),
                TaskStatus::Current => grouped.current.push(task),
                TaskStatus::Backlog => grouped.backlog.push(task),
            }
        }

        grouped
            .historical
            .sort_by(|left, right| right.finish_key().cmp(left.finish_key()));
        grouped.current.sort_by_key(|task| task.order);
        grouped.backlog.sort_by_key(|task| task.order);

        grouped
    }
}

impl Task {
    fn finish_key(&self) -> &str {
        self.finish_date.as_deref().unwrap_or("")
    }
}

/// Generate a fresh record id.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Today's calendar date as `YYYY-MM-DD`.
pub fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}
