//! Application configuration.
//!
//! A single JSON document (`config.json`) holds the task-type catalog and
//! the WIP caps. Missing fields fall back to the seed defaults, so a
//! hand-edited or partial document still loads.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Fallback `max_open` for a task type that is not configured.
pub const DEFAULT_MAX_OPEN: u32 = 3;

/// Limits and display color for one task type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskTypeConfig {
    /// Cap on simultaneous `current` tasks of this type
    #[serde(default = "default_max_open")]
    pub max_open: u32,

    /// Display color hint for the UI
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_max_open() -> u32 {
    DEFAULT_MAX_OPEN
}

fn default_color() -> String {
    "#4A90E2".to_string()
}

impl Default for TaskTypeConfig {
    fn default() -> Self {
        Self {
            max_open: default_max_open(),
            color: default_color(),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    /// Known task types keyed by name
    #[serde(default = "default_task_types")]
    pub task_types: BTreeMap<String, TaskTypeConfig>,

    /// Global cap on simultaneous `current` tasks
    #[serde(default = "default_max_active_tasks")]
    pub max_active_tasks: u32,

    /// UI hint only; carried through the API untouched
    #[serde(default = "default_auto_scroll")]
    pub auto_scroll_to_current: bool,
}

fn default_task_types() -> BTreeMap<String, TaskTypeConfig> {
    let mut types = BTreeMap::new();
    types.insert(
        "customer engagement".to_string(),
        TaskTypeConfig {
            max_open: 3,
            color: "#4A90E2".to_string(),
        },
    );
    types.insert(
        "content enablements".to_string(),
        TaskTypeConfig {
            max_open: 5,
            color: "#7ED321".to_string(),
        },
    );
    types
}

fn default_max_active_tasks() -> u32 {
    10
}

fn default_auto_scroll() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            task_types: default_task_types(),
            max_active_tasks: default_max_active_tasks(),
            auto_scroll_to_current: default_auto_scroll(),
        }
    }
}

impl AppConfig {
    /// Cap on open tasks for a type, falling back for unconfigured types.
    pub fn max_open_for_type(&self, task_type: &str) -> u32 {
        self.task_types
            .get(task_type)
            .map(|entry| entry.max_open)
            .unwrap_or(DEFAULT_MAX_OPEN)
    }
}

/// Partial configuration update; each provided key replaces the stored
/// value wholesale (`task_types` is not deep-merged).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigPatch {
    pub task_types: Option<BTreeMap<String, TaskTypeConfig>>,
    pub max_active_tasks: Option<u32>,
    pub auto_scroll_to_current: Option<bool>,
}

impl ConfigPatch {
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(task_types) = &self.task_types {
            config.task_types = task_types.clone();
        }
        if let Some(max_active_tasks) = self.max_active_tasks {
            config.max_active_tasks = max_active_tasks;
        }
        if let Some(auto_scroll) = self.auto_scroll_to_current {
            config.auto_scroll_to_current = auto_scroll;
        }
    }
}
