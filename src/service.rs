//! Business rules for the task board.
//!
//! `TaskService` owns every status transition, the WIP-limit gate, order
//! assignment, and subtask bookkeeping. It reads a fresh snapshot from
//! storage for each operation; there is no in-memory cache to invalidate.

use tracing::info;

use crate::error::{Error, Result};
use crate::storage::Storage;
use crate::task::{self, GroupedTasks, NewTask, Subtask, Task, TaskPatch, TaskStatus};

#[derive(Debug, Clone)]
pub struct TaskService {
    storage: Storage,
}

impl TaskService {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// All tasks partitioned by lane, each lane in display order.
    pub fn all_tasks_ordered(&self) -> Result<GroupedTasks> {
        let tasks = self.storage.load_tasks()?;
        Ok(GroupedTasks::from_tasks(tasks))
    }

    /// Look up one task, failing with `TaskNotFound` when the id is unknown.
    pub fn task(&self, id: &str) -> Result<Task> {
        self.storage.task_by_id(id)?.ok_or(Error::TaskNotFound)
    }

    /// Create a task and append it to the log.
    ///
    /// New tasks land at the end of their lane: `order` is one past the
    /// highest order among existing tasks with the same status. Creating
    /// straight into `current` is gated by the WIP limits.
    pub fn add_task(&self, new_task: NewTask) -> Result<Task> {
        if new_task.title.trim().is_empty() {
            return Err(Error::TitleRequired);
        }

        let status = new_task.status.unwrap_or(TaskStatus::Backlog);
        if status == TaskStatus::Current {
            self.can_add_current(&new_task.task_type, None)?;
        }

        let tasks = self.storage.load_tasks()?;
        let next_order = next_order_for(&tasks, status, None);

        let task = Task {
            id: task::new_id(),
            title: new_task.title,
            task_type: new_task.task_type,
            status,
            created_date: task::today(),
            start_date: (status == TaskStatus::Current).then(task::today),
            finish_date: None,
            time_estimate: new_task.time_estimate,
            notes: new_task.notes,
            links: new_task.links,
            subtasks: Vec::new(),
            order: next_order,
        };

        self.storage.append_task(&task)?;
        info!(id = %task.id, status = %task.status, order = task.order, "task created");
        Ok(task)
    }

    /// Apply an allow-listed patch to a task.
    pub fn update_task(&self, id: &str, patch: &TaskPatch) -> Result<Task> {
        let mut task = self.task(id)?;
        patch.apply(&mut task);
        self.storage.update_task(&task)?;
        info!(id = %task.id, "task updated");
        Ok(task)
    }

    /// Move a task to `historical` with the given finish date.
    ///
    /// Deliberately unconditional: any prior status is accepted and the
    /// finish date is stored as supplied.
    pub fn complete_task(&self, id: &str, finish_date: &str) -> Result<Task> {
        if finish_date.trim().is_empty() {
            return Err(Error::FinishDateRequired);
        }

        let mut task = self.task(id)?;
        task.status = TaskStatus::Historical;
        task.finish_date = Some(finish_date.to_string());

        self.storage.update_task(&task)?;
        info!(id = %task.id, finish_date, "task completed");
        Ok(task)
    }

    /// Promote a backlog task to `current`.
    ///
    /// Fails for any non-backlog task; re-checks the WIP limits (not
    /// counting the task itself) and re-appends the task at the end of the
    /// current queue rather than keeping its backlog order.
    pub fn move_to_current(&self, id: &str) -> Result<Task> {
        let mut task = self.task(id)?;

        if task.status != TaskStatus::Backlog {
            return Err(Error::NotInBacklog);
        }

        self.can_add_current(&task.task_type, Some(id))?;

        let tasks = self.storage.load_tasks()?;
        task.status = TaskStatus::Current;
        task.start_date = Some(task::today());
        task.order = next_order_for(&tasks, TaskStatus::Current, Some(id));

        self.storage.update_task(&task)?;
        info!(id = %task.id, order = task.order, "task moved to current");
        Ok(task)
    }

    /// Check the WIP limits for adding a `current` task of the given type.
    ///
    /// Advisory only: the check reads a live snapshot and nothing reserves
    /// a slot between this call and the write that follows it.
    pub fn can_add_current(&self, task_type: &str, exclude_id: Option<&str>) -> Result<()> {
        let config = self.storage.load_config()?;
        let tasks = self.storage.load_tasks()?;

        let counted = |task: &Task| {
            task.status == TaskStatus::Current && exclude_id != Some(task.id.as_str())
        };

        let type_count = tasks
            .iter()
            .filter(|task| counted(task) && task.task_type == task_type)
            .count() as u32;
        let max_open = config.max_open_for_type(task_type);
        if type_count >= max_open {
            return Err(Error::TypeLimitReached {
                task_type: task_type.to_string(),
                limit: max_open,
            });
        }

        let total_current = tasks.iter().filter(|task| counted(task)).count() as u32;
        if total_current >= config.max_active_tasks {
            return Err(Error::ActiveLimitReached {
                limit: config.max_active_tasks,
            });
        }

        Ok(())
    }

    /// Append a new unchecked subtask to a task.
    pub fn add_subtask(&self, task_id: &str, title: &str) -> Result<Task> {
        if title.trim().is_empty() {
            return Err(Error::SubtaskTitleRequired);
        }

        let mut task = self.task(task_id)?;
        task.subtasks.push(Subtask::new(title));

        self.storage.update_task(&task)?;
        info!(id = %task.id, "subtask added");
        Ok(task)
    }

    /// Flip a subtask's completed flag.
    pub fn toggle_subtask(&self, task_id: &str, subtask_id: &str) -> Result<Task> {
        let mut task = self.task(task_id)?;

        let subtask = task
            .subtasks
            .iter_mut()
            .find(|subtask| subtask.id == subtask_id)
            .ok_or(Error::SubtaskNotFound)?;
        subtask.completed = !subtask.completed;

        self.storage.update_task(&task)?;
        info!(id = %task.id, subtask = subtask_id, "subtask toggled");
        Ok(task)
    }

    /// Delete a task (and with it, its subtasks).
    pub fn delete_task(&self, id: &str) -> Result<()> {
        // Existence check first so an unknown id surfaces as NotFound
        self.task(id)?;
        self.storage.delete_task(id)?;
        info!(id, "task deleted");
        Ok(())
    }
}

/// One past the highest order in the given lane, or 0 for an empty lane.
fn next_order_for(tasks: &[Task], status: TaskStatus, exclude_id: Option<&str>) -> i64 {
    tasks
        .iter()
        .filter(|task| task.status == status && exclude_id != Some(task.id.as_str()))
        .map(|task| task.order)
        .max()
        .unwrap_or(-1)
        + 1
}
