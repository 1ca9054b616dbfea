//! Storage layer for flowboard
//!
//! Persists all state in two flat files under one data directory:
//!
//! ```text
//! data/
//!   tasks.jsonl     # one task record per line, append-friendly
//!   config.json     # single configuration document, pretty-printed
//! ```
//!
//! All operations are whole-file: loads read everything, mutations rewrite
//! everything (or append a single line). Mutations hold an exclusive lock
//! on `tasks.jsonl.lock` for the whole read-modify-write, and rewrites go
//! through a temp file plus rename.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::config::AppConfig;
use crate::error::Result;
use crate::lock::{self, FileLock, DEFAULT_LOCK_TIMEOUT_MS};
use crate::task::Task;

/// Task log file name
pub const TASKS_FILE: &str = "tasks.jsonl";

/// Configuration document file name
pub const CONFIG_FILE: &str = "config.json";

/// Storage manager for flowboard state
#[derive(Debug, Clone)]
pub struct Storage {
    data_dir: PathBuf,
}

impl Storage {
    /// Create a storage manager rooted at the given data directory
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    // =========================================================================
    // Path accessors
    // =========================================================================

    /// Path to the data directory
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path to the task log
    pub fn tasks_file(&self) -> PathBuf {
        self.data_dir.join(TASKS_FILE)
    }

    /// Path to the configuration document
    pub fn config_file(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILE)
    }

    fn tasks_lock_path(&self) -> PathBuf {
        lock::lock_path_for(&self.tasks_file())
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Create the data directory and seed default files on first run.
    ///
    /// Materializes the default configuration to disk if `config.json` is
    /// absent and touches an empty task log.
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.data_dir)?;

        let config_file = self.config_file();
        if !config_file.exists() {
            self.save_config(&AppConfig::default())?;
        }

        let tasks_file = self.tasks_file();
        if !tasks_file.exists() {
            File::create(&tasks_file)?;
        }

        Ok(())
    }

    // =========================================================================
    // Task log operations
    // =========================================================================

    /// Load all tasks from the log, in file order.
    ///
    /// A line that fails to parse is skipped with a warning; one corrupt
    /// record never takes down the whole load.
    pub fn load_tasks(&self) -> Result<Vec<Task>> {
        let path = self.tasks_file();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&path)?;
        let reader = BufReader::new(file);
        let mut tasks = Vec::new();

        for (lineno, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<Task>(&line) {
                Ok(task) => tasks.push(task),
                Err(err) => {
                    tracing::warn!(
                        file = %path.display(),
                        line = lineno + 1,
                        %err,
                        "skipping malformed task record"
                    );
                }
            }
        }

        Ok(tasks)
    }

    /// Overwrite the task log with the given sequence, preserving order.
    pub fn save_tasks(&self, tasks: &[Task]) -> Result<()> {
        let _lock = FileLock::acquire(self.tasks_lock_path(), DEFAULT_LOCK_TIMEOUT_MS)?;
        self.write_tasks(tasks)
    }

    /// Append one task to the log without rewriting existing records.
    pub fn append_task(&self, task: &Task) -> Result<()> {
        let _lock = FileLock::acquire(self.tasks_lock_path(), DEFAULT_LOCK_TIMEOUT_MS)?;

        let path = self.tasks_file();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string(task)?;
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)?;

        writeln!(file, "{}", json)?;
        file.sync_all()?;

        Ok(())
    }

    /// Find a task by id with a linear scan over the log.
    pub fn task_by_id(&self, id: &str) -> Result<Option<Task>> {
        let tasks = self.load_tasks()?;
        Ok(tasks.into_iter().find(|task| task.id == id))
    }

    /// Replace the record matching `task.id` and rewrite the log.
    pub fn update_task(&self, task: &Task) -> Result<()> {
        let _lock = FileLock::acquire(self.tasks_lock_path(), DEFAULT_LOCK_TIMEOUT_MS)?;

        let mut tasks = self.load_tasks()?;
        if let Some(slot) = tasks.iter_mut().find(|entry| entry.id == task.id) {
            *slot = task.clone();
        }
        self.write_tasks(&tasks)
    }

    /// Remove the record matching `id` and rewrite the log.
    pub fn delete_task(&self, id: &str) -> Result<()> {
        let _lock = FileLock::acquire(self.tasks_lock_path(), DEFAULT_LOCK_TIMEOUT_MS)?;

        let mut tasks = self.load_tasks()?;
        tasks.retain(|task| task.id != id);
        self.write_tasks(&tasks)
    }

    /// Rewrite the whole log via temp file + rename. Caller holds the lock.
    fn write_tasks(&self, tasks: &[Task]) -> Result<()> {
        let path = self.tasks_file();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = path.with_extension("tmp");
        let mut file = File::create(&temp_path)?;

        for task in tasks {
            let json = serde_json::to_string(task)?;
            writeln!(file, "{}", json)?;
        }

        file.sync_all()?;
        fs::rename(&temp_path, &path)?;

        Ok(())
    }

    // =========================================================================
    // Configuration operations
    // =========================================================================

    /// Read the configuration document, or defaults if it is absent.
    pub fn load_config(&self) -> Result<AppConfig> {
        let path = self.config_file();
        if !path.exists() {
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Overwrite the configuration document (atomic, pretty-printed).
    pub fn save_config(&self, config: &AppConfig) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        lock::write_atomic(self.config_file(), json.as_bytes())
    }
}
