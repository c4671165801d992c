//! Access to the external system of record for tasks.
//!
//! The controller only talks to the [`Store`] trait. [`TaskWarrior`] shells
//! out to the `task` program; [`MemoryStore`] keeps everything in memory and
//! is what the tests drive.

pub mod memory;
pub mod taskwarrior;

use std::path::PathBuf;

use crate::model::Task;

pub use memory::MemoryStore;
pub use taskwarrior::TaskWarrior;

/// Which slice of the store to list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    Pending,
    Completed,
}

impl StatusFilter {
    /// Whether tasks listed under this filter are completed
    pub fn is_completed(self) -> bool {
        matches!(self, StatusFilter::Completed)
    }
}

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not resolve home directory: HOME is not set")]
    HomeNotFound,
    #[error("could not create data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("task program not found: {0}")]
    ProgramNotFound(String),
    #[error("could not run {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    #[error("`task {args}` failed ({status}): {stderr}")]
    Command {
        args: String,
        status: String,
        stderr: String,
    },
    #[error("`task {args}` printed output that is not UTF-8: {source}")]
    Output {
        args: String,
        source: std::string::FromUtf8Error,
    },
    #[error("could not parse task export: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Capability interface over the task database.
///
/// Reads never fail: an unreachable or confused store lists as empty so the
/// UI stays usable. Writes report their failures.
pub trait Store {
    /// List every task with the given status
    fn list_tasks(&self, status: StatusFilter) -> Vec<Task>;

    /// Create the task when it has no id, otherwise modify it, then bring the
    /// stored completion status in line with `task.completed`. Returns the
    /// task as stored (with its new id after a create).
    fn upsert_task(&mut self, task: &Task) -> Result<Task, StoreError>;

    /// Delete by id. An empty id is a successful no-op.
    fn delete_task(&mut self, id: &str) -> Result<(), StoreError>;
}

