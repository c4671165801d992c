use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::model::{DEFAULT_PROJECT, Task};

use super::{StatusFilter, Store, StoreError};

/// Timestamp format used by `task export` (e.g. `20250514T093000Z`)
const TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%SZ";

static CREATED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Created task (\S+)\.").expect("static regex"));

/// Store backed by the Taskwarrior command-line program
#[derive(Debug, Clone)]
pub struct TaskWarrior {
    program: PathBuf,
    data_dir: PathBuf,
}

/// One record of `task export` output. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ExportRecord {
    uuid: String,
    description: String,
    project: String,
    status: String,
    entry: Option<String>,
    end: Option<String>,
}

impl ExportRecord {
    fn into_task(self, completed: bool) -> Task {
        let mut task = Task {
            id: self.uuid,
            description: self.description,
            project: self.project,
            completed,
            created_at: self.entry.as_deref().map_or(0, parse_timestamp),
            end: self.end.as_deref().map_or(0, parse_timestamp),
        };
        task.normalize_project();
        task
    }
}

impl TaskWarrior {
    /// Locate `program` and make sure `data_dir` exists.
    pub fn new(program: &str, data_dir: PathBuf) -> Result<Self, StoreError> {
        let program = locate_program(program)?;
        fs::create_dir_all(&data_dir).map_err(|source| StoreError::DataDir {
            path: data_dir.clone(),
            source,
        })?;
        Ok(TaskWarrior { program, data_dir })
    }

    /// Resolved path of the Taskwarrior executable
    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn load_pending(&self) -> Vec<Task> {
        self.load(StatusFilter::Pending)
    }

    pub fn load_completed(&self) -> Vec<Task> {
        self.load(StatusFilter::Completed)
    }

    fn load(&self, status: StatusFilter) -> Vec<Task> {
        let filter = match status {
            StatusFilter::Pending => "status:pending",
            StatusFilter::Completed => "status:completed",
        };
        match self.export(filter) {
            Ok(records) => records
                .into_iter()
                .map(|r| r.into_task(status.is_completed()))
                .collect(),
            Err(e) => {
                warn!(filter, error = %e, "task export failed, listing no tasks");
                Vec::new()
            }
        }
    }

    fn export(&self, filter: &str) -> Result<Vec<ExportRecord>, StoreError> {
        let output = self.run(&export_args(filter))?;
        Ok(serde_json::from_str(&output)?)
    }

    /// Whether the store currently reports the task as completed
    fn is_completed_in_store(&self, id: &str) -> Result<bool, StoreError> {
        let records = self.export(&format!("uuid:{}", id))?;
        Ok(records.iter().any(|r| r.status == "completed"))
    }

    /// Create or modify the task, then reconcile its completion status.
    pub fn save(&self, task: &Task) -> Result<Task, StoreError> {
        let mut saved = task.clone();

        if saved.id.is_empty() {
            let output = self.run(&add_args(&saved))?;
            match extract_created_id(&output) {
                Some(id) => {
                    info!(%id, "created task");
                    saved.id = id;
                }
                None => warn!(output = %output.trim(), "no task id in add confirmation"),
            }
        } else {
            self.run(&modify_args(&saved))?;
        }

        // Without an id there is nothing to mark done or reopen.
        if saved.id.is_empty() {
            return Ok(saved);
        }

        if saved.completed {
            self.run(&done_args(&saved.id))?;
        } else if self.is_completed_in_store(&saved.id)? {
            self.run(&reopen_args(&saved.id))?;
        }
        Ok(saved)
    }

    pub fn delete(&self, id: &str) -> Result<(), StoreError> {
        if id.is_empty() {
            return Ok(());
        }
        self.run(&delete_args(id))?;
        info!(%id, "deleted task");
        Ok(())
    }

    /// Run `task` with the fixed rc overrides followed by `args`, returning
    /// stdout. A non-zero exit or non-UTF-8 stdout is an error.
    fn run(&self, args: &[String]) -> Result<String, StoreError> {
        let mut full_args = vec![
            format!("rc.data.location={}", self.data_dir.display()),
            "rc.confirmation=off".to_string(),
        ];
        full_args.extend(args.iter().cloned());

        debug!(program = %self.program.display(), args = %args.join(" "), "running task");
        let output = Command::new(&self.program)
            .args(&full_args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| StoreError::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(StoreError::Command {
                args: args.join(" "),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        String::from_utf8(output.stdout).map_err(|source| StoreError::Output {
            args: args.join(" "),
            source,
        })
    }
}

impl Store for TaskWarrior {
    fn list_tasks(&self, status: StatusFilter) -> Vec<Task> {
        self.load(status)
    }

    fn upsert_task(&mut self, task: &Task) -> Result<Task, StoreError> {
        self.save(task)
    }

    fn delete_task(&mut self, id: &str) -> Result<(), StoreError> {
        self.delete(id)
    }
}

/// Default data directory: `$HOME/.task`
pub fn default_data_dir() -> Result<PathBuf, StoreError> {
    match env::var("HOME") {
        Ok(home) if !home.is_empty() => Ok(PathBuf::from(home).join(".task")),
        _ => Err(StoreError::HomeNotFound),
    }
}

/// Resolve a program name the way a shell would: paths are checked directly,
/// bare names are searched on `PATH`.
fn locate_program(program: &str) -> Result<PathBuf, StoreError> {
    let not_found = || StoreError::ProgramNotFound(program.to_string());
    if program.is_empty() {
        return Err(not_found());
    }

    let path = Path::new(program);
    if path.components().count() > 1 {
        return if path.is_file() {
            Ok(path.to_path_buf())
        } else {
            Err(not_found())
        };
    }

    let search = env::var_os("PATH").ok_or_else(not_found)?;
    env::split_paths(&search)
        .map(|dir| dir.join(program))
        .find(|candidate| candidate.is_file())
        .ok_or_else(not_found)
}

/// Parse a `YYYYMMDDTHHMMSSZ` timestamp into Unix seconds, 0 if malformed
pub fn parse_timestamp(s: &str) -> i64 {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or(0)
}

/// Pull the new task's id out of `task add` confirmation text
pub fn extract_created_id(output: &str) -> Option<String> {
    CREATED_RE
        .captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

fn project_arg(task: &Task) -> Option<String> {
    if task.project.is_empty() || task.project == DEFAULT_PROJECT {
        None
    } else {
        Some(format!("project:{}", task.project))
    }
}

fn export_args(filter: &str) -> Vec<String> {
    vec![filter.to_string(), "export".to_string()]
}

fn add_args(task: &Task) -> Vec<String> {
    // new-uuid makes the confirmation carry the UUID instead of the working-set number
    let mut args = vec![
        "rc.verbose=new-uuid".to_string(),
        "add".to_string(),
        task.description.clone(),
    ];
    args.extend(project_arg(task));
    args
}

fn modify_args(task: &Task) -> Vec<String> {
    let mut args = vec![
        task.id.clone(),
        "modify".to_string(),
        task.description.clone(),
    ];
    args.extend(project_arg(task));
    args
}

fn done_args(id: &str) -> Vec<String> {
    vec![id.to_string(), "done".to_string()]
}

fn reopen_args(id: &str) -> Vec<String> {
    vec![
        id.to_string(),
        "modify".to_string(),
        "status:pending".to_string(),
    ]
}

fn delete_args(id: &str) -> Vec<String> {
    vec![id.to_string(), "delete".to_string()]
}
