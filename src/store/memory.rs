use std::cell::RefCell;
use std::rc::Rc;

use crate::model::Task;

use super::{StatusFilter, Store, StoreError};

/// In-memory store.
///
/// Clones share the same state, so a caller can hand a boxed clone to a
/// [`TaskList`](crate::ops::task_list::TaskList) and keep inspecting or
/// reconfiguring the store through its own handle.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Rc<RefCell<MemoryState>>,
}

#[derive(Debug, Default)]
struct MemoryState {
    tasks: Vec<Task>,
    next_id: u64,
    fail_writes: bool,
    withhold_ids: bool,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a task exactly as given (no id assignment, no normalization)
    pub fn insert(&self, task: Task) {
        self.state.borrow_mut().tasks.push(task);
    }

    /// Snapshot of everything in the store
    pub fn tasks(&self) -> Vec<Task> {
        self.state.borrow().tasks.clone()
    }

    /// Make every subsequent upsert/delete fail
    pub fn set_fail_writes(&self, fail: bool) {
        self.state.borrow_mut().fail_writes = fail;
    }

    /// Accept creates without assigning an id, like a store whose
    /// confirmation output could not be parsed
    pub fn set_withhold_ids(&self, withhold: bool) {
        self.state.borrow_mut().withhold_ids = withhold;
    }

    /// Number of upsert/delete calls received, failed ones included
    pub fn write_count(&self) -> usize {
        self.state.borrow().writes
    }
}

impl Store for MemoryStore {
    fn list_tasks(&self, status: StatusFilter) -> Vec<Task> {
        self.state
            .borrow()
            .tasks
            .iter()
            .filter(|t| t.completed == status.is_completed())
            .cloned()
            .collect()
    }

    fn upsert_task(&mut self, task: &Task) -> Result<Task, StoreError> {
        let mut state = self.state.borrow_mut();
        state.writes += 1;
        if state.fail_writes {
            return Err(StoreError::Unavailable("simulated write failure".into()));
        }

        let mut saved = task.clone();
        if saved.id.is_empty() {
            if !state.withhold_ids {
                state.next_id += 1;
                saved.id = format!("mem-{}", state.next_id);
            }
            state.tasks.push(saved.clone());
            return Ok(saved);
        }

        match state.tasks.iter_mut().find(|t| t.id == saved.id) {
            Some(existing) => {
                *existing = saved.clone();
                Ok(saved)
            }
            None => Err(StoreError::Unavailable(format!("no task with id {}", saved.id))),
        }
    }

    fn delete_task(&mut self, id: &str) -> Result<(), StoreError> {
        if id.is_empty() {
            return Ok(());
        }
        let mut state = self.state.borrow_mut();
        state.writes += 1;
        if state.fail_writes {
            return Err(StoreError::Unavailable("simulated write failure".into()));
        }
        let before = state.tasks.len();
        state.tasks.retain(|t| t.id != id);
        if state.tasks.len() == before {
            return Err(StoreError::Unavailable(format!("no task with id {}", id)));
        }
        Ok(())
    }
}
