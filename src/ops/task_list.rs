use std::collections::BTreeSet;

use tracing::{debug, info};

use crate::model::{ALL_PROJECTS, Task};
use crate::ops::input::parse_task_input;
use crate::store::{StatusFilter, Store, StoreError};
use crate::util::unicode;

/// Error type for task list operations
#[derive(Debug, thiserror::Error)]
pub enum TaskListError {
    #[error("task is no longer in the list")]
    NotFound,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result of [`TaskList::add_task`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// The store created the task and reported its id
    Added { id: String },
    /// The store accepted the task but its id could not be determined
    AddedWithoutId,
    /// Nothing was left of the description once the project tag was removed
    Rejected,
}

/// The canonical in-memory task list plus the view filter state.
///
/// Reads go through [`TaskList::reload`]; writes go straight to the store and
/// are reconciled here: toggles are applied optimistically and reverted on
/// failure, adds and deletes reload the whole list on success.
pub struct TaskList {
    store: Box<dyn Store>,
    tasks: Vec<Task>,
    projects: Vec<String>,
    filter: String,
    search: String,
}

impl TaskList {
    /// Create an empty list over `store`. Call [`reload`](Self::reload) to populate it.
    pub fn new(store: Box<dyn Store>) -> Self {
        TaskList {
            store,
            tasks: Vec::new(),
            projects: vec![ALL_PROJECTS.to_string()],
            filter: ALL_PROJECTS.to_string(),
            search: String::new(),
        }
    }

    /// All tasks, most recent first
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Project index: `"all"` followed by every project in use
    pub fn projects(&self) -> &[String] {
        &self.projects
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Replace the list with everything the store has, newest first
    pub fn reload(&mut self) {
        let mut tasks = self.store.list_tasks(StatusFilter::Pending);
        let pending = tasks.len();
        tasks.extend(self.store.list_tasks(StatusFilter::Completed));
        for task in &mut tasks {
            task.normalize_project();
        }
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        debug!(pending, completed = tasks.len() - pending, "reloaded tasks");

        self.tasks = tasks;
        self.rebuild_projects();
    }

    fn rebuild_projects(&mut self) {
        let discovered: BTreeSet<&str> = self
            .tasks
            .iter()
            .map(|t| t.project.as_str())
            .filter(|p| *p != ALL_PROJECTS)
            .collect();
        let mut projects = Vec::with_capacity(discovered.len() + 1);
        projects.push(ALL_PROJECTS.to_string());
        projects.extend(discovered.into_iter().map(str::to_string));
        self.projects = projects;
    }

    /// Tasks matching the active project filter and search text, newest first
    pub fn filtered_view(&self) -> Vec<&Task> {
        let needle = self.search.to_lowercase();
        self.tasks
            .iter()
            .filter(|t| self.filter == ALL_PROJECTS || t.project == self.filter)
            .filter(|t| t.matches_lowercase(&needle))
            .collect()
    }

    /// Index into the canonical list of the task `target` refers to.
    ///
    /// Tasks with an id match by id only. Tasks without one fall back to the
    /// first id-less task with the same description and project.
    fn locate(&self, target: &Task) -> Option<usize> {
        if target.is_persisted() {
            self.tasks.iter().position(|t| t.id == target.id)
        } else {
            self.tasks.iter().position(|t| {
                !t.is_persisted()
                    && t.description == target.description
                    && t.project == target.project
            })
        }
    }

    /// Flip a task's completion and write it to the store. Completing stamps
    /// `end` with the current time, reopening clears it. On failure both are
    /// restored and the error returned. The list is not reloaded.
    pub fn toggle_completion(&mut self, target: &Task) -> Result<(), TaskListError> {
        let idx = self.locate(target).ok_or(TaskListError::NotFound)?;
        let original = self.tasks[idx].completed;
        let original_end = self.tasks[idx].end;
        self.tasks[idx].completed = !original;
        self.tasks[idx].end = if original {
            0
        } else {
            chrono::Utc::now().timestamp()
        };

        match self.store.upsert_task(&self.tasks[idx]) {
            Ok(mut saved) => {
                saved.normalize_project();
                saved.completed = !original;
                debug!(id = %saved.id, completed = saved.completed, "toggled task");
                self.tasks[idx] = saved;
                Ok(())
            }
            Err(e) => {
                self.tasks[idx].completed = original;
                self.tasks[idx].end = original_end;
                Err(e.into())
            }
        }
    }

    /// Create a task from add-form input such as `"Fix bug project:myapp"`.
    /// Reloads on success; leaves the list alone on failure.
    pub fn add_task(&mut self, input: &str) -> Result<AddOutcome, TaskListError> {
        let (description, project) = parse_task_input(input);
        if description.is_empty() {
            return Ok(AddOutcome::Rejected);
        }

        let task = Task::new(description, project, chrono::Utc::now().timestamp());
        let saved = self.store.upsert_task(&task)?;
        info!(id = %saved.id, project = %saved.project, "added task");
        self.reload();

        if saved.is_persisted() {
            Ok(AddOutcome::Added { id: saved.id })
        } else {
            Ok(AddOutcome::AddedWithoutId)
        }
    }

    /// Delete a task from the store and reload. A task without an id was
    /// never stored, so the store call is vacuous and the list stays as is.
    pub fn delete_task(&mut self, target: &Task) -> Result<(), TaskListError> {
        let idx = self.locate(target).ok_or(TaskListError::NotFound)?;
        let id = self.tasks[idx].id.clone();
        self.store.delete_task(&id)?;
        if !id.is_empty() {
            info!(%id, "deleted task");
            self.reload();
        }
        Ok(())
    }

    /// Position of the active filter in the project index (0 if absent)
    pub fn filter_position(&self) -> usize {
        self.projects
            .iter()
            .position(|p| *p == self.filter)
            .unwrap_or(0)
    }

    /// Set the active filter. Unknown projects are accepted and simply match nothing.
    pub fn set_filter(&mut self, project: &str) {
        self.filter = project.to_string();
    }

    /// Step the filter forward through the project index, wrapping at the end
    pub fn next_filter(&mut self) {
        self.step_filter(1);
    }

    /// Step the filter backward through the project index, wrapping at the start
    pub fn prev_filter(&mut self) {
        self.step_filter(-1);
    }

    fn step_filter(&mut self, delta: isize) {
        let len = self.projects.len() as isize;
        let next = match self.projects.iter().position(|p| *p == self.filter) {
            Some(pos) => (pos as isize + delta).rem_euclid(len) as usize,
            None => 0,
        };
        self.filter = self.projects[next].clone();
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search.push(c);
    }

    pub fn pop_search_char(&mut self) {
        unicode::pop_grapheme(&mut self.search);
    }

    /// Clear the search text, returning whether there was any
    pub fn clear_search(&mut self) -> bool {
        let had_text = !self.search.is_empty();
        self.search.clear();
        had_text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DEFAULT_PROJECT;
    use crate::store::MemoryStore;
    use pretty_assertions::assert_eq;

    fn stored(id: &str, description: &str, project: &str, created_at: i64) -> Task {
        Task {
            id: id.to_string(),
            description: description.to_string(),
            project: project.to_string(),
            completed: false,
            created_at,
            end: 0,
        }
    }

    fn list_with(tasks: Vec<Task>) -> (TaskList, MemoryStore) {
        let store = MemoryStore::new();
        for task in tasks {
            store.insert(task);
        }
        let mut list = TaskList::new(Box::new(store.clone()));
        list.reload();
        (list, store)
    }

    fn sample() -> (TaskList, MemoryStore) {
        let mut done = stored("c", "Call plumber", "home", 300);
        done.completed = true;
        list_with(vec![
            stored("a", "Write report", "work", 100),
            stored("b", "Fix login bug", "webapp", 400),
            done,
            stored("d", "Buy milk", "", 200),
        ])
    }

    fn descriptions(tasks: &[&Task]) -> Vec<String> {
        tasks.iter().map(|t| t.description.clone()).collect()
    }

    #[test]
    fn new_list_is_empty() {
        let list = TaskList::new(Box::new(MemoryStore::new()));
        assert!(list.tasks().is_empty());
        assert_eq!(list.projects(), ["all"]);
        assert_eq!(list.filter(), "all");
        assert_eq!(list.search(), "");
    }

    #[test]
    fn reload_sorts_newest_first() {
        let (list, _) = sample();
        let created: Vec<i64> = list.tasks().iter().map(|t| t.created_at).collect();
        assert_eq!(created, vec![400, 300, 200, 100]);
        assert!(list.tasks().windows(2).all(|w| w[0].created_at >= w[1].created_at));
    }

    #[test]
    fn reload_includes_pending_and_completed() {
        let (list, _) = sample();
        assert_eq!(list.tasks().len(), 4);
        assert_eq!(list.tasks().iter().filter(|t| t.completed).count(), 1);
    }

    #[test]
    fn blank_project_shows_as_default() {
        let (list, _) = list_with(vec![stored("", "Buy milk", "", 42)]);
        assert_eq!(list.tasks()[0].project, DEFAULT_PROJECT);
        assert_eq!(list.projects().len(), 2);
        assert_eq!(list.projects()[0], "all");
        assert!(list.projects().contains(&"default".to_string()));
    }

    #[test]
    fn project_index_starts_with_all_and_has_no_duplicates() {
        let (list, _) = list_with(vec![
            stored("a", "x", "work", 1),
            stored("b", "y", "work", 2),
            stored("c", "z", "home", 3),
        ]);
        assert_eq!(list.projects()[0], "all");
        let mut rest: Vec<&String> = list.projects()[1..].iter().collect();
        rest.sort();
        assert_eq!(rest, vec!["home", "work"]);
    }

    #[test]
    fn unfiltered_view_returns_everything() {
        let (list, _) = sample();
        let view = list.filtered_view();
        assert_eq!(
            descriptions(&view),
            vec!["Fix login bug", "Call plumber", "Buy milk", "Write report"]
        );
    }

    #[test]
    fn project_filter() {
        let (mut list, _) = sample();
        list.set_filter("work");
        assert_eq!(descriptions(&list.filtered_view()), vec!["Write report"]);
        list.set_filter("nothing-here");
        assert!(list.filtered_view().is_empty());
    }

    #[test]
    fn search_matches_description_or_project_case_insensitively() {
        let (mut list, _) = sample();
        for c in "LOGIN".chars() {
            list.push_search_char(c);
        }
        assert_eq!(descriptions(&list.filtered_view()), vec!["Fix login bug"]);

        list.clear_search();
        for c in "Hom".chars() {
            list.push_search_char(c);
        }
        assert_eq!(descriptions(&list.filtered_view()), vec!["Call plumber"]);
    }

    #[test]
    fn filter_and_search_combine() {
        let (mut list, _) = list_with(vec![
            stored("a", "Write report", "work", 3),
            stored("b", "Write letter", "home", 2),
            stored("c", "Read report", "work", 1),
        ]);
        list.set_filter("work");
        for c in "write".chars() {
            list.push_search_char(c);
        }
        let view = list.filtered_view();
        assert_eq!(descriptions(&view), vec!["Write report"]);
        for task in view {
            assert!(list.tasks().contains(task));
        }
    }

    #[test]
    fn pop_and_clear_search() {
        let (mut list, _) = sample();
        assert!(!list.clear_search());
        list.push_search_char('a');
        list.push_search_char('b');
        list.pop_search_char();
        assert_eq!(list.search(), "a");
        assert!(list.clear_search());
        assert_eq!(list.search(), "");
    }

    #[test]
    fn toggle_twice_restores_state() {
        let (mut list, store) = sample();
        let target = list.tasks()[0].clone();
        assert!(!target.completed);

        list.toggle_completion(&target).unwrap();
        assert!(list.tasks()[0].completed);
        assert!(store.tasks().iter().any(|t| t.id == target.id && t.completed));

        list.toggle_completion(&target).unwrap();
        assert!(!list.tasks()[0].completed);
        assert!(store.tasks().iter().any(|t| t.id == target.id && !t.completed));
    }

    #[test]
    fn toggle_stamps_and_clears_end() {
        let (mut list, store) = sample();
        let target = list.tasks()[0].clone();
        assert_eq!(target.end, 0);

        list.toggle_completion(&target).unwrap();
        assert!(list.tasks()[0].end > 0);
        assert!(store.tasks().iter().any(|t| t.id == target.id && t.end > 0));

        list.toggle_completion(&target).unwrap();
        assert_eq!(list.tasks()[0].end, 0);
    }

    #[test]
    fn toggle_failure_reverts() {
        let (mut list, store) = sample();
        let target = list.tasks()[0].clone();
        store.set_fail_writes(true);

        let err = list.toggle_completion(&target).unwrap_err();
        assert!(matches!(err, TaskListError::Store(_)));
        assert_eq!(list.tasks()[0].completed, target.completed);
        assert_eq!(list.tasks()[0].end, target.end);
        assert_eq!(list.tasks().len(), 4);
    }

    #[test]
    fn toggle_unknown_task_is_not_found() {
        let (mut list, store) = sample();
        let ghost = stored("zzz", "Ghost", "work", 1);
        assert!(matches!(
            list.toggle_completion(&ghost),
            Err(TaskListError::NotFound)
        ));
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn id_match_ignores_description() {
        let (mut list, _) = sample();
        let mut target = list.tasks()[0].clone();
        target.description = "renamed elsewhere".into();
        list.toggle_completion(&target).unwrap();
        assert!(list.tasks()[0].completed);
    }

    #[test]
    fn id_less_task_falls_back_to_description_and_project() {
        let (list, _) = list_with(vec![
            stored("x1", "Same", "p", 3),
            stored("", "Same", "p", 2),
        ]);
        let target = list.tasks()[1].clone();
        // Only the id-less entry qualifies, even though the persisted one matches too.
        assert_eq!(list.locate(&target), Some(1));
    }

    #[test]
    fn add_then_reload_yields_persisted_task() {
        let (mut list, _) = sample();
        let id = match list.add_task("Fix bug project:myapp").unwrap() {
            AddOutcome::Added { id } => id,
            other => panic!("expected Added, got {:?}", other),
        };
        assert!(!id.is_empty());

        let added = list.tasks().iter().find(|t| t.id == id).unwrap();
        assert_eq!(added.description, "Fix bug");
        assert_eq!(added.project, "myapp");
        assert!(!added.completed);
        assert!(list.projects().contains(&"myapp".to_string()));
        assert_eq!(list.tasks()[0].id, id);
    }

    #[test]
    fn add_without_tag_uses_default_project() {
        let (mut list, _) = list_with(vec![]);
        list.add_task("  Just text  ").unwrap();
        assert_eq!(list.tasks()[0].description, "Just text");
        assert_eq!(list.tasks()[0].project, "default");
    }

    #[test]
    fn add_rejects_blank_description() {
        let (mut list, store) = sample();
        assert_eq!(list.add_task("  project:x   ").unwrap(), AddOutcome::Rejected);
        assert_eq!(list.add_task("   ").unwrap(), AddOutcome::Rejected);
        assert_eq!(store.write_count(), 0);
        assert_eq!(list.tasks().len(), 4);
    }

    #[test]
    fn add_failure_leaves_list_untouched() {
        let (mut list, store) = sample();
        store.set_fail_writes(true);
        let before = list.tasks().to_vec();
        assert!(list.add_task("New thing").is_err());
        assert_eq!(list.tasks(), &before[..]);
    }

    #[test]
    fn add_without_returned_id_is_reported() {
        let (mut list, store) = sample();
        store.set_withhold_ids(true);
        assert_eq!(list.add_task("Orphan").unwrap(), AddOutcome::AddedWithoutId);
        assert!(list.tasks().iter().any(|t| t.description == "Orphan" && t.id.is_empty()));
    }

    #[test]
    fn delete_reloads() {
        let (mut list, store) = sample();
        let target = list
            .tasks()
            .iter()
            .find(|t| t.id == "a")
            .cloned()
            .unwrap();
        list.delete_task(&target).unwrap();
        assert_eq!(list.tasks().len(), 3);
        assert!(store.tasks().iter().all(|t| t.id != "a"));
        assert!(!list.projects().contains(&"work".to_string()));
    }

    #[test]
    fn delete_failure_leaves_list_untouched() {
        let (mut list, store) = sample();
        store.set_fail_writes(true);
        let target = list.tasks()[1].clone();
        assert!(list.delete_task(&target).is_err());
        assert_eq!(list.tasks().len(), 4);
    }

    #[test]
    fn delete_without_id_is_a_local_no_op() {
        let (mut list, store) = list_with(vec![
            stored("", "Buy milk", "", 2),
            stored("k", "Keep", "work", 1),
        ]);
        let target = list.tasks()[0].clone();
        let before = list.tasks().to_vec();

        list.delete_task(&target).unwrap();
        assert_eq!(list.tasks(), &before[..]);
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn filter_cycling_wraps_both_ways() {
        let (mut list, _) = sample();
        let projects = list.projects().to_vec();
        assert_eq!(projects.len(), 5);

        list.prev_filter();
        assert_eq!(list.filter(), projects[projects.len() - 1]);
        list.next_filter();
        assert_eq!(list.filter(), "all");

        for start in &projects {
            list.set_filter(start);
            list.prev_filter();
            list.next_filter();
            assert_eq!(list.filter(), start.as_str());
            list.next_filter();
            list.prev_filter();
            assert_eq!(list.filter(), start.as_str());
        }
    }

    #[test]
    fn full_forward_cycle_returns_to_start() {
        let (mut list, _) = sample();
        let len = list.projects().len();
        for _ in 0..len {
            list.next_filter();
        }
        assert_eq!(list.filter(), "all");
    }

    #[test]
    fn stale_filter_steps_back_to_all() {
        let (mut list, _) = sample();
        list.set_filter("vanished");
        assert_eq!(list.filter_position(), 0);
        list.prev_filter();
        assert_eq!(list.filter(), "all");
    }

    #[test]
    fn filter_position_tracks_active_filter() {
        let (mut list, _) = sample();
        let third = list.projects()[2].clone();
        list.set_filter(&third);
        assert_eq!(list.filter_position(), 2);
    }
}
