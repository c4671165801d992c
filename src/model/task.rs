/// Project assigned to tasks that have none
pub const DEFAULT_PROJECT: &str = "default";

/// Project filter entry that matches every task
pub const ALL_PROJECTS: &str = "all";

/// A single to-do item as the UI sees it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Store-assigned identifier (empty until the store acknowledges the task)
    pub id: String,
    /// Task description text
    pub description: String,
    /// Project label, never empty once normalized
    pub project: String,
    /// Completion flag
    pub completed: bool,
    /// Creation time, Unix seconds
    pub created_at: i64,
    /// Completion time, Unix seconds (0 if not completed or unknown)
    pub end: i64,
}

impl Task {
    /// Create a new, not yet persisted pending task
    pub fn new(description: impl Into<String>, project: impl Into<String>, created_at: i64) -> Self {
        let mut task = Task {
            id: String::new(),
            description: description.into(),
            project: project.into(),
            completed: false,
            created_at,
            end: 0,
        };
        task.normalize_project();
        task
    }

    /// Whether the store has acknowledged this task
    pub fn is_persisted(&self) -> bool {
        !self.id.is_empty()
    }

    /// Replace a blank project with [`DEFAULT_PROJECT`]
    pub fn normalize_project(&mut self) {
        if self.project.trim().is_empty() {
            self.project = DEFAULT_PROJECT.to_string();
        }
    }

    /// Checkbox shown in the status column
    pub fn checkbox(&self) -> &'static str {
        if self.completed { "[x]" } else { "[ ]" }
    }

    /// Case-insensitive substring match against description or project.
    /// `needle` must already be lowercase.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.description.to_lowercase().contains(needle)
            || self.project.to_lowercase().contains(needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_task_defaults_blank_project() {
        let task = Task::new("Buy milk", "   ", 10);
        assert_eq!(task.project, DEFAULT_PROJECT);
        assert!(!task.completed);
        assert!(!task.is_persisted());
    }

    #[test]
    fn new_task_keeps_project() {
        let task = Task::new("Write tests", "myapp", 10);
        assert_eq!(task.project, "myapp");
    }

    #[test]
    fn matches_description_or_project() {
        let task = Task::new("Fix Login Bug", "WebApp", 0);
        assert!(task.matches_lowercase("login"));
        assert!(task.matches_lowercase("webapp"));
        assert!(task.matches_lowercase(""));
        assert!(!task.matches_lowercase("backend"));
    }

    #[test]
    fn checkbox_reflects_completion() {
        let mut task = Task::new("a", "", 0);
        assert_eq!(task.checkbox(), "[ ]");
        task.completed = true;
        assert_eq!(task.checkbox(), "[x]");
    }
}
