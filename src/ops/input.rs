use std::sync::LazyLock;

use regex::Regex;

use crate::model::DEFAULT_PROJECT;

static PROJECT_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"project:(\w+)").expect("static regex"));

/// Split add-form input into `(description, project)`.
///
/// A `project:<word>` tag anywhere in the input names the project (the first
/// one wins) and every tag is stripped from the description. Without a tag
/// the project is [`DEFAULT_PROJECT`]. The description comes back trimmed and
/// may be empty; callers reject that.
pub fn parse_task_input(input: &str) -> (String, String) {
    match PROJECT_TAG_RE.captures(input) {
        Some(caps) => {
            let project = caps[1].to_string();
            let description = PROJECT_TAG_RE.replace_all(input, "").trim().to_string();
            (description, project)
        }
        None => (input.trim().to_string(), DEFAULT_PROJECT.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parsed(input: &str) -> (String, String) {
        parse_task_input(input)
    }

    #[test]
    fn trailing_tag() {
        assert_eq!(parsed("Fix bug project:myapp"), ("Fix bug".into(), "myapp".into()));
    }

    #[test]
    fn no_tag_defaults() {
        assert_eq!(parsed("Just text"), ("Just text".into(), "default".into()));
    }

    #[test]
    fn tag_only_leaves_empty_description() {
        assert_eq!(parsed("  project:x   "), ("".into(), "x".into()));
    }

    #[test]
    fn leading_tag() {
        assert_eq!(
            parsed("project:home Water the plants"),
            ("Water the plants".into(), "home".into())
        );
    }

    #[test]
    fn first_tag_wins_and_all_are_removed() {
        assert_eq!(
            parsed("Ship project:alpha it project:beta"),
            ("Ship  it".into(), "alpha".into())
        );
    }

    #[test]
    fn tag_stops_at_non_word_characters() {
        assert_eq!(
            parsed("Deploy project:my-app"),
            ("Deploy -app".into(), "my".into())
        );
        assert_eq!(parsed("Refactor project:core_lib"), ("Refactor".into(), "core_lib".into()));
    }

    #[test]
    fn empty_project_tag_is_not_a_tag() {
        assert_eq!(parsed("Note project: later"), ("Note project: later".into(), "default".into()));
    }
}
