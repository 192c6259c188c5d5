//! The view layer: a pure filter over the store's list.
//!
//! Given a search term and optional priority/status criteria, produces the
//! ordered subsequence of tasks to display. Holds no state beyond the
//! criteria themselves and never mutates the list.

use crate::fields::{Priority, Status};
use crate::task::Task;

/// Filter criteria for the visible task list.
///
/// An absent priority/status means "no filter selected"; an empty search
/// string matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub search: String,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
}

impl TaskFilter {
    /// Whether a single task passes the criteria: case-insensitive substring
    /// match on text, exact match on any selected priority/status.
    pub fn matches(&self, task: &Task) -> bool {
        if !self.search.is_empty()
            && !task
                .text
                .to_lowercase()
                .contains(&self.search.to_lowercase())
        {
            return false;
        }
        if let Some(p) = self.priority {
            if task.priority != p {
                return false;
            }
        }
        if let Some(s) = self.status {
            if task.status != s {
                return false;
            }
        }
        true
    }

    /// The visible subsequence, in the store's insertion order.
    pub fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks.iter().filter(|t| self.matches(t)).collect()
    }

    pub fn is_active(&self) -> bool {
        !self.search.is_empty() || self.priority.is_some() || self.status.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Task> {
        vec![
            Task::new(1, "Buy milk".into(), Priority::Low, Status::NotStarted),
            Task::new(2, "Walk dog".into(), Priority::Medium, Status::InProgress),
            Task::new(3, "Milk the cows".into(), Priority::Low, Status::Completed),
        ]
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let tasks = sample();
        let filter = TaskFilter {
            search: "MILK".into(),
            ..TaskFilter::default()
        };
        let visible = filter.apply(&tasks);
        assert_eq!(
            visible.iter().map(|t| t.id).collect::<Vec<_>>(),
            vec![1, 3]
        );
    }

    #[test]
    fn no_criteria_shows_everything_in_order() {
        let tasks = sample();
        let visible = TaskFilter::default().apply(&tasks);
        assert_eq!(visible.len(), 3);
        assert_eq!(
            visible.iter().map(|t| t.id).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn priority_filter_is_exact() {
        let tasks = sample();
        let filter = TaskFilter {
            priority: Some(Priority::High),
            ..TaskFilter::default()
        };
        assert!(filter.apply(&tasks).is_empty());

        let filter = TaskFilter {
            priority: Some(Priority::Low),
            ..TaskFilter::default()
        };
        assert_eq!(filter.apply(&tasks).len(), 2);
    }

    #[test]
    fn criteria_combine_with_and() {
        let tasks = sample();
        let filter = TaskFilter {
            search: "milk".into(),
            priority: Some(Priority::Low),
            status: Some(Status::Completed),
        };
        let visible = filter.apply(&tasks);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, 3);
    }
}
