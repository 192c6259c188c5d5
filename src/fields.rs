//! Enumerations and field types for task records.
//!
//! Defines the structured labels attached to every task: its urgency
//! (`Priority`) and its workflow stage (`Status`), plus the string helpers
//! used wherever either is shown to the user.
//!
//! "No filter selected" is deliberately not a variant of either enum: the
//! view layer models it as `Option<Priority>` / `Option<Status>` so a real
//! label can never be confused with the absence of one.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Urgency label carried by every task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

/// Workflow stage carried by every task.
///
/// `Completed` is kept in sync with the task's `completed` flag whenever
/// completion is toggled, but `InProgress` can be set independently via edit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    NotStarted,
    InProgress,
    Completed,
}

impl Default for Status {
    fn default() -> Self {
        Status::NotStarted
    }
}

/// Format a priority for display.
pub fn format_priority(p: Priority) -> &'static str {
    match p {
        Priority::Low => "Low",
        Priority::Medium => "Medium",
        Priority::High => "High",
    }
}

/// Format a status for display.
pub fn format_status(s: Status) -> &'static str {
    match s {
        Status::NotStarted => "Not Started",
        Status::InProgress => "In Progress",
        Status::Completed => "Completed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_creation_rules() {
        assert_eq!(Priority::default(), Priority::Medium);
        assert_eq!(Status::default(), Status::NotStarted);
    }

    #[test]
    fn wire_names_are_snake_case() {
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"high\"");
        assert_eq!(
            serde_json::to_string(&Status::NotStarted).unwrap(),
            "\"not_started\""
        );
        let s: Status = serde_json::from_str("\"in_progress\"").unwrap();
        assert_eq!(s, Status::InProgress);
    }
}
