//! Task data structure.
//!
//! This module defines the `Task` struct, one to-do item with its text,
//! completion flag, priority, status, and creation time. The serde layout
//! matches the persisted blob: camelCase field names, `createdAt` as an
//! ISO-8601 string.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::fields::{Priority, Status};

/// A single to-do item.
///
/// `id` and `created_at` are fixed at creation and never change; edits only
/// touch `text`, `priority`, and `status`. `text` is guaranteed non-empty
/// after trimming by the store's add/edit operations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u64,
    pub text: String,
    pub completed: bool,
    #[serde(default)]
    pub priority: Priority,
    // Blobs written before the status field existed omit it entirely.
    #[serde(default)]
    pub status: Status,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Create a fresh, uncompleted task.
    pub fn new(id: u64, text: String, priority: Priority, status: Status) -> Self {
        Task {
            id,
            text,
            completed: false,
            priority,
            status,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialises_with_camel_case_names() {
        let task = Task::new(17, "Buy milk".into(), Priority::Low, Status::NotStarted);
        let json = serde_json::to_string(&task).unwrap();
        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"priority\":\"low\""));
        assert!(json.contains("\"status\":\"not_started\""));
    }

    #[test]
    fn deserialises_blob_without_status_field() {
        // Layout written by the pre-status variant of the app.
        let json = r#"{"id":1,"text":"Walk dog","completed":false,
                       "priority":"high","createdAt":"2024-03-01T09:30:00Z"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.status, Status::NotStarted);
        assert_eq!(task.priority, Priority::High);
    }

    #[test]
    fn round_trips_through_json() {
        let tasks = vec![
            Task::new(1, "Buy milk".into(), Priority::Low, Status::NotStarted),
            Task::new(2, "Walk dog".into(), Priority::High, Status::InProgress),
        ];
        let json = serde_json::to_string(&tasks).unwrap();
        let back: Vec<Task> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tasks);
    }
}
