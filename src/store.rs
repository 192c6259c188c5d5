//! The task store: the authoritative in-memory task list plus its
//! persistence mirror.
//!
//! Every mutating operation either fully succeeds (list replaced, blob
//! rewritten through the storage port) or is a complete no-op that leaves
//! both untouched. Invalid input (blank text, unknown id) is a silent no-op
//! by contract; callers decide whether to tell the user.

use std::io;

use chrono::Utc;

use crate::fields::{Priority, Status};
use crate::storage::Storage;
use crate::task::Task;

/// Owns the ordered task list (insertion order) and the storage port.
pub struct TaskStore {
    tasks: Vec<Task>,
    storage: Box<dyn Storage>,
}

impl TaskStore {
    /// Open a store, hydrating the list from whatever the port has persisted.
    pub fn open(storage: Box<dyn Storage>) -> io::Result<Self> {
        let tasks = storage.load()?.unwrap_or_default();
        Ok(TaskStore { tasks, storage })
    }

    /// The full list, in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Get a task by id.
    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Append a new task and persist. Returns the new id, or `None` when the
    /// trimmed text is empty (silent no-op).
    pub fn add(
        &mut self,
        text: &str,
        priority: Priority,
        status: Option<Status>,
    ) -> io::Result<Option<u64>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        let id = self.next_id();
        self.tasks.push(Task::new(
            id,
            text.to_string(),
            priority,
            status.unwrap_or_default(),
        ));
        self.storage.save(&self.tasks)?;
        Ok(Some(id))
    }

    /// Replace a task's text and, where given, priority/status. `id`,
    /// `completed`, and `created_at` are preserved. Returns whether anything
    /// changed; blank text or an unknown id is a no-op.
    pub fn edit(
        &mut self,
        id: u64,
        text: &str,
        priority: Option<Priority>,
        status: Option<Status>,
    ) -> io::Result<bool> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(false);
        }
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(false);
        };
        task.text = text.to_string();
        if let Some(p) = priority {
            task.priority = p;
        }
        if let Some(s) = status {
            task.status = s;
        }
        self.storage.save(&self.tasks)?;
        Ok(true)
    }

    /// Flip a task's completion flag, keeping `status` in sync: completing
    /// forces `Completed`, un-completing forces `NotStarted`.
    pub fn toggle_complete(&mut self, id: u64) -> io::Result<bool> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(false);
        };
        task.completed = !task.completed;
        task.status = if task.completed {
            Status::Completed
        } else {
            Status::NotStarted
        };
        self.storage.save(&self.tasks)?;
        Ok(true)
    }

    /// Remove a task. Unknown ids are a no-op.
    ///
    /// The blob is rewritten even when this empties the list; leaving the
    /// last save in place would resurrect a deleted task on the next start.
    pub fn delete(&mut self, id: u64) -> io::Result<bool> {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            return Ok(false);
        }
        self.storage.save(&self.tasks)?;
        Ok(true)
    }

    /// Fresh unique id: the creation time in epoch milliseconds, bumped past
    /// any id already in the list so same-millisecond adds stay distinct.
    fn next_id(&self) -> u64 {
        let mut id = Utc::now().timestamp_millis().max(1) as u64;
        while self.tasks.iter().any(|t| t.id == id) {
            id += 1;
        }
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Memory;
    use crate::task::Task;

    fn empty_store() -> TaskStore {
        TaskStore::open(Box::new(Memory::new())).unwrap()
    }

    #[test]
    fn add_assigns_defaults() {
        let mut store = empty_store();
        let id = store.add("Buy milk", Priority::Low, None).unwrap().unwrap();
        assert_eq!(store.len(), 1);
        let task = store.get(id).unwrap();
        assert_eq!(task.text, "Buy milk");
        assert!(!task.completed);
        assert_eq!(task.priority, Priority::Low);
        assert_eq!(task.status, Status::NotStarted);
    }

    #[test]
    fn add_trims_text_and_rejects_blank() {
        let mut store = empty_store();
        assert_eq!(store.add("", Priority::Medium, None).unwrap(), None);
        assert_eq!(store.add("   \t", Priority::Medium, None).unwrap(), None);
        assert!(store.is_empty());

        let id = store
            .add("  Walk dog  ", Priority::Medium, None)
            .unwrap()
            .unwrap();
        assert_eq!(store.get(id).unwrap().text, "Walk dog");
    }

    #[test]
    fn ids_stay_unique_for_rapid_adds() {
        let mut store = empty_store();
        let a = store.add("one", Priority::Medium, None).unwrap().unwrap();
        let b = store.add("two", Priority::Medium, None).unwrap().unwrap();
        let c = store.add("three", Priority::Medium, None).unwrap().unwrap();
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, c);
    }

    #[test]
    fn toggle_flips_completed_and_syncs_status() {
        let mut store = empty_store();
        let id = store
            .add("Buy milk", Priority::Medium, Some(Status::InProgress))
            .unwrap()
            .unwrap();

        assert!(store.toggle_complete(id).unwrap());
        let task = store.get(id).unwrap();
        assert!(task.completed);
        assert_eq!(task.status, Status::Completed);

        assert!(store.toggle_complete(id).unwrap());
        let task = store.get(id).unwrap();
        assert!(!task.completed);
        assert_eq!(task.status, Status::NotStarted);
    }

    #[test]
    fn toggle_unknown_id_is_a_noop() {
        let mut store = empty_store();
        assert!(!store.toggle_complete(42).unwrap());
    }

    #[test]
    fn edit_preserves_identity_fields() {
        let mut store = empty_store();
        let id = store.add("Buy milk", Priority::Low, None).unwrap().unwrap();
        store.toggle_complete(id).unwrap();
        let before = store.get(id).unwrap().clone();

        assert!(store
            .edit(id, "Buy oat milk", Some(Priority::High), Some(Status::InProgress))
            .unwrap());
        let after = store.get(id).unwrap();
        assert_eq!(after.id, before.id);
        assert_eq!(after.completed, before.completed);
        assert_eq!(after.created_at, before.created_at);
        assert_eq!(after.text, "Buy oat milk");
        assert_eq!(after.priority, Priority::High);
        assert_eq!(after.status, Status::InProgress);
    }

    #[test]
    fn edit_blank_text_or_unknown_id_is_a_noop() {
        let mut store = empty_store();
        let id = store.add("Buy milk", Priority::Low, None).unwrap().unwrap();

        assert!(!store.edit(id, "  ", Some(Priority::High), None).unwrap());
        assert_eq!(store.get(id).unwrap().text, "Buy milk");
        assert_eq!(store.get(id).unwrap().priority, Priority::Low);

        assert!(!store.edit(id + 1, "Other", None, None).unwrap());
    }

    #[test]
    fn delete_unknown_id_leaves_list_identical() {
        let mut store = empty_store();
        store.add("Buy milk", Priority::Low, None).unwrap();
        store.add("Walk dog", Priority::High, None).unwrap();
        let before: Vec<Task> = store.tasks().to_vec();

        assert!(!store.delete(999).unwrap());
        assert_eq!(store.tasks(), before.as_slice());
    }

    #[test]
    fn deleting_last_task_persists_the_empty_list() {
        let mut store = empty_store();
        let id = store.add("Buy milk", Priority::Low, None).unwrap().unwrap();
        assert!(store.delete(id).unwrap());
        assert!(store.is_empty());

        // Re-hydrating from the same blob must come back empty, not with the
        // deleted task.
        let persisted = store.storage.load().unwrap();
        assert_eq!(persisted, Some(Vec::new()));
    }

    #[test]
    fn open_hydrates_from_persisted_blob() {
        let seeded = vec![Task::new(
            7,
            "Water plants".into(),
            Priority::Medium,
            Status::NotStarted,
        )];
        let store = TaskStore::open(Box::new(Memory::with_tasks(seeded.clone()))).unwrap();
        assert_eq!(store.tasks(), seeded.as_slice());
    }
}
