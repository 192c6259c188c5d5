//! Persistence port and adapters.
//!
//! The store never touches the filesystem directly; it talks to a `Storage`
//! implementation injected at construction. `JsonFile` is the real adapter
//! (one fixed path, whole list serialized as a JSON array), `Memory` backs
//! the tests.

use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::PathBuf;

use crate::task::Task;

/// Key-value persistence surface for the task list.
///
/// `load` returns `Ok(None)` when nothing has been persisted yet, which the
/// store treats as an empty list.
pub trait Storage {
    fn load(&self) -> io::Result<Option<Vec<Task>>>;
    fn save(&mut self, tasks: &[Task]) -> io::Result<()>;
}

/// JSON-file adapter: the whole task list lives as one array in one file.
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: PathBuf) -> Self {
        JsonFile { path }
    }
}

impl Storage for JsonFile {
    fn load(&self) -> io::Result<Option<Vec<Task>>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let mut buf = String::new();
        File::open(&self.path)?.read_to_string(&mut buf)?;
        let tasks = serde_json::from_str(&buf)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(Some(tasks))
    }

    fn save(&mut self, tasks: &[Task]) -> io::Result<()> {
        // Atomic-ish write via temp + rename.
        let tmp = self.path.with_extension("json.tmp");
        let data = serde_json::to_string_pretty(tasks)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let mut f = File::create(&tmp)?;
        f.write_all(data.as_bytes())?;
        f.flush()?;
        fs::rename(tmp, &self.path)?;
        Ok(())
    }
}

/// In-memory adapter used by tests in place of a real file.
#[derive(Default)]
pub struct Memory {
    blob: Option<Vec<Task>>,
}

impl Memory {
    pub fn new() -> Self {
        Memory::default()
    }

    /// Pre-seed the adapter, as if a previous session had saved `tasks`.
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Memory { blob: Some(tasks) }
    }

    /// What the last save wrote, if anything.
    pub fn persisted(&self) -> Option<&[Task]> {
        self.blob.as_deref()
    }
}

impl Storage for Memory {
    fn load(&self) -> io::Result<Option<Vec<Task>>> {
        Ok(self.blob.clone())
    }

    fn save(&mut self, tasks: &[Task]) -> io::Result<()> {
        self.blob = Some(tasks.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{Priority, Status};

    #[test]
    fn memory_save_then_load_round_trips() {
        let mut storage = Memory::new();
        assert!(storage.load().unwrap().is_none());

        let tasks = vec![Task::new(
            1,
            "Buy milk".into(),
            Priority::Low,
            Status::NotStarted,
        )];
        storage.save(&tasks).unwrap();
        assert_eq!(storage.load().unwrap().unwrap(), tasks);
    }

    #[test]
    fn empty_list_is_a_real_persisted_state() {
        // Saving an empty list must not read back as "never saved".
        let mut storage = Memory::new();
        storage.save(&[]).unwrap();
        assert_eq!(storage.load().unwrap(), Some(Vec::new()));
    }
}
