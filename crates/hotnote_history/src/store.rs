//! JSON snapshot persistence for records and tasks.

use hotnote_core::{GenerationRecord, GenerationTask};
use hotnote_error::StorageError;
use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};

const RECORDS_FILE: &str = "records.json";
const TASKS_FILE: &str = "tasks.json";

/// Durable storage for generation history.
///
/// Each save rewrites the whole file atomically (temp file + rename).
/// Loads are tolerant: a missing or corrupt file is logged and read as
/// empty, history is never a reason not to start.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    data_dir: PathBuf,
}

impl HistoryStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn load_records(&self) -> Vec<GenerationRecord> {
        load_list(&self.data_dir.join(RECORDS_FILE))
    }

    pub fn load_tasks(&self) -> Vec<GenerationTask> {
        load_list(&self.data_dir.join(TASKS_FILE))
    }

    pub fn save_records(&self, records: &[GenerationRecord]) -> Result<(), StorageError> {
        self.write_list(RECORDS_FILE, records)
    }

    pub fn save_tasks(&self, tasks: &[GenerationTask]) -> Result<(), StorageError> {
        self.write_list(TASKS_FILE, tasks)
    }

    fn write_list<T: Serialize>(&self, file: &str, items: &[T]) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.data_dir)?;
        let path = self.data_dir.join(file);
        let tmp = self.data_dir.join(format!("{file}.tmp"));

        let json = serde_json::to_string_pretty(items)
            .map_err(|e| StorageError::new(format!("serialize {file}: {e}")))?;
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }
}

fn load_list<T: DeserializeOwned>(path: &Path) -> Vec<T> {
    match std::fs::read_to_string(path) {
        Ok(raw) => match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Corrupt history file, starting empty");
                Vec::new()
            }
        },
        Err(_) => Vec::new(),
    }
}
