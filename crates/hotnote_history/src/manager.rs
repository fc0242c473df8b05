//! In-memory lifecycle state with flush-on-mutation persistence.

use crate::HistoryStore;
use hotnote_core::{
    BatchItem, GeneratedContent, GenerationRecord, GenerationTask, RecordStatus, TaskKind,
};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, info, instrument, warn};

struct State {
    records: HashMap<String, GenerationRecord>,
    tasks: HashMap<String, GenerationTask>,
}

/// Sole writer for generation records and tasks.
///
/// All state lives in interior maps behind one mutex; every mutation
/// flushes a full snapshot through the [`HistoryStore`]. Flush failures
/// are logged, not propagated: losing a snapshot write must not fail
/// the generation it trails.
pub struct LifecycleManager {
    store: HistoryStore,
    state: Mutex<State>,
}

impl LifecycleManager {
    /// Create a manager, loading prior history from disk.
    pub fn new(store: HistoryStore) -> Self {
        let records: HashMap<_, _> = store
            .load_records()
            .into_iter()
            .map(|record| (record.id.clone(), record))
            .collect();
        let tasks: HashMap<_, _> = store
            .load_tasks()
            .into_iter()
            .map(|task| (task.id.clone(), task))
            .collect();
        info!(
            records = records.len(),
            tasks = tasks.len(),
            "Loaded generation history"
        );
        Self {
            store,
            state: Mutex::new(State { records, tasks }),
        }
    }

    /// Create a fresh record in `Generating` state.
    #[instrument(skip(self, user_info))]
    pub fn create_record(&self, keyword: &str, user_info: &str) -> GenerationRecord {
        let record = GenerationRecord::new(keyword, user_info);
        let mut state = self.state.lock().expect("lifecycle lock poisoned");
        state.records.insert(record.id.clone(), record.clone());
        self.flush(&state);
        record
    }

    /// Overlay generated content onto a record and set its status.
    ///
    /// Empty sections in `content` leave existing values untouched.
    /// `completed_at` is set on the transition into `Completed`.
    /// Returns None for an unknown id.
    #[instrument(skip(self, content))]
    pub fn update_record(
        &self,
        id: &str,
        content: &GeneratedContent,
        status: RecordStatus,
    ) -> Option<GenerationRecord> {
        let mut state = self.state.lock().expect("lifecycle lock poisoned");
        let record = state.records.get_mut(id)?;
        record.generated_content.merge(content);
        record.status = status;
        if status == RecordStatus::Completed {
            record.completed_at = Some(chrono::Utc::now());
        }
        let updated = record.clone();
        self.flush(&state);
        Some(updated)
    }

    /// Mark a record failed with its error message.
    #[instrument(skip(self, message))]
    pub fn mark_record_failed(&self, id: &str, message: &str) -> Option<GenerationRecord> {
        let mut state = self.state.lock().expect("lifecycle lock poisoned");
        let record = state.records.get_mut(id)?;
        record.status = RecordStatus::Failed;
        record.error_message = Some(message.to_string());
        record.completed_at = Some(chrono::Utc::now());
        let updated = record.clone();
        self.flush(&state);
        Some(updated)
    }

    /// Create an improvement copy of an existing record.
    ///
    /// Whether the parent is in a state that allows improvement is the
    /// caller's gate; this only requires that the parent exists.
    #[instrument(skip(self))]
    pub fn create_improved_version(&self, id: &str) -> Option<GenerationRecord> {
        let mut state = self.state.lock().expect("lifecycle lock poisoned");
        let improved = state.records.get(id)?.improved_copy();
        state.records.insert(improved.id.clone(), improved.clone());
        self.flush(&state);
        Some(improved)
    }

    /// Delete a record, cascading out of every task's record list.
    ///
    /// A task left with no records is deleted too. Returns whether the
    /// record existed.
    #[instrument(skip(self))]
    pub fn delete_record(&self, id: &str) -> bool {
        let mut state = self.state.lock().expect("lifecycle lock poisoned");
        if state.records.remove(id).is_none() {
            return false;
        }
        for task in state.tasks.values_mut() {
            task.records.retain(|record_id| record_id != id);
        }
        state.tasks.retain(|_, task| !task.records.is_empty());
        debug!(id, "Deleted record with task cascade");
        self.flush(&state);
        true
    }

    pub fn get_record(&self, id: &str) -> Option<GenerationRecord> {
        let state = self.state.lock().expect("lifecycle lock poisoned");
        state.records.get(id).cloned()
    }

    /// All records, newest first.
    pub fn get_all_records(&self) -> Vec<GenerationRecord> {
        let state = self.state.lock().expect("lifecycle lock poisoned");
        let mut records: Vec<_> = state.records.values().cloned().collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        records
    }

    /// Create a task for a batch of items.
    ///
    /// A one-item batch is a `Single` task.
    #[instrument(skip(self, items), fields(items = items.len()))]
    pub fn create_batch_task(&self, items: &[BatchItem]) -> GenerationTask {
        let kind = if items.len() == 1 {
            TaskKind::Single
        } else {
            TaskKind::Batch
        };
        let task = GenerationTask::new(kind, items.len());
        let mut state = self.state.lock().expect("lifecycle lock poisoned");
        state.tasks.insert(task.id.clone(), task.clone());
        self.flush(&state);
        task
    }

    /// Set a task's completed-item count; progress and status are
    /// always recomputed, never accepted from outside.
    #[instrument(skip(self))]
    pub fn update_task_progress(&self, task_id: &str, completed: usize) -> Option<GenerationTask> {
        let mut state = self.state.lock().expect("lifecycle lock poisoned");
        let task = state.tasks.get_mut(task_id)?;
        task.set_completed_items(completed);
        let updated = task.clone();
        self.flush(&state);
        Some(updated)
    }

    /// Append a record id to a task's membership list.
    #[instrument(skip(self))]
    pub fn add_record_to_task(&self, task_id: &str, record_id: &str) -> Option<GenerationTask> {
        let mut state = self.state.lock().expect("lifecycle lock poisoned");
        let task = state.tasks.get_mut(task_id)?;
        task.records.push(record_id.to_string());
        let updated = task.clone();
        self.flush(&state);
        Some(updated)
    }

    pub fn get_task(&self, task_id: &str) -> Option<GenerationTask> {
        let state = self.state.lock().expect("lifecycle lock poisoned");
        state.tasks.get(task_id).cloned()
    }

    /// All tasks, newest first.
    pub fn get_all_tasks(&self) -> Vec<GenerationTask> {
        let state = self.state.lock().expect("lifecycle lock poisoned");
        let mut tasks: Vec<_> = state.tasks.values().cloned().collect();
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        tasks
    }

    #[instrument(skip(self))]
    pub fn delete_task(&self, task_id: &str) -> bool {
        let mut state = self.state.lock().expect("lifecycle lock poisoned");
        let deleted = state.tasks.remove(task_id).is_some();
        if deleted {
            self.flush(&state);
        }
        deleted
    }

    /// Retain only the `keep` newest records.
    #[instrument(skip(self))]
    pub fn cleanup_old_records(&self, keep: usize) {
        let mut state = self.state.lock().expect("lifecycle lock poisoned");
        if state.records.len() <= keep {
            return;
        }
        let mut by_age: Vec<_> = state
            .records
            .values()
            .map(|record| (record.created_at, record.id.clone()))
            .collect();
        by_age.sort_by(|a, b| b.0.cmp(&a.0));
        for (_, id) in by_age.drain(keep..) {
            state.records.remove(&id);
        }
        info!(kept = keep, "Cleaned up old generation records");
        self.flush(&state);
    }

    fn flush(&self, state: &State) {
        let records: Vec<_> = state.records.values().cloned().collect();
        let tasks: Vec<_> = state.tasks.values().cloned().collect();
        if let Err(e) = self.store.save_records(&records) {
            warn!(error = %e, "Failed to persist records snapshot");
        }
        if let Err(e) = self.store.save_tasks(&tasks) {
            warn!(error = %e, "Failed to persist tasks snapshot");
        }
    }
}
