//! Generation task entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What kind of work a task groups.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TaskKind {
    /// One generation item
    Single,
    /// Several generation items processed sequentially
    Batch,
    /// An improvement pass over an existing record
    Improvement,
}

/// Derived status of a task.
///
/// `Failed` exists for wire compatibility but the lifecycle manager
/// never sets it: item failures live on the records, and a batch task
/// completes once every dispatched item has been accounted for, win or
/// lose.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TaskStatus {
    /// No items completed yet
    Pending,
    /// Some items completed
    Processing,
    /// All items accounted for (terminal)
    Completed,
    /// Never set by the manager; item failures live on records
    Failed,
}

/// A unit of work grouping one or more generation records.
///
/// The task exclusively owns list membership (by record id); a record's
/// lifetime continues independently. Invariant: `progress ==
/// round(100 * completed_items / total_items)` and `status == Completed`
/// iff `completed_items >= total_items`.
///
/// # Examples
///
/// ```
/// use hotnote_core::{GenerationTask, TaskKind, TaskStatus};
///
/// let mut task = GenerationTask::new(TaskKind::Batch, 4);
/// assert_eq!(task.status, TaskStatus::Pending);
///
/// task.set_completed_items(2);
/// assert_eq!(task.progress, 50);
/// assert_eq!(task.status, TaskStatus::Processing);
///
/// task.set_completed_items(4);
/// assert_eq!(task.progress, 100);
/// assert_eq!(task.status, TaskStatus::Completed);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationTask {
    /// Opaque unique identifier
    pub id: String,
    /// What kind of work this task groups
    #[serde(rename = "type")]
    pub kind: TaskKind,
    /// Derived status
    pub status: TaskStatus,
    /// Derived percentage, 0-100
    pub progress: u8,
    /// Number of items dispatched
    pub total_items: usize,
    /// Number of items accounted for so far
    pub completed_items: usize,
    /// Set once at creation
    pub created_at: DateTime<Utc>,
    /// Set once, when the task completes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    /// Ordered ids of the records this task owns membership of
    pub records: Vec<String>,
}

impl GenerationTask {
    /// Create a pending task for `total_items` items.
    pub fn new(kind: TaskKind, total_items: usize) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind,
            status: TaskStatus::Pending,
            progress: 0,
            total_items,
            completed_items: 0,
            created_at: Utc::now(),
            completed_at: None,
            records: Vec::new(),
        }
    }

    /// Record progress, recomputing `progress` and `status` from the
    /// invariant.
    ///
    /// The completion timestamp is set exactly once, on the transition
    /// into `Completed`.
    pub fn set_completed_items(&mut self, completed_items: usize) {
        self.completed_items = completed_items;
        self.progress = if self.total_items == 0 {
            100
        } else {
            (((completed_items as f64 / self.total_items as f64) * 100.0).round() as u64).min(100)
                as u8
        };
        let was_completed = self.status == TaskStatus::Completed;
        self.status = if completed_items >= self.total_items {
            TaskStatus::Completed
        } else if completed_items > 0 {
            TaskStatus::Processing
        } else {
            TaskStatus::Pending
        };
        if self.status == TaskStatus::Completed && !was_completed {
            self.completed_at = Some(Utc::now());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_invariant_holds_for_all_counts() {
        let mut task = GenerationTask::new(TaskKind::Batch, 3);
        for completed in 0..=3 {
            task.set_completed_items(completed);
            let expected = ((completed as f64 / 3.0) * 100.0).round() as u8;
            assert_eq!(task.progress, expected);
            assert_eq!(task.status == TaskStatus::Completed, completed >= 3);
        }
    }

    #[test]
    fn completion_timestamp_set_once() {
        let mut task = GenerationTask::new(TaskKind::Single, 1);
        assert!(task.completed_at.is_none());
        task.set_completed_items(1);
        let first = task.completed_at;
        assert!(first.is_some());
        task.set_completed_items(1);
        assert_eq!(task.completed_at, first);
    }

    #[test]
    fn kind_uses_type_on_the_wire() {
        let task = GenerationTask::new(TaskKind::Improvement, 1);
        let json = serde_json::to_string(&task).unwrap();
        assert!(json.contains("\"type\":\"improvement\""));
        assert!(json.contains("totalItems"));
    }
}
