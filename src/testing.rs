//! Testing utilities and mock implementations.
//!
//! These types are provided for use in tests. They may appear unused in
//! the library itself but are consumed by unit and integration tests.

use crate::model::Task;
use crate::observer::TaskObserver;
use std::sync::{Arc, Mutex};

/// A task change notification recorded by a [`RecordingObserver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObservedEvent {
    /// A task with the given ID was added.
    Added(i64),
    /// A task with the given ID was updated.
    Updated(i64),
    /// A task with the given ID was deleted.
    Deleted(i64),
    /// All tasks were cleared.
    Cleared,
}

/// Shared, ordered log of `(observer name, event)` pairs.
///
/// Give the same log to several observers to assert on fan-out order across
/// them.
pub type EventLog = Arc<Mutex<Vec<(String, ObservedEvent)>>>;

/// Observer that records every notification it receives, in order.
#[derive(Debug)]
pub struct RecordingObserver {
    name: String,
    log: EventLog,
}

impl RecordingObserver {
    /// Create a named observer with its own private log.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self::with_log(name, &EventLog::default())
    }

    /// Create a named observer appending to a shared log.
    #[must_use]
    pub fn with_log(name: &str, log: &EventLog) -> Self {
        Self { name: name.to_string(), log: Arc::clone(log) }
    }

    /// Get the events recorded by this observer, in delivery order.
    ///
    /// # Panics
    ///
    /// Panics if the log mutex is poisoned.
    #[must_use]
    pub fn events(&self) -> Vec<ObservedEvent> {
        self.log
            .lock()
            .unwrap()
            .iter()
            .filter(|(name, _)| *name == self.name)
            .map(|(_, event)| event.clone())
            .collect()
    }

    fn record(&self, event: ObservedEvent) {
        self.log.lock().unwrap().push((self.name.clone(), event));
    }
}

impl TaskObserver for RecordingObserver {
    fn on_task_added(&self, task: &Task) {
        self.record(ObservedEvent::Added(task.id()));
    }

    fn on_task_updated(&self, task: &Task) {
        self.record(ObservedEvent::Updated(task.id()));
    }

    fn on_task_deleted(&self, task_id: i64) {
        self.record(ObservedEvent::Deleted(task_id));
    }

    fn on_tasks_cleared(&self) {
        self.record(ObservedEvent::Cleared);
    }
}
