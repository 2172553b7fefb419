//! Facade composing the task store with change notifications.

use crate::error::Result;
use crate::model::Task;
use crate::observer::{ObserverRegistry, TaskObserver};
use crate::store::{SqliteTaskStore, TaskStore};
use std::sync::Arc;

/// Central API surface: persists tasks through a [`TaskStore`] and fans
/// change notifications out to registered observers.
///
/// Every mutating operation persists first and notifies only on success, so
/// a store failure never produces a notification and a persisted change is
/// always announced. Reads delegate straight to the store.
#[derive(Debug)]
pub struct TaskManager<S: TaskStore> {
    store: S,
    observers: ObserverRegistry,
}

impl<S: TaskStore> TaskManager<S> {
    /// Create a manager over a caller-owned store.
    pub fn new(store: S) -> Self {
        Self { store, observers: ObserverRegistry::new() }
    }

    /// Register an observer for change notifications.
    pub fn register_observer(&self, observer: Arc<dyn TaskObserver>) {
        self.observers.register(observer);
    }

    /// Unregister a previously registered observer.
    pub fn unregister_observer(&self, observer: &Arc<dyn TaskObserver>) {
        self.observers.unregister(observer);
    }

    /// Get the number of registered observers.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Add a task, then notify observers.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the task; no observer is
    /// notified in that case.
    pub fn add_task(&self, task: &Task) -> Result<()> {
        self.store.add(task)?;
        self.observers.notify_added(task);
        Ok(())
    }

    /// Update a task, then notify observers.
    ///
    /// # Errors
    ///
    /// Returns an error if the task does not exist or the store fails; no
    /// observer is notified in that case.
    pub fn update_task(&self, task: &Task) -> Result<()> {
        self.store.update(task)?;
        self.observers.notify_updated(task);
        Ok(())
    }

    /// Delete a task by ID, then notify observers.
    ///
    /// # Errors
    ///
    /// Returns an error if the task does not exist or the store fails; no
    /// observer is notified in that case.
    pub fn delete_task(&self, task_id: i64) -> Result<()> {
        self.store.delete(task_id)?;
        self.observers.notify_deleted(task_id);
        Ok(())
    }

    /// Delete every task, then notify observers.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails; no observer is notified in that
    /// case.
    pub fn delete_all_tasks(&self) -> Result<()> {
        self.store.delete_all()?;
        self.observers.notify_cleared();
        Ok(())
    }

    /// Get every stored task. No notification side effect.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn get_all_tasks(&self) -> Result<Vec<Task>> {
        self.store.get_all()
    }

    /// Get a task by ID. A missing task is `Ok(None)`, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn get_task(&self, task_id: i64) -> Result<Option<Task>> {
        self.store.get(task_id)
    }
}

impl TaskManager<&'static SqliteTaskStore> {
    /// Create a manager over the process-wide shared store.
    ///
    /// # Errors
    ///
    /// Returns an error if the shared store cannot be constructed.
    pub fn shared() -> Result<Self> {
        Ok(Self::new(SqliteTaskStore::shared()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::model::TaskState;
    use crate::testing::{ObservedEvent, RecordingObserver};

    fn manager() -> TaskManager<SqliteTaskStore> {
        TaskManager::new(SqliteTaskStore::open_in_memory().unwrap())
    }

    fn task(id: i64, title: &str) -> Task {
        Task::new(id, title, "", TaskState::ToDo).unwrap()
    }

    #[test]
    fn test_mutations_persist_and_notify() {
        let manager = manager();
        let observer = Arc::new(RecordingObserver::new("watcher"));
        manager.register_observer(observer.clone());

        manager.add_task(&task(1, "one")).unwrap();
        manager.update_task(&task(1, "one updated")).unwrap();
        manager.delete_task(1).unwrap();
        manager.add_task(&task(2, "two")).unwrap();
        manager.delete_all_tasks().unwrap();

        assert_eq!(
            observer.events(),
            vec![
                ObservedEvent::Added(1),
                ObservedEvent::Updated(1),
                ObservedEvent::Deleted(1),
                ObservedEvent::Added(2),
                ObservedEvent::Cleared,
            ]
        );
        assert!(manager.get_all_tasks().unwrap().is_empty());
    }

    #[test]
    fn test_store_failure_suppresses_notification() {
        let manager = manager();
        let observer = Arc::new(RecordingObserver::new("watcher"));
        manager.register_observer(observer.clone());

        assert!(matches!(manager.delete_task(999), Err(Error::TaskNotFound(999))));
        assert!(matches!(
            manager.update_task(&task(7, "ghost")),
            Err(Error::TaskNotFound(7))
        ));

        assert!(observer.events().is_empty());
    }

    #[test]
    fn test_duplicate_add_notifies_only_once() {
        let manager = manager();
        let observer = Arc::new(RecordingObserver::new("watcher"));
        manager.register_observer(observer.clone());

        manager.add_task(&task(1, "one")).unwrap();
        assert!(manager.add_task(&task(1, "again")).is_err());

        assert_eq!(observer.events(), vec![ObservedEvent::Added(1)]);
    }

    #[test]
    fn test_reads_have_no_notification_side_effect() {
        let manager = manager();
        let observer = Arc::new(RecordingObserver::new("watcher"));
        manager.register_observer(observer.clone());

        manager.add_task(&task(1, "one")).unwrap();
        let _ = manager.get_task(1).unwrap();
        let _ = manager.get_task(999).unwrap();
        let _ = manager.get_all_tasks().unwrap();

        assert_eq!(observer.events(), vec![ObservedEvent::Added(1)]);
    }

    #[test]
    fn test_get_task_distinguishes_absent_from_failure() {
        let manager = manager();
        manager.add_task(&task(1, "one")).unwrap();

        assert!(manager.get_task(1).unwrap().is_some());
        assert!(manager.get_task(2).unwrap().is_none());
    }

    #[test]
    fn test_observer_count_tracks_registry() {
        let manager = manager();
        let first: Arc<dyn crate::observer::TaskObserver> =
            Arc::new(RecordingObserver::new("first"));
        let second: Arc<dyn crate::observer::TaskObserver> =
            Arc::new(RecordingObserver::new("second"));

        assert_eq!(manager.observer_count(), 0);
        manager.register_observer(Arc::clone(&first));
        manager.register_observer(Arc::clone(&second));
        assert_eq!(manager.observer_count(), 2);

        manager.unregister_observer(&first);
        assert_eq!(manager.observer_count(), 1);
    }

    #[test]
    fn test_manager_borrows_a_shared_style_store() {
        // The blanket reference impl lets several managers share one store.
        let store = SqliteTaskStore::open_in_memory().unwrap();
        let writer = TaskManager::new(&store);
        let reader = TaskManager::new(&store);

        writer.add_task(&task(1, "shared")).unwrap();
        assert_eq!(reader.get_task(1).unwrap().unwrap().title(), "shared");
    }
}
