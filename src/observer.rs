//! Change-notification registry for task observers.

use crate::model::Task;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Callbacks invoked when the task set changes.
///
/// Callbacks are infallible by signature. A panicking observer unwinds
/// through the notifying call and aborts fan-out to observers registered
/// after it.
pub trait TaskObserver: Send + Sync {
    /// Called when a task was added.
    fn on_task_added(&self, task: &Task);

    /// Called when a task was updated.
    fn on_task_updated(&self, task: &Task);

    /// Called when a task was deleted.
    fn on_task_deleted(&self, task_id: i64);

    /// Called when all tasks were cleared.
    fn on_tasks_cleared(&self);
}

/// Ordered registry of observers with fan-out notification.
///
/// Registration order determines fan-out order. Observer identity is the
/// `Arc` pointer: registering the same `Arc` twice is a no-op, and so is
/// unregistering one that was never registered.
///
/// The list sits behind a mutex so register/unregister racing a fan-out
/// cannot corrupt it. Fan-out works on a snapshot of the list, so a callback
/// may re-enter the registry without deadlocking; membership changes made
/// during a fan-out take effect from the next notification on.
#[derive(Default)]
pub struct ObserverRegistry {
    observers: Mutex<Vec<Arc<dyn TaskObserver>>>,
}

impl ObserverRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer at the end of the fan-out order.
    pub fn register(&self, observer: Arc<dyn TaskObserver>) {
        let mut observers = self.lock();
        if !observers.iter().any(|existing| Arc::ptr_eq(existing, &observer)) {
            observers.push(observer);
        }
    }

    /// Unregister an observer by pointer identity.
    pub fn unregister(&self, observer: &Arc<dyn TaskObserver>) {
        self.lock().retain(|existing| !Arc::ptr_eq(existing, observer));
    }

    /// Get the number of registered observers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Check whether no observers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Notify every registered observer that a task was added.
    pub fn notify_added(&self, task: &Task) {
        for observer in self.snapshot() {
            observer.on_task_added(task);
        }
    }

    /// Notify every registered observer that a task was updated.
    pub fn notify_updated(&self, task: &Task) {
        for observer in self.snapshot() {
            observer.on_task_updated(task);
        }
    }

    /// Notify every registered observer that a task was deleted.
    pub fn notify_deleted(&self, task_id: i64) {
        for observer in self.snapshot() {
            observer.on_task_deleted(task_id);
        }
    }

    /// Notify every registered observer that all tasks were cleared.
    pub fn notify_cleared(&self) {
        for observer in self.snapshot() {
            observer.on_tasks_cleared();
        }
    }

    fn snapshot(&self) -> Vec<Arc<dyn TaskObserver>> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Arc<dyn TaskObserver>>> {
        self.observers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverRegistry").field("observers", &self.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TaskState;
    use crate::testing::{EventLog, ObservedEvent, RecordingObserver};

    fn task(id: i64) -> Task {
        Task::new(id, "Task", "", TaskState::ToDo).unwrap()
    }

    #[test]
    fn test_notify_reaches_all_observers_in_registration_order() {
        let registry = ObserverRegistry::new();
        let log = EventLog::default();
        let first: Arc<dyn TaskObserver> = Arc::new(RecordingObserver::with_log("first", &log));
        let second: Arc<dyn TaskObserver> = Arc::new(RecordingObserver::with_log("second", &log));

        registry.register(Arc::clone(&first));
        registry.register(Arc::clone(&second));
        registry.notify_added(&task(1));

        let entries = log.lock().unwrap().clone();
        assert_eq!(
            entries,
            vec![
                ("first".to_string(), ObservedEvent::Added(1)),
                ("second".to_string(), ObservedEvent::Added(1)),
            ]
        );
    }

    #[test]
    fn test_duplicate_registration_is_noop() {
        let registry = ObserverRegistry::new();
        let observer: Arc<dyn TaskObserver> = Arc::new(RecordingObserver::new("only"));

        registry.register(Arc::clone(&observer));
        registry.register(Arc::clone(&observer));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_unregister_nonmember_is_noop() {
        let registry = ObserverRegistry::new();
        let member: Arc<dyn TaskObserver> = Arc::new(RecordingObserver::new("member"));
        let stranger: Arc<dyn TaskObserver> = Arc::new(RecordingObserver::new("stranger"));

        registry.register(Arc::clone(&member));
        registry.unregister(&stranger);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_unregistered_observer_receives_nothing() {
        let registry = ObserverRegistry::new();
        let observer = Arc::new(RecordingObserver::new("gone"));
        let dyn_observer: Arc<dyn TaskObserver> = observer.clone();

        registry.register(Arc::clone(&dyn_observer));
        registry.unregister(&dyn_observer);
        assert!(registry.is_empty());

        registry.notify_deleted(7);
        assert!(observer.events().is_empty());
    }

    #[test]
    fn test_each_notification_kind_is_delivered() {
        let registry = ObserverRegistry::new();
        let observer = Arc::new(RecordingObserver::new("all"));
        registry.register(observer.clone());

        registry.notify_added(&task(1));
        registry.notify_updated(&task(2));
        registry.notify_deleted(3);
        registry.notify_cleared();

        assert_eq!(
            observer.events(),
            vec![
                ObservedEvent::Added(1),
                ObservedEvent::Updated(2),
                ObservedEvent::Deleted(3),
                ObservedEvent::Cleared,
            ]
        );
    }

    /// Observer whose added-callback always panics.
    struct Panicking;

    impl TaskObserver for Panicking {
        fn on_task_added(&self, _task: &Task) {
            panic!("observer failure");
        }

        fn on_task_updated(&self, _task: &Task) {}
        fn on_task_deleted(&self, _task_id: i64) {}
        fn on_tasks_cleared(&self) {}
    }

    #[test]
    fn test_panicking_observer_aborts_remaining_fanout() {
        let registry = ObserverRegistry::new();
        let later = Arc::new(RecordingObserver::new("later"));

        registry.register(Arc::new(Panicking));
        registry.register(later.clone());

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            registry.notify_added(&task(1));
        }));

        // The panic unwinds through the notifying call; observers registered
        // after the failing one receive nothing.
        assert!(result.is_err());
        assert!(later.events().is_empty());
    }

    /// Observer that unregisters itself from the registry when notified.
    struct SelfRemoving {
        registry: Arc<ObserverRegistry>,
        this: Mutex<Option<Arc<dyn TaskObserver>>>,
    }

    impl TaskObserver for SelfRemoving {
        fn on_task_added(&self, _task: &Task) {
            if let Some(this) = self.this.lock().unwrap().take() {
                self.registry.unregister(&this);
            }
        }

        fn on_task_updated(&self, _task: &Task) {}
        fn on_task_deleted(&self, _task_id: i64) {}
        fn on_tasks_cleared(&self) {}
    }

    #[test]
    fn test_observer_may_unregister_itself_during_fanout() {
        let registry = Arc::new(ObserverRegistry::new());
        let observer = Arc::new(SelfRemoving { registry: Arc::clone(&registry), this: Mutex::new(None) });
        let dyn_observer: Arc<dyn TaskObserver> = observer.clone();
        *observer.this.lock().unwrap() = Some(Arc::clone(&dyn_observer));

        registry.register(dyn_observer);
        assert_eq!(registry.len(), 1);

        registry.notify_added(&task(1));
        assert!(registry.is_empty());
    }
}
