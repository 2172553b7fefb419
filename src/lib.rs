//! # `task_tracker`
//!
//! A small task-tracking library: tasks with a lifecycle state persisted in
//! a `SQLite` table, change notifications fanned out to registered
//! observers, and pluggable sort strategies for task sequences.
//!
//! # Example
//!
//! ```
//! use task_tracker::{SortStrategy, SqliteTaskStore, Task, TaskManager, TaskSorter, TaskState};
//!
//! let manager = TaskManager::new(SqliteTaskStore::open_in_memory()?);
//!
//! manager.add_task(&Task::with_default_state(1, "Study Rust", "")?)?;
//! manager.add_task(&Task::new(2, "Review code", "PR #42", TaskState::InProgress)?)?;
//!
//! let sorter = TaskSorter::new(SortStrategy::ByState);
//! let tasks = sorter.sort_tasks(&manager.get_all_tasks()?);
//! assert_eq!(tasks[0].id(), 1);
//! # Ok::<(), task_tracker::Error>(())
//! ```

pub mod error;
pub mod manager;
pub mod model;
pub mod observer;
pub mod sort;
pub mod store;
pub mod testing;

pub use error::{Error, Result};
pub use manager::TaskManager;
pub use model::{InvalidStateName, Task, TaskState};
pub use observer::{ObserverRegistry, TaskObserver};
pub use sort::{SortStrategy, TaskSorter};
pub use store::{SqliteTaskStore, TaskStore};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
