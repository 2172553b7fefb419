//! Sort strategies for task sequences.
//!
//! Strategies are a closed set represented as an enum rather than an object
//! hierarchy. Every strategy produces a newly allocated, stably sorted
//! vector and never mutates its input.

use crate::model::Task;

/// A sorting policy for task sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortStrategy {
    /// Ascending numeric ID.
    #[default]
    ById,
    /// Case-insensitive lexicographic title.
    ByTitle,
    /// Logical lifecycle order: to do, in progress, completed.
    ByState,
}

impl SortStrategy {
    /// Get the human-readable name of this strategy.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ById => "Sort by ID (Ascending)",
            Self::ByTitle => "Sort by Title (A-Z)",
            Self::ByState => "Sort by State (To Do, In Progress, Completed)",
        }
    }

    /// Sort tasks into a new vector according to this strategy.
    ///
    /// The sort is stable: tasks that compare equal on the sorted field keep
    /// their relative input order.
    #[must_use]
    pub fn sort(self, tasks: &[Task]) -> Vec<Task> {
        let mut sorted = tasks.to_vec();
        match self {
            Self::ById => sorted.sort_by_key(Task::id),
            Self::ByTitle => sorted.sort_by_key(|task| task.title().to_lowercase()),
            Self::ByState => sorted.sort_by_key(|task| task.state().sort_rank()),
        }
        sorted
    }
}

/// Holder for the currently selected [`SortStrategy`].
///
/// Switching the strategy affects the next [`sort_tasks`](Self::sort_tasks)
/// call only, never a past one.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskSorter {
    strategy: SortStrategy,
}

impl TaskSorter {
    /// Create a sorter using the given strategy.
    #[must_use]
    pub const fn new(strategy: SortStrategy) -> Self {
        Self { strategy }
    }

    /// Get the current strategy.
    #[must_use]
    pub const fn strategy(&self) -> SortStrategy {
        self.strategy
    }

    /// Replace the current strategy.
    pub fn set_strategy(&mut self, strategy: SortStrategy) {
        self.strategy = strategy;
    }

    /// Get the name of the current strategy.
    #[must_use]
    pub const fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Sort tasks using the current strategy.
    #[must_use]
    pub fn sort_tasks(&self, tasks: &[Task]) -> Vec<Task> {
        self.strategy.sort(tasks)
    }
}
