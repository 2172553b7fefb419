//! Error types for `task_tracker`.

/// Errors that can occur in the task tracker.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A `SQLite` database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// An input failed validation at the entity boundary.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No stored task has the given ID.
    #[error("Task with ID {0} not found")]
    TaskNotFound(i64),

    /// A stored task already has the given ID.
    #[error("Task with ID {id} already exists")]
    DuplicateTask {
        /// The ID that collided.
        id: i64,
        /// The underlying constraint violation.
        #[source]
        source: rusqlite::Error,
    },
}

/// A specialized Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
