//! Task store trait and `SQLite` implementation.

use crate::error::{Error, Result};
use crate::model::{Task, TaskState};
use once_cell::sync::OnceCell;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

/// Trait for task storage operations.
///
/// All methods return a `Result` and may fail with database errors.
#[allow(clippy::missing_errors_doc)]
pub trait TaskStore {
    /// Get every stored task, in storage order.
    fn get_all(&self) -> Result<Vec<Task>>;

    /// Get a task by ID. A missing task is `Ok(None)`, not an error.
    fn get(&self, id: i64) -> Result<Option<Task>>;

    /// Insert a new task. Fails if a task with the same ID already exists.
    fn add(&self, task: &Task) -> Result<()>;

    /// Update an existing task. Fails if no task has its ID.
    fn update(&self, task: &Task) -> Result<()>;

    /// Delete a task by ID. Fails if no task has the ID.
    fn delete(&self, id: i64) -> Result<()>;

    /// Delete every stored task.
    fn delete_all(&self) -> Result<()>;
}

impl<S: TaskStore + ?Sized> TaskStore for &S {
    fn get_all(&self) -> Result<Vec<Task>> {
        (**self).get_all()
    }

    fn get(&self, id: i64) -> Result<Option<Task>> {
        (**self).get(id)
    }

    fn add(&self, task: &Task) -> Result<()> {
        (**self).add(task)
    }

    fn update(&self, task: &Task) -> Result<()> {
        (**self).update(task)
    }

    fn delete(&self, id: i64) -> Result<()> {
        (**self).delete(id)
    }

    fn delete_all(&self) -> Result<()> {
        (**self).delete_all()
    }
}

const TABLE_NAME: &str = "tasks";

const CREATE_TABLE_SQL: &str = "CREATE TABLE tasks (
    id INTEGER PRIMARY KEY,
    title TEXT NOT NULL,
    description TEXT,
    state TEXT NOT NULL
)";

static SHARED: OnceCell<SqliteTaskStore> = OnceCell::new();

/// `SQLite`-backed task store.
///
/// Holds a single long-lived connection opened at construction and reused
/// for every operation. Every mutation is one autocommitted statement.
#[derive(Debug)]
pub struct SqliteTaskStore {
    conn: Mutex<Connection>,
}

impl SqliteTaskStore {
    /// Open a store at the given database path, creating parent directories
    /// and bootstrapping the tasks table if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or the table cannot
    /// be created.
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        let db_path = db_path.as_ref();
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Self::from_connection(Connection::open(db_path)?)
    }

    /// Open an in-memory store. Useful for tests; contents are lost on drop.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or the table cannot
    /// be created.
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    /// Get the process-wide shared store, constructing it on first access.
    ///
    /// Concurrent first calls are serialized so exactly one store is built
    /// and the table bootstrap runs once. The database file lives under the
    /// platform-local data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the first-time construction fails; later calls
    /// retry construction until one succeeds.
    pub fn shared() -> Result<&'static Self> {
        SHARED.get_or_try_init(|| Self::open(default_db_path()))
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        Self::bootstrap(&conn)?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    /// Create the tasks table if it is not already present.
    ///
    /// Existence is checked by name against the schema catalog, so reopening
    /// an existing database never touches its rows.
    fn bootstrap(conn: &Connection) -> Result<()> {
        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)",
            params![TABLE_NAME],
            |row| row.get(0),
        )?;

        if !exists {
            conn.execute(CREATE_TABLE_SQL, [])?;
            debug!(table = TABLE_NAME, "created tasks table");
        }

        Ok(())
    }

    /// Close the backing connection.
    ///
    /// Intended for teardown: a close failure is logged and discarded rather
    /// than propagated.
    pub fn close(self) {
        let conn = self.conn.into_inner().unwrap_or_else(PoisonError::into_inner);
        if let Err((_conn, err)) = conn.close() {
            warn!(error = %err, "error closing database connection");
        }
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Decode a task from a row, rejecting state text outside the closed
    /// enumeration.
    fn parse_task(row: &rusqlite::Row<'_>) -> rusqlite::Result<Task> {
        let id: i64 = row.get(0)?;
        let title: String = row.get(1)?;
        let description: Option<String> = row.get(2)?;
        let state_name: String = row.get(3)?;

        let state = TaskState::from_name(&state_name).map_err(|err| {
            rusqlite::Error::FromSqlConversionFailure(
                3,
                rusqlite::types::Type::Text,
                Box::new(err),
            )
        })?;

        Task::new(id, &title, &description.unwrap_or_default(), state).map_err(|err| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Integer,
                Box::new(err),
            )
        })
    }
}

impl TaskStore for SqliteTaskStore {
    fn get_all(&self) -> Result<Vec<Task>> {
        let conn = self.conn();
        let mut stmt = conn.prepare("SELECT id, title, description, state FROM tasks")?;
        let tasks = stmt.query_map([], Self::parse_task)?.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tasks)
    }

    fn get(&self, id: i64) -> Result<Option<Task>> {
        let task = self
            .conn()
            .query_row(
                "SELECT id, title, description, state FROM tasks WHERE id = ?1",
                params![id],
                Self::parse_task,
            )
            .optional()?;
        Ok(task)
    }

    fn add(&self, task: &Task) -> Result<()> {
        let result = self.conn().execute(
            "INSERT INTO tasks (id, title, description, state) VALUES (?1, ?2, ?3, ?4)",
            params![task.id(), task.title(), task.description(), task.state().as_name()],
        );

        match result {
            Ok(_) => {
                debug!(id = task.id(), "added task");
                Ok(())
            }
            Err(err) if is_constraint_violation(&err) => {
                Err(Error::DuplicateTask { id: task.id(), source: err })
            }
            Err(err) => Err(err.into()),
        }
    }

    fn update(&self, task: &Task) -> Result<()> {
        let rows = self.conn().execute(
            "UPDATE tasks SET title = ?1, description = ?2, state = ?3 WHERE id = ?4",
            params![task.title(), task.description(), task.state().as_name(), task.id()],
        )?;

        if rows == 0 {
            return Err(Error::TaskNotFound(task.id()));
        }
        debug!(id = task.id(), "updated task");
        Ok(())
    }

    fn delete(&self, id: i64) -> Result<()> {
        let rows = self.conn().execute("DELETE FROM tasks WHERE id = ?1", params![id])?;

        if rows == 0 {
            return Err(Error::TaskNotFound(id));
        }
        debug!(id, "deleted task");
        Ok(())
    }

    fn delete_all(&self) -> Result<()> {
        let rows = self.conn().execute("DELETE FROM tasks", [])?;
        debug!(rows, "cleared all tasks");
        Ok(())
    }
}

fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

fn default_db_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("task-tracker")
        .join("tasks.sqlite3")
}
