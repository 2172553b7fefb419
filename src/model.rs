//! Task model types: the [`Task`] entity and its lifecycle [`TaskState`].

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a task.
///
/// The ordering is the logical lifecycle order: to do, in progress,
/// completed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum TaskState {
    /// Task is created but not yet started.
    #[default]
    #[serde(rename = "TO_DO")]
    ToDo,
    /// Task is currently being worked on.
    #[serde(rename = "IN_PROGRESS")]
    InProgress,
    /// Task has been completed.
    #[serde(rename = "COMPLETED")]
    Completed,
}

impl TaskState {
    /// Parse a state from its stored textual name (`TO_DO`, `IN_PROGRESS`,
    /// `COMPLETED`).
    ///
    /// # Errors
    ///
    /// Returns an error if the name is not one of the three stored names.
    pub fn from_name(name: &str) -> std::result::Result<Self, InvalidStateName> {
        match name {
            "TO_DO" => Ok(Self::ToDo),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "COMPLETED" => Ok(Self::Completed),
            _ => Err(InvalidStateName(name.to_string())),
        }
    }

    /// Get the textual name used for persistence.
    #[must_use]
    pub const fn as_name(self) -> &'static str {
        match self {
            Self::ToDo => "TO_DO",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
        }
    }

    /// Get the human-readable display label.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::ToDo => "To Do",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }

    /// Numeric position in the lifecycle, used for state-ordered sorting.
    #[must_use]
    pub const fn sort_rank(self) -> u8 {
        self as u8
    }
}

impl std::fmt::Display for TaskState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Error when a stored state name is not in the closed enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidStateName(pub String);

impl std::fmt::Display for InvalidStateName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid task state: '{}' (must be one of: TO_DO, IN_PROGRESS, COMPLETED)",
            self.0
        )
    }
}

impl std::error::Error for InvalidStateName {}

/// A task in the tracking system.
///
/// Field invariants are enforced by the constructor and every setter: the ID
/// is non-negative, the title is non-empty after trimming (the trimmed form
/// is what gets stored), and the description may be any string including the
/// empty one. A failed mutation leaves the task unchanged.
///
/// Equality and hashing consider only the ID, which is the task's identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawTask")]
pub struct Task {
    id: i64,
    title: String,
    description: String,
    state: TaskState,
}

impl Task {
    /// Create a task with an explicit state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the ID is negative or the title is
    /// empty after trimming.
    pub fn new(id: i64, title: &str, description: &str, state: TaskState) -> Result<Self> {
        Ok(Self {
            id: validate_id(id)?,
            title: validate_title(title)?,
            description: description.to_string(),
            state,
        })
    }

    /// Create a task in the default [`TaskState::ToDo`] state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the ID is negative or the title is
    /// empty after trimming.
    pub fn with_default_state(id: i64, title: &str, description: &str) -> Result<Self> {
        Self::new(id, title, description, TaskState::default())
    }

    /// Get the unique identifier.
    #[must_use]
    pub const fn id(&self) -> i64 {
        self.id
    }

    /// Get the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Get the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Get the current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> TaskState {
        self.state
    }

    /// Set the unique identifier.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the ID is negative; the task is
    /// left unchanged.
    pub fn set_id(&mut self, id: i64) -> Result<()> {
        self.id = validate_id(id)?;
        Ok(())
    }

    /// Set the title. The stored title is the trimmed input.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the title is empty after trimming;
    /// the task is left unchanged.
    pub fn set_title(&mut self, title: &str) -> Result<()> {
        self.title = validate_title(title)?;
        Ok(())
    }

    /// Set the description. Any string is accepted, including the empty one.
    pub fn set_description(&mut self, description: &str) {
        self.description = description.to_string();
    }

    /// Set the lifecycle state.
    pub fn set_state(&mut self, state: TaskState) {
        self.state = state;
    }
}

impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Task {}

impl std::hash::Hash for Task {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Display for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Task{{id={}, title='{}', description='{}', state={}}}",
            self.id, self.title, self.description, self.state
        )
    }
}

/// Unvalidated wire form of [`Task`]; deserialization funnels through the
/// validating constructor.
#[derive(Deserialize)]
struct RawTask {
    id: i64,
    title: String,
    description: String,
    state: TaskState,
}

impl TryFrom<RawTask> for Task {
    type Error = Error;

    fn try_from(raw: RawTask) -> Result<Self> {
        Self::new(raw.id, &raw.title, &raw.description, raw.state)
    }
}

fn validate_id(id: i64) -> Result<i64> {
    if id < 0 {
        return Err(Error::InvalidInput(format!("task ID cannot be negative: {id}")));
    }
    Ok(id)
}

fn validate_title(title: &str) -> Result<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput("task title cannot be empty".to_string()));
    }
    Ok(trimmed.to_string())
}
