//! Task record model and form validation.
//!
//! Defines the [`Task`] record as the remote store returns it, the raw
//! [`TaskForm`] state an input form produces, and the validated
//! [`TaskPayload`] body sent on create and update. Validation happens
//! once, at the form boundary, before any network call.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a task, assigned by the remote store.
///
/// Opaque to the client: never parsed, never generated locally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Create a task identifier from its string representation.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Return the string representation of this task ID.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle status of a task.
///
/// Wire values are `pending`, `in-progress`, and `completed`, exactly as
/// the remote store spells them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Task has not been started.
    #[default]
    Pending,
    /// Task is actively being worked on.
    InProgress,
    /// Task has been finished.
    Completed,
}

impl TaskStatus {
    /// Wire value used by the remote store.
    #[must_use]
    pub const fn as_wire(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        }
    }

    /// Human-readable label for list presentation.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "in-progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            other => Err(ValidationError::UnknownStatus(other.to_string())),
        }
    }
}

/// Errors raised by [`TaskForm::validate`], always before any network call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The task name is empty after trimming.
    #[error("task name must not be empty")]
    NameEmpty,

    /// The status string is not one of the known wire values.
    #[error("unknown task status {0:?}")]
    UnknownStatus(String),

    /// The deadline string is not a valid `YYYY-MM-DD` date.
    #[error("invalid deadline date {0:?}")]
    InvalidDeadline(String),
}

/// A task record as held in the collection store.
///
/// Mirrors the remote store's JSON representation. Extra fields the
/// server may add are ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Server-assigned identifier.
    pub id: TaskId,
    /// Display name, non-empty.
    pub name: String,
    /// Optional free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Lifecycle status.
    pub status: TaskStatus,
    /// Optional due date. The store has returned this as a plain date and
    /// as a full timestamp; only the calendar date is kept.
    #[serde(default, with = "deadline_format")]
    pub deadline: Option<NaiveDate>,
    /// Server-assigned creation timestamp, read-only.
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Validated request body for create and update calls.
///
/// Produced exclusively by [`TaskForm::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskPayload {
    /// Trimmed, non-empty task name.
    pub name: String,
    /// Trimmed description; omitted from the body when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Lifecycle status.
    pub status: TaskStatus,
    /// Due date, serialized as `YYYY-MM-DD` or JSON `null`.
    #[serde(with = "deadline_format")]
    pub deadline: Option<NaiveDate>,
}

/// Raw form state as an input form produces it, all fields unvalidated
/// strings.
///
/// The default value is a blank create form: empty name, description,
/// and deadline, status `pending`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    /// Task name input.
    pub name: String,
    /// Description input.
    pub description: String,
    /// Status selection, expected to be one of the wire values.
    pub status: String,
    /// Deadline input, `YYYY-MM-DD` or empty.
    pub deadline: String,
}

impl Default for TaskForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            status: TaskStatus::Pending.as_wire().to_string(),
            deadline: String::new(),
        }
    }
}

impl TaskForm {
    /// Prefill a form from an existing task for editing.
    ///
    /// The deadline is reduced to its date component.
    #[must_use]
    pub fn from_task(task: &Task) -> Self {
        Self {
            name: task.name.clone(),
            description: task.description.clone().unwrap_or_default(),
            status: task.status.as_wire().to_string(),
            deadline: task
                .deadline
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        }
    }

    /// Validate the raw input and produce a request payload.
    ///
    /// Name and description are trimmed; an empty description becomes
    /// absent rather than an empty string.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NameEmpty`] for a blank name,
    /// [`ValidationError::UnknownStatus`] for an unrecognized status
    /// value, or [`ValidationError::InvalidDeadline`] for a malformed
    /// date.
    pub fn validate(&self) -> Result<TaskPayload, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::NameEmpty);
        }

        let description = match self.description.trim() {
            "" => None,
            d => Some(d.to_string()),
        };

        let status: TaskStatus = self.status.parse()?;

        let deadline = match self.deadline.trim() {
            "" => None,
            raw => Some(
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .map_err(|_| ValidationError::InvalidDeadline(raw.to_string()))?,
            ),
        };

        Ok(TaskPayload {
            name: name.to_string(),
            description,
            status,
            deadline,
        })
    }
}

/// Serde codec for the `deadline` field.
///
/// Inbound the store has sent a plain `YYYY-MM-DD` date, a full RFC 3339
/// timestamp, an empty string, and `null`; all are accepted and reduced
/// to an optional calendar date. Outbound the field is always a plain
/// date string or `null`, never an empty string.
mod deadline_format {
    use chrono::{DateTime, NaiveDate};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(date) => serializer.collect_str(&date.format("%Y-%m-%d")),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref() {
            None | Some("") => Ok(None),
            Some(s) => parse_date(s)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid deadline date {s:?}"))),
        }
    }

    /// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp.
    fn parse_date(s: &str) -> Option<NaiveDate> {
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Some(date);
        }
        DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.date_naive())
    }
}
