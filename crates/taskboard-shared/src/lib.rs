use std::fmt;

use serde::{
  Deserialize,
  Serialize
};

/// Drag data type carrying a JSON
/// encoded [`DragPayload`].
pub const DRAG_PAYLOAD_TYPE: &str =
  "application/x-taskboard-task";

/// Board-unique task identifier. The
/// API may hand out numbers or strings,
/// both are accepted and echoed back
/// unchanged.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Hash,
)]
#[serde(untagged)]
pub enum TaskId {
  Number(u64),
  Text(String),
  /// Negative or fractional ids, kept as
  /// the server wrote them.
  Other(serde_json::Number)
}

impl fmt::Display for TaskId {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    match self {
      | TaskId::Number(n) => {
        write!(f, "{n}")
      }
      | TaskId::Text(s) => {
        f.write_str(s)
      }
      | TaskId::Other(n) => {
        fmt::Display::fmt(n, f)
      }
    }
  }
}

impl From<u64> for TaskId {
  fn from(value: u64) -> Self {
    TaskId::Number(value)
  }
}

impl From<&str> for TaskId {
  fn from(value: &str) -> Self {
    TaskId::Text(value.to_string())
  }
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Hash,
)]
#[serde(from = "String", into = "String")]
pub enum TaskRank {
  High,
  Medium,
  Low,
  /// Any value the board does not know;
  /// kept so a save never rewrites it.
  Other(String)
}

impl TaskRank {
  pub fn as_str(&self) -> &str {
    match self {
      | TaskRank::High => "high",
      | TaskRank::Medium => "medium",
      | TaskRank::Low => "low",
      | TaskRank::Other(raw) => raw
    }
  }

  pub fn all() -> Vec<TaskRank> {
    vec![
      TaskRank::High,
      TaskRank::Medium,
      TaskRank::Low,
    ]
  }
}

impl From<String> for TaskRank {
  fn from(value: String) -> Self {
    match value.as_str() {
      | "high" => TaskRank::High,
      | "medium" => TaskRank::Medium,
      | "low" => TaskRank::Low,
      | _ => TaskRank::Other(value)
    }
  }
}

impl From<&str> for TaskRank {
  fn from(value: &str) -> Self {
    TaskRank::from(value.to_string())
  }
}

impl From<TaskRank> for String {
  fn from(value: TaskRank) -> Self {
    match value {
      | TaskRank::Other(raw) => raw,
      | known => {
        known.as_str().to_string()
      }
    }
  }
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Hash,
)]
#[serde(from = "String", into = "String")]
pub enum TaskStatus {
  Todo,
  InProgress,
  Done,
  Other(String)
}

impl TaskStatus {
  pub fn as_str(&self) -> &str {
    match self {
      | TaskStatus::Todo => "todo",
      | TaskStatus::InProgress => {
        "in_progress"
      }
      | TaskStatus::Done => "done",
      | TaskStatus::Other(raw) => raw
    }
  }

  pub fn all() -> Vec<TaskStatus> {
    vec![
      TaskStatus::Todo,
      TaskStatus::InProgress,
      TaskStatus::Done,
    ]
  }
}

impl From<String> for TaskStatus {
  fn from(value: String) -> Self {
    match value.as_str() {
      | "todo" => TaskStatus::Todo,
      | "in_progress" => {
        TaskStatus::InProgress
      }
      | "done" => TaskStatus::Done,
      | _ => TaskStatus::Other(value)
    }
  }
}

impl From<&str> for TaskStatus {
  fn from(value: &str) -> Self {
    TaskStatus::from(value.to_string())
  }
}

impl From<TaskStatus> for String {
  fn from(value: TaskStatus) -> Self {
    match value {
      | TaskStatus::Other(raw) => raw,
      | known => {
        known.as_str().to_string()
      }
    }
  }
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
#[serde(rename_all = "camelCase")]
pub struct TaskDto {
  pub id:          TaskId,
  #[serde(default)]
  pub name:        String,
  #[serde(default)]
  pub description: String,
  /// ISO `YYYY-MM-DD`, kept raw so the
  /// date input can echo it back.
  #[serde(default)]
  pub due_date:    String,
  pub rank:        TaskRank,
  pub status:      TaskStatus
}

/// Body of `PUT /tasks/{id}`.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
  pub name:        String,
  pub description: String,
  pub due_date:    String,
  pub rank:        TaskRank,
  pub status:      TaskStatus
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct DragPayload {
  pub id:     TaskId,
  pub status: TaskStatus
}

impl From<&TaskDto> for DragPayload {
  fn from(task: &TaskDto) -> Self {
    Self {
      id:     task.id.clone(),
      status: task.status.clone()
    }
  }
}
