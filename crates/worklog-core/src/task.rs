//! Task: a named item of work with optional link and notes.
//!
//! Unlike [`Work`](crate::work::Work), a task carries a `last_update` stamp
//! that is refreshed on every merge.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  entity::{Entity, UNSAVED_ID},
  error::{ValidationError, require},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
  pub id:           i64,
  pub date_created: DateTime<Utc>,
  pub last_update:  DateTime<Utc>,
  pub name:         String,
  pub link:         Option<String>,
  #[serde(rename = "type")]
  pub kind:         Option<String>,
  pub done:         Option<String>,
  pub todo:         Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskInput {
  pub name: Option<String>,
  pub link: Option<String>,
  #[serde(rename = "type")]
  pub kind: Option<String>,
  pub done: Option<String>,
  pub todo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
  pub name: String,
  pub link: Option<String>,
  pub kind: Option<String>,
  pub done: Option<String>,
  pub todo: Option<String>,
}

/// Partial update for a [`Task`]. Optional columns cannot be cleared through a
/// patch; an absent field always means "leave as is".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskPatch {
  pub name: Option<String>,
  pub link: Option<String>,
  #[serde(rename = "type")]
  pub kind: Option<String>,
  pub done: Option<String>,
  pub todo: Option<String>,
}

impl Entity for Task {
  type Input = TaskInput;
  type New = NewTask;
  type Patch = TaskPatch;
  type PatchInput = TaskPatch;

  const NAME: &'static str = "task";

  fn validate(input: TaskInput) -> Result<NewTask, ValidationError> {
    Ok(NewTask {
      name: require(input.name, "name")?,
      link: input.link,
      kind: input.kind,
      done: input.done,
      todo: input.todo,
    })
  }

  fn validate_patch(input: TaskPatch) -> Result<TaskPatch, ValidationError> {
    Ok(input)
  }

  fn from_new(input: NewTask, now: DateTime<Utc>) -> Self {
    Task {
      id:           UNSAVED_ID,
      date_created: now,
      last_update:  now,
      name:         input.name,
      link:         input.link,
      kind:         input.kind,
      done:         input.done,
      todo:         input.todo,
    }
  }

  fn id(&self) -> i64 { self.id }

  fn with_id(self, id: i64) -> Self { Task { id, ..self } }

  fn merge(&mut self, patch: TaskPatch, now: DateTime<Utc>) {
    if let Some(name) = patch.name {
      self.name = name;
    }
    if patch.link.is_some() {
      self.link = patch.link;
    }
    if patch.kind.is_some() {
      self.kind = patch.kind;
    }
    if patch.done.is_some() {
      self.done = patch.done;
    }
    if patch.todo.is_some() {
      self.todo = patch.todo;
    }
    self.last_update = now;
  }
}

#[cfg(test)]
mod tests {
  use chrono::Duration;

  use super::*;

  #[test]
  fn validate_requires_name() {
    let err = Task::validate(TaskInput::default()).unwrap_err();
    assert_eq!(err.field, "name");
  }

  #[test]
  fn input_reads_type_key() {
    let input: TaskInput =
      serde_json::from_str(r#"{"name":"release","type":"ops"}"#).unwrap();
    let new = Task::validate(input).unwrap();
    assert_eq!(new.kind.as_deref(), Some("ops"));
    assert!(new.link.is_none());
  }

  #[test]
  fn merge_refreshes_last_update_only() {
    let created = Utc::now();
    let later = created + Duration::seconds(5);
    let mut task = Task::from_new(
      NewTask {
        name: "release".into(),
        link: Some("https://example.com".into()),
        kind: None,
        done: None,
        todo: Some("tag build".into()),
      },
      created,
    );

    task.merge(
      TaskPatch { done: Some("tagged".into()), ..Default::default() },
      later,
    );

    assert_eq!(task.date_created, created);
    assert_eq!(task.last_update, later);
    assert_eq!(task.done.as_deref(), Some("tagged"));
    assert_eq!(task.link.as_deref(), Some("https://example.com"));
    assert_eq!(task.todo.as_deref(), Some("tag build"));
  }
}
