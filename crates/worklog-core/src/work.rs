//! Work: one dated entry in the daily work log.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  entity::{Entity, UNSAVED_ID},
  error::{ValidationError, require},
};

/// Calendar date format accepted from clients and written to the store.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date supplied for `field`.
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, ValidationError> {
  NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|e| {
    ValidationError::new(field, format!("{value:?} is not a YYYY-MM-DD date ({e})"))
  })
}

/// A persisted work-log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Work {
  pub id:           i64,
  pub date:         NaiveDate,
  pub tag:          String,
  pub todo:         String,
  pub done:         String,
  pub date_created: DateTime<Utc>,
}

/// Form or JSON body for a new work entry, fields exactly as received.
///
/// Every field is required; empty strings are accepted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkInput {
  pub date: Option<String>,
  pub tag:  Option<String>,
  pub todo: Option<String>,
  pub done: Option<String>,
}

/// A validated work entry, ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWork {
  pub date: NaiveDate,
  pub tag:  String,
  pub todo: String,
  pub done: String,
}

/// Partial update body for a [`Work`], fields exactly as received.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkPatchInput {
  pub date: Option<String>,
  pub tag:  Option<String>,
  pub todo: Option<String>,
  pub done: Option<String>,
}

/// Validated partial update for a [`Work`]; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkPatch {
  pub date: Option<NaiveDate>,
  pub tag:  Option<String>,
  pub todo: Option<String>,
  pub done: Option<String>,
}

impl Entity for Work {
  type Input = WorkInput;
  type New = NewWork;
  type Patch = WorkPatch;
  type PatchInput = WorkPatchInput;

  const NAME: &'static str = "work";

  fn validate(input: WorkInput) -> Result<NewWork, ValidationError> {
    let date = require(input.date, "date")?;
    let date = parse_date("date", &date)?;
    Ok(NewWork {
      date,
      tag: require(input.tag, "tag")?,
      todo: require(input.todo, "todo")?,
      done: require(input.done, "done")?,
    })
  }

  fn validate_patch(input: WorkPatchInput) -> Result<WorkPatch, ValidationError> {
    let date = input
      .date
      .map(|date| parse_date("date", &date))
      .transpose()?;
    Ok(WorkPatch { date, tag: input.tag, todo: input.todo, done: input.done })
  }

  fn from_new(input: NewWork, now: DateTime<Utc>) -> Self {
    Work {
      id:           UNSAVED_ID,
      date:         input.date,
      tag:          input.tag,
      todo:         input.todo,
      done:         input.done,
      date_created: now,
    }
  }

  fn id(&self) -> i64 { self.id }

  fn with_id(self, id: i64) -> Self { Work { id, ..self } }

  fn merge(&mut self, patch: WorkPatch, _now: DateTime<Utc>) {
    if let Some(date) = patch.date {
      self.date = date;
    }
    if let Some(tag) = patch.tag {
      self.tag = tag;
    }
    if let Some(todo) = patch.todo {
      self.todo = todo;
    }
    if let Some(done) = patch.done {
      self.done = done;
    }
  }
}
