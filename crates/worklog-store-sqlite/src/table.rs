//! [`Table`]: how an [`Entity`] maps onto one SQLite table.
//!
//! Column 0 of every table is the integer `id`; the remaining columns follow
//! [`Table::COLUMNS`] in order, both when reading rows and when binding
//! parameters.

use rusqlite::{Row, types::Value};
use worklog_core::{Entity, store::Order, task::Task, work::Work};

use crate::encode::{column_date, column_dt, dt_value, encode_date, opt_text, text};

pub trait Table: Entity {
  const TABLE: &'static str;
  /// Every column except `id`.
  const COLUMNS: &'static [&'static str];

  /// Decode a row selected as `id, COLUMNS...`.
  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;

  /// Encode every column except `id`, in [`Table::COLUMNS`] order.
  fn to_values(&self) -> Vec<Value>;
}

// ─── SQL builders ────────────────────────────────────────────────────────────

pub fn select_sql<E: Table>() -> String {
  format!("SELECT id, {} FROM {}", E::COLUMNS.join(", "), E::TABLE)
}

pub fn insert_sql<E: Table>() -> String {
  let placeholders: Vec<String> =
    (1..=E::COLUMNS.len()).map(|i| format!("?{i}")).collect();
  format!(
    "INSERT INTO {} ({}) VALUES ({})",
    E::TABLE,
    E::COLUMNS.join(", "),
    placeholders.join(", "),
  )
}

/// `UPDATE` binding every column, with the id as the final parameter.
pub fn update_sql<E: Table>() -> String {
  let assignments: Vec<String> = E::COLUMNS
    .iter()
    .enumerate()
    .map(|(i, col)| format!("{col} = ?{}", i + 1))
    .collect();
  format!(
    "UPDATE {} SET {} WHERE id = ?{}",
    E::TABLE,
    assignments.join(", "),
    E::COLUMNS.len() + 1,
  )
}

pub fn delete_sql<E: Table>() -> String {
  format!("DELETE FROM {} WHERE id = ?1", E::TABLE)
}

pub fn order_by(order: Order) -> &'static str {
  match order {
    Order::Insertion => "id ASC",
    Order::NewestFirst => "date_created DESC, id DESC",
  }
}

// ─── Work ────────────────────────────────────────────────────────────────────

impl Table for Work {
  const TABLE: &'static str = "work";
  const COLUMNS: &'static [&'static str] =
    &["date", "tag", "todo", "done", "date_created"];

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Work {
      id:           row.get(0)?,
      date:         column_date(row, 1)?,
      tag:          row.get(2)?,
      todo:         row.get(3)?,
      done:         row.get(4)?,
      date_created: column_dt(row, 5)?,
    })
  }

  fn to_values(&self) -> Vec<Value> {
    vec![
      Value::Text(encode_date(self.date)),
      text(&self.tag),
      text(&self.todo),
      text(&self.done),
      dt_value(self.date_created),
    ]
  }
}

// ─── Task ────────────────────────────────────────────────────────────────────

impl Table for Task {
  const TABLE: &'static str = "task";
  const COLUMNS: &'static [&'static str] =
    &["date_created", "last_update", "name", "link", "kind", "done", "todo"];

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Task {
      id:           row.get(0)?,
      date_created: column_dt(row, 1)?,
      last_update:  column_dt(row, 2)?,
      name:         row.get(3)?,
      link:         row.get(4)?,
      kind:         row.get(5)?,
      done:         row.get(6)?,
      todo:         row.get(7)?,
    })
  }

  fn to_values(&self) -> Vec<Value> {
    vec![
      dt_value(self.date_created),
      dt_value(self.last_update),
      text(&self.name),
      opt_text(self.link.as_deref()),
      opt_text(self.kind.as_deref()),
      opt_text(self.done.as_deref()),
      opt_text(self.todo.as_deref()),
    ]
  }
}
