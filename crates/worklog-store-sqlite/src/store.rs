//! [`SqliteStore`]: the SQLite implementation of [`Repository`].

use std::path::{Path, PathBuf};

use chrono::Utc;
use rusqlite::{OptionalExtension as _, params_from_iter, types::Value};
use worklog_core::store::{Page, Repository, Store};

use crate::{
  Error, Result,
  schema::SCHEMA,
  table::{Table, delete_sql, insert_sql, order_by, select_sql, update_sql},
};

// ─── Location ────────────────────────────────────────────────────────────────

/// Where a store lives, as parsed from a database URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
  Memory,
  File(PathBuf),
}

/// Parse a SQLAlchemy-style SQLite URL.
///
/// `sqlite:///work.db` is relative, `sqlite:////var/work.db` absolute, and
/// `sqlite://`, `sqlite:///:memory:` or `:memory:` select an in-memory store.
/// A string without a scheme is taken as a file path.
pub fn parse_url(url: &str) -> Result<Location> {
  let url = url.trim();
  if url == ":memory:" {
    return Ok(Location::Memory);
  }
  let Some(rest) = url.strip_prefix("sqlite://") else {
    if url.contains("://") || url.is_empty() {
      return Err(Error::UnsupportedUrl(url.to_owned()));
    }
    return Ok(Location::File(PathBuf::from(url)));
  };
  let path = rest.strip_prefix('/').unwrap_or(rest);
  match path {
    "" | ":memory:" => Ok(Location::Memory),
    path => Ok(Location::File(PathBuf::from(path))),
  }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A worklog store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open the store named by a database URL (see [`parse_url`]).
  pub async fn open_url(url: &str) -> Result<Self> {
    match parse_url(url)? {
      Location::Memory => Self::open_in_memory().await,
      Location::File(path) => {
        tracing::info!(path = %path.display(), "opening sqlite store");
        Self::open(path).await
      }
    }
  }

  /// Close the underlying connection. Clones of this store fail with
  /// [`Error::Unavailable`] afterwards.
  pub async fn close(self) -> Result<()> {
    self.conn.close().await?;
    Ok(())
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── Store / Repository impls ────────────────────────────────────────────────
//
// Every operation is a single `call` on the connection thread. Writes open a
// transaction inside that call; an early return or `?` drops the transaction,
// which rolls it back, so nothing is ever partially applied.

impl Store for SqliteStore {
  type Error = Error;

  async fn ping(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.query_row("SELECT 1", [], |_| Ok(()))?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

impl<E: Table> Repository<E> for SqliteStore {
  async fn create(&self, input: E::New) -> Result<E> {
    let draft  = E::from_new(input, Utc::now());
    let values = draft.to_values();
    let sql    = insert_sql::<E>();

    let id = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(&sql, params_from_iter(values))?;
        let id = tx.last_insert_rowid();
        tx.commit()?;
        Ok(id)
      })
      .await?;

    tracing::debug!(kind = E::NAME, id, "created");
    Ok(draft.with_id(id))
  }

  async fn read(&self, id: i64) -> Result<Option<E>> {
    let sql = format!("{} WHERE id = ?1", select_sql::<E>());

    let row = self
      .conn
      .call(move |conn| Ok(conn.query_row(&sql, [id], E::from_row).optional()?))
      .await?;
    Ok(row)
  }

  async fn read_all(&self, page: Page) -> Result<Vec<E>> {
    let sql = format!(
      "{} ORDER BY {} LIMIT ?1 OFFSET ?2",
      select_sql::<E>(),
      order_by(page.order),
    );
    let limit  = i64::try_from(page.limit).unwrap_or(i64::MAX);
    let offset = i64::try_from(page.offset).unwrap_or(i64::MAX);

    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params![limit, offset], E::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }

  async fn update(&self, id: i64, patch: E::Patch) -> Result<Option<E>> {
    let select = format!("{} WHERE id = ?1", select_sql::<E>());
    let update = update_sql::<E>();
    let now    = Utc::now();

    let row = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let Some(mut row) = tx.query_row(&select, [id], E::from_row).optional()?
        else {
          return Ok(None);
        };

        row.merge(patch, now);
        let mut values = row.to_values();
        values.push(Value::Integer(id));
        tx.execute(&update, params_from_iter(values))?;
        tx.commit()?;
        Ok(Some(row))
      })
      .await?;

    if row.is_some() {
      tracing::debug!(kind = E::NAME, id, "updated");
    }
    Ok(row)
  }

  async fn delete(&self, id: i64) -> Result<Option<E>> {
    let select = format!("{} WHERE id = ?1", select_sql::<E>());
    let delete = delete_sql::<E>();

    let row = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let Some(row) = tx.query_row(&select, [id], E::from_row).optional()?
        else {
          return Ok(None);
        };

        tx.execute(&delete, [id])?;
        tx.commit()?;
        Ok(Some(row))
      })
      .await?;

    if row.is_some() {
      tracing::debug!(kind = E::NAME, id, "deleted");
    }
    Ok(row)
  }
}
