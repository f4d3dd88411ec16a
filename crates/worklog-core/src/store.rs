//! The `Store` and `Repository` traits and supporting query types.
//!
//! The traits are implemented by storage backends (e.g.
//! `worklog-store-sqlite`). Higher layers (`worklog-api`) depend on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use serde::Deserialize;

use crate::entity::Entity;

// ─── Query type ──────────────────────────────────────────────────────────────

/// Default page size for [`Repository::read_all`].
pub const DEFAULT_LIMIT: u64 = 100;

/// Row ordering for [`Repository::read_all`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
  /// Store order: ascending id.
  #[default]
  Insertion,
  /// Most recently created first.
  #[serde(rename = "newest")]
  NewestFirst,
}

/// Parameters for [`Repository::read_all`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
  pub offset: u64,
  pub limit:  u64,
  pub order:  Order,
}

impl Default for Page {
  fn default() -> Self {
    Self { offset: 0, limit: DEFAULT_LIMIT, order: Order::Insertion }
  }
}

impl Page {
  pub fn newest_first() -> Self {
    Self { order: Order::NewestFirst, ..Self::default() }
  }
}

// ─── Traits ──────────────────────────────────────────────────────────────────

/// A handle on the backing store, independent of any entity type.
pub trait Store: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Acquire a session and run a trivial query against the store.
  fn ping(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}

/// Generic create/read/update/delete over one entity type.
///
/// Each call is one all-or-nothing unit against the store. A missing row is
/// reported as `Ok(None)`, never as an error; only store failures cross this
/// boundary as `Err`.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait Repository<E: Entity>: Store {
  /// Insert a new entity and return it with its generated id and timestamps.
  /// Duplicate content is permitted.
  fn create(
    &self,
    input: E::New,
  ) -> impl Future<Output = Result<E, Self::Error>> + Send + '_;

  /// Retrieve an entity by id. Returns `None` if not found.
  fn read(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<E>, Self::Error>> + Send + '_;

  /// Return at most `page.limit` entities starting at `page.offset`.
  fn read_all(
    &self,
    page: Page,
  ) -> impl Future<Output = Result<Vec<E>, Self::Error>> + Send + '_;

  /// Merge `patch` onto the stored row and persist it. Returns `None`, having
  /// written nothing, if the id does not exist.
  fn update(
    &self,
    id: i64,
    patch: E::Patch,
  ) -> impl Future<Output = Result<Option<E>, Self::Error>> + Send + '_;

  /// Remove an entity, returning its pre-deletion snapshot, or `None` if the
  /// id does not exist.
  fn delete(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<E>, Self::Error>> + Send + '_;
}
