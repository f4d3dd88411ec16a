//! The `Entity` trait: what the generic data-access layer needs to know about
//! a persisted record type.
//!
//! Every entity lives in exactly one table, is identified by an integer id
//! assigned by the store, and supports a partial merge of client-supplied
//! fields. Backends are instantiated once per concrete entity type; there is
//! no runtime type inspection.

use chrono::{DateTime, Utc};

use crate::error::ValidationError;

/// The id carried by an entity that has not been persisted yet.
pub const UNSAVED_ID: i64 = 0;

pub trait Entity: Clone + Send + Sync + 'static {
  /// Raw client-supplied shape, every field as received.
  type Input: Send + 'static;
  /// Validated creation shape.
  type New: Send + 'static;
  /// Partial update shape; `None` fields are left untouched by [`merge`].
  ///
  /// [`merge`]: Entity::merge
  type Patch: Send + 'static;
  /// Raw client-supplied partial update, checked by [`validate_patch`].
  ///
  /// [`validate_patch`]: Entity::validate_patch
  type PatchInput: Send + 'static;

  /// Human-readable kind name, e.g. `"work"`.
  const NAME: &'static str;

  /// Turn raw input into the creation shape, naming the first bad field.
  fn validate(input: Self::Input) -> Result<Self::New, ValidationError>;

  /// Check a raw partial update; absent fields stay absent.
  fn validate_patch(input: Self::PatchInput) -> Result<Self::Patch, ValidationError>;

  /// Build an unsaved entity whose server-assigned timestamps are `now`.
  /// The id is [`UNSAVED_ID`] until the store assigns one.
  fn from_new(input: Self::New, now: DateTime<Utc>) -> Self;

  /// The store-assigned id, or [`UNSAVED_ID`].
  fn id(&self) -> i64;

  /// Attach the store-assigned id.
  fn with_id(self, id: i64) -> Self;

  /// Copy every supplied field of `patch` onto `self`.
  fn merge(&mut self, patch: Self::Patch, now: DateTime<Utc>);
}
