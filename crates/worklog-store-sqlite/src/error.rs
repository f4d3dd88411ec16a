//! Error type for `worklog-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Any failure reported by the driver: connection closed, lock timeout,
  /// I/O, constraint or decode failure. Never retried.
  #[error("store unavailable: {0}")]
  Unavailable(#[from] tokio_rusqlite::Error),

  #[error("unsupported database url: {0:?}")]
  UnsupportedUrl(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
