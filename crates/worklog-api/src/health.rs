//! Handler for `GET /health_check`.
//!
//! Always answers 200 with `"status": "ok"`; store reachability is reported in
//! the `database` field, either `"connected"` or the failure text.

use axum::{Json, extract::State};
use serde::Serialize;
use worklog_core::store::Store;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct Health {
  pub status:   &'static str,
  pub database: String,
}

/// `GET /health_check`
pub async fn handler<S>(State(state): State<AppState<S>>) -> Json<Health>
where
  S: Store,
{
  let database = match state.store.ping().await {
    Ok(()) => "connected".to_owned(),
    Err(e) => {
      tracing::warn!(error = %e, "health check could not reach the store");
      e.to_string()
    }
  };
  Json(Health { status: "ok", database })
}
