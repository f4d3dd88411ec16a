//! Handlers for the work-log pages.
//!
//! | Method   | Path          | Notes |
//! |----------|---------------|-------|
//! | `GET`    | `/`           | Full page: entry form and list, newest first |
//! | `GET`    | `/work`       | List; `?offset`, `?limit` |
//! | `POST`   | `/work`       | Form or JSON body; also mounted at `/new` |
//! | `DELETE` | `/work/{id}`  | Empty 200 whether or not the id existed |
//! | `GET`    | `/about`      | Static page |
//!
//! Every handler except the two pages answers in the negotiated [`Channel`].

use askama::Template as _;
use axum::{
  extract::{Path, Query, State},
  response::{Html, Response},
};
use serde::Deserialize;
use worklog_core::{
  Entity as _,
  store::{Page, Repository},
  work::{Work, WorkInput},
};

use crate::{
  AppState,
  error::ApiError,
  negotiate::{Channel, Payload},
  view::{AboutPage, IndexPage, Outcome, respond},
};

// ─── Pages ───────────────────────────────────────────────────────────────────

/// `GET /`
pub async fn index<S>(State(state): State<AppState<S>>) -> Result<Html<String>, ApiError>
where
  S: Repository<Work>,
{
  let works = state
    .store
    .read_all(Page::newest_first())
    .await
    .map_err(ApiError::store)?;
  Ok(Html(IndexPage::new(works).render()?))
}

/// `GET /about`
pub async fn about() -> Result<Html<String>, ApiError> {
  Ok(Html(AboutPage::new().render()?))
}

// ─── List ────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
  pub offset: Option<u64>,
  pub limit:  Option<u64>,
}

/// `GET /work[?offset=..][&limit=..]`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  channel: Channel,
  Query(params): Query<ListParams>,
) -> Response
where
  S: Repository<Work>,
{
  let defaults = Page::newest_first();
  let page = Page {
    offset: params.offset.unwrap_or(defaults.offset),
    limit:  params.limit.unwrap_or(defaults.limit),
    ..defaults
  };
  let result = state
    .store
    .read_all(page)
    .await
    .map(Outcome::Listing)
    .map_err(ApiError::store);
  respond(channel, result)
}

// ─── Create ──────────────────────────────────────────────────────────────────

/// `POST /work`, `POST /new`
///
/// Input is validated before the store is touched; a bad date or missing
/// field answers 400.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  channel: Channel,
  payload: Result<Payload<WorkInput>, ApiError>,
) -> Response
where
  S: Repository<Work>,
{
  respond(channel, create_work(state.store.as_ref(), payload).await)
}

async fn create_work<S>(
  store: &S,
  payload: Result<Payload<WorkInput>, ApiError>,
) -> Result<Outcome, ApiError>
where
  S: Repository<Work>,
{
  let Payload(input) = payload?;
  let new = Work::validate(input)?;
  let work = store.create(new).await.map_err(ApiError::store)?;
  Ok(Outcome::Created(work))
}

// ─── Delete ──────────────────────────────────────────────────────────────────

/// `DELETE /work/{id}`
pub async fn remove<S>(
  State(state): State<AppState<S>>,
  channel: Channel,
  Path(id): Path<i64>,
) -> Response
where
  S: Repository<Work>,
{
  let result = state
    .store
    .delete(id)
    .await
    .map(|deleted| {
      if deleted.is_none() {
        tracing::debug!(id, "delete: no work with this id");
      }
      Outcome::Deleted
    })
    .map_err(ApiError::store);
  respond(channel, result)
}
