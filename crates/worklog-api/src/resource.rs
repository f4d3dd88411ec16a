//! Generic JSON CRUD handlers, instantiated once per entity type.
//!
//! | Method   | Path                 | Notes |
//! |----------|----------------------|-------|
//! | `GET`    | `/api/{kind}s`       | `?offset`, `?limit`, `?order=insertion\|newest` |
//! | `POST`   | `/api/{kind}s`       | Body: the entity's input shape; returns 201 |
//! | `GET`    | `/api/{kind}s/{id}`  | 404 if not found |
//! | `PATCH`  | `/api/{kind}s/{id}`  | Partial update; 404 if not found |
//! | `DELETE` | `/api/{kind}s/{id}`  | Returns the deleted entity; 404 if not found |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::{StatusCode, header},
  response::IntoResponse,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use worklog_core::{
  Entity,
  store::{Order, Page, Repository},
};

use crate::{AppState, error::ApiError, negotiate::Payload};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
  pub offset: Option<u64>,
  pub limit:  Option<u64>,
  #[serde(default)]
  pub order:  Order,
}

impl ListParams {
  pub fn page(&self) -> Page {
    let defaults = Page::default();
    Page {
      offset: self.offset.unwrap_or(defaults.offset),
      limit:  self.limit.unwrap_or(defaults.limit),
      order:  self.order,
    }
  }
}

/// `GET /api/{kind}s`
pub async fn list<S, E>(
  State(state): State<AppState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<E>>, ApiError>
where
  S: Repository<E>,
  E: Entity + Serialize,
{
  let rows = state
    .store
    .read_all(params.page())
    .await
    .map_err(ApiError::store)?;
  Ok(Json(rows))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /api/{kind}s`: returns 201 + the stored entity, with its address in
/// `Location`.
pub async fn create<S, E>(
  State(state): State<AppState<S>>,
  Payload(input): Payload<E::Input>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Repository<E>,
  E: Entity + Serialize,
  E::Input: DeserializeOwned,
{
  let new = E::validate(input)?;
  let entity = state.store.create(new).await.map_err(ApiError::store)?;
  let location = format!("/api/{}s/{}", E::NAME, entity.id());
  Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(entity)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /api/{kind}s/{id}`
pub async fn get_one<S, E>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
) -> Result<Json<E>, ApiError>
where
  S: Repository<E>,
  E: Entity + Serialize,
{
  let entity = state
    .store
    .read(id)
    .await
    .map_err(ApiError::store)?
    .ok_or(ApiError::NotFound)?;
  Ok(Json(entity))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PATCH /api/{kind}s/{id}`: only the supplied fields change.
pub async fn update<S, E>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
  Payload(input): Payload<E::PatchInput>,
) -> Result<Json<E>, ApiError>
where
  S: Repository<E>,
  E: Entity + Serialize,
  E::PatchInput: DeserializeOwned,
{
  let patch = E::validate_patch(input)?;
  let entity = state
    .store
    .update(id, patch)
    .await
    .map_err(ApiError::store)?
    .ok_or(ApiError::NotFound)?;
  Ok(Json(entity))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /api/{kind}s/{id}`: returns the pre-deletion snapshot.
pub async fn remove<S, E>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
) -> Result<Json<E>, ApiError>
where
  S: Repository<E>,
  E: Entity + Serialize,
{
  let entity = state
    .store
    .delete(id)
    .await
    .map_err(ApiError::store)?
    .ok_or(ApiError::NotFound)?;
  Ok(Json(entity))
}
