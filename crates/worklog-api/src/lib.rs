//! HTTP surface for the worklog tracker.
//!
//! Exposes an axum [`Router`] backed by any store implementing
//! [`Repository`] for both entity types. Logging setup, tracing layers and
//! transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = worklog_api::router(AppState::new(store));
//! ```

pub mod error;
pub mod health;
pub mod negotiate;
pub mod resource;
pub mod view;
pub mod work;

use std::sync::Arc;

use axum::{
  Router,
  routing::{delete, get, post},
};
use worklog_core::{store::Repository, task::Task, work::Work};

pub use error::ApiError;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all handlers. Built once at startup and
/// injected into the router.
pub struct AppState<S> {
  pub store: Arc<S>,
}

impl<S> AppState<S> {
  pub fn new(store: S) -> Self { Self { store: Arc::new(store) } }
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router for `state`.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: Repository<Work> + Repository<Task> + 'static,
{
  Router::new()
    // Pages and HTML fragments
    .route("/", get(work::index::<S>))
    .route("/about", get(work::about))
    .route("/health_check", get(health::handler::<S>))
    .route("/work", get(work::list::<S>).post(work::create::<S>))
    .route("/new", post(work::create::<S>))
    .route("/work/{id}", delete(work::remove::<S>))
    // JSON CRUD
    .route(
      "/api/works",
      get(resource::list::<S, Work>).post(resource::create::<S, Work>),
    )
    .route(
      "/api/works/{id}",
      get(resource::get_one::<S, Work>)
        .patch(resource::update::<S, Work>)
        .delete(resource::remove::<S, Work>),
    )
    .route(
      "/api/tasks",
      get(resource::list::<S, Task>).post(resource::create::<S, Task>),
    )
    .route(
      "/api/tasks/{id}",
      get(resource::get_one::<S, Task>)
        .patch(resource::update::<S, Task>)
        .delete(resource::remove::<S, Task>),
    )
    .with_state(state)
}
