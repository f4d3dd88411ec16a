//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Store failures are logged here, once, as the error leaves the handler;
//! clients only ever see a fixed message for them.

use askama::Template as _;
use axum::{
  Json,
  http::{HeaderValue, StatusCode, header},
  response::{Html, IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use worklog_core::ValidationError;

use crate::{negotiate::Channel, view::ErrorMessage};

/// An error returned by a handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error(transparent)]
  Validation(#[from] ValidationError),

  #[error("Item not found")]
  NotFound,

  #[error("Item already exists")]
  Conflict,

  #[error("Could not validate credentials")]
  Unauthorized,

  #[error("Database Operational Error")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("Template rendering failed")]
  Template(#[from] askama::Error),
}

impl ApiError {
  /// Wrap a store failure.
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    ApiError::Store(Box::new(e))
  }

  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::Validation(_) | ApiError::Conflict => StatusCode::BAD_REQUEST,
      ApiError::NotFound => StatusCode::NOT_FOUND,
      ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
      ApiError::Store(_) | ApiError::Template(_) => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
    }
  }

  fn log(&self) {
    match self {
      ApiError::Store(e) => tracing::error!(error = %e, "database operational error"),
      ApiError::Template(e) => tracing::error!(error = %e, "template rendering failed"),
      ApiError::Validation(e) => tracing::debug!(error = %e, "rejected input"),
      _ => {}
    }
  }

  /// Render for the negotiated channel: JSON, or an HTML error fragment.
  pub fn into_channel_response(self, channel: Channel) -> Response {
    match channel {
      Channel::Json => self.into_response(),
      Channel::Html => {
        self.log();
        let status = self.status();
        let Ok(rendered) = ErrorMessage::new(self.to_string()).render() else {
          return status.into_response();
        };
        (status, Html(rendered)).into_response()
      }
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    self.log();
    let status = self.status();
    let mut res = (status, Json(json!({ "error": self.to_string() }))).into_response();
    if let ApiError::Unauthorized = self {
      res
        .headers_mut()
        .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
    }
    res
  }
}
