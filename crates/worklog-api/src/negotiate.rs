//! Content negotiation: which representation a request wants back, and how its
//! body is decoded.

use std::convert::Infallible;

use axum::{
  Form, Json,
  extract::{FromRequest, FromRequestParts, Request},
  http::{HeaderMap, header, request::Parts},
};
use serde::de::DeserializeOwned;
use worklog_core::ValidationError;

use crate::error::ApiError;

// ─── Response channel ────────────────────────────────────────────────────────

/// The representation a handler's result is rendered into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
  Json,
  Html,
}

impl Channel {
  /// htmx requests always get HTML. Otherwise the first of `application/json`
  /// or `text/html` named in `Accept` wins; anything else gets HTML.
  pub fn negotiate(headers: &HeaderMap) -> Self {
    if headers.contains_key("hx-request") {
      return Channel::Html;
    }
    let Some(accept) = headers.get(header::ACCEPT).and_then(|v| v.to_str().ok())
    else {
      return Channel::Html;
    };
    for media in accept.split(',') {
      let media = media.split(';').next().unwrap_or_default().trim();
      match media {
        "application/json" => return Channel::Json,
        "text/html" | "application/xhtml+xml" => return Channel::Html,
        _ => {}
      }
    }
    Channel::Html
  }
}

impl<S> FromRequestParts<S> for Channel
where
  S: Send + Sync,
{
  type Rejection = Infallible;

  async fn from_request_parts(
    parts: &mut Parts,
    _state: &S,
  ) -> Result<Self, Self::Rejection> {
    Ok(Channel::negotiate(&parts.headers))
  }
}

// ─── Request body ────────────────────────────────────────────────────────────

/// A request body decoded as JSON when declared `application/json`, and as
/// `application/x-www-form-urlencoded` otherwise.
///
/// Undecodable bodies are rejected as a validation error on field `body`.
#[derive(Debug)]
pub struct Payload<T>(pub T);

fn is_json(headers: &HeaderMap) -> bool {
  headers
    .get(header::CONTENT_TYPE)
    .and_then(|v| v.to_str().ok())
    .is_some_and(|ct| {
      let mime = ct.split(';').next().unwrap_or_default().trim();
      mime == "application/json" || mime.ends_with("+json")
    })
}

impl<T, S> FromRequest<S> for Payload<T>
where
  T: DeserializeOwned,
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
    if is_json(req.headers()) {
      let Json(value) = Json::<T>::from_request(req, state)
        .await
        .map_err(|e| ValidationError::new("body", e.body_text()))?;
      Ok(Payload(value))
    } else {
      let Form(value) = Form::<T>::from_request(req, state)
        .await
        .map_err(|e| ValidationError::new("body", e.body_text()))?;
      Ok(Payload(value))
    }
  }
}
