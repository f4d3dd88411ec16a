//! Presentation: askama templates and the single step that turns a handler's
//! neutral [`Outcome`] into a response for the negotiated [`Channel`].

use askama::Template;
use axum::{
  Json,
  http::StatusCode,
  response::{Html, IntoResponse, Response},
};
use worklog_core::work::Work;

use crate::{error::ApiError, negotiate::Channel};

// ─── Templates ───────────────────────────────────────────────────────────────

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
  works: Vec<Work>,
}

impl IndexPage {
  pub fn new(works: Vec<Work>) -> Self { Self { works } }
}

#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutPage {
  version: &'static str,
}

impl AboutPage {
  pub fn new() -> Self { Self { version: env!("CARGO_PKG_VERSION") } }
}

#[derive(Template)]
#[template(path = "work_list.html")]
struct WorkList {
  works: Vec<Work>,
}

#[derive(Template)]
#[template(path = "work_row.html")]
struct WorkRow {
  work: Work,
}

#[derive(Template)]
#[template(path = "error_message.html")]
pub struct ErrorMessage {
  message: String,
}

impl ErrorMessage {
  pub fn new(message: String) -> Self { Self { message } }
}

// ─── Outcome ─────────────────────────────────────────────────────────────────

/// What a work handler produced, independent of how it will be shown.
#[derive(Debug)]
pub enum Outcome {
  Listing(Vec<Work>),
  Created(Work),
  Deleted,
}

impl Outcome {
  pub fn present(self, channel: Channel) -> Result<Response, ApiError> {
    let res = match (self, channel) {
      (Outcome::Listing(works), Channel::Json) => Json(works).into_response(),
      (Outcome::Listing(works), Channel::Html) => {
        Html(WorkList { works }.render()?).into_response()
      }
      (Outcome::Created(work), Channel::Json) => {
        (StatusCode::CREATED, Json(work)).into_response()
      }
      (Outcome::Created(work), Channel::Html) => {
        Html(WorkRow { work }.render()?).into_response()
      }
      (Outcome::Deleted, _) => StatusCode::OK.into_response(),
    };
    Ok(res)
  }
}

/// Present `result` on `channel`, rendering failures on the same channel.
pub fn respond(channel: Channel, result: Result<Outcome, ApiError>) -> Response {
  match result.and_then(|outcome| outcome.present(channel)) {
    Ok(res) => res,
    Err(e) => e.into_channel_response(channel),
  }
}
