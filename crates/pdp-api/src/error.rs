//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every error body carries `kind` and `retryable` so a client can tell "the
//! store call failed, try again" apart from "this needs a human".

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use pdp_core::ErrorKind;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error(transparent)]
  Lifecycle(#[from] pdp_core::Error),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, kind, retryable, step) = match &self {
      ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found", false, None),
      ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request", false, None),
      ApiError::Store(_) => (StatusCode::SERVICE_UNAVAILABLE, "store", true, None),
      ApiError::Lifecycle(e) => {
        let status = match e.kind() {
          ErrorKind::NotFound => StatusCode::NOT_FOUND,
          ErrorKind::Conflict => StatusCode::CONFLICT,
          ErrorKind::Integrity => StatusCode::INTERNAL_SERVER_ERROR,
          ErrorKind::Store => StatusCode::SERVICE_UNAVAILABLE,
        };
        let step: Option<&'static str> = e.step().map(Into::into);
        (status, <&'static str>::from(e.kind()), e.is_retryable(), step)
      }
    };

    if status.is_server_error() {
      tracing::error!(error = %self, kind, "request failed");
    }

    let body = json!({
      "error":     self.to_string(),
      "kind":      kind,
      "retryable": retryable,
      "step":      step,
    });
    (status, Json(body)).into_response()
  }
}
