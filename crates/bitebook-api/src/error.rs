//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every error body is `{"error": "<message>"}`. Store failures are logged
//! with their cause and answered with the generic message only.

use axum::{
  Json,
  extract::rejection::JsonRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use bitebook_core::validate::ValidationErrors;
use serde_json::json;
use thiserror::Error;

/// Body of every 400 response.
pub const INVALID_BODY: &str = "Invalid request body";

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("{0}")]
  NotFound(&'static str),

  #[error("invalid request body: {0}")]
  Invalid(ValidationErrors),

  #[error("{context}: {source}")]
  Store {
    /// Generic message returned to the client.
    context: &'static str,
    #[source]
    source:  Box<dyn std::error::Error + Send + Sync>,
  },
}

impl ApiError {
  pub fn store(
    context: &'static str,
    source: impl std::error::Error + Send + Sync + 'static,
  ) -> Self {
    Self::Store { context, source: Box::new(source) }
  }
}

impl From<ValidationErrors> for ApiError {
  fn from(e: ValidationErrors) -> Self { Self::Invalid(e) }
}

impl From<JsonRejection> for ApiError {
  fn from(e: JsonRejection) -> Self {
    Self::Invalid(ValidationErrors::single("body", e.body_text()))
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, *m),
      ApiError::Invalid(errors) => {
        tracing::debug!(%errors, "rejected request body");
        (StatusCode::BAD_REQUEST, INVALID_BODY)
      }
      ApiError::Store { context, source } => {
        tracing::error!(error = %source, "{context}");
        (StatusCode::INTERNAL_SERVER_ERROR, *context)
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
