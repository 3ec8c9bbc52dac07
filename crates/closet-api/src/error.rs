//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use closet_core::store::StoreError;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("conflict: {0}")]
  Conflict(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Classify a backend error by the domain condition underneath it.
  pub fn from_store<E: StoreError>(e: E) -> Self {
    use closet_core::Error as Core;

    let classified = match e.as_core() {
      Some(core @ Core::OutfitNotFound(_)) => {
        Some(ApiError::NotFound(core.to_string()))
      }
      Some(core @ Core::AlreadyWorn { .. }) => {
        Some(ApiError::Conflict(core.to_string()))
      }
      Some(core @ Core::EmptyImageUrl) => {
        Some(ApiError::BadRequest(core.to_string()))
      }
      _ => None,
    };
    classified.unwrap_or_else(|| ApiError::Store(Box::new(e)))
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store failure");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
