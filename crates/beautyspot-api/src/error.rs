//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use beautyspot_core::guard::DenyReason;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// No current identity on an endpoint that needs one.
  #[error("authentication required")]
  Unauthorized,

  /// A guard denial, mapped to 401/403 with the reason in the body.
  #[error("{0}")]
  Denied(DenyReason),

  /// Sign-in with an unknown email.
  #[error("invalid credentials")]
  InvalidCredentials,

  /// Salon switch to a salon outside the identity's scope.
  #[error("forbidden: {0}")]
  Forbidden(String),

  #[error("session error: {0}")]
  Session(#[source] beautyspot_core::Error),
}

impl From<beautyspot_core::Error> for ApiError {
  fn from(e: beautyspot_core::Error) -> Self {
    match e {
      beautyspot_core::Error::InvalidCredentials => Self::InvalidCredentials,
      other => Self::Session(other),
    }
  }
}

impl From<DenyReason> for ApiError {
  fn from(reason: DenyReason) -> Self { Self::Denied(reason) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match self {
      ApiError::Unauthorized => (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "authentication required" })),
      )
        .into_response(),

      ApiError::Denied(reason) => {
        let status = match reason {
          DenyReason::Unauthenticated => StatusCode::UNAUTHORIZED,
          DenyReason::RoleMismatch { .. } | DenyReason::NoSalonAccess => {
            StatusCode::FORBIDDEN
          }
        };
        (
          status,
          Json(json!({ "error": reason.to_string(), "denied": reason })),
        )
          .into_response()
      }

      ApiError::InvalidCredentials => (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "invalid credentials" })),
      )
        .into_response(),

      ApiError::Forbidden(message) => {
        (StatusCode::FORBIDDEN, Json(json!({ "error": message })))
          .into_response()
      }

      ApiError::Session(e) => (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": e.to_string() })),
      )
        .into_response(),
    }
  }
}
