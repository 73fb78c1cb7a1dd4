//! Handlers for `/session` endpoints.
//!
//! | Method   | Path                   | Notes                               |
//! |----------|------------------------|-------------------------------------|
//! | `POST`   | `/session`             | Body: `{"email","password"}`        |
//! | `GET`    | `/session`             | Current identity; 401 if anonymous  |
//! | `DELETE` | `/session`             | Sign out; idempotent, 204           |
//! | `PUT`    | `/session/active-salon`| Body: `{"salonId"}`; 403 if outside scope |

use axum::{Json, extract::State, http::StatusCode};
use beautyspot_core::{
  identity::{Identity, SalonId},
  storage::SessionStorage,
};
use serde::Deserialize;

use crate::{AppState, error::ApiError};

// ─── Sign in ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SignInBody {
  pub email:    String,
  /// Accepted, never verified (mock authentication).
  pub password: String,
}

/// `POST /session`
pub async fn sign_in<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<SignInBody>,
) -> Result<Json<Identity>, ApiError>
where
  S: SessionStorage,
{
  let mut session = state.session.lock().await;
  let identity = session.login(&body.email, &body.password).await?;
  Ok(Json(identity.clone()))
}

// ─── Current identity ─────────────────────────────────────────────────────────

/// `GET /session`
pub async fn current<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Identity>, ApiError>
where
  S: SessionStorage,
{
  let session = state.session.lock().await;
  session
    .current()
    .cloned()
    .map(Json)
    .ok_or(ApiError::Unauthorized)
}

// ─── Sign out ─────────────────────────────────────────────────────────────────

/// `DELETE /session`
pub async fn sign_out<S>(
  State(state): State<AppState<S>>,
) -> Result<StatusCode, ApiError>
where
  S: SessionStorage,
{
  let mut session = state.session.lock().await;
  session.logout().await?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Salon switching ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchSalonBody {
  pub salon_id: SalonId,
}

/// `PUT /session/active-salon`
///
/// The store treats an out-of-scope salon as a silent no-op; over HTTP that
/// would leave the client guessing, so it surfaces as 403.
pub async fn switch_salon<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<SwitchSalonBody>,
) -> Result<Json<Identity>, ApiError>
where
  S: SessionStorage,
{
  let mut session = state.session.lock().await;
  if !session.is_authenticated() {
    return Err(ApiError::Unauthorized);
  }

  let switched = session.switch_active_salon(&body.salon_id).await?;
  if !switched {
    return Err(ApiError::Forbidden(format!(
      "salon {} is not accessible",
      body.salon_id
    )));
  }

  session
    .current()
    .cloned()
    .map(Json)
    .ok_or(ApiError::Unauthorized)
}
