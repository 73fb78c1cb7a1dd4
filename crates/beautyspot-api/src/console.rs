//! Guard-protected console endpoints.
//!
//! These are the HTTP rendering of protected views: each declares its
//! [`AccessRequirements`], evaluates the guard against the current identity,
//! and returns 401/403 with the deny reason instead of a fallback view.

use axum::{Json, extract::State};
use beautyspot_core::{
  guard::{self, AccessDecision, AccessRequirements},
  identity::{Identity, Role},
  session::SessionStore,
  storage::SessionStorage,
};
use serde_json::{Value, json};

use crate::{AppState, error::ApiError};

/// Evaluate the guard for the current identity; admit returns the identity.
fn require<'a, S: SessionStorage>(
  session: &'a SessionStore<S>,
  requirements: &AccessRequirements,
) -> Result<&'a Identity, ApiError> {
  match guard::evaluate(session.current(), requirements) {
    AccessDecision::Admit => {
      session.current().ok_or(ApiError::Unauthorized)
    }
    AccessDecision::Deny(reason) => Err(reason.into()),
  }
}

/// `GET /console/admin/overview` — platform admins only.
pub async fn admin_overview<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Value>, ApiError>
where
  S: SessionStorage,
{
  let session = state.session.lock().await;
  let identity =
    require(&session, &AccessRequirements::role(Role::PlatformAdmin))?;

  Ok(Json(json!({
    "section": "admin-overview",
    "viewer": identity.display_name,
  })))
}

/// `GET /console/owner/overview` — salon owners with at least one salon.
pub async fn owner_overview<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Value>, ApiError>
where
  S: SessionStorage,
{
  let session = state.session.lock().await;
  let requirements =
    AccessRequirements::role(Role::SalonOwner).with_salon_access();
  let identity = require(&session, &requirements)?;

  Ok(Json(json!({
    "section": "owner-overview",
    "viewer": identity.display_name,
    "salons": identity.salon_ids,
    "activeSalon": identity.active_salon_id,
  })))
}
