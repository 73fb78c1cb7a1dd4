//! Access Guard — the pure decision function gating protected views.
//!
//! Given the current identity (if any) and a view's declared requirements,
//! [`evaluate`] returns admit or deny-with-reason. A denial is a normal
//! return value, never an error: the caller picks a fallback view or a
//! redirect from the reason.

use serde::Serialize;

use crate::identity::{Identity, Role};

// ─── Requirements ────────────────────────────────────────────────────────────

/// What a protected view declares about who may see it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccessRequirements {
  /// The identity must hold exactly this role, if set.
  pub required_role: Option<Role>,
  /// For salon owners: the identity must have access to at least one salon.
  /// Meaningless for other roles.
  pub require_salon_access: bool,
}

impl AccessRequirements {
  /// Only authentication is required.
  pub const fn authenticated() -> Self {
    Self { required_role: None, require_salon_access: false }
  }

  /// Require a specific role.
  pub const fn role(role: Role) -> Self {
    Self { required_role: Some(role), require_salon_access: false }
  }

  /// Additionally require a non-empty salon scope (owners only).
  pub fn with_salon_access(mut self) -> Self {
    self.require_salon_access = true;
    self
  }
}

// ─── Decision ────────────────────────────────────────────────────────────────

/// Why a view was denied. Carries what the caller needs for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum DenyReason {
  /// No identity is current; the caller should redirect to sign-in.
  Unauthenticated,
  /// The identity's role does not match; `required` is reported for display.
  RoleMismatch { required: Role },
  /// An owner with no accessible salons.
  NoSalonAccess,
}

impl std::fmt::Display for DenyReason {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      DenyReason::Unauthenticated => f.write_str("authentication required"),
      DenyReason::RoleMismatch { required } => {
        write!(f, "access denied: required role {required}")
      }
      DenyReason::NoSalonAccess => {
        f.write_str("access denied: no salon access")
      }
    }
  }
}

/// The outcome of one guard evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
  Admit,
  Deny(DenyReason),
}

impl AccessDecision {
  pub fn is_admit(&self) -> bool { matches!(self, Self::Admit) }

  pub fn deny_reason(&self) -> Option<&DenyReason> {
    match self {
      Self::Admit => None,
      Self::Deny(reason) => Some(reason),
    }
  }
}

// ─── Evaluation ──────────────────────────────────────────────────────────────

/// Decide whether `identity` satisfies `requirements`.
///
/// Pure and synchronous; callers re-evaluate on every render/request since
/// the identity may have changed (e.g. after logout).
pub fn evaluate(
  identity: Option<&Identity>,
  requirements: &AccessRequirements,
) -> AccessDecision {
  let Some(identity) = identity else {
    tracing::debug!("guard: no current identity");
    return AccessDecision::Deny(DenyReason::Unauthenticated);
  };

  if let Some(required) = requirements.required_role
    && identity.role != required
  {
    tracing::debug!(
      user = %identity.id,
      role = %identity.role,
      %required,
      "guard: role mismatch",
    );
    return AccessDecision::Deny(DenyReason::RoleMismatch { required });
  }

  if requirements.require_salon_access
    && identity.role == Role::SalonOwner
    && identity.salon_ids.is_empty()
  {
    tracing::debug!(user = %identity.id, "guard: owner has no salon access");
    return AccessDecision::Deny(DenyReason::NoSalonAccess);
  }

  AccessDecision::Admit
}
