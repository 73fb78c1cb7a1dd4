//! Identity — the record for the currently authenticated principal.
//!
//! An identity carries a role and, for salon owners, the set of salons the
//! owner may act on plus the one currently selected. The identity is a
//! singleton per session: the [`SessionStore`](crate::session::SessionStore)
//! holds at most one at a time.

use serde::{Deserialize, Serialize};

// ─── Role ────────────────────────────────────────────────────────────────────

/// The closed set of console roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
  /// Platform administrator — implicit access to every salon.
  PlatformAdmin,
  /// Salon owner — access scoped to `salon_ids`.
  SalonOwner,
  /// End customer; no console access beyond their own session.
  Customer,
}

impl std::fmt::Display for Role {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let s = match self {
      Role::PlatformAdmin => "platform-admin",
      Role::SalonOwner => "salon-owner",
      Role::Customer => "customer",
    };
    f.write_str(s)
  }
}

// ─── Salon id ────────────────────────────────────────────────────────────────

/// Opaque identifier for a salon (the tenant-scoped resource).
#[derive(
  Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SalonId(String);

impl SalonId {
  pub fn new(id: impl Into<String>) -> Self { Self(id.into()) }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl From<&str> for SalonId {
  fn from(id: &str) -> Self { Self(id.to_owned()) }
}

impl From<String> for SalonId {
  fn from(id: String) -> Self { Self(id) }
}

impl std::fmt::Display for SalonId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.0)
  }
}

// ─── Identity ────────────────────────────────────────────────────────────────

/// The authenticated user record.
///
/// Serialisation is field-for-field; this exact shape is what the storage
/// backend persists and restores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
  pub id:           String,
  pub display_name: String,
  /// Used only as the mock login key.
  pub email:        String,
  pub role:         Role,
  /// Salons this identity may act on. Ordered; only meaningful for
  /// [`Role::SalonOwner`], empty otherwise.
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub salon_ids:    Vec<SalonId>,
  /// The salon currently selected by an owner with multiple salons.
  /// When set, must be a member of `salon_ids`.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub active_salon_id: Option<SalonId>,
}

impl Identity {
  pub fn is_admin(&self) -> bool { self.role == Role::PlatformAdmin }

  pub fn is_salon_owner(&self) -> bool { self.role == Role::SalonOwner }

  pub fn has_role(&self, role: Role) -> bool { self.role == role }

  /// Whether this identity may act on `salon_id`.
  ///
  /// Admins may act on every salon; owners on the salons in `salon_ids`;
  /// everyone else on none.
  pub fn can_access_salon(&self, salon_id: &SalonId) -> bool {
    match self.role {
      Role::PlatformAdmin => true,
      Role::SalonOwner => self.salon_ids.contains(salon_id),
      Role::Customer => false,
    }
  }

  /// Re-establish the record invariants in place. Returns `true` if
  /// anything changed.
  ///
  /// - Non-owners carry no salon scope at all.
  /// - An owner's `active_salon_id` must be a member of `salon_ids`;
  ///   a stale selection is dropped.
  /// - An owner with accessible salons but no selection gets the first
  ///   entry auto-assigned.
  pub fn normalize(&mut self) -> bool {
    let mut changed = false;

    if self.role != Role::SalonOwner {
      if !self.salon_ids.is_empty() {
        self.salon_ids.clear();
        changed = true;
      }
      if self.active_salon_id.take().is_some() {
        changed = true;
      }
      return changed;
    }

    let stale = self
      .active_salon_id
      .as_ref()
      .is_some_and(|active| !self.salon_ids.contains(active));
    if stale {
      self.active_salon_id = None;
      changed = true;
    }

    if self.active_salon_id.is_none()
      && let Some(first) = self.salon_ids.first()
    {
      self.active_salon_id = Some(first.clone());
      changed = true;
    }

    changed
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn owner(salons: &[&str], active: Option<&str>) -> Identity {
    Identity {
      id:           "2".into(),
      display_name: "Jane Owner".into(),
      email:        "owner@salon.com".into(),
      role:         Role::SalonOwner,
      salon_ids:    salons.iter().map(|s| SalonId::from(*s)).collect(),
      active_salon_id: active.map(SalonId::from),
    }
  }

  #[test]
  fn normalize_auto_assigns_first_salon() {
    let mut id = owner(&["salon-1", "salon-2"], None);
    assert!(id.normalize());
    assert_eq!(id.active_salon_id, Some(SalonId::from("salon-1")));
  }

  #[test]
  fn normalize_drops_stale_selection_then_reassigns() {
    let mut id = owner(&["salon-1"], Some("salon-9"));
    assert!(id.normalize());
    assert_eq!(id.active_salon_id, Some(SalonId::from("salon-1")));
  }

  #[test]
  fn normalize_keeps_valid_selection() {
    let mut id = owner(&["salon-1", "salon-2"], Some("salon-2"));
    assert!(!id.normalize());
    assert_eq!(id.active_salon_id, Some(SalonId::from("salon-2")));
  }

  #[test]
  fn normalize_strips_scope_from_non_owner() {
    let mut id = owner(&["salon-1"], Some("salon-1"));
    id.role = Role::Customer;
    assert!(id.normalize());
    assert!(id.salon_ids.is_empty());
    assert!(id.active_salon_id.is_none());
  }

  #[test]
  fn admin_can_access_any_salon() {
    let mut id = owner(&[], None);
    id.role = Role::PlatformAdmin;
    assert!(id.can_access_salon(&SalonId::from("salon-42")));
  }

  #[test]
  fn owner_access_is_membership() {
    let id = owner(&["salon-1"], Some("salon-1"));
    assert!(id.can_access_salon(&SalonId::from("salon-1")));
    assert!(!id.can_access_salon(&SalonId::from("salon-2")));
  }

  #[test]
  fn serde_round_trip_preserves_fields() {
    let id = owner(&["salon-1", "salon-2"], Some("salon-2"));
    let json = serde_json::to_string(&id).unwrap();
    assert!(json.contains("\"salonIds\""));
    assert!(json.contains("\"activeSalonId\""));
    let back: Identity = serde_json::from_str(&json).unwrap();
    assert_eq!(back, id);
  }
}
