//! The mock account directory — a fixed email → identity table standing in
//! for a real authentication backend. Passwords are accepted, never verified.

use crate::identity::{Identity, Role, SalonId};

/// Fixed mapping from known login emails to canned identities.
#[derive(Debug, Clone)]
pub struct AccountDirectory {
  accounts: Vec<Identity>,
}

impl AccountDirectory {
  pub fn new(accounts: Vec<Identity>) -> Self { Self { accounts } }

  /// The built-in demo accounts.
  pub fn mock() -> Self {
    Self::new(vec![
      Identity {
        id:           "1".into(),
        display_name: "John Admin".into(),
        email:        "admin@beautyspot.com".into(),
        role:         Role::PlatformAdmin,
        salon_ids:    Vec::new(),
        active_salon_id: None,
      },
      Identity {
        id:           "2".into(),
        display_name: "Jane Owner".into(),
        email:        "owner@salon.com".into(),
        role:         Role::SalonOwner,
        salon_ids:    vec![SalonId::from("salon-1"), SalonId::from("salon-2")],
        active_salon_id: Some(SalonId::from("salon-1")),
      },
      Identity {
        id:           "3".into(),
        display_name: "Mike Owner".into(),
        email:        "single-owner@salon.com".into(),
        role:         Role::SalonOwner,
        salon_ids:    vec![SalonId::from("salon-3")],
        active_salon_id: Some(SalonId::from("salon-3")),
      },
    ])
  }

  /// Find the canned identity for `email` (case-insensitive).
  pub fn lookup(&self, email: &str) -> Option<&Identity> {
    self
      .accounts
      .iter()
      .find(|account| account.email.eq_ignore_ascii_case(email))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn mock_accounts_resolve_by_email() {
    let directory = AccountDirectory::mock();
    let admin = directory.lookup("admin@beautyspot.com").unwrap();
    assert_eq!(admin.role, Role::PlatformAdmin);

    let owner = directory.lookup("owner@salon.com").unwrap();
    assert_eq!(owner.salon_ids.len(), 2);
  }

  #[test]
  fn lookup_is_case_insensitive() {
    let directory = AccountDirectory::mock();
    assert!(directory.lookup("Admin@BeautySpot.com").is_some());
  }

  #[test]
  fn unknown_email_resolves_to_none() {
    let directory = AccountDirectory::mock();
    assert!(directory.lookup("nobody@example.com").is_none());
  }
}
