//! [`SessionStore`] — owner of the current identity and its persistence.
//!
//! One store holds at most one identity. Every successful mutation awaits
//! the storage write before the in-memory state changes, so the persisted
//! value never lags what callers observe.

use crate::{
  Error, Result,
  directory::AccountDirectory,
  identity::{Identity, Role, SalonId},
  storage::SessionStorage,
};

/// The session store, generic over its durable backend.
///
/// Not internally synchronised: callers that share a store across tasks
/// wrap it in their own lock. There is exactly one logical writer.
#[derive(Debug)]
pub struct SessionStore<S: SessionStorage> {
  storage:   S,
  directory: AccountDirectory,
  current:   Option<Identity>,
}

impl<S: SessionStorage> SessionStore<S> {
  pub fn new(storage: S, directory: AccountDirectory) -> Self {
    Self { storage, directory, current: None }
  }

  // ── Lifecycle ─────────────────────────────────────────────────────────

  /// Restore a previously persisted identity, if any.
  ///
  /// Never fails: a missing value, an unparsable value, or a backend read
  /// error all degrade to an anonymous session. A corrupt value is cleared
  /// from the backend so it is not re-parsed on the next start. Callers
  /// must await this before evaluating the guard for the first time.
  pub async fn restore(&mut self) {
    let stored = match self.storage.load().await {
      Ok(stored) => stored,
      Err(e) => {
        tracing::warn!(error = %e, "session restore failed; starting anonymous");
        self.current = None;
        return;
      }
    };

    if let Some(message) = stored.corruption {
      tracing::warn!(%message, "discarding corrupt persisted session");
      if let Err(e) = self.storage.clear().await {
        tracing::warn!(error = %e, "failed to clear corrupt session");
      }
      self.current = None;
      return;
    }

    match stored.identity {
      Some(mut identity) => {
        if identity.normalize() {
          // Repersist so the normalised record is what the next start sees.
          if let Err(e) = self.storage.save(&identity).await {
            tracing::warn!(error = %e, "failed to repersist normalised session");
          }
        }
        tracing::info!(user = %identity.id, role = %identity.role, "session restored");
        self.current = Some(identity);
      }
      None => {
        tracing::debug!("no persisted session");
        self.current = None;
      }
    }
  }

  /// Mock login: match `email` against the account directory.
  ///
  /// The password is accepted but not verified. An unknown email fails with
  /// [`Error::InvalidCredentials`] and leaves the current identity untouched.
  pub async fn login(&mut self, email: &str, _password: &str) -> Result<&Identity> {
    let Some(account) = self.directory.lookup(email) else {
      tracing::info!(email, "login rejected: unknown account");
      return Err(Error::InvalidCredentials);
    };

    let mut identity = account.clone();
    identity.normalize();

    // Persist before taking the identity current, so a storage failure
    // leaves the previous state intact.
    self.storage.save(&identity).await.map_err(Error::storage)?;

    tracing::info!(user = %identity.id, role = %identity.role, "login");
    Ok(self.current.insert(identity))
  }

  /// Clear the current identity and remove the persisted value.
  pub async fn logout(&mut self) -> Result<()> {
    self.storage.clear().await.map_err(Error::storage)?;
    if let Some(identity) = self.current.take() {
      tracing::info!(user = %identity.id, "logout");
    }
    Ok(())
  }

  /// Select `salon_id` as the owner's active salon.
  ///
  /// Returns `true` and persists iff the salon is in the identity's
  /// accessible set; anything else (anonymous, non-owner, unknown salon)
  /// is a no-op returning `false`.
  pub async fn switch_active_salon(&mut self, salon_id: &SalonId) -> Result<bool> {
    let Some(identity) = self.current.as_ref() else {
      return Ok(false);
    };

    if identity.role != Role::SalonOwner
      || !identity.salon_ids.contains(salon_id)
    {
      tracing::debug!(user = %identity.id, %salon_id, "salon switch ignored");
      return Ok(false);
    }

    if identity.active_salon_id.as_ref() == Some(salon_id) {
      return Ok(true);
    }

    let mut updated = identity.clone();
    updated.active_salon_id = Some(salon_id.clone());
    self.storage.save(&updated).await.map_err(Error::storage)?;

    tracing::info!(user = %updated.id, %salon_id, "active salon switched");
    self.current = Some(updated);
    Ok(true)
  }

  // ── Derived queries ───────────────────────────────────────────────────

  pub fn current(&self) -> Option<&Identity> { self.current.as_ref() }

  pub fn is_authenticated(&self) -> bool { self.current.is_some() }

  pub fn has_role(&self, role: Role) -> bool {
    self.current.as_ref().is_some_and(|id| id.has_role(role))
  }

  pub fn can_access_salon(&self, salon_id: &SalonId) -> bool {
    self
      .current
      .as_ref()
      .is_some_and(|id| id.can_access_salon(salon_id))
  }
}
