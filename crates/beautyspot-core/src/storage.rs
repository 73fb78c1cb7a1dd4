//! The `SessionStorage` trait and supporting types.
//!
//! The trait is implemented by durable backends (e.g.
//! `beautyspot-store-file`). The [`SessionStore`](crate::session::SessionStore)
//! depends on this abstraction, not on any concrete backend.

use std::future::Future;
use std::sync::{Arc, Mutex};

use crate::identity::Identity;

// ─── Load result ─────────────────────────────────────────────────────────────

/// What a backend found when loading — distinguishes "nothing persisted"
/// from "persisted but unparsable".
#[derive(Debug, Default)]
pub struct StoredSession {
  pub identity: Option<Identity>,
  /// Present if a value existed but could not be parsed. The store treats
  /// this as no prior session and clears the backend.
  pub corruption: Option<String>,
}

impl StoredSession {
  pub fn empty() -> Self { Self::default() }

  pub fn loaded(identity: Identity) -> Self {
    Self { identity: Some(identity), corruption: None }
  }

  pub fn corrupt(message: impl Into<String>) -> Self {
    Self { identity: None, corruption: Some(message.into()) }
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over durable session persistence.
///
/// One logical slot: a backend holds at most one serialised identity. All
/// methods return `Send` futures so the trait can be used from multi-threaded
/// async runtimes.
pub trait SessionStorage: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Read the persisted identity, if any. Parse failures are reported
  /// in-band via [`StoredSession::corruption`], not as `Err`.
  fn load(
    &self,
  ) -> impl Future<Output = Result<StoredSession, Self::Error>> + Send + '_;

  /// Durably persist `identity`, replacing any previous value.
  fn save<'a>(
    &'a self,
    identity: &'a Identity,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Remove the persisted value. Idempotent.
  fn clear(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}

// ─── In-memory backend ───────────────────────────────────────────────────────

/// Memory-backed storage for tests and ephemeral sessions.
///
/// Holds the *serialised* identity so tests can inject raw bytes and
/// exercise the corruption path. Cloning shares the underlying slot,
/// which lets a test simulate a reload with a fresh store over the same
/// "durable" state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
  slot: Arc<Mutex<Option<String>>>,
}

impl MemoryStorage {
  pub fn new() -> Self { Self::default() }

  /// Start with a raw pre-persisted value (valid JSON or garbage).
  pub fn with_raw(raw: impl Into<String>) -> Self {
    Self { slot: Arc::new(Mutex::new(Some(raw.into()))) }
  }

  /// The raw persisted value, if any.
  pub fn raw(&self) -> Option<String> {
    self.lock().clone()
  }

  fn lock(&self) -> std::sync::MutexGuard<'_, Option<String>> {
    // A poisoned lock only means a test panicked mid-write; the slot
    // contents are still a plain Option<String>.
    self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
  }
}

impl SessionStorage for MemoryStorage {
  type Error = serde_json::Error;

  async fn load(&self) -> Result<StoredSession, Self::Error> {
    let raw = self.lock().clone();
    let Some(raw) = raw else {
      return Ok(StoredSession::empty());
    };
    match serde_json::from_str::<Identity>(&raw) {
      Ok(identity) => Ok(StoredSession::loaded(identity)),
      Err(e) => Ok(StoredSession::corrupt(e.to_string())),
    }
  }

  async fn save(&self, identity: &Identity) -> Result<(), Self::Error> {
    let raw = serde_json::to_string(identity)?;
    *self.lock() = Some(raw);
    Ok(())
  }

  async fn clear(&self) -> Result<(), Self::Error> {
    *self.lock() = None;
    Ok(())
  }
}
