//! JSON HTTP surface for the BeautySpot console session layer.
//!
//! Exposes an axum [`Router`] over a shared
//! [`SessionStore`](beautyspot_core::session::SessionStore) backed by any
//! [`SessionStorage`]. The session endpoints drive the store; the console
//! endpoints demonstrate guard-protected views and their status-code mapping.

pub mod console;
pub mod error;
pub mod session;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, put},
};
use beautyspot_core::{session::SessionStore, storage::SessionStorage};
use tokio::sync::Mutex;

pub use error::ApiError;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
///
/// The store sits behind one async mutex: there is exactly one logical
/// writer, and guard evaluations read a consistent snapshot under the same
/// lock.
pub struct AppState<S: SessionStorage> {
  pub session: Arc<Mutex<SessionStore<S>>>,
}

impl<S: SessionStorage> AppState<S> {
  pub fn new(store: SessionStore<S>) -> Self {
    Self { session: Arc::new(Mutex::new(store)) }
  }
}

impl<S: SessionStorage> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self { session: Arc::clone(&self.session) }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the console router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: SessionStorage + 'static,
{
  Router::new()
    // Session lifecycle
    .route(
      "/session",
      get(session::current::<S>)
        .post(session::sign_in::<S>)
        .delete(session::sign_out::<S>),
    )
    .route("/session/active-salon", put(session::switch_salon::<S>))
    // Guard-protected console views
    .route("/console/admin/overview", get(console::admin_overview::<S>))
    .route("/console/owner/overview", get(console::owner_overview::<S>))
    .with_state(state)
}
