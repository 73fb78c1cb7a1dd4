//! Error types for `beautyspot-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Login with an unrecognised email. Surfaced to the caller for
  /// user-facing display; never mutates the current identity.
  #[error("invalid credentials")]
  InvalidCredentials,

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("storage error: {0}")]
  Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Box an arbitrary storage-backend error.
  pub fn storage<E>(source: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Storage(Box::new(source))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
