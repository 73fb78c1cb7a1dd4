//! Error type for `beautyspot-store-file`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("failed to create directory {path}: {source}")]
  DirCreation {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to read session file {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to write session file {path}: {source}")]
  Write {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("atomic rename from {from} to {to} failed: {source}")]
  Rename {
    from: PathBuf,
    to:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to remove session file {path}: {source}")]
  Remove {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to back up corrupt session file {path}: {source}")]
  Backup {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("blocking task failed: {0}")]
  Join(#[from] tokio::task::JoinError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
