//! [`FileStorage`] — the file implementation of [`SessionStorage`].

use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use beautyspot_core::{
  identity::Identity,
  storage::{SessionStorage, StoredSession},
};

use crate::{Error, Result};

const SESSION_FILE: &str = "session.json";
const BACKUP_DATE_FORMAT: &str = "%Y%m%d_%H%M%S";

// ─── Storage ─────────────────────────────────────────────────────────────────

/// Session persistence backed by one JSON file under a data directory.
///
/// Cloning is cheap; clones operate on the same file.
#[derive(Debug, Clone)]
pub struct FileStorage {
  dir: PathBuf,
}

impl FileStorage {
  /// A storage rooted at `dir`. The directory is created on first save.
  pub fn new(dir: impl Into<PathBuf>) -> Self {
    Self { dir: dir.into() }
  }

  /// The session file path.
  pub fn path(&self) -> PathBuf { self.dir.join(SESSION_FILE) }
}

impl SessionStorage for FileStorage {
  type Error = Error;

  async fn load(&self) -> Result<StoredSession> {
    let path = self.path();
    tokio::task::spawn_blocking(move || load_blocking(&path)).await?
  }

  async fn save(&self, identity: &Identity) -> Result<()> {
    let dir = self.dir.clone();
    // Serialise with pretty printing for debuggability.
    let json = serde_json::to_string_pretty(identity)?;
    tokio::task::spawn_blocking(move || save_blocking(&dir, &json)).await?
  }

  async fn clear(&self) -> Result<()> {
    let path = self.path();
    tokio::task::spawn_blocking(move || clear_blocking(&path)).await?
  }
}

// ─── Blocking implementations ────────────────────────────────────────────────

fn load_blocking(path: &Path) -> Result<StoredSession> {
  if !path.exists() {
    tracing::debug!(path = %path.display(), "no session file (first start)");
    return Ok(StoredSession::empty());
  }

  let contents = fs::read_to_string(path)
    .map_err(|e| Error::Read { path: path.to_path_buf(), source: e })?;

  match serde_json::from_str::<Identity>(&contents) {
    Ok(identity) => {
      tracing::debug!(user = %identity.id, "session file loaded");
      Ok(StoredSession::loaded(identity))
    }
    Err(e) => {
      tracing::warn!(path = %path.display(), error = %e, "session file corrupt");
      // Keep the corrupt bytes around for debugging before the store
      // clears the slot.
      backup_corrupted(path)?;
      Ok(StoredSession::corrupt(e.to_string()))
    }
  }
}

/// Atomic write: temp file, fsync, rename.
fn save_blocking(dir: &Path, json: &str) -> Result<()> {
  fs::create_dir_all(dir)
    .map_err(|e| Error::DirCreation { path: dir.to_path_buf(), source: e })?;

  let final_path = dir.join(SESSION_FILE);
  let temp_path = dir.join(format!("{SESSION_FILE}.tmp.{}", std::process::id()));

  {
    let mut file = fs::File::create(&temp_path)
      .map_err(|e| Error::Write { path: temp_path.clone(), source: e })?;

    file
      .write_all(json.as_bytes())
      .map_err(|e| Error::Write { path: temp_path.clone(), source: e })?;

    file
      .sync_all()
      .map_err(|e| Error::Write { path: temp_path.clone(), source: e })?;
  }

  fs::rename(&temp_path, &final_path).map_err(|e| {
    // Don't leave the temp file behind on failure.
    let _ = fs::remove_file(&temp_path);
    Error::Rename { from: temp_path, to: final_path, source: e }
  })
}

fn clear_blocking(path: &Path) -> Result<()> {
  match fs::remove_file(path) {
    Ok(()) => Ok(()),
    Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
    Err(e) => Err(Error::Remove { path: path.to_path_buf(), source: e }),
  }
}

/// Rename a corrupt session file to `session.json.corrupted.<timestamp>`.
fn backup_corrupted(path: &Path) -> Result<Option<PathBuf>> {
  if !path.exists() {
    return Ok(None);
  }

  let timestamp = chrono::Utc::now().format(BACKUP_DATE_FORMAT);
  let backup_path =
    path.with_file_name(format!("{SESSION_FILE}.corrupted.{timestamp}"));

  fs::rename(path, &backup_path)
    .map_err(|e| Error::Backup { path: path.to_path_buf(), source: e })?;

  tracing::warn!(backup = %backup_path.display(), "backed up corrupt session file");
  Ok(Some(backup_path))
}
