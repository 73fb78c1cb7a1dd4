//! Integration tests for `FileStorage` against a temporary directory.

use beautyspot_core::{
  directory::AccountDirectory,
  identity::SalonId,
  session::SessionStore,
  storage::{SessionStorage, StoredSession},
};
use tempfile::TempDir;

use crate::FileStorage;

fn storage() -> (TempDir, FileStorage) {
  let dir = TempDir::new().expect("tempdir");
  let storage = FileStorage::new(dir.path());
  (dir, storage)
}

// ─── Raw backend behaviour ───────────────────────────────────────────────────

#[tokio::test]
async fn load_with_no_file_is_empty() {
  let (_dir, s) = storage();
  let StoredSession { identity, corruption } = s.load().await.unwrap();
  assert!(identity.is_none());
  assert!(corruption.is_none());
}

#[tokio::test]
async fn save_then_load_round_trips() {
  let (_dir, s) = storage();
  let account = AccountDirectory::mock()
    .lookup("owner@salon.com")
    .unwrap()
    .clone();

  s.save(&account).await.unwrap();
  let loaded = s.load().await.unwrap();
  assert_eq!(loaded.identity, Some(account));
}

#[tokio::test]
async fn save_replaces_previous_value() {
  let (_dir, s) = storage();
  let directory = AccountDirectory::mock();
  let admin = directory.lookup("admin@beautyspot.com").unwrap();
  let owner = directory.lookup("owner@salon.com").unwrap();

  s.save(admin).await.unwrap();
  s.save(owner).await.unwrap();

  let loaded = s.load().await.unwrap();
  assert_eq!(loaded.identity.unwrap().email, "owner@salon.com");
}

#[tokio::test]
async fn clear_removes_file_and_is_idempotent() {
  let (_dir, s) = storage();
  let account = AccountDirectory::mock()
    .lookup("admin@beautyspot.com")
    .unwrap()
    .clone();

  s.save(&account).await.unwrap();
  assert!(s.path().exists());

  s.clear().await.unwrap();
  assert!(!s.path().exists());
  s.clear().await.unwrap();
}

#[tokio::test]
async fn corrupt_file_is_reported_and_backed_up() {
  let (dir, s) = storage();
  std::fs::write(s.path(), "{definitely not json").unwrap();

  let loaded = s.load().await.unwrap();
  assert!(loaded.identity.is_none());
  assert!(loaded.corruption.is_some());

  // The original file was renamed aside, so the next load starts clean.
  assert!(!s.path().exists());
  let backups: Vec<_> = std::fs::read_dir(dir.path())
    .unwrap()
    .filter_map(|e| e.ok())
    .filter(|e| {
      e.file_name().to_string_lossy().contains("corrupted")
    })
    .collect();
  assert_eq!(backups.len(), 1);

  let again = s.load().await.unwrap();
  assert!(again.identity.is_none());
  assert!(again.corruption.is_none());
}

// ─── Through the session store ───────────────────────────────────────────────

#[tokio::test]
async fn login_survives_a_simulated_reload() {
  let (_dir, s) = storage();

  let mut first = SessionStore::new(s.clone(), AccountDirectory::mock());
  first.login("owner@salon.com", "pw").await.unwrap();
  first
    .switch_active_salon(&SalonId::from("salon-2"))
    .await
    .unwrap();
  let before = first.current().unwrap().clone();
  drop(first);

  let mut second = SessionStore::new(s, AccountDirectory::mock());
  second.restore().await;
  assert_eq!(second.current(), Some(&before));
}

#[tokio::test]
async fn corrupt_file_restores_to_anonymous() {
  let (_dir, s) = storage();
  std::fs::write(s.path(), "[1, 2, oops").unwrap();

  let mut store = SessionStore::new(s.clone(), AccountDirectory::mock());
  store.restore().await;
  assert!(!store.is_authenticated());
  assert!(!s.path().exists());
}

#[tokio::test]
async fn logout_removes_the_file() {
  let (_dir, s) = storage();
  let mut store = SessionStore::new(s.clone(), AccountDirectory::mock());
  store.login("admin@beautyspot.com", "pw").await.unwrap();
  assert!(s.path().exists());

  store.logout().await.unwrap();
  assert!(!s.path().exists());
}
