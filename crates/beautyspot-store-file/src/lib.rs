//! File backend for the BeautySpot session store.
//!
//! Persists the serialised identity as a single JSON file, written
//! atomically (temp file, fsync, rename) so a crash mid-write never leaves a
//! torn session on disk. Blocking filesystem work runs on the blocking pool.

mod storage;

pub mod error;

pub use error::{Error, Result};
pub use storage::FileStorage;

#[cfg(test)]
mod tests;
