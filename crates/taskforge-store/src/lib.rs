//! # taskforge-store
//!
//! Named-slot JSON snapshot store backing Taskforge state.
//!
//! State lives in two independent slots, each holding one full serialized
//! snapshot:
//!
//! - [`AGENTS_SLOT`] — the agent registry (array of four agent records)
//! - [`CURRENT_PROJECT_SLOT`] — the current project, absent when none exists
//!
//! Writes are full-slot overwrites, never incremental patches: a failed
//! write leaves the previous snapshot intact on disk, merely stale until the
//! next successful write. The store mirrors state, it never owns it.
//!
//! [`SlotStore`] is the seam; [`JsonFileStore`] is the durable
//! implementation (one file per slot under a data directory) and
//! [`MemoryStore`] the in-process one used by tests.

#![deny(unsafe_code)]

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

/// Slot holding the serialized agent registry.
pub const AGENTS_SLOT: &str = "agents";

/// Slot holding the serialized current project.
pub const CURRENT_PROJECT_SLOT: &str = "currentProject";

/// Errors from slot reads and writes.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Filesystem failure.
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Snapshot (de)serialization failure.
    #[error("store serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// A durable key-value store of named snapshot slots.
pub trait SlotStore: Send + Sync {
    /// Overwrite `slot` with `value`.
    fn put(&self, slot: &str, value: &Value) -> Result<()>;

    /// Read `slot`, or `None` if it has never been written (or was removed).
    fn get(&self, slot: &str) -> Result<Option<Value>>;

    /// Remove `slot` entirely. Removing an absent slot is not an error.
    fn remove(&self, slot: &str) -> Result<()>;
}

/// Typed convenience layer over [`SlotStore`].
pub trait SlotStoreExt: SlotStore {
    /// Serialize `value` and overwrite `slot` with it.
    fn put_json<T: Serialize>(&self, slot: &str, value: &T) -> Result<()> {
        self.put(slot, &serde_json::to_value(value)?)
    }

    /// Read and deserialize `slot`.
    fn get_json<T: DeserializeOwned>(&self, slot: &str) -> Result<Option<T>> {
        match self.get(slot)? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }
}

impl<S: SlotStore + ?Sized> SlotStoreExt for S {}

// ─────────────────────────────────────────────────────────────────────────────
// File-backed store
// ─────────────────────────────────────────────────────────────────────────────

/// Slot store persisting each slot as `<data_dir>/<slot>.json`.
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at `dir`, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{slot}.json"))
    }

    /// Write via a sibling temp file and rename, so readers never observe a
    /// half-written snapshot.
    fn write_atomic(path: &Path, contents: &str) -> Result<()> {
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

impl SlotStore for JsonFileStore {
    fn put(&self, slot: &str, value: &Value) -> Result<()> {
        let path = self.slot_path(slot);
        let contents = serde_json::to_string_pretty(value)?;
        Self::write_atomic(&path, &contents)?;
        debug!(slot, path = %path.display(), "slot written");
        Ok(())
    }

    fn get(&self, slot: &str) -> Result<Option<Value>> {
        let path = self.slot_path(slot);
        let contents = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str(&contents) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                // A corrupt slot is treated as absent so callers can re-seed.
                warn!(slot, error = %e, "slot contents unreadable, treating as absent");
                Ok(None)
            }
        }
    }

    fn remove(&self, slot: &str) -> Result<()> {
        match fs::remove_file(self.slot_path(slot)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// In-memory store
// ─────────────────────────────────────────────────────────────────────────────

/// In-process slot store for tests and ephemeral runs.
#[derive(Default)]
pub struct MemoryStore {
    slots: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SlotStore for MemoryStore {
    fn put(&self, slot: &str, value: &Value) -> Result<()> {
        let _ = self.slots.write().insert(slot.to_string(), value.clone());
        Ok(())
    }

    fn get(&self, slot: &str) -> Result<Option<Value>> {
        Ok(self.slots.read().get(slot).cloned())
    }

    fn remove(&self, slot: &str) -> Result<()> {
        let _ = self.slots.write().remove(slot);
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
