//! Package store seam — a simple keyed collection store per user.
//!
//! The core assumes a keyed store supplied externally; this trait is the
//! boundary. `MemoryStore` is the in-process implementation used by the demo
//! binary and tests; a persistent backend replaces it behind the same trait.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::StoreError;
use crate::model::Package;

/// Backend-agnostic store for per-user package collections.
pub trait PackageStore: Send + Sync {
    /// Load a user's collection. A user with no saved collection gets an
    /// empty one, not an error.
    fn load(&self, user_id: &str) -> Result<Vec<Package>, StoreError>;

    /// Replace a user's collection atomically.
    fn save(&self, user_id: &str, packages: &[Package]) -> Result<(), StoreError>;
}

/// In-memory keyed store.
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, Vec<Package>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PackageStore for MemoryStore {
    fn load(&self, user_id: &str) -> Result<Vec<Package>, StoreError> {
        let collections = self.collections.lock().map_err(|e| StoreError::Load {
            user_id: user_id.to_string(),
            reason: e.to_string(),
        })?;
        Ok(collections.get(user_id).cloned().unwrap_or_default())
    }

    fn save(&self, user_id: &str, packages: &[Package]) -> Result<(), StoreError> {
        let mut collections = self.collections.lock().map_err(|e| StoreError::Save {
            user_id: user_id.to_string(),
            reason: e.to_string(),
        })?;
        collections.insert(user_id.to_string(), packages.to_vec());
        Ok(())
    }
}
