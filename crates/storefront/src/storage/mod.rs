//! Durable key-value storage.
//!
//! Every store snapshot is persisted as a JSON document under a fixed key
//! (see [`keys`]). An absent key means "use the default", so a fresh data
//! directory needs no setup.
//!
//! Two backends are provided:
//! - [`MemoryStore`] for tests and ephemeral sessions
//! - [`FileStore`] which keeps one file per key in a data directory

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::warn;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored value could not be encoded or decoded.
    #[error("serialization error for key '{key}': {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The backend refused the write (quota, read-only media).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// A string-keyed store of JSON documents.
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Deleting an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend rejects the delete.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Shared handle to a storage backend.
pub type SharedStore = Arc<dyn KeyValueStore>;

/// Storage keys.
pub mod keys {
    /// The current session user.
    pub const USER: &str = "user";

    /// The user directory.
    pub const USERS: &str = "users";

    /// The cart snapshot.
    pub const CART: &str = "cart";

    /// The wishlist.
    pub const WISHLIST: &str = "wishlist";

    /// Order history for one user, most recent first.
    #[must_use]
    pub fn order_history(email: &str) -> String {
        format!("orderHistory_{email}")
    }
}

// =============================================================================
// Typed helpers
// =============================================================================

/// Load and decode the value under `key`.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if the stored JSON does not match `T`,
/// or any backend read error.
pub fn load<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StorageError::Serialization {
            key: key.to_string(),
            source,
        })
}

/// Load the value under `key`, falling back to `T::default()` when it is
/// absent or unreadable.
pub fn load_or_default<T: DeserializeOwned + Default>(store: &dyn KeyValueStore, key: &str) -> T {
    match load(store, key) {
        Ok(value) => value.unwrap_or_default(),
        Err(e) => {
            warn!(key, error = %e, "Discarding unreadable stored value");
            T::default()
        }
    }
}

/// Encode and store `value` under `key`.
///
/// # Errors
///
/// Returns `StorageError` if encoding or the backend write fails.
pub fn save<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value).map_err(|source| StorageError::Serialization {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &raw)
}

/// Store `value` under `key`, logging instead of failing.
///
/// Returns whether the write succeeded.
pub fn persist<T: Serialize + ?Sized>(store: &dyn KeyValueStore, key: &str, value: &T) -> bool {
    match save(store, key, value) {
        Ok(()) => true,
        Err(e) => {
            warn!(key, error = %e, "Failed to persist snapshot; keeping in-memory state");
            false
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_history_key() {
        assert_eq!(keys::order_history("a@x.com"), "orderHistory_a@x.com");
    }

    #[test]
    fn test_load_absent_is_none() {
        let store = MemoryStore::new();
        let value: Option<Vec<u32>> = load(&store, "missing").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_save_then_load() {
        let store = MemoryStore::new();
        save(&store, "numbers", &vec![1_u32, 2, 3]).unwrap();
        let value: Vec<u32> = load(&store, "numbers").unwrap().unwrap();
        assert_eq!(value, vec![1, 2, 3]);
    }

    #[test]
    fn test_load_corrupt_value_is_an_error() {
        let store = MemoryStore::new();
        store.set("numbers", "{not json").unwrap();
        let result: Result<Option<Vec<u32>>, _> = load(&store, "numbers");
        assert!(matches!(
            result,
            Err(StorageError::Serialization { ref key, .. }) if key == "numbers"
        ));
    }

    #[test]
    fn test_load_or_default_recovers_from_corruption() {
        let store = MemoryStore::new();
        store.set("numbers", "{not json").unwrap();
        let value: Vec<u32> = load_or_default(&store, "numbers");
        assert!(value.is_empty());
    }

    #[test]
    fn test_persist_swallows_failures() {
        let store = MemoryStore::new();
        store.set_fail_writes(true);
        assert!(!persist(&store, "numbers", &vec![1_u32]));
        assert!(store.get("numbers").unwrap().is_none());
    }
}
