//! Persisted session.

use emporium_core::PublicUser;

use crate::storage::{self, KeyValueStore, keys};

/// Repository for the session user.
///
/// Reads tolerate a missing or unreadable value (no session). Writes are
/// best-effort and report success as a `bool`.
pub struct SessionRepository<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> SessionRepository<'a> {
    #[must_use]
    pub const fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    /// The persisted session user, if any.
    #[must_use]
    pub fn load(&self) -> Option<PublicUser> {
        storage::load_or_default(self.store, keys::USER)
    }

    pub fn save(&self, user: &PublicUser) -> bool {
        storage::persist(self.store, keys::USER, user)
    }

    pub fn clear(&self) -> bool {
        match self.store.remove(keys::USER) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to clear persisted session");
                false
            }
        }
    }
}
