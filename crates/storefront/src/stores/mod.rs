//! Observable state containers.
//!
//! Each store owns its state inside a `tokio::sync::watch` channel. A
//! mutation runs under the channel's write lock together with its persist
//! step, and every committed snapshot is published to subscribers.

mod cart;
mod catalog;
mod wishlist;

pub use cart::{CartError, CartStore};
pub use catalog::{CatalogState, CatalogStatus, CatalogStore, PriceBounds};
pub use wishlist::WishlistStore;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::watch;

use crate::storage::{self, SharedStore};

/// A value mirrored to one storage key.
struct Persisted<T> {
    store: SharedStore,
    key: &'static str,
    state: watch::Sender<T>,
}

impl<T> Persisted<T>
where
    T: Serialize + DeserializeOwned + Default + Clone,
{
    /// Restore from storage; absent or unreadable values start from default.
    fn load(store: SharedStore, key: &'static str) -> Self {
        let value: T = storage::load_or_default(store.as_ref(), key);
        let (state, _) = watch::channel(value);
        Self { store, key, state }
    }

    /// Apply `f` and, if it reports a change, persist and notify.
    fn update(&self, f: impl FnOnce(&mut T) -> bool) -> bool {
        let store = self.store.as_ref();
        let key = self.key;
        self.state.send_if_modified(|value| {
            let changed = f(value);
            if changed {
                storage::persist(store, key, value);
            }
            changed
        })
    }

    fn borrow(&self) -> watch::Ref<'_, T> {
        self.state.borrow()
    }

    fn snapshot(&self) -> T {
        self.state.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<T> {
        self.state.subscribe()
    }
}
