//! State restored from the key-value store after a restart.

use emporium_core::{Cart, Wishlist};
use emporium_integration_tests::{reopen, sample_catalog, storefront};
use emporium_storefront::storage::{self, KeyValueStore, keys};

#[test]
fn test_cart_and_wishlist_reload() {
    let (shop, memory) = storefront();
    let catalog = sample_catalog();
    shop.cart().add_to_cart(catalog[0].clone());
    shop.cart().add_to_cart(catalog[0].clone());
    shop.cart().add_to_cart(catalog[2].clone());
    shop.wishlist().add_to_wishlist(catalog[3].clone());
    let cart = shop.cart().snapshot();
    let wishlist = shop.wishlist().snapshot();
    drop(shop);

    let restarted = reopen(&memory);
    assert_eq!(restarted.cart().snapshot(), cart);
    assert_eq!(restarted.wishlist().snapshot(), wishlist);
}

#[test]
fn test_snapshots_are_stored_under_their_keys() {
    let (shop, memory) = storefront();
    shop.cart().add_to_cart(sample_catalog().remove(1));

    let stored: Cart = storage::load(memory.as_ref(), keys::CART).unwrap().unwrap();
    assert_eq!(stored, shop.cart().snapshot());
    assert!(memory.get(keys::WISHLIST).unwrap().is_none());
}

#[test]
fn test_corrupt_blob_falls_back_to_empty() {
    let (_, memory) = storefront();
    memory.set(keys::CART, "{not json").unwrap();
    memory.set(keys::WISHLIST, "[1, 2, 3]").unwrap();

    let shop = reopen(&memory);
    assert!(shop.cart().is_empty());
    assert!(shop.wishlist().is_empty());

    // The store heals on the next write
    shop.cart().add_to_cart(sample_catalog().remove(0));
    assert!(storage::load::<Cart>(memory.as_ref(), keys::CART).is_ok());
}

#[test]
fn test_write_failures_keep_memory_state() {
    let (shop, memory) = storefront();
    memory.set_fail_writes(true);

    shop.cart().add_to_cart(sample_catalog().remove(0));
    shop.wishlist().add_to_wishlist(sample_catalog().remove(1));
    assert_eq!(shop.cart().total_quantity(), 1);
    assert_eq!(shop.wishlist().len(), 1);

    memory.set_fail_writes(false);
    let restarted = reopen(&memory);
    assert!(restarted.cart().is_empty());
    assert_eq!(restarted.wishlist().snapshot(), Wishlist::default());
}
