//! Wishlist commands.

use emporium_core::{ProductId, ViewType};
use emporium_storefront::Storefront;
use emporium_storefront::error::Result;

use crate::render;

pub fn show(shop: &Storefront) {
    render::products(&shop.wishlist().items(), ViewType::List);
}

pub async fn add(shop: &Storefront, id: ProductId) -> Result<()> {
    let product = shop.catalog().fetch_product_by_id(id).await?;
    let title = product.title.clone();
    if shop.wishlist().add_to_wishlist(product) {
        render::line(&format!("Saved {title}"));
    } else {
        render::line(&format!("{title} is already on your wishlist"));
    }
    Ok(())
}

pub fn remove(shop: &Storefront, id: ProductId) {
    if !shop.wishlist().remove_from_wishlist(id) {
        render::line(&format!("Product {id} is not on the wishlist"));
    }
    show(shop);
}

pub fn clear(shop: &Storefront) {
    shop.wishlist().clear_wishlist();
    render::line("Wishlist cleared");
}
