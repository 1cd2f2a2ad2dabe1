//! Cart commands.

use emporium_core::ProductId;
use emporium_storefront::Storefront;
use emporium_storefront::error::Result;

use crate::render;

pub fn show(shop: &Storefront) {
    render::cart(&shop.cart().snapshot());
}

/// Fetch the product and add one unit.
pub async fn add(shop: &Storefront, id: ProductId) -> Result<()> {
    let product = shop.catalog().fetch_product_by_id(id).await?;
    let title = product.title.clone();
    shop.cart().add_to_cart(product);
    render::line(&format!(
        "Added {title} ({} in cart)",
        shop.cart().quantity_of(id)
    ));
    Ok(())
}

pub fn remove(shop: &Storefront, id: ProductId) {
    if shop.cart().remove_from_cart(id) {
        render::line(&format!("{} left in cart", shop.cart().quantity_of(id)));
    } else {
        render::line(&format!("Product {id} is not in the cart"));
    }
}

pub fn set(shop: &Storefront, id: ProductId, quantity: u32) -> Result<()> {
    shop.cart().update_cart_item_quantity(id, quantity)?;
    show(shop);
    Ok(())
}

pub fn drop_line(shop: &Storefront, id: ProductId) {
    if !shop.cart().remove_item_completely(id) {
        render::line(&format!("Product {id} is not in the cart"));
    }
    show(shop);
}

pub fn clear(shop: &Storefront) {
    shop.cart().clear_cart();
    render::line("Cart cleared");
}
