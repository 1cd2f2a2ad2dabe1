//! Order history.

use emporium_storefront::Storefront;
use emporium_storefront::error::Result;

use crate::render;

pub fn list(shop: &Storefront) -> Result<()> {
    if !shop.auth().is_authenticated() {
        render::line("Sign in to see your orders");
        return Ok(());
    }
    render::orders(&shop.order_history()?);
    Ok(())
}
