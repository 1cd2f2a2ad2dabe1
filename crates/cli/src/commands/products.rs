//! Catalog browsing.

use emporium_core::{CategoryFilter, PriceRange, ProductId, ViewType};
use emporium_storefront::Storefront;
use emporium_storefront::error::Result;
use emporium_storefront::query::ListingQuery;
use rust_decimal::Decimal;

use crate::render;

/// Filters for `products list`.
pub struct ListOptions {
    pub category: Option<String>,
    pub query: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub rating: Option<u8>,
    pub view: ViewType,
}

/// Fetch the catalog, apply filters and print the filtered view.
pub async fn list(shop: &Storefront, options: ListOptions) -> Result<()> {
    let catalog = shop.catalog();
    catalog.fetch_products().await?;
    catalog.set_view_type(options.view);

    let mut update = options
        .query
        .as_deref()
        .map(|query| ListingQuery::parse(query).filter_update())
        .unwrap_or_default();
    // An explicit --category wins over the query string
    if let Some(label) = options.category.as_deref() {
        update.category = Some(CategoryFilter::from_label(label));
    }
    if options.min_price.is_some() || options.max_price.is_some() {
        let bounds = catalog.price_bounds();
        update = update.with_price_range(PriceRange::new(
            options.min_price.unwrap_or(bounds.min),
            options.max_price.unwrap_or(bounds.max),
        )?);
    }
    if let Some(rating) = options.rating {
        update = update.with_rating(rating);
    }
    if !update.is_empty() {
        catalog.set_filters(update)?;
    }

    let state = catalog.snapshot();
    render::products(&state.filtered_products, state.view_type);
    Ok(())
}

pub async fn show(shop: &Storefront, id: ProductId) -> Result<()> {
    let product = shop.catalog().fetch_product_by_id(id).await?;
    render::product(&product);
    Ok(())
}

/// Ask the catalog for one category.
pub async fn by_category(shop: &Storefront, label: &str) -> Result<()> {
    let catalog = shop.catalog();
    catalog.fetch_products().await?;
    catalog.fetch_products_by_category(label).await?;
    render::products(&catalog.filtered_products(), ViewType::List);
    Ok(())
}

pub async fn search(shop: &Storefront, query: &str) -> Result<()> {
    let catalog = shop.catalog();
    catalog.fetch_products().await?;
    catalog.search_products(query);
    render::products(&catalog.filtered_products(), ViewType::List);
    Ok(())
}

pub async fn categories(shop: &Storefront) -> Result<()> {
    let catalog = shop.catalog();
    catalog.fetch_products().await?;
    for category in catalog.categories() {
        render::line(&category);
    }
    Ok(())
}

pub async fn featured(shop: &Storefront, count: usize) -> Result<()> {
    let catalog = shop.catalog();
    catalog.fetch_products().await?;
    render::products(&catalog.featured(count), ViewType::Grid);
    Ok(())
}
