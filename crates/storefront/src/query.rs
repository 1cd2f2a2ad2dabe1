//! Listing-page query parameters.

use emporium_core::{CategoryFilter, FilterUpdate};
use url::form_urlencoded;

/// Parameters understood by the product listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingQuery {
    /// Normalized `?category=` value.
    pub category: Option<CategoryFilter>,
}

impl ListingQuery {
    /// Parse a query string, with or without the leading `?`.
    ///
    /// Unknown parameters are ignored; the last `category` wins.
    #[must_use]
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let category = form_urlencoded::parse(query.as_bytes())
            .filter(|(key, _)| key == "category")
            .filter(|(_, value)| !value.trim().is_empty())
            .map(|(_, value)| CategoryFilter::from_label(&value))
            .last();
        Self { category }
    }

    /// The filter change this query asks for.
    #[must_use]
    pub fn filter_update(&self) -> FilterUpdate {
        FilterUpdate {
            category: self.category.clone(),
            ..FilterUpdate::default()
        }
    }
}
