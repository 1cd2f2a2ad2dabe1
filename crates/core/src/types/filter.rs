//! Product filter state and matching rules.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::category::CategoryFilter;
use super::product::Product;

/// Highest selectable minimum rating.
pub const MAX_RATING: u8 = 5;

/// Errors from building or merging filters.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// Price bounds are negative or reversed.
    #[error("invalid price range [{min}, {max}]")]
    InvalidPriceRange { min: Decimal, max: Decimal },
    /// Rating threshold above the scale.
    #[error("rating must be between 0 and {MAX_RATING} (got {0})")]
    RatingOutOfRange(u8),
}

/// Inclusive price bounds. Serialized as `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "[Decimal; 2]", into = "[Decimal; 2]")]
pub struct PriceRange {
    min: Decimal,
    max: Decimal,
}

impl PriceRange {
    /// Create a price range.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::InvalidPriceRange` if either bound is negative or
    /// `min > max`.
    pub fn new(min: Decimal, max: Decimal) -> Result<Self, FilterError> {
        if min.is_sign_negative() || max.is_sign_negative() || min > max {
            return Err(FilterError::InvalidPriceRange { min, max });
        }
        Ok(Self { min, max })
    }

    #[must_use]
    pub const fn min(&self) -> Decimal {
        self.min
    }

    #[must_use]
    pub const fn max(&self) -> Decimal {
        self.max
    }

    /// Inclusive containment.
    #[must_use]
    pub fn contains(&self, price: Decimal) -> bool {
        price >= self.min && price <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            min: Decimal::ZERO,
            max: Decimal::ONE_THOUSAND,
        }
    }
}

impl TryFrom<[Decimal; 2]> for PriceRange {
    type Error = FilterError;

    fn try_from([min, max]: [Decimal; 2]) -> Result<Self, Self::Error> {
        Self::new(min, max)
    }
}

impl From<PriceRange> for [Decimal; 2] {
    fn from(range: PriceRange) -> Self {
        [range.min, range.max]
    }
}

/// The catalog filter.
///
/// A product stays in the filtered view only if it passes every active
/// predicate: category, price range, minimum rating and title search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProductFilter {
    pub category: CategoryFilter,
    pub price_range: PriceRange,
    /// Minimum average rating; 0 disables the predicate.
    pub rating: u8,
    /// Case-insensitive title substring; empty disables the predicate.
    pub search_query: String,
}

impl ProductFilter {
    /// Merge a partial update into this filter.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::RatingOutOfRange` if the rating exceeds 5. The
    /// filter is left untouched on error.
    pub fn merge(&mut self, update: FilterUpdate) -> Result<(), FilterError> {
        if let Some(rating) = update.rating
            && rating > MAX_RATING
        {
            return Err(FilterError::RatingOutOfRange(rating));
        }

        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(range) = update.price_range {
            self.price_range = range;
        }
        if let Some(rating) = update.rating {
            self.rating = rating;
        }
        if let Some(query) = update.search_query {
            self.search_query = query;
        }
        Ok(())
    }

    /// Whether a product passes all active predicates.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if !self.category.matches(&product.category) {
            return false;
        }

        if !self.price_range.contains(product.price) {
            return false;
        }

        if self.rating > 0 && product.rating.rate < f64::from(self.rating) {
            return false;
        }

        if !self.search_query.is_empty() && !product.title_contains(&self.search_query.to_lowercase())
        {
            return false;
        }

        true
    }

    /// Products passing this filter, in catalog order.
    #[must_use]
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        products
            .iter()
            .filter(|product| self.matches(product))
            .cloned()
            .collect()
    }
}

/// Partial filter update; `None` fields keep their current value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterUpdate {
    pub category: Option<CategoryFilter>,
    pub price_range: Option<PriceRange>,
    pub rating: Option<u8>,
    pub search_query: Option<String>,
}

impl FilterUpdate {
    /// Update only the category, from an external label.
    #[must_use]
    pub fn category_label(label: &str) -> Self {
        Self {
            category: Some(CategoryFilter::from_label(label)),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_price_range(mut self, range: PriceRange) -> Self {
        self.price_range = Some(range);
        self
    }

    #[must_use]
    pub const fn with_rating(mut self, rating: u8) -> Self {
        self.rating = Some(rating);
        self
    }

    #[must_use]
    pub fn with_search_query(mut self, query: impl Into<String>) -> Self {
        self.search_query = Some(query.into());
        self
    }

    /// Whether the update changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.price_range.is_none()
            && self.rating.is_none()
            && self.search_query.is_none()
    }
}

impl From<ProductFilter> for FilterUpdate {
    fn from(filter: ProductFilter) -> Self {
        Self {
            category: Some(filter.category),
            price_range: Some(filter.price_range),
            rating: Some(filter.rating),
            search_query: Some(filter.search_query),
        }
    }
}
