//! Catalog query model: pagination constants and filter predicates.
//!
//! The predicate semantics live here so that the in-memory repository and
//! the SQL repository implement the same contract, and so the contract is
//! unit-testable without a store.

use uuid::Uuid;

/// Number of products per page for paginated listings.
pub const PAGE_SIZE: i64 = 6;

/// Maximum number of related products returned for a product page.
pub const RELATED_LIMIT: i64 = 3;

/// Hard ceiling for inline photo payloads (1 MB).
pub const MAX_PHOTO_BYTES: usize = 1_000_000;

/// Row offset for a 1-based page number. Page 0 is treated as page 1;
/// there is no upper bound (callers are trusted, pages past the end are
/// simply empty).
#[must_use]
pub fn page_offset(page: u32) -> i64 {
    i64::from(page.max(1) - 1) * PAGE_SIZE
}

/// Inclusive price range, `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    /// Whether `price` falls within the range, bounds included.
    #[must_use]
    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }
}

/// Combined category + price predicate for filtered listings.
///
/// An empty category set and an absent price range both mean
/// "unconstrained": the filter then matches every product.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Selected category ids; empty means no category constraint.
    pub categories: Vec<Uuid>,
    /// Optional inclusive price range.
    pub price: Option<PriceRange>,
}

impl ProductFilter {
    /// True when neither constraint is present (match-all).
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.categories.is_empty() && self.price.is_none()
    }

    /// Evaluates the predicate against a product's category and price.
    #[must_use]
    pub fn matches(&self, category_id: Uuid, price: f64) -> bool {
        if !self.categories.is_empty() && !self.categories.contains(&category_id) {
            return false;
        }
        match self.price {
            Some(range) => range.contains(price),
            None => true,
        }
    }
}

/// Case-insensitive substring search over name OR description. Not
/// tokenized and not ranked; a plain substring test on either field.
#[must_use]
pub fn keyword_matches(keyword: &str, name: &str, description: &str) -> bool {
    let keyword = keyword.to_lowercase();
    name.to_lowercase().contains(&keyword) || description.to_lowercase().contains(&keyword)
}
