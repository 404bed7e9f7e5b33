//! Domain model for the catalog and checkout contexts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Inline binary photo payload with its content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    /// Raw image bytes.
    pub data: Vec<u8>,
    /// MIME type the bytes were uploaded with.
    pub content_type: String,
}

/// A catalog product, including the inline photo payload.
///
/// Full products are only handled on the write path and by the dedicated
/// photo query; every listing operation works with [`ProductSummary`].
#[derive(Debug, Clone)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    /// URL-safe key derived from `name`; unique across the catalog.
    pub slug: String,
    pub description: String,
    pub price: f64,
    pub quantity: i32,
    pub category_id: Uuid,
    pub shipping: bool,
    pub photo: Option<Photo>,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// The photo-free view of this product, with no category populated.
    #[must_use]
    pub fn summary(&self) -> ProductSummary {
        ProductSummary {
            id: self.id,
            name: self.name.clone(),
            slug: self.slug.clone(),
            description: self.description.clone(),
            price: self.price,
            quantity: self.quantity,
            category_id: self.category_id,
            category: None,
            shipping: self.shipping,
            created_at: self.created_at,
        }
    }
}

/// A product without its photo payload. Photo binary is never embedded in
/// list/search/related/category JSON; it is fetched per-product instead.
#[derive(Debug, Clone, Serialize)]
pub struct ProductSummary {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub price: f64,
    pub quantity: i32,
    pub category_id: Uuid,
    /// Populated only by operations that resolve the category for display
    /// (single product, related products, products-by-category).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    pub shipping: bool,
    pub created_at: DateTime<Utc>,
}

/// A product category. Deleting a category does not cascade to its products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    /// Derived from `name` with the same rule as product slugs.
    pub slug: String,
}

/// Lifecycle states of an order. `UpdateOrderStatus` accepts arbitrary
/// strings, so these are canonical labels rather than an enforced whitelist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    NotProcessed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// The canonical label persisted for this status.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotProcessed => "Not Processed",
            Self::Processing => "Processing",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        Self::NotProcessed
    }
}

/// An order as persisted: created only as the side effect of a confirmed
/// gateway transaction.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub id: Uuid,
    pub product_ids: Vec<Uuid>,
    pub buyer: Uuid,
    /// Full gateway transaction record as returned by the adapter.
    pub payment: serde_json::Value,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Read view of an order with product summaries and the buyer name resolved.
#[derive(Debug, Clone, Serialize)]
pub struct OrderView {
    pub id: Uuid,
    pub products: Vec<ProductSummary>,
    pub buyer: Uuid,
    /// Resolved from the user record; `None` when the buyer is unknown.
    pub buyer_name: Option<String>,
    pub payment: serde_json::Value,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// One client-held cart line: a snapshot of a product at browse time.
/// Carts are never persisted; they exist only as checkout input.
#[derive(Debug, Clone, Deserialize)]
pub struct CartItem {
    pub product_id: Uuid,
    pub price: f64,
}
