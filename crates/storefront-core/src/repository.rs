//! Repository abstractions for the catalog and order stores.
//!
//! Implementations are injected as constructor dependencies so tests can
//! substitute in-memory fakes for the PostgreSQL-backed production ones.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StorefrontError;
use crate::model::{Category, Order, OrderView, Photo, Product, ProductSummary};
use crate::query::ProductFilter;

/// Product persistence and read queries.
///
/// Every listing method returns [`ProductSummary`] values: the photo payload
/// is only reachable through [`CatalogRepository::photo`].
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Persists a new product.
    async fn insert_product(&self, product: Product) -> Result<(), StorefrontError>;

    /// Overwrites an existing product by id.
    ///
    /// Returns `NotFound` when no product with that id exists.
    async fn update_product(&self, product: Product) -> Result<(), StorefrontError>;

    /// Hard-deletes a product. Deleting an unknown id is not an error.
    async fn delete_product(&self, product_id: Uuid) -> Result<(), StorefrontError>;

    /// Loads a full product (photo included) for the update path.
    async fn product_by_id(&self, product_id: Uuid) -> Result<Option<Product>, StorefrontError>;

    /// One page of the catalog, most recently created first.
    async fn page(&self, skip: i64, limit: i64) -> Result<Vec<ProductSummary>, StorefrontError>;

    /// Total product count, unfiltered.
    async fn count(&self) -> Result<i64, StorefrontError>;

    /// One page of products matching `filter`, in a deterministic order.
    async fn filter_page(
        &self,
        filter: &ProductFilter,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<ProductSummary>, StorefrontError>;

    /// Count of products matching `filter`.
    async fn filter_count(&self, filter: &ProductFilter) -> Result<i64, StorefrontError>;

    /// All products whose name or description contains `keyword`,
    /// case-insensitively. Unpaginated.
    async fn search(&self, keyword: &str) -> Result<Vec<ProductSummary>, StorefrontError>;

    /// Up to `limit` products in `category_id` other than `product_id`,
    /// with the category populated.
    async fn related(
        &self,
        product_id: Uuid,
        category_id: Uuid,
        limit: i64,
    ) -> Result<Vec<ProductSummary>, StorefrontError>;

    /// Product by exact slug, with the category populated.
    async fn product_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<ProductSummary>, StorefrontError>;

    /// All products in a category, with the category populated.
    async fn products_in_category(
        &self,
        category_id: Uuid,
    ) -> Result<Vec<ProductSummary>, StorefrontError>;

    /// Photo payload for one product. `None` when the product is missing
    /// or has no stored photo; callers treat that as an empty response,
    /// not an error.
    async fn photo(&self, product_id: Uuid) -> Result<Option<Photo>, StorefrontError>;
}

/// Category persistence. Deleting a category leaves its products' category
/// references dangling; no cascade.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Persists a new category.
    async fn insert(&self, category: Category) -> Result<(), StorefrontError>;

    /// Renames a category (name and re-derived slug), returning the updated
    /// record.
    ///
    /// Returns `NotFound` when no category with that id exists.
    async fn update(
        &self,
        category_id: Uuid,
        name: &str,
        slug: &str,
    ) -> Result<Category, StorefrontError>;

    /// Hard-deletes a category.
    async fn delete(&self, category_id: Uuid) -> Result<(), StorefrontError>;

    /// Every category.
    async fn all(&self) -> Result<Vec<Category>, StorefrontError>;

    /// Category by exact slug; a miss is an empty value, not an error.
    async fn by_slug(&self, slug: &str) -> Result<Option<Category>, StorefrontError>;

    /// Category by exact name, used for duplicate detection on create.
    async fn by_name(&self, name: &str) -> Result<Option<Category>, StorefrontError>;
}

/// Order persistence. The checkout workflow is the only writer.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persists a new order.
    async fn insert(&self, order: Order) -> Result<(), StorefrontError>;

    /// Overwrites the status field (last write wins, no whitelist) and
    /// returns the updated order.
    ///
    /// Returns `NotFound` for an unknown order id.
    async fn update_status(&self, order_id: Uuid, status: &str) -> Result<Order, StorefrontError>;

    /// Orders placed by one buyer, with product summaries and buyer name
    /// populated.
    async fn for_buyer(&self, buyer: Uuid) -> Result<Vec<OrderView>, StorefrontError>;

    /// Every order, most recently created first.
    async fn all(&self) -> Result<Vec<OrderView>, StorefrontError>;
}
