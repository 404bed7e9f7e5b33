//! Query handlers for the catalog context.
//!
//! All listing operations return photo-free [`ProductSummary`] views; the
//! photo payload is served exclusively by [`product_photo`].

use serde::Serialize;
use uuid::Uuid;

use storefront_core::error::StorefrontError;
use storefront_core::model::{Category, Photo, ProductSummary};
use storefront_core::query::{PAGE_SIZE, ProductFilter, RELATED_LIMIT, page_offset};
use storefront_core::repository::{CatalogRepository, CategoryRepository};

/// One page of a filtered listing together with the filtered total, so the
/// client can drive incremental "load more" pagination.
#[derive(Debug, Serialize)]
pub struct FilteredProducts {
    pub products: Vec<ProductSummary>,
    pub total: i64,
}

/// Products of one category resolved by slug. An unknown slug yields
/// `category: None` with an empty product list rather than an error.
#[derive(Debug, Serialize)]
pub struct CategoryProducts {
    pub category: Option<Category>,
    pub products: Vec<ProductSummary>,
}

/// One catalog page, 1-based, most recently created first.
///
/// # Errors
///
/// Returns `StorefrontError::Infrastructure` when the store query fails.
pub async fn product_list(
    page: u32,
    catalog: &dyn CatalogRepository,
) -> Result<Vec<ProductSummary>, StorefrontError> {
    catalog.page(page_offset(page), PAGE_SIZE).await
}

/// Unfiltered total product count.
///
/// # Errors
///
/// Returns `StorefrontError::Infrastructure` when the store query fails.
pub async fn product_count(catalog: &dyn CatalogRepository) -> Result<i64, StorefrontError> {
    catalog.count().await
}

/// One page of products matching `filter`, plus the matching total.
///
/// # Errors
///
/// Returns `StorefrontError::Infrastructure` when either store query fails.
pub async fn filter_products(
    filter: &ProductFilter,
    page: u32,
    catalog: &dyn CatalogRepository,
) -> Result<FilteredProducts, StorefrontError> {
    let total = catalog.filter_count(filter).await?;
    let products = catalog
        .filter_page(filter, page_offset(page), PAGE_SIZE)
        .await?;
    Ok(FilteredProducts { products, total })
}

/// Case-insensitive substring search over product names and descriptions.
/// Unpaginated.
///
/// # Errors
///
/// Returns `StorefrontError::Infrastructure` when the store query fails.
pub async fn search_products(
    keyword: &str,
    catalog: &dyn CatalogRepository,
) -> Result<Vec<ProductSummary>, StorefrontError> {
    catalog.search(keyword).await
}

/// Up to three other products from the same category, current product
/// excluded, with the category populated for display.
///
/// # Errors
///
/// Returns `StorefrontError::Infrastructure` when the store query fails.
pub async fn related_products(
    product_id: Uuid,
    category_id: Uuid,
    catalog: &dyn CatalogRepository,
) -> Result<Vec<ProductSummary>, StorefrontError> {
    catalog.related(product_id, category_id, RELATED_LIMIT).await
}

/// Product by exact slug with its category populated.
///
/// # Errors
///
/// Returns `StorefrontError::NotFound` for an unknown slug.
pub async fn product_by_slug(
    slug: &str,
    catalog: &dyn CatalogRepository,
) -> Result<ProductSummary, StorefrontError> {
    catalog
        .product_by_slug(slug)
        .await?
        .ok_or_else(|| StorefrontError::NotFound(format!("product {slug}")))
}

/// Category resolution by slug followed by its product listing. A missing
/// category is an empty result, not an error.
///
/// # Errors
///
/// Returns `StorefrontError::Infrastructure` when a store query fails.
pub async fn products_by_category(
    category_slug: &str,
    catalog: &dyn CatalogRepository,
    categories: &dyn CategoryRepository,
) -> Result<CategoryProducts, StorefrontError> {
    let Some(category) = categories.by_slug(category_slug).await? else {
        return Ok(CategoryProducts {
            category: None,
            products: Vec::new(),
        });
    };
    let products = catalog.products_in_category(category.id).await?;
    Ok(CategoryProducts {
        category: Some(category),
        products,
    })
}

/// Raw photo payload for one product. `None` (for a missing product or a
/// product without photo bytes) is a deliberate no-op for the caller, not
/// an error.
///
/// # Errors
///
/// Returns `StorefrontError::Infrastructure` when the store query fails.
pub async fn product_photo(
    product_id: Uuid,
    catalog: &dyn CatalogRepository,
) -> Result<Option<Photo>, StorefrontError> {
    catalog.photo(product_id).await
}

/// Every category.
///
/// # Errors
///
/// Returns `StorefrontError::Infrastructure` when the store query fails.
pub async fn all_categories(
    categories: &dyn CategoryRepository,
) -> Result<Vec<Category>, StorefrontError> {
    categories.all().await
}

/// Single category by slug.
///
/// # Errors
///
/// Returns `StorefrontError::NotFound` for an unknown slug.
pub async fn category_by_slug(
    slug: &str,
    categories: &dyn CategoryRepository,
) -> Result<Category, StorefrontError> {
    categories
        .by_slug(slug)
        .await?
        .ok_or_else(|| StorefrontError::NotFound(format!("category {slug}")))
}
