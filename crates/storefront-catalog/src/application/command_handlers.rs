//! Command handlers for the catalog context: product create/update/delete
//! and category management.

use tracing::info;
use uuid::Uuid;

use storefront_core::clock::Clock;
use storefront_core::error::StorefrontError;
use storefront_core::model::{Category, Product, ProductSummary};
use storefront_core::repository::{CatalogRepository, CategoryRepository};
use storefront_core::slug::slugify;
use storefront_core::validation::ProductDraft;

/// Outcome of a category creation attempt. A duplicate name is a quiet
/// success-with-message at the HTTP layer, so it is not an error here.
#[derive(Debug)]
pub enum CategoryCreation {
    Created(Category),
    AlreadyExists,
}

/// Validates and persists a new product. The slug is derived from the name
/// server-side; nothing is written when validation fails.
///
/// # Errors
///
/// Returns `StorefrontError::Validation` with the first violated rule, or
/// `StorefrontError::Infrastructure` when the write fails.
pub async fn create_product(
    draft: ProductDraft,
    catalog: &dyn CatalogRepository,
    clock: &dyn Clock,
) -> Result<ProductSummary, StorefrontError> {
    let validated = draft.validate_create()?;
    let product = Product {
        id: Uuid::new_v4(),
        slug: slugify(&validated.name),
        name: validated.name,
        description: validated.description,
        price: validated.price,
        quantity: validated.quantity,
        category_id: validated.category_id,
        shipping: validated.shipping,
        photo: Some(validated.photo),
        created_at: clock.now(),
    };
    let summary = product.summary();
    catalog.insert_product(product).await?;
    info!(product_id = %summary.id, slug = %summary.slug, "product created");
    Ok(summary)
}

/// Validates and applies a product update. Shipping and photo keep their
/// stored values when absent from the draft; the slug is re-derived from
/// the (possibly new) name.
///
/// # Errors
///
/// Returns `StorefrontError::Validation` for the first violated rule,
/// `StorefrontError::NotFound` for an unknown product id, or
/// `StorefrontError::Infrastructure` when a store call fails.
pub async fn update_product(
    product_id: Uuid,
    draft: ProductDraft,
    catalog: &dyn CatalogRepository,
) -> Result<ProductSummary, StorefrontError> {
    let validated = draft.validate_update()?;
    let Some(mut product) = catalog.product_by_id(product_id).await? else {
        return Err(StorefrontError::NotFound(format!("product {product_id}")));
    };

    product.slug = slugify(&validated.name);
    product.name = validated.name;
    product.description = validated.description;
    product.price = validated.price;
    product.quantity = validated.quantity;
    product.category_id = validated.category_id;
    if let Some(shipping) = validated.shipping {
        product.shipping = shipping;
    }
    if let Some(photo) = validated.photo {
        product.photo = Some(photo);
    }

    let summary = product.summary();
    catalog.update_product(product).await?;
    info!(product_id = %product_id, "product updated");
    Ok(summary)
}

/// Hard-deletes a product. No tombstone is kept.
///
/// # Errors
///
/// Returns `StorefrontError::Infrastructure` when the delete fails.
pub async fn delete_product(
    product_id: Uuid,
    catalog: &dyn CatalogRepository,
) -> Result<(), StorefrontError> {
    catalog.delete_product(product_id).await?;
    info!(product_id = %product_id, "product deleted");
    Ok(())
}

/// Creates a category unless one with the same name already exists.
///
/// # Errors
///
/// Returns `StorefrontError::Validation` for an empty name, or
/// `StorefrontError::Infrastructure` when a store call fails.
pub async fn create_category(
    name: &str,
    categories: &dyn CategoryRepository,
) -> Result<CategoryCreation, StorefrontError> {
    if name.trim().is_empty() {
        return Err(StorefrontError::Validation("Name is required".into()));
    }
    if categories.by_name(name).await?.is_some() {
        return Ok(CategoryCreation::AlreadyExists);
    }
    let category = Category {
        id: Uuid::new_v4(),
        name: name.to_owned(),
        slug: slugify(name),
    };
    categories.insert(category.clone()).await?;
    info!(category_id = %category.id, slug = %category.slug, "category created");
    Ok(CategoryCreation::Created(category))
}

/// Renames a category, re-deriving its slug.
///
/// # Errors
///
/// Returns `StorefrontError::NotFound` for an unknown category id, or
/// `StorefrontError::Infrastructure` when the write fails.
pub async fn update_category(
    category_id: Uuid,
    name: &str,
    categories: &dyn CategoryRepository,
) -> Result<Category, StorefrontError> {
    categories.update(category_id, name, &slugify(name)).await
}

/// Hard-deletes a category. Products referencing it keep their dangling
/// category id; there is no cascade.
///
/// # Errors
///
/// Returns `StorefrontError::Infrastructure` when the delete fails.
pub async fn delete_category(
    category_id: Uuid,
    categories: &dyn CategoryRepository,
) -> Result<(), StorefrontError> {
    categories.delete(category_id).await
}
