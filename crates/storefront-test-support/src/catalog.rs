//! In-memory catalog — fake `CatalogRepository`/`CategoryRepository`
//! implementations backing unit and integration tests.

use std::sync::Mutex;

use async_trait::async_trait;
use storefront_core::error::StorefrontError;
use storefront_core::model::{Category, Photo, Product, ProductSummary};
use storefront_core::query::{ProductFilter, keyword_matches};
use storefront_core::repository::{CatalogRepository, CategoryRepository};
use uuid::Uuid;

/// An in-memory catalog holding products and categories behind mutexes.
///
/// Listing order matches the production store: `created_at` descending with
/// the id as a deterministic tie-break.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: Mutex<Vec<Product>>,
    categories: Mutex<Vec<Category>>,
}

impl InMemoryCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a product directly, bypassing validation.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn seed_product(&self, product: Product) {
        self.products.lock().unwrap().push(product);
    }

    /// Seeds a category directly.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn seed_category(&self, category: Category) {
        self.categories.lock().unwrap().push(category);
    }

    /// Snapshot of all stored products.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn products(&self) -> Vec<Product> {
        self.products.lock().unwrap().clone()
    }

    /// Snapshot of all stored categories.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn categories(&self) -> Vec<Category> {
        self.categories.lock().unwrap().clone()
    }

    fn category_of(&self, category_id: Uuid) -> Option<Category> {
        self.categories
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == category_id)
            .cloned()
    }

    fn sorted_summaries(&self) -> Vec<ProductSummary> {
        let mut products = self.products.lock().unwrap().clone();
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        products.iter().map(Product::summary).collect()
    }

    fn populate(&self, mut summary: ProductSummary) -> ProductSummary {
        summary.category = self.category_of(summary.category_id);
        summary
    }
}

#[async_trait]
impl CatalogRepository for InMemoryCatalog {
    async fn insert_product(&self, product: Product) -> Result<(), StorefrontError> {
        self.products.lock().unwrap().push(product);
        Ok(())
    }

    async fn update_product(&self, product: Product) -> Result<(), StorefrontError> {
        let mut products = self.products.lock().unwrap();
        match products.iter_mut().find(|p| p.id == product.id) {
            Some(existing) => {
                *existing = product;
                Ok(())
            }
            None => Err(StorefrontError::NotFound(format!(
                "product {}",
                product.id
            ))),
        }
    }

    async fn delete_product(&self, product_id: Uuid) -> Result<(), StorefrontError> {
        self.products.lock().unwrap().retain(|p| p.id != product_id);
        Ok(())
    }

    async fn product_by_id(&self, product_id: Uuid) -> Result<Option<Product>, StorefrontError> {
        Ok(self
            .products
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == product_id)
            .cloned())
    }

    async fn page(&self, skip: i64, limit: i64) -> Result<Vec<ProductSummary>, StorefrontError> {
        Ok(self
            .sorted_summaries()
            .into_iter()
            .skip(usize::try_from(skip).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(0))
            .collect())
    }

    async fn count(&self) -> Result<i64, StorefrontError> {
        Ok(self.products.lock().unwrap().len() as i64)
    }

    async fn filter_page(
        &self,
        filter: &ProductFilter,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<ProductSummary>, StorefrontError> {
        Ok(self
            .sorted_summaries()
            .into_iter()
            .filter(|p| filter.matches(p.category_id, p.price))
            .skip(usize::try_from(skip).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(0))
            .collect())
    }

    async fn filter_count(&self, filter: &ProductFilter) -> Result<i64, StorefrontError> {
        Ok(self
            .products
            .lock()
            .unwrap()
            .iter()
            .filter(|p| filter.matches(p.category_id, p.price))
            .count() as i64)
    }

    async fn search(&self, keyword: &str) -> Result<Vec<ProductSummary>, StorefrontError> {
        Ok(self
            .sorted_summaries()
            .into_iter()
            .filter(|p| keyword_matches(keyword, &p.name, &p.description))
            .collect())
    }

    async fn related(
        &self,
        product_id: Uuid,
        category_id: Uuid,
        limit: i64,
    ) -> Result<Vec<ProductSummary>, StorefrontError> {
        Ok(self
            .sorted_summaries()
            .into_iter()
            .filter(|p| p.category_id == category_id && p.id != product_id)
            .take(usize::try_from(limit).unwrap_or(0))
            .map(|p| self.populate(p))
            .collect())
    }

    async fn product_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<ProductSummary>, StorefrontError> {
        Ok(self
            .sorted_summaries()
            .into_iter()
            .find(|p| p.slug == slug)
            .map(|p| self.populate(p)))
    }

    async fn products_in_category(
        &self,
        category_id: Uuid,
    ) -> Result<Vec<ProductSummary>, StorefrontError> {
        Ok(self
            .sorted_summaries()
            .into_iter()
            .filter(|p| p.category_id == category_id)
            .map(|p| self.populate(p))
            .collect())
    }

    async fn photo(&self, product_id: Uuid) -> Result<Option<Photo>, StorefrontError> {
        Ok(self
            .products
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == product_id)
            .and_then(|p| p.photo.clone()))
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCatalog {
    async fn insert(&self, category: Category) -> Result<(), StorefrontError> {
        self.categories.lock().unwrap().push(category);
        Ok(())
    }

    async fn update(
        &self,
        category_id: Uuid,
        name: &str,
        slug: &str,
    ) -> Result<Category, StorefrontError> {
        let mut categories = self.categories.lock().unwrap();
        match categories.iter_mut().find(|c| c.id == category_id) {
            Some(category) => {
                category.name = name.to_owned();
                category.slug = slug.to_owned();
                Ok(category.clone())
            }
            None => Err(StorefrontError::NotFound(format!(
                "category {category_id}"
            ))),
        }
    }

    async fn delete(&self, category_id: Uuid) -> Result<(), StorefrontError> {
        self.categories
            .lock()
            .unwrap()
            .retain(|c| c.id != category_id);
        Ok(())
    }

    async fn all(&self) -> Result<Vec<Category>, StorefrontError> {
        Ok(self.categories.lock().unwrap().clone())
    }

    async fn by_slug(&self, slug: &str) -> Result<Option<Category>, StorefrontError> {
        Ok(self
            .categories
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.slug == slug)
            .cloned())
    }

    async fn by_name(&self, name: &str) -> Result<Option<Category>, StorefrontError> {
        Ok(self
            .categories
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.name == name)
            .cloned())
    }
}

/// A catalog whose every operation fails with an infrastructure error.
/// Useful for exercising error-handling paths.
#[derive(Debug, Default)]
pub struct FailingCatalog;

fn connection_refused() -> StorefrontError {
    StorefrontError::Infrastructure("connection refused".into())
}

#[async_trait]
impl CatalogRepository for FailingCatalog {
    async fn insert_product(&self, _product: Product) -> Result<(), StorefrontError> {
        Err(connection_refused())
    }

    async fn update_product(&self, _product: Product) -> Result<(), StorefrontError> {
        Err(connection_refused())
    }

    async fn delete_product(&self, _product_id: Uuid) -> Result<(), StorefrontError> {
        Err(connection_refused())
    }

    async fn product_by_id(&self, _product_id: Uuid) -> Result<Option<Product>, StorefrontError> {
        Err(connection_refused())
    }

    async fn page(&self, _skip: i64, _limit: i64) -> Result<Vec<ProductSummary>, StorefrontError> {
        Err(connection_refused())
    }

    async fn count(&self) -> Result<i64, StorefrontError> {
        Err(connection_refused())
    }

    async fn filter_page(
        &self,
        _filter: &ProductFilter,
        _skip: i64,
        _limit: i64,
    ) -> Result<Vec<ProductSummary>, StorefrontError> {
        Err(connection_refused())
    }

    async fn filter_count(&self, _filter: &ProductFilter) -> Result<i64, StorefrontError> {
        Err(connection_refused())
    }

    async fn search(&self, _keyword: &str) -> Result<Vec<ProductSummary>, StorefrontError> {
        Err(connection_refused())
    }

    async fn related(
        &self,
        _product_id: Uuid,
        _category_id: Uuid,
        _limit: i64,
    ) -> Result<Vec<ProductSummary>, StorefrontError> {
        Err(connection_refused())
    }

    async fn product_by_slug(
        &self,
        _slug: &str,
    ) -> Result<Option<ProductSummary>, StorefrontError> {
        Err(connection_refused())
    }

    async fn products_in_category(
        &self,
        _category_id: Uuid,
    ) -> Result<Vec<ProductSummary>, StorefrontError> {
        Err(connection_refused())
    }

    async fn photo(&self, _product_id: Uuid) -> Result<Option<Photo>, StorefrontError> {
        Err(connection_refused())
    }
}

#[async_trait]
impl CategoryRepository for FailingCatalog {
    async fn insert(&self, _category: Category) -> Result<(), StorefrontError> {
        Err(connection_refused())
    }

    async fn update(
        &self,
        _category_id: Uuid,
        _name: &str,
        _slug: &str,
    ) -> Result<Category, StorefrontError> {
        Err(connection_refused())
    }

    async fn delete(&self, _category_id: Uuid) -> Result<(), StorefrontError> {
        Err(connection_refused())
    }

    async fn all(&self) -> Result<Vec<Category>, StorefrontError> {
        Err(connection_refused())
    }

    async fn by_slug(&self, _slug: &str) -> Result<Option<Category>, StorefrontError> {
        Err(connection_refused())
    }

    async fn by_name(&self, _name: &str) -> Result<Option<Category>, StorefrontError> {
        Err(connection_refused())
    }
}
