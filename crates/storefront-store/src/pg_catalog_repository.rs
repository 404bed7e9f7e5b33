//! PostgreSQL implementation of the catalog repository traits.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use uuid::Uuid;

use storefront_core::error::StorefrontError;
use storefront_core::model::{Category, Photo, Product, ProductSummary};
use storefront_core::query::ProductFilter;
use storefront_core::repository::{CatalogRepository, CategoryRepository};

/// Photo-free product column list shared by every listing query.
const SUMMARY_COLUMNS: &str =
    "p.id, p.name, p.slug, p.description, p.price, p.quantity, p.category_id, p.shipping, \
     p.created_at";

/// Deterministic listing order: newest first, id as tie-break.
const LISTING_ORDER: &str = "ORDER BY p.created_at DESC, p.id ASC";

/// PostgreSQL-backed catalog and category repository.
#[derive(Debug, Clone)]
pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    /// Creates a new `PgCatalogRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn infra(err: sqlx::Error) -> StorefrontError {
    StorefrontError::Infrastructure(err.to_string())
}

/// Escapes LIKE metacharacters and wraps the keyword in wildcards for a
/// case-insensitive substring match.
fn like_pattern(keyword: &str) -> String {
    let escaped = keyword
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

fn summary_from_row(row: &PgRow) -> Result<ProductSummary, sqlx::Error> {
    Ok(ProductSummary {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        slug: row.try_get("slug")?,
        description: row.try_get("description")?,
        price: row.try_get("price")?,
        quantity: row.try_get("quantity")?,
        category_id: row.try_get("category_id")?,
        category: None,
        shipping: row.try_get("shipping")?,
        created_at: row.try_get("created_at")?,
    })
}

/// Mapper for queries that join the categories table; the joined columns
/// are NULL for dangling category references.
fn populated_summary_from_row(row: &PgRow) -> Result<ProductSummary, sqlx::Error> {
    let mut summary = summary_from_row(row)?;
    let name: Option<String> = row.try_get("cat_name")?;
    let slug: Option<String> = row.try_get("cat_slug")?;
    if let (Some(name), Some(slug)) = (name, slug) {
        summary.category = Some(Category {
            id: summary.category_id,
            name,
            slug,
        });
    }
    Ok(summary)
}

fn category_from_row(row: &PgRow) -> Result<Category, sqlx::Error> {
    Ok(Category {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        slug: row.try_get("slug")?,
    })
}

#[async_trait]
impl CatalogRepository for PgCatalogRepository {
    async fn insert_product(&self, product: Product) -> Result<(), StorefrontError> {
        let (photo, content_type) = match product.photo {
            Some(photo) => (Some(photo.data), Some(photo.content_type)),
            None => (None, None),
        };
        sqlx::query(
            "INSERT INTO products \
             (id, name, slug, description, price, quantity, category_id, shipping, photo, \
              photo_content_type, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(&product.slug)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.quantity)
        .bind(product.category_id)
        .bind(product.shipping)
        .bind(photo)
        .bind(content_type)
        .bind(product.created_at)
        .execute(&self.pool)
        .await
        .map_err(infra)?;
        Ok(())
    }

    async fn update_product(&self, product: Product) -> Result<(), StorefrontError> {
        let (photo, content_type) = match product.photo {
            Some(photo) => (Some(photo.data), Some(photo.content_type)),
            None => (None, None),
        };
        let result = sqlx::query(
            "UPDATE products SET \
             name = $2, slug = $3, description = $4, price = $5, quantity = $6, \
             category_id = $7, shipping = $8, photo = $9, photo_content_type = $10 \
             WHERE id = $1",
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(&product.slug)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.quantity)
        .bind(product.category_id)
        .bind(product.shipping)
        .bind(photo)
        .bind(content_type)
        .execute(&self.pool)
        .await
        .map_err(infra)?;
        if result.rows_affected() == 0 {
            return Err(StorefrontError::NotFound(format!(
                "product {}",
                product.id
            )));
        }
        Ok(())
    }

    async fn delete_product(&self, product_id: Uuid) -> Result<(), StorefrontError> {
        sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(product_id)
            .execute(&self.pool)
            .await
            .map_err(infra)?;
        Ok(())
    }

    async fn product_by_id(&self, product_id: Uuid) -> Result<Option<Product>, StorefrontError> {
        let row = sqlx::query(
            "SELECT id, name, slug, description, price, quantity, category_id, shipping, \
             photo, photo_content_type, created_at \
             FROM products WHERE id = $1",
        )
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(infra)?;

        row.map(|row| -> Result<Product, sqlx::Error> {
            let data: Option<Vec<u8>> = row.try_get("photo")?;
            let content_type: Option<String> = row.try_get("photo_content_type")?;
            let photo = match (data, content_type) {
                (Some(data), Some(content_type)) => Some(Photo { data, content_type }),
                _ => None,
            };
            Ok(Product {
                id: row.try_get("id")?,
                name: row.try_get("name")?,
                slug: row.try_get("slug")?,
                description: row.try_get("description")?,
                price: row.try_get("price")?,
                quantity: row.try_get("quantity")?,
                category_id: row.try_get("category_id")?,
                shipping: row.try_get("shipping")?,
                photo,
                created_at: row.try_get("created_at")?,
            })
        })
        .transpose()
        .map_err(infra)
    }

    async fn page(&self, skip: i64, limit: i64) -> Result<Vec<ProductSummary>, StorefrontError> {
        let rows = sqlx::query(&format!(
            "SELECT {SUMMARY_COLUMNS} FROM products p {LISTING_ORDER} OFFSET $1 LIMIT $2"
        ))
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(infra)?;
        rows.iter().map(summary_from_row).collect::<Result<_, _>>().map_err(infra)
    }

    async fn count(&self) -> Result<i64, StorefrontError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await
            .map_err(infra)
    }

    async fn filter_page(
        &self,
        filter: &ProductFilter,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<ProductSummary>, StorefrontError> {
        let mut query = QueryBuilder::<Postgres>::new(format!(
            "SELECT {SUMMARY_COLUMNS} FROM products p WHERE TRUE"
        ));
        push_filter(&mut query, filter);
        query.push(format!(" {LISTING_ORDER} OFFSET "));
        query.push_bind(skip);
        query.push(" LIMIT ");
        query.push_bind(limit);

        let rows = query.build().fetch_all(&self.pool).await.map_err(infra)?;
        rows.iter().map(summary_from_row).collect::<Result<_, _>>().map_err(infra)
    }

    async fn filter_count(&self, filter: &ProductFilter) -> Result<i64, StorefrontError> {
        let mut query =
            QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM products p WHERE TRUE");
        push_filter(&mut query, filter);
        query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(infra)
    }

    async fn search(&self, keyword: &str) -> Result<Vec<ProductSummary>, StorefrontError> {
        let pattern = like_pattern(keyword);
        let rows = sqlx::query(&format!(
            "SELECT {SUMMARY_COLUMNS} FROM products p \
             WHERE p.name ILIKE $1 OR p.description ILIKE $1 {LISTING_ORDER}"
        ))
        .bind(pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(infra)?;
        rows.iter().map(summary_from_row).collect::<Result<_, _>>().map_err(infra)
    }

    async fn related(
        &self,
        product_id: Uuid,
        category_id: Uuid,
        limit: i64,
    ) -> Result<Vec<ProductSummary>, StorefrontError> {
        let rows = sqlx::query(&format!(
            "SELECT {SUMMARY_COLUMNS}, c.name AS cat_name, c.slug AS cat_slug \
             FROM products p LEFT JOIN categories c ON c.id = p.category_id \
             WHERE p.category_id = $1 AND p.id <> $2 {LISTING_ORDER} LIMIT $3"
        ))
        .bind(category_id)
        .bind(product_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(infra)?;
        rows.iter()
            .map(populated_summary_from_row)
            .collect::<Result<_, _>>()
            .map_err(infra)
    }

    async fn product_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<ProductSummary>, StorefrontError> {
        let row = sqlx::query(&format!(
            "SELECT {SUMMARY_COLUMNS}, c.name AS cat_name, c.slug AS cat_slug \
             FROM products p LEFT JOIN categories c ON c.id = p.category_id \
             WHERE p.slug = $1"
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(infra)?;
        row.as_ref()
            .map(populated_summary_from_row)
            .transpose()
            .map_err(infra)
    }

    async fn products_in_category(
        &self,
        category_id: Uuid,
    ) -> Result<Vec<ProductSummary>, StorefrontError> {
        let rows = sqlx::query(&format!(
            "SELECT {SUMMARY_COLUMNS}, c.name AS cat_name, c.slug AS cat_slug \
             FROM products p LEFT JOIN categories c ON c.id = p.category_id \
             WHERE p.category_id = $1 {LISTING_ORDER}"
        ))
        .bind(category_id)
        .fetch_all(&self.pool)
        .await
        .map_err(infra)?;
        rows.iter()
            .map(populated_summary_from_row)
            .collect::<Result<_, _>>()
            .map_err(infra)
    }

    async fn photo(&self, product_id: Uuid) -> Result<Option<Photo>, StorefrontError> {
        let row = sqlx::query(
            "SELECT photo, photo_content_type FROM products WHERE id = $1",
        )
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(infra)?;

        let Some(row) = row else {
            return Ok(None);
        };
        let data: Option<Vec<u8>> = row.try_get("photo").map_err(infra)?;
        let content_type: Option<String> =
            row.try_get("photo_content_type").map_err(infra)?;
        Ok(match (data, content_type) {
            (Some(data), Some(content_type)) => Some(Photo { data, content_type }),
            _ => None,
        })
    }
}

/// Appends the category/price predicate to a query ending in `WHERE TRUE`.
/// An unconstrained filter appends nothing, leaving a match-all query.
fn push_filter(query: &mut QueryBuilder<'_, Postgres>, filter: &ProductFilter) {
    if !filter.categories.is_empty() {
        query.push(" AND p.category_id = ANY(");
        query.push_bind(filter.categories.clone());
        query.push(")");
    }
    if let Some(range) = filter.price {
        query.push(" AND p.price BETWEEN ");
        query.push_bind(range.min);
        query.push(" AND ");
        query.push_bind(range.max);
    }
}

#[async_trait]
impl CategoryRepository for PgCatalogRepository {
    async fn insert(&self, category: Category) -> Result<(), StorefrontError> {
        sqlx::query("INSERT INTO categories (id, name, slug) VALUES ($1, $2, $3)")
            .bind(category.id)
            .bind(&category.name)
            .bind(&category.slug)
            .execute(&self.pool)
            .await
            .map_err(infra)?;
        Ok(())
    }

    async fn update(
        &self,
        category_id: Uuid,
        name: &str,
        slug: &str,
    ) -> Result<Category, StorefrontError> {
        let row = sqlx::query(
            "UPDATE categories SET name = $2, slug = $3 WHERE id = $1 \
             RETURNING id, name, slug",
        )
        .bind(category_id)
        .bind(name)
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(infra)?;
        match row {
            Some(row) => category_from_row(&row).map_err(infra),
            None => Err(StorefrontError::NotFound(format!(
                "category {category_id}"
            ))),
        }
    }

    async fn delete(&self, category_id: Uuid) -> Result<(), StorefrontError> {
        sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(category_id)
            .execute(&self.pool)
            .await
            .map_err(infra)?;
        Ok(())
    }

    async fn all(&self) -> Result<Vec<Category>, StorefrontError> {
        let rows = sqlx::query("SELECT id, name, slug FROM categories ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(infra)?;
        rows.iter().map(category_from_row).collect::<Result<_, _>>().map_err(infra)
    }

    async fn by_slug(&self, slug: &str) -> Result<Option<Category>, StorefrontError> {
        let row = sqlx::query("SELECT id, name, slug FROM categories WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(infra)?;
        row.as_ref().map(category_from_row).transpose().map_err(infra)
    }

    async fn by_name(&self, name: &str) -> Result<Option<Category>, StorefrontError> {
        let row = sqlx::query("SELECT id, name, slug FROM categories WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(infra)?;
        row.as_ref().map(category_from_row).transpose().map_err(infra)
    }
}
