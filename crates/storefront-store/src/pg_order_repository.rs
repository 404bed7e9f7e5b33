//! PostgreSQL implementation of the order repository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use storefront_core::error::StorefrontError;
use storefront_core::model::{Order, OrderView, ProductSummary};
use storefront_core::repository::OrderRepository;

/// PostgreSQL-backed order repository.
#[derive(Debug, Clone)]
pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    /// Creates a new `PgOrderRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Loads photo-free summaries for an order's product ids.
    async fn products_of(
        &self,
        product_ids: &[Uuid],
    ) -> Result<Vec<ProductSummary>, StorefrontError> {
        let rows = sqlx::query(
            "SELECT id, name, slug, description, price, quantity, category_id, shipping, \
             created_at FROM products WHERE id = ANY($1)",
        )
        .bind(product_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(infra)?;
        rows.iter()
            .map(|row| {
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
            })
            .collect::<Result<_, sqlx::Error>>()
            .map_err(infra)
    }

    /// Resolves rows from the order + buyer-name join into views. Product
    /// summaries are fetched per order, sequentially.
    async fn views_of(&self, rows: Vec<PgRow>) -> Result<Vec<OrderView>, StorefrontError> {
        let mut views = Vec::with_capacity(rows.len());
        for row in rows {
            let order = order_from_row(&row).map_err(infra)?;
            let buyer_name: Option<String> = row.try_get("buyer_name").map_err(infra)?;
            let products = self.products_of(&order.product_ids).await?;
            views.push(OrderView {
                id: order.id,
                products,
                buyer: order.buyer,
                buyer_name,
                payment: order.payment,
                status: order.status,
                created_at: order.created_at,
            });
        }
        Ok(views)
    }
}

fn infra(err: sqlx::Error) -> StorefrontError {
    StorefrontError::Infrastructure(err.to_string())
}

fn order_from_row(row: &PgRow) -> Result<Order, sqlx::Error> {
    Ok(Order {
        id: row.try_get("id")?,
        product_ids: row.try_get("product_ids")?,
        buyer: row.try_get("buyer_id")?,
        payment: row.try_get("payment")?,
        status: row.try_get("status")?,
        created_at: row.try_get("created_at")?,
    })
}

const ORDER_VIEW_QUERY: &str =
    "SELECT o.id, o.product_ids, o.buyer_id, o.payment, o.status, o.created_at, \
     u.name AS buyer_name \
     FROM orders o LEFT JOIN users u ON u.id = o.buyer_id";

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn insert(&self, order: Order) -> Result<(), StorefrontError> {
        sqlx::query(
            "INSERT INTO orders (id, product_ids, buyer_id, payment, status, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(order.id)
        .bind(&order.product_ids)
        .bind(order.buyer)
        .bind(&order.payment)
        .bind(&order.status)
        .bind(order.created_at)
        .execute(&self.pool)
        .await
        .map_err(infra)?;
        Ok(())
    }

    async fn update_status(&self, order_id: Uuid, status: &str) -> Result<Order, StorefrontError> {
        let row = sqlx::query(
            "UPDATE orders SET status = $2 WHERE id = $1 \
             RETURNING id, product_ids, buyer_id, payment, status, created_at",
        )
        .bind(order_id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
        .map_err(infra)?;
        match row {
            Some(row) => order_from_row(&row).map_err(infra),
            None => Err(StorefrontError::NotFound(format!("order {order_id}"))),
        }
    }

    async fn for_buyer(&self, buyer: Uuid) -> Result<Vec<OrderView>, StorefrontError> {
        let rows = sqlx::query(&format!("{ORDER_VIEW_QUERY} WHERE o.buyer_id = $1"))
            .bind(buyer)
            .fetch_all(&self.pool)
            .await
            .map_err(infra)?;
        self.views_of(rows).await
    }

    async fn all(&self) -> Result<Vec<OrderView>, StorefrontError> {
        let rows = sqlx::query(&format!("{ORDER_VIEW_QUERY} ORDER BY o.created_at DESC"))
            .fetch_all(&self.pool)
            .await
            .map_err(infra)?;
        self.views_of(rows).await
    }
}
