//! Storefront database schema.

use sqlx::PgPool;

/// SQL to create the categories table.
pub const CREATE_CATEGORIES_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS categories (
    id   UUID PRIMARY KEY,
    name TEXT NOT NULL,
    slug TEXT NOT NULL UNIQUE
);
";

/// SQL to create the products table. The photo payload lives inline as
/// BYTEA and is selected only by the dedicated photo query.
/// `category_id` is deliberately not a foreign key: category deletion does
/// not cascade and may leave dangling references.
pub const CREATE_PRODUCTS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS products (
    id                 UUID PRIMARY KEY,
    name               TEXT NOT NULL,
    slug               TEXT NOT NULL UNIQUE,
    description        TEXT NOT NULL,
    price              DOUBLE PRECISION NOT NULL,
    quantity           INTEGER NOT NULL,
    category_id        UUID NOT NULL,
    shipping           BOOLEAN NOT NULL,
    photo              BYTEA,
    photo_content_type TEXT,
    created_at         TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX IF NOT EXISTS idx_products_category_id
    ON products (category_id);

CREATE INDEX IF NOT EXISTS idx_products_created_at
    ON products (created_at DESC);
";

/// SQL to create the users table. User lifecycle is owned by the upstream
/// identity service; this table only backs buyer-name resolution on order
/// listings.
pub const CREATE_USERS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS users (
    id   UUID PRIMARY KEY,
    name TEXT NOT NULL
);
";

/// SQL to create the orders table.
pub const CREATE_ORDERS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS orders (
    id          UUID PRIMARY KEY,
    product_ids UUID[] NOT NULL,
    buyer_id    UUID NOT NULL,
    payment     JSONB NOT NULL,
    status      TEXT NOT NULL,
    created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX IF NOT EXISTS idx_orders_buyer_id
    ON orders (buyer_id);

CREATE INDEX IF NOT EXISTS idx_orders_created_at
    ON orders (created_at DESC);
";

/// Applies the storefront schema, creating any missing tables and indexes.
///
/// # Errors
///
/// Returns the underlying `sqlx::Error` when a statement fails.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    for statements in [
        CREATE_CATEGORIES_TABLE,
        CREATE_PRODUCTS_TABLE,
        CREATE_USERS_TABLE,
        CREATE_ORDERS_TABLE,
    ] {
        sqlx::raw_sql(statements).execute(pool).await?;
    }
    tracing::info!("storefront schema ensured");
    Ok(())
}
