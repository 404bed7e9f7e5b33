//! PostgreSQL implementations of the storefront repository traits.

pub mod pg_catalog_repository;
pub mod pg_order_repository;
pub mod schema;

pub use pg_catalog_repository::PgCatalogRepository;
pub use pg_order_repository::PgOrderRepository;
