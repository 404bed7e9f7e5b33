//! Storefront API server entry point.

use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use storefront_api::state::AppState;
use storefront_core::clock::SystemClock;
use storefront_gateway::{GatewayConfig, HttpPaymentGateway};
use storefront_store::pg_catalog_repository::PgCatalogRepository;
use storefront_store::pg_order_repository::PgOrderRepository;
use storefront_store::schema::ensure_schema;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting storefront API server");

    // Read configuration from environment.
    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| "DATABASE_URL environment variable must be set")?;
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()
        .map_err(|e| format!("PORT must be a valid u16: {e}"))?;
    let gateway_config = GatewayConfig {
        base_url: std::env::var("GATEWAY_URL")
            .map_err(|_| "GATEWAY_URL environment variable must be set")?,
        merchant_id: std::env::var("GATEWAY_MERCHANT_ID")
            .map_err(|_| "GATEWAY_MERCHANT_ID environment variable must be set")?,
        api_key: std::env::var("GATEWAY_API_KEY")
            .map_err(|_| "GATEWAY_API_KEY environment variable must be set")?,
    };

    // Create database connection pool.
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await?;
    ensure_schema(&pool).await?;

    // Build application state.
    let catalog = Arc::new(PgCatalogRepository::new(pool.clone()));
    let app_state = AppState::new(
        catalog.clone(),
        catalog,
        Arc::new(PgOrderRepository::new(pool)),
        Arc::new(HttpPaymentGateway::new(gateway_config)),
        Arc::new(SystemClock),
    );

    let app = storefront_api::app(app_state);

    // Start server.
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .map_err(|e| format!("invalid HOST:PORT combination: {e}"))?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
