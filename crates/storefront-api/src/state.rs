//! Shared application state.
//!
//! Store repositories, the payment gateway, and the clock are constructed
//! once at startup and injected here, so tests can swap in fakes.

use std::sync::Arc;

use storefront_core::clock::Clock;
use storefront_core::gateway::PaymentGateway;
use storefront_core::repository::{CatalogRepository, CategoryRepository, OrderRepository};

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Product store.
    pub catalog: Arc<dyn CatalogRepository>,
    /// Category store.
    pub categories: Arc<dyn CategoryRepository>,
    /// Order store.
    pub orders: Arc<dyn OrderRepository>,
    /// Hosted payment provider adapter.
    pub gateway: Arc<dyn PaymentGateway>,
    /// Time source for created-at stamping.
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        catalog: Arc<dyn CatalogRepository>,
        categories: Arc<dyn CategoryRepository>,
        orders: Arc<dyn OrderRepository>,
        gateway: Arc<dyn PaymentGateway>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            catalog,
            categories,
            orders,
            gateway,
            clock,
        }
    }
}
