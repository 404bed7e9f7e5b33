//! Query handlers for the checkout context: order listings.

use uuid::Uuid;

use storefront_core::error::StorefrontError;
use storefront_core::model::OrderView;
use storefront_core::repository::OrderRepository;

/// Orders placed by one buyer, product summaries (no photo bytes) and buyer
/// name populated.
///
/// # Errors
///
/// Returns `StorefrontError::Infrastructure` when the store query fails.
pub async fn orders_for_buyer(
    buyer: Uuid,
    orders: &dyn OrderRepository,
) -> Result<Vec<OrderView>, StorefrontError> {
    orders.for_buyer(buyer).await
}

/// Every order across all buyers, most recently created first.
///
/// # Errors
///
/// Returns `StorefrontError::Infrastructure` when the store query fails.
pub async fn all_orders(orders: &dyn OrderRepository) -> Result<Vec<OrderView>, StorefrontError> {
    orders.all().await
}
