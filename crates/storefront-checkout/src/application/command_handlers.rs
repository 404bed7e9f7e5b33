//! Command handlers for the checkout workflow.
//!
//! One checkout attempt moves token → sale → approved/declined; an approved
//! sale persists exactly one order. Declines and adapter failures are
//! terminal for the attempt — there is no automatic retry, and the only
//! rollback rule is "no gateway confirmation, no order row".

use tracing::{info, warn};
use uuid::Uuid;

use storefront_core::clock::Clock;
use storefront_core::error::StorefrontError;
use storefront_core::gateway::PaymentGateway;
use storefront_core::model::{CartItem, Order, OrderStatus};
use storefront_core::repository::OrderRepository;

/// Issues a client-side token for the payment widget.
///
/// # Errors
///
/// Returns `StorefrontError::Gateway` carrying the provider's error payload
/// when token generation fails.
pub async fn generate_client_token(
    gateway: &dyn PaymentGateway,
) -> Result<String, StorefrontError> {
    gateway.generate_client_token().await
}

/// Sum of cart prices, rejected when the result is not a finite number
/// (overflowing or otherwise corrupt inputs must be reported, not crash
/// the request).
fn cart_total(cart: &[CartItem]) -> Result<f64, StorefrontError> {
    let total: f64 = cart.iter().map(|item| item.price).sum();
    if total.is_finite() {
        Ok(total)
    } else {
        Err(StorefrontError::Validation(
            "Cart total is not a valid amount".into(),
        ))
    }
}

/// Submits the cart total as one sale and persists the order on approval.
///
/// The persisted order references the cart's product ids, the buyer, and
/// the gateway's full transaction record, with the initial status.
///
/// # Errors
///
/// - `StorefrontError::Validation` for a non-finite cart total.
/// - `StorefrontError::PaymentDeclined` with the gateway's message when the
///   sale is declined; nothing is persisted.
/// - `StorefrontError::Gateway` when the adapter call itself fails; nothing
///   is persisted.
/// - `StorefrontError::Infrastructure` when the order write fails.
pub async fn submit_payment(
    nonce: &str,
    cart: &[CartItem],
    buyer: Uuid,
    gateway: &dyn PaymentGateway,
    orders: &dyn OrderRepository,
    clock: &dyn Clock,
) -> Result<(), StorefrontError> {
    let total = cart_total(cart)?;

    let outcome = gateway.sale(nonce, total).await.map_err(|err| {
        warn!(error = %err, "payment gateway call failed");
        err
    })?;

    if !outcome.success {
        let message = outcome
            .message
            .unwrap_or_else(|| "Payment declined".to_owned());
        info!(%buyer, total, %message, "payment declined");
        return Err(StorefrontError::PaymentDeclined(message));
    }

    let order = Order {
        id: Uuid::new_v4(),
        product_ids: cart.iter().map(|item| item.product_id).collect(),
        buyer,
        payment: outcome.transaction,
        status: OrderStatus::default().as_str().to_owned(),
        created_at: clock.now(),
    };
    let order_id = order.id;
    orders.insert(order).await?;
    info!(%order_id, %buyer, total, "order persisted");
    Ok(())
}

/// Overwrites an order's status string and returns the updated order.
///
/// No whitelist of target values is enforced at this layer; concurrent
/// updates are last-write-wins.
///
/// # Errors
///
/// Returns `StorefrontError::NotFound` for an unknown order id, or
/// `StorefrontError::Infrastructure` when the write fails.
pub async fn update_order_status(
    order_id: Uuid,
    status: &str,
    orders: &dyn OrderRepository,
) -> Result<Order, StorefrontError> {
    let order = orders.update_status(order_id, status).await?;
    info!(%order_id, status, "order status updated");
    Ok(order)
}
