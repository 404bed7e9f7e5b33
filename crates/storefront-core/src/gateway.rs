//! Payment gateway abstraction.
//!
//! The hosted provider is reached through this trait so the checkout
//! workflow can be exercised against stub gateways in tests.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::StorefrontError;

/// Outcome of a sale submission that the gateway actually processed.
///
/// `success: false` is a business decline (insufficient funds, fraud
/// rejection), not a transport failure; transport failures surface as
/// `StorefrontError::Gateway` from the adapter instead.
#[derive(Debug, Clone, Deserialize)]
pub struct SaleOutcome {
    /// Whether the transaction was approved.
    pub success: bool,
    /// The provider's full transaction record, persisted verbatim on the
    /// order when approved.
    #[serde(default)]
    pub transaction: serde_json::Value,
    /// Decline message, present when `success` is false.
    #[serde(default)]
    pub message: Option<String>,
}

/// Client-facing token and sale operations of the hosted payment provider.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Issues a client-side token for the payment widget.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Gateway` carrying the provider's error
    /// payload when token generation fails.
    async fn generate_client_token(&self) -> Result<String, StorefrontError>;

    /// Submits a sale for `amount` against a payment-method `nonce`.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Gateway` only for transport/protocol
    /// failures; declines come back as `Ok` with `success: false`.
    async fn sale(&self, nonce: &str, amount: f64) -> Result<SaleOutcome, StorefrontError>;
}
