//! Stub payment gateways covering the approved, declined, and erroring
//! adapter paths.

use std::sync::Mutex;

use async_trait::async_trait;
use storefront_core::error::StorefrontError;
use storefront_core::gateway::{PaymentGateway, SaleOutcome};

/// A gateway that approves every sale and records each submission.
#[derive(Debug)]
pub struct ApprovingGateway {
    transaction_id: String,
    sales: Mutex<Vec<(String, f64)>>,
}

impl ApprovingGateway {
    /// Creates a gateway whose approved transactions carry `transaction_id`.
    #[must_use]
    pub fn new(transaction_id: &str) -> Self {
        Self {
            transaction_id: transaction_id.to_owned(),
            sales: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of every `(nonce, amount)` sale submitted.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn sales(&self) -> Vec<(String, f64)> {
        self.sales.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaymentGateway for ApprovingGateway {
    async fn generate_client_token(&self) -> Result<String, StorefrontError> {
        Ok("fake-client-token".to_owned())
    }

    async fn sale(&self, nonce: &str, amount: f64) -> Result<SaleOutcome, StorefrontError> {
        self.sales.lock().unwrap().push((nonce.to_owned(), amount));
        Ok(SaleOutcome {
            success: true,
            transaction: serde_json::json!({
                "id": self.transaction_id,
                "amount": amount,
                "status": "submitted_for_settlement",
            }),
            message: None,
        })
    }
}

/// A gateway that declines every sale with a fixed business message.
/// Token generation still succeeds.
#[derive(Debug)]
pub struct DecliningGateway {
    message: String,
}

impl DecliningGateway {
    #[must_use]
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_owned(),
        }
    }
}

#[async_trait]
impl PaymentGateway for DecliningGateway {
    async fn generate_client_token(&self) -> Result<String, StorefrontError> {
        Ok("fake-client-token".to_owned())
    }

    async fn sale(&self, _nonce: &str, _amount: f64) -> Result<SaleOutcome, StorefrontError> {
        Ok(SaleOutcome {
            success: false,
            transaction: serde_json::Value::Null,
            message: Some(self.message.clone()),
        })
    }
}

/// A gateway whose every call fails at the transport layer.
#[derive(Debug, Default)]
pub struct FailingGateway;

#[async_trait]
impl PaymentGateway for FailingGateway {
    async fn generate_client_token(&self) -> Result<String, StorefrontError> {
        Err(StorefrontError::Gateway("connection timed out".into()))
    }

    async fn sale(&self, _nonce: &str, _amount: f64) -> Result<SaleOutcome, StorefrontError> {
        Err(StorefrontError::Gateway("connection timed out".into()))
    }
}
