//! HTTP adapter for the hosted payment provider.
//!
//! Implements the `PaymentGateway` trait over the provider's REST surface.
//! Transport failures and non-success HTTP statuses map to
//! `StorefrontError::Gateway`; a well-formed response with `success: false`
//! is a business decline and flows back as a successful call.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use storefront_core::error::StorefrontError;
use storefront_core::gateway::{PaymentGateway, SaleOutcome};

/// Credentials and endpoint for one gateway merchant account.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base URL of the provider's REST API.
    pub base_url: String,
    /// Merchant account identifier.
    pub merchant_id: String,
    /// API key sent as a bearer token.
    pub api_key: String,
}

/// Sale request body sent to the provider.
#[derive(Serialize)]
struct SaleRequest<'a> {
    merchant_id: &'a str,
    payment_method_nonce: &'a str,
    /// Amount as a decimal string, the provider's expected wire format.
    amount: String,
}

/// Token response body returned by the provider.
#[derive(Deserialize)]
struct ClientTokenResponse {
    client_token: String,
}

/// Reqwest-based payment gateway client.
pub struct HttpPaymentGateway {
    client: Client,
    config: GatewayConfig,
}

impl HttpPaymentGateway {
    /// Creates a gateway client with its own connection pool.
    #[must_use]
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Formats an amount the way the provider expects: two decimal places.
    fn wire_amount(amount: f64) -> String {
        format!("{amount:.2}")
    }
}

#[async_trait]
impl PaymentGateway for HttpPaymentGateway {
    async fn generate_client_token(&self) -> Result<String, StorefrontError> {
        let response = self
            .client
            .post(self.url("client_token"))
            .bearer_auth(&self.config.api_key)
            .json(&serde_json::json!({ "merchant_id": self.config.merchant_id }))
            .send()
            .await
            .map_err(|err| StorefrontError::Gateway(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            // Surface the provider's error payload verbatim.
            let body = response.text().await.unwrap_or_default();
            return Err(StorefrontError::Gateway(body));
        }

        let body: ClientTokenResponse = response
            .json()
            .await
            .map_err(|err| StorefrontError::Gateway(err.to_string()))?;
        debug!("client token issued");
        Ok(body.client_token)
    }

    async fn sale(&self, nonce: &str, amount: f64) -> Result<SaleOutcome, StorefrontError> {
        let request = SaleRequest {
            merchant_id: &self.config.merchant_id,
            payment_method_nonce: nonce,
            amount: Self::wire_amount(amount),
        };

        let response = self
            .client
            .post(self.url("transactions/sale"))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|err| StorefrontError::Gateway(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StorefrontError::Gateway(body));
        }

        let outcome: SaleOutcome = response
            .json()
            .await
            .map_err(|err| StorefrontError::Gateway(err.to_string()))?;
        debug!(approved = outcome.success, "sale processed");
        Ok(outcome)
    }
}
