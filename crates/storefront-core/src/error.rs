//! Domain error types.

use thiserror::Error;

/// Top-level error type shared by the catalog and checkout contexts.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// A create/update request failed field validation. The message is the
    /// first violated rule; no data-layer call was attempted.
    #[error("{0}")]
    Validation(String),

    /// An entity lookup that is a hard error (unknown product slug, unknown
    /// order id). Absent categories and absent photo bytes are *not* errors;
    /// they surface as empty values.
    #[error("not found: {0}")]
    NotFound(String),

    /// The payment gateway processed the sale and declined it. Carries the
    /// gateway's decline message verbatim.
    #[error("{0}")]
    PaymentDeclined(String),

    /// The payment gateway call itself failed (transport error, non-success
    /// HTTP status, malformed response).
    #[error("payment gateway error: {0}")]
    Gateway(String),

    /// A store/persistence failure.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
