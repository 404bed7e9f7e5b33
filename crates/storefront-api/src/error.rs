//! API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use storefront_core::error::StorefrontError;

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Always false for errors.
    pub success: bool,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer wrapper around `StorefrontError` that implements
/// `IntoResponse`. Every route handler is a single error boundary: the
/// domain error is logged here and mapped to a status + `{ success,
/// message }` body; nothing bubbles past the controller.
#[derive(Debug)]
pub struct ApiError(pub StorefrontError);

impl From<StorefrontError> for ApiError {
    fn from(err: StorefrontError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            StorefrontError::Validation(_) | StorefrontError::PaymentDeclined(_) => {
                StatusCode::BAD_REQUEST
            }
            StorefrontError::NotFound(_) => StatusCode::NOT_FOUND,
            StorefrontError::Gateway(_) | StorefrontError::Infrastructure(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }

        let body = ErrorBody {
            success: false,
            message: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
