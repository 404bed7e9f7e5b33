//! Buyer identity extraction.
//!
//! Token verification happens upstream; verified requests arrive with an
//! `x-user-id` header carrying the buyer's id. Routes that need a buyer
//! take an [`AuthedUser`] and reject requests without the header.

use axum::Json;
use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use crate::error::ErrorBody;

/// Header set by the upstream auth layer.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated buyer of the current request.
#[derive(Debug, Clone, Copy)]
pub struct AuthedUser(pub Uuid);

/// 401 rejection for requests without a usable identity header.
#[derive(Debug)]
pub struct Unauthorized;

impl IntoResponse for Unauthorized {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            success: false,
            message: "Unauthorized".to_owned(),
        };
        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}

impl<S> FromRequestParts<S> for AuthedUser
where
    S: Send + Sync,
{
    type Rejection = Unauthorized;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| Uuid::parse_str(value).ok())
            .map(AuthedUser)
            .ok_or(Unauthorized)
    }
}
