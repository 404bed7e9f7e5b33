//! Routes for order listings and status administration.
//!
//! Every route here requires a caller identity; role enforcement beyond
//! that sits with the upstream gateway.

use axum::extract::{Path, State};
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use storefront_checkout::application::{command_handlers, query_handlers};
use storefront_core::model::{Order, OrderView};

use crate::auth::AuthedUser;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub success: bool,
    pub order: Order,
}

/// GET /orders — the caller's own orders.
#[instrument(skip(state), fields(buyer = %buyer.0))]
async fn buyer_orders(
    State(state): State<AppState>,
    buyer: AuthedUser,
) -> Result<Json<Vec<OrderView>>, ApiError> {
    let orders = query_handlers::orders_for_buyer(buyer.0, state.orders.as_ref()).await?;
    Ok(Json(orders))
}

/// GET /all-orders — every order, most recent first.
#[instrument(skip(state), fields(caller = %caller.0))]
async fn all_orders(
    State(state): State<AppState>,
    caller: AuthedUser,
) -> Result<Json<Vec<OrderView>>, ApiError> {
    let orders = query_handlers::all_orders(state.orders.as_ref()).await?;
    Ok(Json(orders))
}

/// PUT /order-status/{order_id}
#[instrument(skip(state, request), fields(caller = %caller.0))]
async fn update_order_status(
    State(state): State<AppState>,
    caller: AuthedUser,
    Path(order_id): Path<Uuid>,
    Json(request): Json<StatusRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    let order =
        command_handlers::update_order_status(order_id, &request.status, state.orders.as_ref())
            .await?;
    Ok(Json(StatusResponse {
        success: true,
        order,
    }))
}

/// Returns the router for the order context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders", get(buyer_orders))
        .route("/all-orders", get(all_orders))
        .route("/order-status/{order_id}", put(update_order_status))
}
