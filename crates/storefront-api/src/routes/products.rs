//! Routes for the product catalog and checkout.

use axum::extract::{Multipart, Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use storefront_catalog::application::{command_handlers, query_handlers};
use storefront_checkout::application::command_handlers as checkout_handlers;
use storefront_core::error::StorefrontError;
use storefront_core::model::{CartItem, Category, Photo, ProductSummary};
use storefront_core::query::{PriceRange, ProductFilter};
use storefront_core::validation::ProductDraft;

use crate::auth::AuthedUser;
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /product-filters.
#[derive(Debug, Deserialize)]
pub struct FilterRequest {
    /// Selected category ids; empty means unconstrained.
    #[serde(default)]
    pub checked: Vec<Uuid>,
    /// Two-element `[min, max]` price range; any other length means no
    /// price constraint.
    #[serde(default)]
    pub radio: Vec<f64>,
    /// 1-based page, defaulting to the first.
    #[serde(default)]
    pub page: Option<u32>,
}

impl FilterRequest {
    fn into_filter(self) -> (ProductFilter, u32) {
        let price = match self.radio.as_slice() {
            [min, max] => Some(PriceRange {
                min: *min,
                max: *max,
            }),
            _ => None,
        };
        (
            ProductFilter {
                categories: self.checked,
                price,
            },
            self.page.unwrap_or(1),
        )
    }
}

/// Request body for POST /braintree/payment.
#[derive(Debug, Deserialize)]
pub struct PaymentRequest {
    /// Payment-method nonce issued by the client-side widget.
    pub nonce: String,
    /// Client-held cart snapshot.
    pub cart: Vec<CartItem>,
}

#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub success: bool,
    pub products: Vec<ProductSummary>,
}

#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub success: bool,
    pub total: i64,
}

#[derive(Debug, Serialize)]
pub struct FilterResponse {
    pub success: bool,
    pub products: Vec<ProductSummary>,
    pub total: i64,
}

#[derive(Debug, Serialize)]
pub struct SingleProductResponse {
    pub success: bool,
    pub message: String,
    pub product: ProductSummary,
}

#[derive(Debug, Serialize)]
pub struct CategoryProductsResponse {
    pub success: bool,
    pub category: Option<Category>,
    pub products: Vec<ProductSummary>,
}

/// Response for create/update; the `products` key name is part of the
/// public surface.
#[derive(Debug, Serialize)]
pub struct ProductMutationResponse {
    pub success: bool,
    pub message: String,
    pub products: ProductSummary,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    #[serde(rename = "clientToken")]
    pub client_token: String,
}

#[derive(Debug, Serialize)]
pub struct PaymentAck {
    pub ok: bool,
}

/// GET /product-list/{page}
#[instrument(skip(state))]
async fn product_list(
    State(state): State<AppState>,
    Path(page): Path<u32>,
) -> Result<Json<ProductListResponse>, ApiError> {
    let products = query_handlers::product_list(page, state.catalog.as_ref()).await?;
    Ok(Json(ProductListResponse {
        success: true,
        products,
    }))
}

/// GET /product-count
#[instrument(skip(state))]
async fn product_count(
    State(state): State<AppState>,
) -> Result<Json<CountResponse>, ApiError> {
    let total = query_handlers::product_count(state.catalog.as_ref()).await?;
    Ok(Json(CountResponse {
        success: true,
        total,
    }))
}

/// POST /product-filters
#[instrument(skip(state, request))]
async fn product_filters(
    State(state): State<AppState>,
    Json(request): Json<FilterRequest>,
) -> Result<Json<FilterResponse>, ApiError> {
    let (filter, page) = request.into_filter();
    let filtered =
        query_handlers::filter_products(&filter, page, state.catalog.as_ref()).await?;
    Ok(Json(FilterResponse {
        success: true,
        products: filtered.products,
        total: filtered.total,
    }))
}

/// GET /search/{keyword}
#[instrument(skip(state))]
async fn search(
    State(state): State<AppState>,
    Path(keyword): Path<String>,
) -> Result<Json<Vec<ProductSummary>>, ApiError> {
    let products = query_handlers::search_products(&keyword, state.catalog.as_ref()).await?;
    Ok(Json(products))
}

/// GET /related-product/{pid}/{cid}
#[instrument(skip(state))]
async fn related_products(
    State(state): State<AppState>,
    Path((product_id, category_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ProductListResponse>, ApiError> {
    let products =
        query_handlers::related_products(product_id, category_id, state.catalog.as_ref())
            .await?;
    Ok(Json(ProductListResponse {
        success: true,
        products,
    }))
}

/// GET /get-product/{slug}
#[instrument(skip(state))]
async fn get_product(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<SingleProductResponse>, ApiError> {
    let product = query_handlers::product_by_slug(&slug, state.catalog.as_ref()).await?;
    Ok(Json(SingleProductResponse {
        success: true,
        message: "Single Product Fetched".to_owned(),
        product,
    }))
}

/// GET /product-category/{slug}
#[instrument(skip(state))]
async fn product_category(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<CategoryProductsResponse>, ApiError> {
    let result = query_handlers::products_by_category(
        &slug,
        state.catalog.as_ref(),
        state.categories.as_ref(),
    )
    .await?;
    Ok(Json(CategoryProductsResponse {
        success: true,
        category: result.category,
        products: result.products,
    }))
}

/// GET /product-photo/{pid}
///
/// Serves the raw photo bytes with the stored content type. A product
/// without photo data yields an empty body and no content-type header,
/// which callers must treat differently from an error.
#[instrument(skip(state))]
async fn product_photo(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let photo = query_handlers::product_photo(product_id, state.catalog.as_ref()).await?;
    Ok(match photo {
        Some(photo) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, photo.content_type)],
            photo.data,
        )
            .into_response(),
        None => StatusCode::OK.into_response(),
    })
}

/// POST /create-product (multipart)
#[instrument(skip(state, multipart))]
async fn create_product(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ProductMutationResponse>), ApiError> {
    let draft = draft_from_multipart(multipart).await?;
    let product =
        command_handlers::create_product(draft, state.catalog.as_ref(), state.clock.as_ref())
            .await?;
    Ok((
        StatusCode::CREATED,
        Json(ProductMutationResponse {
            success: true,
            message: "Product Created Successfully".to_owned(),
            products: product,
        }),
    ))
}

/// PUT /update-product/{pid} (multipart, photo optional)
#[instrument(skip(state, multipart))]
async fn update_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ProductMutationResponse>), ApiError> {
    let draft = draft_from_multipart(multipart).await?;
    let product =
        command_handlers::update_product(product_id, draft, state.catalog.as_ref()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ProductMutationResponse {
            success: true,
            message: "Product Updated Successfully".to_owned(),
            products: product,
        }),
    ))
}

/// DELETE /delete-product/{pid}
#[instrument(skip(state))]
async fn delete_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    command_handlers::delete_product(product_id, state.catalog.as_ref()).await?;
    Ok(Json(MessageResponse {
        success: true,
        message: "Product Deleted successfully".to_owned(),
    }))
}

/// GET /braintree/token
#[instrument(skip(state))]
async fn braintree_token(
    State(state): State<AppState>,
) -> Result<Json<TokenResponse>, ApiError> {
    let client_token =
        checkout_handlers::generate_client_token(state.gateway.as_ref()).await?;
    Ok(Json(TokenResponse { client_token }))
}

/// POST /braintree/payment
#[instrument(skip(state, request), fields(buyer = %buyer.0))]
async fn braintree_payment(
    State(state): State<AppState>,
    buyer: AuthedUser,
    Json(request): Json<PaymentRequest>,
) -> Result<Json<PaymentAck>, ApiError> {
    checkout_handlers::submit_payment(
        &request.nonce,
        &request.cart,
        buyer.0,
        state.gateway.as_ref(),
        state.orders.as_ref(),
        state.clock.as_ref(),
    )
    .await?;
    Ok(Json(PaymentAck { ok: true }))
}

/// Collects multipart fields into a [`ProductDraft`]. Unparseable numeric
/// fields count as absent and fall to the corresponding "is Required"
/// validation message.
async fn draft_from_multipart(mut multipart: Multipart) -> Result<ProductDraft, ApiError> {
    let mut draft = ProductDraft::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| StorefrontError::Validation(format!("invalid multipart body: {err}")))?
    {
        let name = field.name().unwrap_or_default().to_owned();
        match name.as_str() {
            "name" => draft.name = text_of(field).await?,
            "description" => draft.description = text_of(field).await?,
            "price" => draft.price = text_of(field).await?.trim().parse().ok(),
            "quantity" => draft.quantity = text_of(field).await?.trim().parse().ok(),
            "category" => {
                draft.category = Uuid::parse_str(text_of(field).await?.trim()).ok();
            }
            "shipping" => draft.shipping = parse_flag(&text_of(field).await?),
            "photo" => {
                let content_type = field
                    .content_type()
                    .map_or_else(|| "application/octet-stream".to_owned(), str::to_owned);
                let data = field
                    .bytes()
                    .await
                    .map_err(|err| {
                        StorefrontError::Validation(format!("invalid photo upload: {err}"))
                    })?
                    .to_vec();
                if !data.is_empty() {
                    draft.photo = Some(Photo { data, content_type });
                }
            }
            _ => {
                // Drain and ignore unknown fields.
                let _ = field.bytes().await;
            }
        }
    }
    Ok(draft)
}

async fn text_of(field: axum::extract::multipart::Field<'_>) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|err| StorefrontError::Validation(format!("invalid multipart body: {err}")).into())
}

/// Accepts the usual truthy/falsy spellings of the shipping flag; anything
/// else counts as absent.
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Returns the router for the product context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/product-list/{page}", get(product_list))
        .route("/product-count", get(product_count))
        .route("/product-filters", post(product_filters))
        .route("/search/{keyword}", get(search))
        .route("/related-product/{pid}/{cid}", get(related_products))
        .route("/get-product/{slug}", get(get_product))
        .route("/product-category/{slug}", get(product_category))
        .route("/product-photo/{pid}", get(product_photo))
        .route("/create-product", post(create_product))
        .route("/update-product/{pid}", put(update_product))
        .route("/delete-product/{pid}", delete(delete_product))
        .route("/braintree/token", get(braintree_token))
        .route("/braintree/payment", post(braintree_payment))
}
