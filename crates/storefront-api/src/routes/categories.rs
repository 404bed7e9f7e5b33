//! Routes for category management.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use storefront_catalog::application::command_handlers::{self, CategoryCreation};
use storefront_catalog::application::query_handlers;
use storefront_core::model::Category;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CategoryRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

#[derive(Debug, Serialize)]
pub struct CategoryListResponse {
    pub success: bool,
    pub message: String,
    pub category: Vec<Category>,
}

/// POST /create-category
///
/// A duplicate name is reported as a success with a message rather than a
/// conflict, so repeated submissions from the admin form stay quiet.
#[instrument(skip(state, request))]
async fn create_category(
    State(state): State<AppState>,
    Json(request): Json<CategoryRequest>,
) -> Result<(StatusCode, Json<CategoryResponse>), ApiError> {
    let creation =
        command_handlers::create_category(&request.name, state.categories.as_ref()).await?;
    Ok(match creation {
        CategoryCreation::Created(category) => (
            StatusCode::CREATED,
            Json(CategoryResponse {
                success: true,
                message: "New category created".to_owned(),
                category: Some(category),
            }),
        ),
        CategoryCreation::AlreadyExists => (
            StatusCode::OK,
            Json(CategoryResponse {
                success: true,
                message: "Category already exists".to_owned(),
                category: None,
            }),
        ),
    })
}

/// PUT /update-category/{id}
#[instrument(skip(state, request))]
async fn update_category(
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
    Json(request): Json<CategoryRequest>,
) -> Result<Json<CategoryResponse>, ApiError> {
    let category =
        command_handlers::update_category(category_id, &request.name, state.categories.as_ref())
            .await?;
    Ok(Json(CategoryResponse {
        success: true,
        message: "Category Updated Successfully".to_owned(),
        category: Some(category),
    }))
}

/// GET /get-category
#[instrument(skip(state))]
async fn all_categories(
    State(state): State<AppState>,
) -> Result<Json<CategoryListResponse>, ApiError> {
    let categories = query_handlers::all_categories(state.categories.as_ref()).await?;
    Ok(Json(CategoryListResponse {
        success: true,
        message: "All Categories Listed".to_owned(),
        category: categories,
    }))
}

/// GET /single-category/{slug}
#[instrument(skip(state))]
async fn single_category(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<CategoryResponse>, ApiError> {
    let category = query_handlers::category_by_slug(&slug, state.categories.as_ref()).await?;
    Ok(Json(CategoryResponse {
        success: true,
        message: "Get single category successfully".to_owned(),
        category: Some(category),
    }))
}

/// DELETE /delete-category/{id}
///
/// No cascade: products referencing the category keep their dangling id.
#[instrument(skip(state))]
async fn delete_category(
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
) -> Result<Json<CategoryResponse>, ApiError> {
    command_handlers::delete_category(category_id, state.categories.as_ref()).await?;
    Ok(Json(CategoryResponse {
        success: true,
        message: "Category deleted successfully".to_owned(),
        category: None,
    }))
}

/// Returns the router for the category context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create-category", post(create_category))
        .route("/update-category/{id}", put(update_category))
        .route("/get-category", get(all_categories))
        .route("/single-category/{slug}", get(single_category))
        .route("/delete-category/{id}", delete(delete_category))
}
