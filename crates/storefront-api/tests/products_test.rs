//! Integration tests for the product catalog endpoints.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use chrono::{Duration, TimeZone, Utc};
use uuid::Uuid;

use storefront_core::model::{Category, Photo, Product};
use storefront_test_support::InMemoryCatalog;

fn electronics() -> Category {
    Category {
        id: Uuid::new_v4(),
        name: "Electronics".into(),
        slug: "electronics".into(),
    }
}

/// Builds a product created `minutes_ago` before the shared fixed instant,
/// so listing order is deterministic.
fn product(name: &str, price: f64, category_id: Uuid, minutes_ago: i64) -> Product {
    let base = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();
    Product {
        id: Uuid::new_v4(),
        name: name.to_owned(),
        slug: name.to_lowercase().replace(' ', "-"),
        description: format!("{name} description"),
        price,
        quantity: 10,
        category_id,
        shipping: true,
        photo: Some(Photo {
            data: vec![0xFF, 0xD8, 0xFF],
            content_type: "image/jpeg".into(),
        }),
        created_at: base - Duration::minutes(minutes_ago),
    }
}

#[tokio::test]
async fn test_product_list_pages_hold_six_newest_first() {
    let catalog = Arc::new(InMemoryCatalog::new());
    let category = electronics();
    for i in 0..8 {
        catalog.seed_product(product(&format!("Product {i}"), 100.0, category.id, i));
    }

    let (status, json) =
        common::get_json(common::build_test_app(catalog.clone()), "/product/product-list/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    let products = json["products"].as_array().unwrap();
    assert_eq!(products.len(), 6);
    // Newest first: Product 0 has the latest created_at.
    assert_eq!(products[0]["name"], "Product 0");
    assert_eq!(products[5]["name"], "Product 5");

    let (status, json) =
        common::get_json(common::build_test_app(catalog), "/product/product-list/2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["products"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_product_list_never_carries_photo_payloads() {
    let catalog = Arc::new(InMemoryCatalog::new());
    catalog.seed_product(product("Laptop", 1500.0, Uuid::new_v4(), 0));

    let (_, json) =
        common::get_json(common::build_test_app(catalog), "/product/product-list/1").await;

    let listed = &json["products"][0];
    assert!(listed.get("photo").is_none());
    assert_eq!(listed["name"], "Laptop");
}

#[tokio::test]
async fn test_product_count_reflects_total() {
    let catalog = Arc::new(InMemoryCatalog::new());
    for i in 0..8 {
        catalog.seed_product(product(&format!("Product {i}"), 50.0, Uuid::new_v4(), i));
    }

    let (status, json) =
        common::get_json(common::build_test_app(catalog), "/product/product-count").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 8);
}

#[tokio::test]
async fn test_product_filters_combine_category_and_price() {
    let catalog = Arc::new(InMemoryCatalog::new());
    let phones = electronics();
    let books = Category {
        id: Uuid::new_v4(),
        name: "Books".into(),
        slug: "books".into(),
    };
    catalog.seed_product(product("Cheap Phone", 80.0, phones.id, 0));
    catalog.seed_product(product("Expensive Phone", 900.0, phones.id, 1));
    catalog.seed_product(product("Novel", 80.0, books.id, 2));

    let body = serde_json::json!({
        "checked": [phones.id],
        "radio": [0.0, 100.0]
    });
    let (status, json) = common::post_json(
        common::build_test_app(catalog),
        "/product/product-filters",
        &body,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let products = json["products"].as_array().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["name"], "Cheap Phone");
    assert_eq!(json["total"], 1);
}

#[tokio::test]
async fn test_product_filters_price_bounds_are_inclusive() {
    let catalog = Arc::new(InMemoryCatalog::new());
    catalog.seed_product(product("At Min", 20.0, Uuid::new_v4(), 0));
    catalog.seed_product(product("At Max", 39.99, Uuid::new_v4(), 1));
    catalog.seed_product(product("Above", 40.0, Uuid::new_v4(), 2));

    let body = serde_json::json!({ "checked": [], "radio": [20.0, 39.99] });
    let (_, json) = common::post_json(
        common::build_test_app(catalog),
        "/product/product-filters",
        &body,
    )
    .await;

    assert_eq!(json["total"], 2);
}

#[tokio::test]
async fn test_product_filters_empty_filter_returns_first_page_of_everything() {
    let catalog = Arc::new(InMemoryCatalog::new());
    for i in 0..8 {
        catalog.seed_product(product(&format!("Product {i}"), 10.0, Uuid::new_v4(), i));
    }

    let body = serde_json::json!({ "checked": [], "radio": [] });
    let (_, json) = common::post_json(
        common::build_test_app(catalog),
        "/product/product-filters",
        &body,
    )
    .await;

    assert_eq!(json["products"].as_array().unwrap().len(), 6);
    assert_eq!(json["total"], 8);
}

#[tokio::test]
async fn test_search_matches_name_or_description_case_insensitively() {
    let catalog = Arc::new(InMemoryCatalog::new());
    let category = Uuid::new_v4();
    catalog.seed_product(product("iPhone 15", 999.0, category, 0));
    let mut textbook = product("Textbook", 30.0, category, 1);
    textbook.description = "A PHONE-shaped bookmark included".into();
    catalog.seed_product(textbook);
    catalog.seed_product(product("Chair", 45.0, category, 2));

    let (status, json) =
        common::get_json(common::build_test_app(catalog), "/product/search/phone").await;

    assert_eq!(status, StatusCode::OK);
    let results = json.as_array().unwrap();
    assert_eq!(results.len(), 2);
}

#[tokio::test]
async fn test_related_products_capped_at_three_excluding_self() {
    let catalog = Arc::new(InMemoryCatalog::new());
    let category = electronics();
    catalog.seed_category(category.clone());
    let current = product("Current", 10.0, category.id, 0);
    let current_id = current.id;
    catalog.seed_product(current);
    for i in 1..=5 {
        catalog.seed_product(product(&format!("Sibling {i}"), 10.0, category.id, i));
    }

    let (status, json) = common::get_json(
        common::build_test_app(catalog),
        &format!("/product/related-product/{current_id}/{}", category.id),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let related = json["products"].as_array().unwrap();
    assert_eq!(related.len(), 3);
    for item in related {
        assert_ne!(item["id"], current_id.to_string());
        assert_eq!(item["category"]["name"], "Electronics");
    }
}

#[tokio::test]
async fn test_get_product_by_slug_populates_category() {
    let catalog = Arc::new(InMemoryCatalog::new());
    let category = electronics();
    catalog.seed_category(category.clone());
    catalog.seed_product(product("Gaming Mouse", 60.0, category.id, 0));

    let (status, json) = common::get_json(
        common::build_test_app(catalog),
        "/product/get-product/gaming-mouse",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Single Product Fetched");
    assert_eq!(json["product"]["slug"], "gaming-mouse");
    assert_eq!(json["product"]["category"]["slug"], "electronics");
}

#[tokio::test]
async fn test_get_product_unknown_slug_is_404() {
    let catalog = Arc::new(InMemoryCatalog::new());

    let (status, json) =
        common::get_json(common::build_test_app(catalog), "/product/get-product/ghost").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn test_product_category_unknown_slug_is_empty_not_error() {
    let catalog = Arc::new(InMemoryCatalog::new());

    let (status, json) = common::get_json(
        common::build_test_app(catalog),
        "/product/product-category/ghost",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert!(json["category"].is_null());
    assert_eq!(json["products"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_product_photo_serves_raw_bytes_with_content_type() {
    let catalog = Arc::new(InMemoryCatalog::new());
    let item = product("Poster", 12.0, Uuid::new_v4(), 0);
    let item_id = item.id;
    catalog.seed_product(item);

    let request = axum::http::Request::builder()
        .uri(format!("/product/product-photo/{item_id}"))
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(common::build_test_app(catalog), request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "image/jpeg"
    );
    let bytes = http_body_util::BodyExt::collect(response.into_body())
        .await
        .unwrap()
        .to_bytes();
    assert_eq!(bytes.as_ref(), &[0xFF, 0xD8, 0xFF]);
}

#[tokio::test]
async fn test_product_photo_absent_is_empty_200() {
    let catalog = Arc::new(InMemoryCatalog::new());
    let mut item = product("Bare", 12.0, Uuid::new_v4(), 0);
    item.photo = None;
    let item_id = item.id;
    catalog.seed_product(item);

    let request = axum::http::Request::builder()
        .uri(format!("/product/product-photo/{item_id}"))
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(common::build_test_app(catalog), request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get("content-type").is_none());
    let bytes = http_body_util::BodyExt::collect(response.into_body())
        .await
        .unwrap()
        .to_bytes();
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn test_create_product_persists_and_returns_201() {
    let catalog = Arc::new(InMemoryCatalog::new());
    let category = electronics();
    catalog.seed_category(category.clone());
    let form = common::ProductForm::valid(category.id);

    let (status, json) = common::send_product_form(
        common::build_test_app(catalog.clone()),
        "POST",
        "/product/create-product",
        &form,
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["message"], "Product Created Successfully");
    assert_eq!(json["products"]["slug"], "iphone-15");
    let stored = catalog.products();
    assert_eq!(stored.len(), 1);
    assert!(stored[0].photo.is_some());
    assert_eq!(stored[0].created_at, common::fixed_clock().0);
}

#[tokio::test]
async fn test_create_product_missing_name_reports_first_violation() {
    let catalog = Arc::new(InMemoryCatalog::new());
    // Omit both name and price: the name message must win.
    let form = common::ProductForm::valid(Uuid::new_v4())
        .without_field("name")
        .without_field("price");

    let (status, json) = common::send_product_form(
        common::build_test_app(catalog.clone()),
        "POST",
        "/product/create-product",
        &form,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Name is Required");
    assert!(catalog.products().is_empty());
}

#[tokio::test]
async fn test_create_product_rejects_unparseable_price_as_missing() {
    let catalog = Arc::new(InMemoryCatalog::new());
    let form = common::ProductForm::valid(Uuid::new_v4()).with_field("price", "a lot");

    let (status, json) = common::send_product_form(
        common::build_test_app(catalog),
        "POST",
        "/product/create-product",
        &form,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Price is Required");
}

#[tokio::test]
async fn test_create_product_rejects_nonpositive_quantity() {
    let catalog = Arc::new(InMemoryCatalog::new());
    let form = common::ProductForm::valid(Uuid::new_v4()).with_field("quantity", "0");

    let (status, json) = common::send_product_form(
        common::build_test_app(catalog),
        "POST",
        "/product/create-product",
        &form,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Quantity must be greater than 0");
}

#[tokio::test]
async fn test_create_product_requires_photo() {
    let catalog = Arc::new(InMemoryCatalog::new());
    let form = common::ProductForm::valid(Uuid::new_v4()).without_photo();

    let (status, json) = common::send_product_form(
        common::build_test_app(catalog),
        "POST",
        "/product/create-product",
        &form,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Photo is Required");
}

#[tokio::test]
async fn test_create_product_rejects_oversized_photo() {
    let catalog = Arc::new(InMemoryCatalog::new());
    let form = common::ProductForm::valid(Uuid::new_v4()).with_photo(vec![0u8; 1_000_001]);

    let (status, json) = common::send_product_form(
        common::build_test_app(catalog),
        "POST",
        "/product/create-product",
        &form,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "photo is Required and should be less then 1mb");
}

#[tokio::test]
async fn test_update_product_without_photo_keeps_stored_bytes() {
    let catalog = Arc::new(InMemoryCatalog::new());
    let category = electronics();
    let existing = product("Old Name", 10.0, category.id, 0);
    let existing_id = existing.id;
    catalog.seed_product(existing);

    let form = common::ProductForm::valid(category.id)
        .with_field("name", "New Name")
        .without_photo();

    let (status, json) = common::send_product_form(
        common::build_test_app(catalog.clone()),
        "PUT",
        &format!("/product/update-product/{existing_id}"),
        &form,
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["message"], "Product Updated Successfully");
    assert_eq!(json["products"]["slug"], "new-name");
    let stored = catalog.products();
    assert_eq!(stored[0].name, "New Name");
    assert!(stored[0].photo.is_some());
}

#[tokio::test]
async fn test_update_product_unknown_id_is_404() {
    let catalog = Arc::new(InMemoryCatalog::new());
    let form = common::ProductForm::valid(Uuid::new_v4()).without_photo();

    let (status, _) = common::send_product_form(
        common::build_test_app(catalog),
        "PUT",
        &format!("/product/update-product/{}", Uuid::new_v4()),
        &form,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_product_removes_it_from_listings() {
    let catalog = Arc::new(InMemoryCatalog::new());
    let item = product("Doomed", 5.0, Uuid::new_v4(), 0);
    let item_id = item.id;
    catalog.seed_product(item);

    let (status, json) = common::delete_json(
        common::build_test_app(catalog.clone()),
        &format!("/product/delete-product/{item_id}"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Product Deleted successfully");
    assert!(catalog.products().is_empty());
}
