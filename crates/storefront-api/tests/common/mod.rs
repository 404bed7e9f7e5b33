//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;
use uuid::Uuid;

use storefront_api::app;
use storefront_api::auth::USER_ID_HEADER;
use storefront_api::state::AppState;
use storefront_core::gateway::PaymentGateway;
use storefront_core::repository::OrderRepository;
use storefront_test_support::{ApprovingGateway, FixedClock, InMemoryCatalog, RecordingOrders};

/// Fixed timestamp used across all integration tests.
pub fn fixed_clock() -> FixedClock {
    FixedClock(chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 1, 15, 10, 0, 0).unwrap())
}

/// Build the full app router over an in-memory catalog, a recording order
/// store, and an approving gateway. Uses the same route structure as
/// `main.rs`.
pub fn build_test_app(catalog: Arc<InMemoryCatalog>) -> Router {
    build_test_app_with(
        catalog,
        Arc::new(RecordingOrders::new()),
        Arc::new(ApprovingGateway::new("txn-1")),
    )
}

/// Build the full app router with custom order store and gateway doubles.
pub fn build_test_app_with(
    catalog: Arc<InMemoryCatalog>,
    orders: Arc<dyn OrderRepository>,
    gateway: Arc<dyn PaymentGateway>,
) -> Router {
    let state = AppState::new(
        catalog.clone(),
        catalog,
        orders,
        gateway,
        Arc::new(fixed_clock()),
    );
    app(state)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    send(app, request).await
}

/// Send a POST request with a JSON body and a buyer identity header.
pub async fn post_json_as(
    app: Router,
    uri: &str,
    buyer: Uuid,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header(USER_ID_HEADER, buyer.to_string())
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    send(app, request).await
}

/// Send a GET request with a buyer identity header.
pub async fn get_json_as(
    app: Router,
    uri: &str,
    buyer: Uuid,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .header(USER_ID_HEADER, buyer.to_string())
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Send a PUT request with a JSON body and a buyer identity header.
pub async fn put_json_as(
    app: Router,
    uri: &str,
    buyer: Uuid,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("PUT")
        .uri(uri)
        .header("content-type", "application/json")
        .header(USER_ID_HEADER, buyer.to_string())
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    send(app, request).await
}

/// Send a PUT request with a JSON body.
pub async fn put_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("PUT")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    send(app, request).await
}

/// Send a DELETE request and return the response.
pub async fn delete_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value =
        serde_json::from_slice(&body_bytes).unwrap_or(serde_json::Value::Null);

    (status, json)
}

/// Multipart form fields for product create/update requests.
pub struct ProductForm {
    pub fields: Vec<(String, String)>,
    pub photo: Option<(Vec<u8>, String)>,
}

impl ProductForm {
    /// A form that passes every validation rule.
    pub fn valid(category: Uuid) -> Self {
        Self {
            fields: vec![
                ("name".into(), "iPhone 15".into()),
                ("description".into(), "A premium smartphone".into()),
                ("price".into(), "999".into()),
                ("category".into(), category.to_string()),
                ("quantity".into(), "50".into()),
                ("shipping".into(), "1".into()),
            ],
            photo: Some((vec![0u8; 1024], "image/jpeg".into())),
        }
    }

    pub fn without_field(mut self, name: &str) -> Self {
        self.fields.retain(|(field, _)| field != name);
        self
    }

    pub fn with_field(mut self, name: &str, value: &str) -> Self {
        self.fields.retain(|(field, _)| field != name);
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn without_photo(mut self) -> Self {
        self.photo = None;
        self
    }

    pub fn with_photo(mut self, bytes: Vec<u8>) -> Self {
        self.photo = Some((bytes, "image/jpeg".into()));
        self
    }
}

const BOUNDARY: &str = "X-STOREFRONT-TEST-BOUNDARY";

/// Encode a [`ProductForm`] as a `multipart/form-data` body.
fn multipart_body(form: &ProductForm) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in &form.fields {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    if let Some((bytes, content_type)) = &form.photo {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            b"Content-Disposition: form-data; name=\"photo\"; filename=\"photo.jpg\"\r\n",
        );
        body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Send a product form to `uri` with the given method.
pub async fn send_product_form(
    app: Router,
    method: &str,
    uri: &str,
    form: &ProductForm,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(form)))
        .unwrap();

    send(app, request).await
}
