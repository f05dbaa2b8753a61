//! Handler tests for the Products domain
//!
//! Drive the product router mounted at `/api/product` over an in-memory
//! repository: status codes, JSON bodies and price fidelity.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use domain_products::*;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt; // For oneshot()

fn app() -> Router {
    let service = ProductService::new(InMemoryProductRepository::new());
    Router::new().nest("/api/product", handlers::router(service))
}

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/product")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

fn post_json(value: Value) -> Request<Body> {
    post(serde_json::to_string(&value).unwrap())
}

fn get() -> Request<Body> {
    Request::builder()
        .uri("/api/product")
        .body(Body::empty())
        .unwrap()
}

async fn list(app: &Router) -> Vec<Value> {
    let response = app.clone().oneshot(get()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    json_body(response.into_body()).await
}

#[tokio::test]
async fn test_create_then_list_round_trip() {
    let app = app();
    let pen = json!({"id": "p1", "name": "Pen", "description": "ball", "price": "1.25"});

    let response = app.clone().oneshot(post_json(pen.clone())).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let created: Value = json_body(response.into_body()).await;
    assert_eq!(created, pen);

    assert_eq!(list(&app).await, vec![pen]);
}

#[tokio::test]
async fn test_list_empty_store_returns_empty_array() {
    let response = app().oneshot(get()).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_malformed_json_returns_400() {
    let app = app();

    let response = app.clone().oneshot(post("{")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "JSON_EXTRACTION");

    assert!(list(&app).await.is_empty());
}

#[tokio::test]
async fn test_two_products_are_both_listed() {
    let app = app();

    for (id, name) in [("a", "Apple"), ("b", "Banana")] {
        let response = app
            .clone()
            .oneshot(post_json(json!({"id": id, "name": name, "description": "", "price": "1"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let mut ids: Vec<String> = list(&app)
        .await
        .iter()
        .map(|p| p["id"].as_str().unwrap().to_string())
        .collect();
    ids.sort();
    assert_eq!(ids, vec!["a", "b"]);
}

#[tokio::test]
async fn test_same_id_replaces_product() {
    let app = app();

    for price in ["9.99", "10.00"] {
        let response = app
            .clone()
            .oneshot(post_json(
                json!({"id": "p1", "name": "Pen", "description": "ball", "price": price}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let products = list(&app).await;
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["price"], "10.00");
}

#[tokio::test]
async fn test_high_precision_price_is_echoed_verbatim() {
    let app = app();
    let price = "12345678901234567890.123456789";

    let response = app
        .clone()
        .oneshot(post_json(
            json!({"id": "big", "name": "Yacht", "description": "", "price": price}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let created: Value = json_body(response.into_body()).await;
    assert_eq!(created["price"], price);
    assert_eq!(list(&app).await[0]["price"], price);
}

#[tokio::test]
async fn test_missing_id_is_generated() {
    let app = app();

    let response = app
        .clone()
        .oneshot(post_json(json!({"name": "Pen", "price": 2})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let created: ProductResponse = json_body(response.into_body()).await;
    assert!(uuid::Uuid::parse_str(&created.id).is_ok());
    assert_eq!(created.description, "");
    assert_eq!(created.price.to_plain_string(), "2");
}

#[tokio::test]
async fn test_sku_code_is_accepted_and_dropped() {
    let response = app()
        .oneshot(post_json(json!({
            "id": "p1",
            "name": "Pen",
            "description": "ball",
            "price": "1.25",
            "skuCode": "PEN-001"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Value = json_body(response.into_body()).await;
    assert!(created.get("skuCode").is_none());
}

#[tokio::test]
async fn test_invalid_input_returns_400() {
    let cases = [
        (json!({"id": "p1", "name": "", "price": "1"}), "VALIDATION_ERROR"),
        (json!({"id": "p1", "price": "1"}), "JSON_EXTRACTION"),
        (json!({"id": "p1", "name": "Pen"}), "JSON_EXTRACTION"),
        (json!({"id": "p1", "name": "Pen", "price": "abc"}), "JSON_EXTRACTION"),
    ];

    for (payload, error) in cases {
        let response = app().oneshot(post_json(payload.clone())).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", payload);
        let body: Value = json_body(response.into_body()).await;
        assert_eq!(body["error"], error, "{}", payload);
    }
}

#[tokio::test]
async fn test_exponent_price_returns_400_and_stores_nothing() {
    let app = app();

    let response = app
        .clone()
        .oneshot(post_json(json!({"id": "p1", "name": "Pen", "price": "1E+100000000"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "JSON_EXTRACTION");

    assert!(list(&app).await.is_empty());
}

#[tokio::test]
async fn test_non_canonical_prices_return_400() {
    for price in ["1e2", "01.25", "+1.25", ".5", "-0.00", " 1.25", "1.25 "] {
        let response = app()
            .oneshot(post_json(json!({"id": "p1", "name": "Pen", "price": price})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{:?}", price);
    }
}

#[tokio::test]
async fn test_canonical_prices_are_echoed_verbatim() {
    for price in ["0", "100", "0.5", "-1.25", "10.00", "123.4500"] {
        let app = app();

        let response = app
            .clone()
            .oneshot(post_json(json!({"id": "p1", "name": "Pen", "price": price})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED, "{:?}", price);

        let created: Value = json_body(response.into_body()).await;
        assert_eq!(created["price"], price);
        assert_eq!(list(&app).await[0]["price"], price);
    }
}

#[tokio::test]
async fn test_missing_content_type_returns_415() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/product")
        .body(Body::from(r#"{"name":"Pen","price":"1"}"#))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn test_other_methods_return_405() {
    for method in ["PUT", "DELETE", "PATCH"] {
        let request = Request::builder()
            .method(method)
            .uri("/api/product")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED, "{}", method);

        let body: Value = json_body(response.into_body()).await;
        assert_eq!(body["error"], "METHOD_NOT_ALLOWED");
    }
}

#[tokio::test]
async fn test_concurrent_creates_are_all_listed() {
    let app = app();

    let handles: Vec<_> = (0..20)
        .map(|i| {
            let app = app.clone();
            tokio::spawn(async move {
                app.oneshot(post_json(json!({
                    "id": format!("p{}", i),
                    "name": format!("Product {}", i),
                    "price": format!("{}.50", i)
                })))
                .await
                .unwrap()
                .status()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap(), StatusCode::CREATED);
    }

    assert_eq!(list(&app).await.len(), 20);
}
