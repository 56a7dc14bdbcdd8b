use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::IntoResponse,
    Router,
};
use http_body_util::BodyExt;
use metrics_exporter_prometheus::PrometheusBuilder;
use mongodb::bson::{self, oid::ObjectId};
use tower::ServiceExt;

use crate::{
    error::{ApiError, ErrorVerbosity},
    route::books::{Book, BookFields},
    server::{Server, ServerConfig},
    state::ApiState,
    store::{BookDocument, BookStore, StoreError},
};

#[tokio::test]
async fn example_config_is_valid() {
    ServerConfig::from_config_file("config.example.yaml")
        .await
        .expect("Example config is not parsable");
}

/// The driver connects lazily, so building a router against an unreachable
/// MongoDB is fine as long as no handler reaches the store.
async fn test_router() -> Router {
    let config = ServerConfig::from_config_file("config.example.yaml")
        .await
        .expect("Example config is not parsable");

    let store = BookStore::connect(&config.store)
        .await
        .expect("Store setup failed");

    let metrics_handle = PrometheusBuilder::new().build_recorder().handle();

    let state = ApiState::new(config.error_verbosity, store, metrics_handle);

    Server::router(state)
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to collect response body")
        .to_bytes();

    serde_json::from_slice(&bytes).expect("Response body is not JSON")
}

#[tokio::test]
async fn unknown_path_is_not_found() {
    let router = test_router().await;

    let request = Request::builder()
        .method(Method::GET)
        .uri("/nope")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = response_json(response).await;
    assert_eq!(body["error_type"], "NotFound");
}

#[tokio::test]
async fn unknown_method_is_not_found() {
    let router = test_router().await;

    let request = Request::builder()
        .method(Method::PATCH)
        .uri("/books")
        .body(Body::empty())
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/book/123")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let router = test_router().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/books")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("not json"))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert_eq!(body["error_type"], "Body");
}

#[tokio::test]
async fn malformed_id_is_bad_request() {
    let router = test_router().await;

    let request = Request::builder()
        .method(Method::GET)
        .uri("/book/not-a-hex-id")
        .body(Body::empty())
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let request = Request::builder()
        .method(Method::DELETE)
        .uri("/book/not-a-hex-id")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn metrics_endpoint_renders() {
    let router = test_router().await;

    let request = Request::builder()
        .method(Method::GET)
        .uri("/metrics")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[test]
fn book_fields_omit_absent_fields() {
    let fields = BookFields {
        name: Some("Dune".to_string()),
        ..Default::default()
    };

    let value = serde_json::to_value(&fields).unwrap();

    assert_eq!(value, serde_json::json!({ "name": "Dune" }));
}

#[test]
fn create_payload_ignores_caller_supplied_id() {
    let payload = serde_json::json!({
        "id": "64b2f6f0a1b2c3d4e5f60718",
        "name": "Dune",
        "genre": "scifi",
    });

    let fields: BookFields = serde_json::from_value(payload).unwrap();

    assert_eq!(fields.name.as_deref(), Some("Dune"));
    assert_eq!(fields.genre.as_deref(), Some("scifi"));
}

#[test]
fn stored_document_keeps_isbn_casing() {
    let document = BookFields {
        isbn: Some("001".to_string()),
        ..Default::default()
    }
    .into_document();

    let document = bson::to_document(&document).unwrap();

    assert!(document.contains_key("ISBN"));
    assert!(!document.contains_key("isbn"));
    // No id until the store assigns one.
    assert!(!document.contains_key("_id"));
}

#[test]
fn book_renders_hex_id() {
    let id = ObjectId::new();
    let document = BookDocument {
        id: Some(id),
        name: Some("Dune".to_string()),
        author: Some("Herbert".to_string()),
        isbn: Some("001".to_string()),
        genre: Some("scifi".to_string()),
    };

    let book = Book::from(document);

    assert_eq!(book.id, id.to_hex());
    assert_eq!(book.name.as_deref(), Some("Dune"));
}

#[test]
fn invalid_id_maps_to_bad_request() {
    let err = BookStore::parse_id("not-a-hex-id").unwrap_err();
    assert!(matches!(err, StoreError::InvalidId(_)));

    let response = ApiError::from_store_error(ErrorVerbosity::Full, err).into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[test]
fn missing_book_maps_to_not_found() {
    let response =
        ApiError::from_store_error(ErrorVerbosity::Full, StoreError::NotFound).into_response();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
