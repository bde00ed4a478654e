//! Catalog API integration tests: list and bulk-import endpoints over the
//! assembled router.

#![allow(clippy::unwrap_used)]

use std::path::PathBuf;

use axum::http::StatusCode;
use serde_json::json;

use chainring_integration_tests::{TestApp, body_json, sample_accessory, sample_bike};

fn temp_data_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("chainring-data-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[tokio::test]
async fn health_endpoints_respond() {
    let app = TestApp::new();

    assert_eq!(app.get("/health").await.status(), StatusCode::OK);
    assert_eq!(app.get("/health/ready").await.status(), StatusCode::OK);
}

#[tokio::test]
async fn empty_collections_list_as_empty_arrays() {
    let app = TestApp::new();

    for path in ["/api/bikes", "/api/accessories", "/api/logo", "/api/dealers"] {
        let response = app.get(path).await;
        assert_eq!(response.status(), StatusCode::OK, "{path}");
        assert_eq!(body_json(response).await, json!([]), "{path}");
    }
}

#[tokio::test]
async fn seeded_bikes_are_listed_in_order_with_numeric_prices() {
    let app = TestApp::new();
    app.seed_bikes(vec![sample_bike("b1", 1299), sample_bike("b2", 749)])
        .await;

    let response = app.get("/api/bikes").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let bikes = body.as_array().unwrap();
    assert_eq!(bikes.len(), 2);
    assert_eq!(bikes[0]["id"], "b1");
    assert_eq!(bikes[0]["price"], json!(1299.0));
    assert_eq!(bikes[1]["id"], "b2");
}

#[tokio::test]
async fn import_bikes_appends_on_repeat() {
    let dir = temp_data_dir();
    std::fs::write(
        dir.join("bikes.json"),
        serde_json::to_string(&vec![sample_bike("b1", 1000), sample_bike("b2", 1200)]).unwrap(),
    )
    .unwrap();
    let app = TestApp::with_data_dir(&dir);

    let response = app.get("/api/import-bikes").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["count"], json!(2));

    // a second import appends rather than replacing
    app.get("/api/import-bikes").await;
    let body = body_json(app.get("/api/bikes").await).await;
    assert_eq!(body.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn import_accessories_replaces_on_repeat() {
    let dir = temp_data_dir();
    std::fs::write(
        dir.join("accessories.json"),
        serde_json::to_string(&vec![sample_accessory("a1", 50), sample_accessory("a2", 75)])
            .unwrap(),
    )
    .unwrap();
    let app = TestApp::with_data_dir(&dir);

    app.get("/api/import-accessories").await;
    app.get("/api/import-accessories").await;

    let body = body_json(app.get("/api/accessories").await).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn import_with_missing_file_is_a_server_error() {
    let app = TestApp::with_data_dir(temp_data_dir());

    let response = app.get("/api/import-dealers").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert!(body.get("error").is_some());
}

#[tokio::test]
async fn import_reads_the_sample_data_directory() {
    // TestApp::new points at the repository's data/ files
    let app = TestApp::new();

    let response = app.get("/api/import-logo").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(app.get("/api/logo").await).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}
