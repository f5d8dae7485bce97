//! Integration tests for the HTTP demo endpoints.

mod helpers;

use axum::http::StatusCode;

#[tokio::test]
async fn test_create_and_list() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/create").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["name"], "fiddo");
    assert_eq!(response.body["data"]["age"], 3);
    assert!(response.body["data"]["id"].as_i64().unwrap() > 0);

    let response = app.request("GET", "/").await;
    assert_eq!(response.status, StatusCode::OK);
    let dogs = response.body["data"].as_array().unwrap();
    assert_eq!(dogs.len(), 1);
    assert_eq!(dogs[0]["name"], "fiddo");
}

#[tokio::test]
async fn test_find_by_name() {
    let app = helpers::TestApp::new().await;
    app.request("GET", "/create").await;

    let response = app.request("GET", "/dogs/fiddo").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["name"], "fiddo");
}

#[tokio::test]
async fn test_find_by_name_not_found() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/dogs/ghost").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_paged_listing() {
    let app = helpers::TestApp::new().await;
    for _ in 0..3 {
        app.request("GET", "/create").await;
    }

    let response = app.request("GET", "/dogs?page=2&per_page=2").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["total_items"], 3);
    assert_eq!(response.body["data"]["items"].as_array().unwrap().len(), 1);

    let response = app
        .request("GET", "/dogs?page=18446744073709551615&per_page=100")
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");

    let response = app.request("GET", "/dogs?sort_by=owner").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_health() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/api/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");

    app.request("GET", "/create").await;
    let response = app.request("GET", "/api/health/detailed").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["database"], "connected");
    assert_eq!(response.body["data"]["dogs"], 1);
}
