mod common;

use axum::http::{Method, StatusCode};
use common::{error_message, TestApp};
use serde_json::json;

#[tokio::test]
async fn duplicate_package_name_conflicts() {
    let app = TestApp::new();
    let (status, body) = app
        .send(
            Method::POST,
            "/api/packages",
            Some(&app.admin_token()),
            Some(json!({"package_name": "Monthly", "price": 500, "duration_days": 30})),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_message(&body), "package Monthly already exists");
}

#[tokio::test]
async fn renaming_follows_uniqueness() {
    let app = TestApp::new();
    let admin = app.admin_token();

    let (status, _) = app
        .send(Method::PUT, "/api/packages/2", Some(&admin), Some(json!({"package_name": "Monthly"})))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = app
        .send(Method::PUT, "/api/packages/1", Some(&admin), Some(json!({"package_name": "Monthly"})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["package_name"], "Monthly");
}

#[tokio::test]
async fn create_update_and_delete() {
    let app = TestApp::new();
    let admin = app.admin_token();

    let (status, body) = app
        .send(
            Method::POST,
            "/api/packages",
            Some(&admin),
            Some(json!({"package_name": "Weekly", "price": 300, "duration_days": 7, "description": "Trial"})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["data"]["package_id"].as_i64().unwrap();
    let uri = format!("/api/packages/{}", id);

    let (status, body) = app
        .send(Method::PUT, &uri, Some(&admin), Some(json!({"price": 350.5, "description": null})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["price"], 350.5);
    assert!(body["data"]["description"].is_null());

    let (status, _) = app.send(Method::DELETE, &uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.send(Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_values_are_rejected() {
    let app = TestApp::new();
    let admin = app.admin_token();

    let (status, body) = app
        .send(Method::PUT, "/api/packages/1", Some(&admin), Some(json!({"price": -10})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "invalid price: cannot be negative");

    let (status, body) = app
        .send(
            Method::POST,
            "/api/packages",
            Some(&admin),
            Some(json!({"package_name": "Daily", "price": 50})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "missing required field duration_days");
}

#[tokio::test]
async fn package_still_in_use_cannot_be_deleted() {
    let app = TestApp::new();
    let (status, body) = app
        .send(Method::DELETE, "/api/packages/1", Some(&app.admin_token()), None)
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_message(&body), "package 1 is still referenced by other records");
}

#[tokio::test]
async fn staff_cannot_write_packages() {
    let app = TestApp::new();
    let (status, _) = app
        .send(Method::PUT, "/api/packages/1", Some(&app.staff_token()), Some(json!({"price": 1})))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app.send(Method::GET, "/api/packages", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}
