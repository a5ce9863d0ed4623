mod common;

use axum::http::StatusCode;
use common::{get, request, spawn_app, unique_email};
use ironpass_models::Role;
use serde_json::json;

async fn submit(app: &common::TestApp, token: &str, rating: i32) -> common::TestResponse {
    app.send(request(
        "POST",
        "/api/v1/feedback/create-feedback",
        Some(token),
        Some(json!({ "message": "Great equipment", "rating": rating })),
    ))
    .await
}

#[tokio::test]
async fn test_member_submits_feedback_once() {
    let app = spawn_app();
    let (_, token) = app.seed_user(&unique_email(), Role::Regular).await;

    let res = submit(&app, &token, 5).await;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body["feedback"]["rating"], 5);

    let res = submit(&app, &token, 4).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["message"], "You have already submitted feedback");

    let res = app
        .send(get("/api/v1/feedback/get-feedback", Some(&token)))
        .await;
    assert_eq!(res.body["feedback"].as_array().unwrap().len(), 1);

    let res = app.send(get("/api/v1/feedback/getall-feedback", None)).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["feedback"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_concurrent_submissions_keep_one_row() {
    let app = spawn_app();
    let (_, token) = app.seed_user(&unique_email(), Role::Regular).await;

    let (first, second) = tokio::join!(submit(&app, &token, 5), submit(&app, &token, 3));

    let mut statuses = [first.status.as_u16(), second.status.as_u16()];
    statuses.sort_unstable();
    assert_eq!(statuses, [201, 400]);
    let res = app
        .send(get("/api/v1/feedback/get-feedback", Some(&token)))
        .await;
    assert_eq!(res.body["feedback"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_rating_out_of_range() {
    let app = spawn_app();
    let (_, token) = app.seed_user(&unique_email(), Role::Regular).await;

    let res = submit(&app, &token, 6).await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_only_owner_or_admin_modifies_feedback() {
    let app = spawn_app();
    let (_, owner_token) = app.seed_user(&unique_email(), Role::Regular).await;
    let (_, other_token) = app.seed_user(&unique_email(), Role::Regular).await;
    let (_, admin_token) = app.seed_user(&unique_email(), Role::Admin).await;

    let res = submit(&app, &owner_token, 3).await;
    let id = res.body["feedback"]["id"].as_str().unwrap().to_string();
    let update_uri = format!("/api/v1/feedback/update-feedback/{id}");

    let res = app
        .send(request(
            "PUT",
            &update_uri,
            Some(&other_token),
            Some(json!({ "rating": 1 })),
        ))
        .await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);

    let res = app
        .send(request(
            "PUT",
            &update_uri,
            Some(&owner_token),
            Some(json!({ "rating": 4 })),
        ))
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["feedback"]["rating"], 4);
    assert_eq!(res.body["feedback"]["message"], "Great equipment");

    let res = app
        .send(request(
            "DELETE",
            &format!("/api/v1/feedback/delete-feedback/{id}"),
            Some(&admin_token),
            None,
        ))
        .await;
    assert_eq!(res.status, StatusCode::OK);
}

#[tokio::test]
async fn test_stats_are_admin_only() {
    let app = spawn_app();
    let (_, a) = app.seed_user(&unique_email(), Role::Regular).await;
    let (_, b) = app.seed_user(&unique_email(), Role::Regular).await;
    let (_, admin_token) = app.seed_user(&unique_email(), Role::Admin).await;
    submit(&app, &a, 5).await;
    submit(&app, &b, 3).await;

    let res = app.send(get("/api/v1/feedback/stats", Some(&a))).await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);

    let res = app
        .send(get("/api/v1/feedback/stats", Some(&admin_token)))
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["total"], 2);
    let stats = res.body["stats"].as_array().unwrap();
    assert_eq!(stats.len(), 2);
    assert_eq!(stats[0]["rating"], 3);
    assert_eq!(stats[0]["percentage"], 50.0);
}
