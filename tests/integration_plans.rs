mod common;

use axum::http::StatusCode;
use common::{get, request, spawn_app, unique_email};
use ironpass_models::Role;
use serde_json::json;

fn plan_body(name: &str, monthly: f64, yearly: f64) -> serde_json::Value {
    json!({
        "planName": name,
        "monthlyPlanAmount": monthly,
        "yearlyPlanAmount": yearly,
        "isPopular": true,
        "features": { "wifiService": true, "lockerRooms": true }
    })
}

#[tokio::test]
async fn test_admin_creates_and_members_browse_plans() {
    let app = spawn_app();
    let (_, admin_token) = app.seed_user(&unique_email(), Role::Admin).await;

    let res = app
        .send(request(
            "POST",
            "/api/v1/plan/create-plan",
            Some(&admin_token),
            Some(plan_body("  Platinum ", 50.0, 500.0)),
        ))
        .await;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body["plan"]["planName"], "Platinum");
    assert_eq!(res.body["plan"]["isActive"], true);
    assert_eq!(res.body["plan"]["features"]["wifiService"], true);
    assert_eq!(res.body["plan"]["features"]["cafeOrLounge"], false);
    let id = res.body["plan"]["id"].as_str().unwrap().to_string();

    let res = app.send(get("/api/v1/plan/getall-plan", None)).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["count"], 1);

    let res = app
        .send(get(&format!("/api/v1/plan/get-plan/{id}"), None))
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["plan"]["monthlyPlanAmount"], 50.0);

    let res = app.send(get("/api/v1/plan/plan-count", None)).await;
    assert_eq!(res.body["count"], 1);
}

#[tokio::test]
async fn test_member_cannot_create_plan() {
    let app = spawn_app();
    let (_, token) = app.seed_user(&unique_email(), Role::Regular).await;

    let res = app
        .send(request(
            "POST",
            "/api/v1/plan/create-plan",
            Some(&token),
            Some(plan_body("Bronze", 10.0, 100.0)),
        ))
        .await;

    assert_eq!(res.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_plan_name_is_unique_ignoring_case() {
    let app = spawn_app();
    let (admin, token) = app.seed_user(&unique_email(), Role::Admin).await;
    app.seed_plan("Gold", admin.id).await;

    let res = app
        .send(request(
            "POST",
            "/api/v1/plan/create-plan",
            Some(&token),
            Some(plan_body("gold", 10.0, 100.0)),
        ))
        .await;

    assert_eq!(res.status, StatusCode::CONFLICT);
    assert_eq!(res.body["message"], "Plan name already exists");
}

#[tokio::test]
async fn test_yearly_amount_is_bounded() {
    let app = spawn_app();
    let (_, token) = app.seed_user(&unique_email(), Role::Admin).await;

    let res = app
        .send(request(
            "POST",
            "/api/v1/plan/create-plan",
            Some(&token),
            Some(plan_body("Overpriced", 10.0, 121.0)),
        ))
        .await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_and_delete_plan() {
    let app = spawn_app();
    let (admin, token) = app.seed_user(&unique_email(), Role::Admin).await;
    let plan = app.seed_plan("Basic", admin.id).await;

    let res = app
        .send(request(
            "PUT",
            &format!("/api/v1/plan/update-plan/{}", plan.id),
            Some(&token),
            Some(plan_body("Basic Plus", 20.0, 200.0)),
        ))
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["plan"]["planName"], "Basic Plus");

    let uri = format!("/api/v1/plan/delete-plan/{}", plan.id);
    let res = app.send(request("DELETE", &uri, Some(&token), None)).await;
    assert_eq!(res.status, StatusCode::OK);

    let res = app.send(request("DELETE", &uri, Some(&token), None)).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_missing_plan_is_not_found() {
    let app = spawn_app();

    let res = app
        .send(get(
            &format!("/api/v1/plan/get-plan/{}", uuid::Uuid::new_v4()),
            None,
        ))
        .await;

    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["message"], "Plan not found");
}

#[tokio::test]
async fn test_contact_form_and_admin_listing() {
    let app = spawn_app();
    let (_, admin_token) = app.seed_user(&unique_email(), Role::Admin).await;
    let (_, member_token) = app.seed_user(&unique_email(), Role::Regular).await;

    let res = app
        .send(request(
            "POST",
            "/api/v1/contact/create-contact",
            None,
            Some(json!({
                "name": "Visitor",
                "email": "visitor@example.com",
                "city": "Ibadan",
                "phone": "0801234567",
                "message": "Do you offer student discounts?"
            })),
        ))
        .await;
    assert_eq!(res.status, StatusCode::CREATED);

    let res = app
        .send(get("/api/v1/contact/getall-contact", Some(&member_token)))
        .await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);

    let res = app
        .send(get("/api/v1/contact/getall-contact", Some(&admin_token)))
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["contacts"].as_array().unwrap().len(), 1);
}
