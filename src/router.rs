use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router, middleware};
use chrono::Utc;
use ironpass_observability::logging_middleware;
use serde_json::json;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};

use crate::docs::ApiDoc;
use crate::modules::admin::router::init_admin_router;
use crate::modules::auth::router::init_auth_router;
use crate::modules::contacts::router::init_contacts_router;
use crate::modules::feedback::router::init_feedback_router;
use crate::modules::plans::router::init_plans_router;
use crate::modules::subscriptions::router::init_subscriptions_router;
use crate::response::ErrorResponse;
use crate::state::AppState;

pub fn init_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors.allowed_origins);

    Router::new()
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .route("/api-docs/openapi.json", get(openapi_json))
        .route("/", get(root))
        .route("/health", get(health))
        .nest(
            "/api/v1",
            Router::new()
                .nest("/auth", init_auth_router(&state))
                .nest("/plan", init_plans_router(&state))
                .nest("/subscription", init_subscriptions_router(&state))
                .nest("/contact", init_contacts_router(&state))
                .nest("/feedback", init_feedback_router(&state))
                .nest("/admin", init_admin_router(&state)),
        )
        .fallback(not_found)
        .with_state(state)
        .layer(cors)
        .layer(middleware::from_fn(logging_middleware))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

async fn root() -> &'static str {
    "Ironpass API is running"
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            success: false,
            message: "Route not found".to_string(),
        }),
    )
}
