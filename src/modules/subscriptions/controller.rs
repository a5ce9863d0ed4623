use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use ironpass_core::AppError;
use ironpass_models::{CreateSubscriptionRequest, UpdateSubscriptionRequest};
use tracing::instrument;
use uuid::Uuid;

use super::model::SubscriptionResponse;
use super::service::SubscriptionService;
use crate::middleware::Principal;
use crate::response::{ErrorResponse, MessageResponse};
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Subscribe the caller to a plan
#[utoipa::path(
    post,
    path = "/api/v1/subscription/create-subscription",
    request_body = CreateSubscriptionRequest,
    responses(
        (status = 201, description = "Subscription created", body = SubscriptionResponse),
        (status = 400, description = "Invalid plan or already subscribed", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Subscriptions"
)]
#[instrument(skip(state, dto))]
pub async fn create_subscription(
    State(state): State<AppState>,
    principal: Principal,
    ValidatedJson(dto): ValidatedJson<CreateSubscriptionRequest>,
) -> Result<(StatusCode, Json<SubscriptionResponse>), AppError> {
    let subscription = SubscriptionService::create(&state, principal.id(), dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(SubscriptionResponse {
            success: true,
            message: "Subscription created successfully".to_string(),
            subscription,
        }),
    ))
}

/// Fetch a subscription
#[utoipa::path(
    get,
    path = "/api/v1/subscription/get-subscription/{id}",
    params(("id" = Uuid, Path, description = "Subscription ID")),
    responses(
        (status = 200, description = "Subscription", body = SubscriptionResponse),
        (status = 403, description = "No active subscription", body = ErrorResponse),
        (status = 404, description = "Subscription not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Subscriptions"
)]
#[instrument(skip(state))]
pub async fn get_subscription(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> Result<Json<SubscriptionResponse>, AppError> {
    let subscription = SubscriptionService::get(&state, principal, id).await?;
    Ok(Json(SubscriptionResponse {
        success: true,
        message: "Subscription fetched successfully".to_string(),
        subscription,
    }))
}

/// Update a subscription
#[utoipa::path(
    put,
    path = "/api/v1/subscription/update-subscription/{id}",
    params(("id" = Uuid, Path, description = "Subscription ID")),
    request_body = UpdateSubscriptionRequest,
    responses(
        (status = 200, description = "Subscription updated", body = SubscriptionResponse),
        (status = 403, description = "No active subscription", body = ErrorResponse),
        (status = 404, description = "Subscription not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Subscriptions"
)]
#[instrument(skip(state, dto))]
pub async fn update_subscription(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateSubscriptionRequest>,
) -> Result<Json<SubscriptionResponse>, AppError> {
    let subscription = SubscriptionService::update(&state, principal, id, dto).await?;
    Ok(Json(SubscriptionResponse {
        success: true,
        message: "Subscription updated successfully".to_string(),
        subscription,
    }))
}

/// Delete a subscription
#[utoipa::path(
    delete,
    path = "/api/v1/subscription/delete-subscription/{id}",
    params(("id" = Uuid, Path, description = "Subscription ID")),
    responses(
        (status = 200, description = "Subscription deleted", body = MessageResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 404, description = "Subscription not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Subscriptions"
)]
#[instrument(skip(state))]
pub async fn delete_subscription(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    SubscriptionService::delete(&state, id).await?;
    Ok(Json(MessageResponse::ok("Subscription deleted successfully")))
}
