use axum::{
    Json,
    extract::{Path, Query, State},
};
use ironpass_core::{AppError, ListQuery};
use ironpass_models::Role;
use tracing::instrument;
use uuid::Uuid;

use super::model::{RevenueResponse, RoleChangeResponse, SubscriptionListResponse, UserListResponse};
use super::service::{AdminService, Tally};
use crate::middleware::Principal;
use crate::modules::contacts::model::ContactListResponse;
use crate::modules::feedback::model::FeedbackListResponse;
use crate::response::{CountResponse, ErrorResponse, MessageResponse};
use crate::state::AppState;

async fn tally(state: &AppState, tally: Tally) -> Result<Json<CountResponse>, AppError> {
    let count = AdminService::count(state, tally).await?;
    Ok(Json(CountResponse::ok(count)))
}

/// Number of members
#[utoipa::path(
    get,
    path = "/api/v1/admin/users/count",
    responses(
        (status = 200, description = "Member count", body = CountResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn count_users(State(state): State<AppState>) -> Result<Json<CountResponse>, AppError> {
    tally(&state, Tally::Users).await
}

/// Number of plans
#[utoipa::path(
    get,
    path = "/api/v1/admin/plans/count",
    responses((status = 200, description = "Plan count", body = CountResponse)),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn count_plans(State(state): State<AppState>) -> Result<Json<CountResponse>, AppError> {
    tally(&state, Tally::Plans).await
}

/// Number of subscriptions
#[utoipa::path(
    get,
    path = "/api/v1/admin/subscriptions/count",
    responses((status = 200, description = "Subscription count", body = CountResponse)),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn count_subscriptions(
    State(state): State<AppState>,
) -> Result<Json<CountResponse>, AppError> {
    tally(&state, Tally::Subscriptions).await
}

/// Number of contact requests
#[utoipa::path(
    get,
    path = "/api/v1/admin/contacts/count",
    responses((status = 200, description = "Contact count", body = CountResponse)),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn count_contacts(
    State(state): State<AppState>,
) -> Result<Json<CountResponse>, AppError> {
    tally(&state, Tally::Contacts).await
}

/// Number of feedback entries
#[utoipa::path(
    get,
    path = "/api/v1/admin/feedbacks/count",
    responses((status = 200, description = "Feedback count", body = CountResponse)),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn count_feedback(
    State(state): State<AppState>,
) -> Result<Json<CountResponse>, AppError> {
    tally(&state, Tally::Feedback).await
}

/// Total revenue across all subscriptions
#[utoipa::path(
    get,
    path = "/api/v1/admin/revenue/total",
    responses((status = 200, description = "Revenue summary", body = RevenueResponse)),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn total_revenue(
    State(state): State<AppState>,
) -> Result<Json<RevenueResponse>, AppError> {
    let revenue = AdminService::revenue(&state).await?;
    Ok(Json(RevenueResponse {
        success: true,
        revenue,
    }))
}

/// Page through members
#[utoipa::path(
    get,
    path = "/api/v1/admin/users",
    params(ListQuery),
    responses((status = 200, description = "Members", body = UserListResponse)),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<UserListResponse>, AppError> {
    let (users, total) = AdminService::list_users(&state, &query).await?;
    Ok(Json(UserListResponse {
        success: true,
        users,
        pagination: query.meta(total),
    }))
}

/// Page through subscriptions
#[utoipa::path(
    get,
    path = "/api/v1/admin/subscriptions",
    params(ListQuery),
    responses((status = 200, description = "Subscriptions", body = SubscriptionListResponse)),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state))]
pub async fn list_subscriptions(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<SubscriptionListResponse>, AppError> {
    let (subscriptions, total) = AdminService::list_subscriptions(&state, &query).await?;
    Ok(Json(SubscriptionListResponse {
        success: true,
        subscriptions,
        pagination: Some(query.meta(total)),
    }))
}

/// Delete a member
#[utoipa::path(
    delete,
    path = "/api/v1/admin/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 400, description = "Cannot delete own account", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    AdminService::delete_user(&state, principal.id(), id).await?;
    Ok(Json(MessageResponse::ok("User deleted successfully")))
}

/// Grant admin rights
#[utoipa::path(
    put,
    path = "/api/v1/admin/users/{id}/make-admin",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User promoted", body = RoleChangeResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state))]
pub async fn make_admin(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> Result<Json<RoleChangeResponse>, AppError> {
    let user = AdminService::set_role(&state, principal.id(), id, Role::Admin).await?;
    Ok(Json(RoleChangeResponse {
        success: true,
        message: "User promoted to admin".to_string(),
        user,
    }))
}

/// Revoke admin rights
#[utoipa::path(
    put,
    path = "/api/v1/admin/users/{id}/remove-admin",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "Admin rights removed", body = RoleChangeResponse),
        (status = 400, description = "Cannot demote self", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state))]
pub async fn remove_admin(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> Result<Json<RoleChangeResponse>, AppError> {
    let user = AdminService::set_role(&state, principal.id(), id, Role::Regular).await?;
    Ok(Json(RoleChangeResponse {
        success: true,
        message: "Admin rights removed".to_string(),
        user,
    }))
}

/// The five newest subscriptions
#[utoipa::path(
    get,
    path = "/api/v1/admin/recent-subscriptions",
    responses((status = 200, description = "Recent subscriptions", body = SubscriptionListResponse)),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn recent_subscriptions(
    State(state): State<AppState>,
) -> Result<Json<SubscriptionListResponse>, AppError> {
    let subscriptions = AdminService::recent_subscriptions(&state).await?;
    Ok(Json(SubscriptionListResponse {
        success: true,
        subscriptions,
        pagination: None,
    }))
}

/// The five newest contact requests
#[utoipa::path(
    get,
    path = "/api/v1/admin/recent-contacts",
    responses((status = 200, description = "Recent contacts", body = ContactListResponse)),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn recent_contacts(
    State(state): State<AppState>,
) -> Result<Json<ContactListResponse>, AppError> {
    let contacts = AdminService::recent_contacts(&state).await?;
    Ok(Json(ContactListResponse {
        success: true,
        contacts,
    }))
}

/// The five newest feedback entries
#[utoipa::path(
    get,
    path = "/api/v1/admin/recent-feedbacks",
    responses((status = 200, description = "Recent feedback", body = FeedbackListResponse)),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn recent_feedback(
    State(state): State<AppState>,
) -> Result<Json<FeedbackListResponse>, AppError> {
    let feedback = AdminService::recent_feedback(&state).await?;
    Ok(Json(FeedbackListResponse {
        success: true,
        feedback,
    }))
}
