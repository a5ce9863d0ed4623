use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use ironpass_core::AppError;
use ironpass_models::{CreateFeedbackRequest, UpdateFeedbackRequest};
use tracing::instrument;
use uuid::Uuid;

use super::model::{FeedbackListResponse, FeedbackResponse, FeedbackStatsResponse};
use super::service::FeedbackService;
use crate::middleware::Principal;
use crate::response::{ErrorResponse, MessageResponse};
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Submit feedback
#[utoipa::path(
    post,
    path = "/api/v1/feedback/create-feedback",
    request_body = CreateFeedbackRequest,
    responses(
        (status = 201, description = "Feedback saved", body = FeedbackResponse),
        (status = 400, description = "Validation error or feedback already submitted", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Feedback"
)]
#[instrument(skip(state, dto))]
pub async fn create_feedback(
    State(state): State<AppState>,
    principal: Principal,
    ValidatedJson(dto): ValidatedJson<CreateFeedbackRequest>,
) -> Result<(StatusCode, Json<FeedbackResponse>), AppError> {
    let feedback = FeedbackService::create(&state, principal.id(), dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(FeedbackResponse {
            success: true,
            message: "Feedback submitted successfully".to_string(),
            feedback,
        }),
    ))
}

/// List all feedback
#[utoipa::path(
    get,
    path = "/api/v1/feedback/getall-feedback",
    responses((status = 200, description = "All feedback", body = FeedbackListResponse)),
    tag = "Feedback"
)]
pub async fn get_all_feedback(
    State(state): State<AppState>,
) -> Result<Json<FeedbackListResponse>, AppError> {
    let feedback = FeedbackService::list(&state).await?;
    Ok(Json(FeedbackListResponse {
        success: true,
        feedback,
    }))
}

/// The caller's feedback
#[utoipa::path(
    get,
    path = "/api/v1/feedback/get-feedback",
    responses(
        (status = 200, description = "Caller's feedback", body = FeedbackListResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Feedback"
)]
#[instrument(skip(state))]
pub async fn get_feedback(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<Json<FeedbackListResponse>, AppError> {
    let feedback = FeedbackService::list_own(&state, principal.id()).await?;
    Ok(Json(FeedbackListResponse {
        success: true,
        feedback,
    }))
}

/// Edit feedback (owner or admin)
#[utoipa::path(
    put,
    path = "/api/v1/feedback/update-feedback/{id}",
    params(("id" = Uuid, Path, description = "Feedback ID")),
    request_body = UpdateFeedbackRequest,
    responses(
        (status = 200, description = "Feedback updated", body = FeedbackResponse),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "Feedback not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Feedback"
)]
#[instrument(skip(state, dto))]
pub async fn update_feedback(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateFeedbackRequest>,
) -> Result<Json<FeedbackResponse>, AppError> {
    let feedback = FeedbackService::update(&state, principal, id, dto).await?;
    Ok(Json(FeedbackResponse {
        success: true,
        message: "Feedback updated successfully".to_string(),
        feedback,
    }))
}

/// Delete feedback (owner or admin)
#[utoipa::path(
    delete,
    path = "/api/v1/feedback/delete-feedback/{id}",
    params(("id" = Uuid, Path, description = "Feedback ID")),
    responses(
        (status = 200, description = "Feedback deleted", body = MessageResponse),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "Feedback not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Feedback"
)]
#[instrument(skip(state))]
pub async fn delete_feedback(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    FeedbackService::delete(&state, principal, id).await?;
    Ok(Json(MessageResponse::ok("Feedback deleted successfully")))
}

/// Rating distribution
#[utoipa::path(
    get,
    path = "/api/v1/feedback/stats",
    responses(
        (status = 200, description = "Per-rating counts and percentages", body = FeedbackStatsResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Feedback"
)]
pub async fn feedback_stats(
    State(state): State<AppState>,
) -> Result<Json<FeedbackStatsResponse>, AppError> {
    let (total, stats) = FeedbackService::stats(&state).await?;
    Ok(Json(FeedbackStatsResponse {
        success: true,
        total,
        stats,
    }))
}
