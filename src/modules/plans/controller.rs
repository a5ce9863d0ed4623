use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use ironpass_core::AppError;
use ironpass_models::UpsertPlanRequest;
use tracing::instrument;
use uuid::Uuid;

use super::model::{PlanDetailResponse, PlanListResponse, PlanResponse, PlanSearch};
use super::service::PlanService;
use crate::middleware::Principal;
use crate::response::{CountResponse, ErrorResponse, MessageResponse};
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Create a plan
#[utoipa::path(
    post,
    path = "/api/v1/plan/create-plan",
    request_body = UpsertPlanRequest,
    responses(
        (status = 201, description = "Plan created", body = PlanResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 409, description = "Plan name already exists", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Plans"
)]
#[instrument(skip(state, dto))]
pub async fn create_plan(
    State(state): State<AppState>,
    principal: Principal,
    ValidatedJson(dto): ValidatedJson<UpsertPlanRequest>,
) -> Result<(StatusCode, Json<PlanResponse>), AppError> {
    let plan = PlanService::create(&state, principal.id(), dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(PlanResponse {
            success: true,
            message: "Plan created successfully".to_string(),
            plan,
        }),
    ))
}

/// Replace a plan's details
#[utoipa::path(
    put,
    path = "/api/v1/plan/update-plan/{id}",
    params(("id" = Uuid, Path, description = "Plan ID")),
    request_body = UpsertPlanRequest,
    responses(
        (status = 200, description = "Plan updated", body = PlanResponse),
        (status = 404, description = "Plan not found", body = ErrorResponse),
        (status = 409, description = "Plan name already exists", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Plans"
)]
#[instrument(skip(state, dto))]
pub async fn update_plan(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpsertPlanRequest>,
) -> Result<Json<PlanResponse>, AppError> {
    let plan = PlanService::update(&state, id, dto).await?;
    Ok(Json(PlanResponse {
        success: true,
        message: "Plan updated successfully".to_string(),
        plan,
    }))
}

/// Delete a plan and every subscription to it
#[utoipa::path(
    delete,
    path = "/api/v1/plan/delete-plan/{id}",
    params(("id" = Uuid, Path, description = "Plan ID")),
    responses(
        (status = 200, description = "Plan deleted", body = MessageResponse),
        (status = 404, description = "Plan not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Plans"
)]
#[instrument(skip(state))]
pub async fn delete_plan(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    PlanService::delete(&state, id).await?;
    Ok(Json(MessageResponse::ok("Plan deleted successfully")))
}

/// List plans, optionally filtered by name
#[utoipa::path(
    get,
    path = "/api/v1/plan/getall-plan",
    params(PlanSearch),
    responses(
        (status = 200, description = "Plans", body = PlanListResponse)
    ),
    tag = "Plans"
)]
#[instrument(skip(state))]
pub async fn get_all_plans(
    State(state): State<AppState>,
    Query(query): Query<PlanSearch>,
) -> Result<Json<PlanListResponse>, AppError> {
    let plans = PlanService::list(&state, query.term()).await?;
    Ok(Json(PlanListResponse {
        success: true,
        count: plans.len(),
        plans,
    }))
}

/// Fetch one plan
#[utoipa::path(
    get,
    path = "/api/v1/plan/get-plan/{id}",
    params(("id" = Uuid, Path, description = "Plan ID")),
    responses(
        (status = 200, description = "Plan", body = PlanDetailResponse),
        (status = 404, description = "Plan not found", body = ErrorResponse)
    ),
    tag = "Plans"
)]
#[instrument(skip(state))]
pub async fn get_plan(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PlanDetailResponse>, AppError> {
    let plan = PlanService::get(&state, id).await?;
    Ok(Json(PlanDetailResponse {
        success: true,
        plan,
    }))
}

/// Number of plans
#[utoipa::path(
    get,
    path = "/api/v1/plan/plan-count",
    responses((status = 200, description = "Plan count", body = CountResponse)),
    tag = "Plans"
)]
pub async fn plan_count(State(state): State<AppState>) -> Result<Json<CountResponse>, AppError> {
    let count = PlanService::count(&state).await?;
    Ok(Json(CountResponse::ok(count)))
}
