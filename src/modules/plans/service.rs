use anyhow::{Context, anyhow};
use ironpass_core::AppError;
use ironpass_db::StoreError;
use ironpass_models::{Plan, UpsertPlanRequest};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::state::AppState;

const DUPLICATE_NAME: &str = "Plan name already exists";

fn plan_not_found() -> AppError {
    AppError::not_found(anyhow!("Plan not found"))
}

fn map_conflict(err: StoreError) -> AppError {
    match err {
        StoreError::Conflict(msg) => AppError::conflict(anyhow!(msg)),
        other => AppError::internal(other),
    }
}

fn check_amounts(dto: &UpsertPlanRequest) -> Result<(), AppError> {
    if !dto.yearly_within_bounds() {
        return Err(AppError::bad_request(anyhow!(
            "Yearly amount cannot exceed 12 times the monthly amount"
        )));
    }
    Ok(())
}

pub struct PlanService;

impl PlanService {
    #[instrument(skip(state, dto), fields(plan_name = %dto.plan_name))]
    pub async fn create(
        state: &AppState,
        created_by: Uuid,
        dto: UpsertPlanRequest,
    ) -> Result<Plan, AppError> {
        check_amounts(&dto)?;

        if state
            .plans
            .find_by_name_ci(&dto.plan_name)
            .await
            .context("Failed to check plan name")?
            .is_some()
        {
            return Err(AppError::conflict(anyhow!(DUPLICATE_NAME)));
        }

        let plan = state
            .plans
            .create(dto.into_new_plan(created_by))
            .await
            .map_err(map_conflict)?;

        info!(plan_id = %plan.id, "Plan created");
        Ok(plan)
    }

    #[instrument(skip(state, dto))]
    pub async fn update(
        state: &AppState,
        id: Uuid,
        dto: UpsertPlanRequest,
    ) -> Result<Plan, AppError> {
        check_amounts(&dto)?;

        let existing = state
            .plans
            .find_by_id(id)
            .await
            .context("Failed to load plan")?
            .ok_or_else(plan_not_found)?;

        if let Some(other) = state
            .plans
            .find_by_name_ci(&dto.plan_name)
            .await
            .context("Failed to check plan name")?
        {
            if other.id != id {
                return Err(AppError::conflict(anyhow!(DUPLICATE_NAME)));
            }
        }

        let plan = state
            .plans
            .update(id, dto.into_new_plan(existing.created_by))
            .await
            .map_err(map_conflict)?
            .ok_or_else(plan_not_found)?;

        info!(plan_id = %plan.id, "Plan updated");
        Ok(plan)
    }

    #[instrument(skip(state))]
    pub async fn delete(state: &AppState, id: Uuid) -> Result<(), AppError> {
        let deleted = state
            .plans
            .delete(id)
            .await
            .context("Failed to delete plan")?;
        if !deleted {
            return Err(plan_not_found());
        }

        info!(plan_id = %id, "Plan deleted along with its subscriptions");
        Ok(())
    }

    #[instrument(skip(state))]
    pub async fn list(state: &AppState, search: Option<&str>) -> Result<Vec<Plan>, AppError> {
        let plans = state
            .plans
            .list(search)
            .await
            .context("Failed to list plans")?;
        Ok(plans)
    }

    #[instrument(skip(state))]
    pub async fn get(state: &AppState, id: Uuid) -> Result<Plan, AppError> {
        state
            .plans
            .find_by_id(id)
            .await
            .context("Failed to load plan")?
            .ok_or_else(plan_not_found)
    }

    pub async fn count(state: &AppState) -> Result<i64, AppError> {
        let count = state.plans.count().await.context("Failed to count plans")?;
        Ok(count)
    }
}
