use anyhow::{Context, anyhow};
use ironpass_core::AppError;
use ironpass_db::StoreError;
use ironpass_models::{
    CreateSubscriptionRequest, NewSubscription, Subscription, UpdateSubscriptionRequest,
    subscriptions::{PAYMENT_STATUSES, SUBSCRIPTION_STATUSES},
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::middleware::Principal;
use crate::state::AppState;

fn subscription_not_found() -> AppError {
    AppError::not_found(anyhow!("Subscription not found"))
}

fn check_status(value: Option<&str>, allowed: &[&str], field: &str) -> Result<(), AppError> {
    match value {
        Some(v) if !allowed.contains(&v) => Err(AppError::bad_request(anyhow!(
            "{field} must be one of: {}",
            allowed.join(", ")
        ))),
        _ => Ok(()),
    }
}

pub struct SubscriptionService;

impl SubscriptionService {
    #[instrument(skip(state, dto))]
    pub async fn create(
        state: &AppState,
        user_id: Uuid,
        dto: CreateSubscriptionRequest,
    ) -> Result<Subscription, AppError> {
        check_status(dto.status.as_deref(), SUBSCRIPTION_STATUSES, "status")?;
        check_status(
            dto.payment_status.as_deref(),
            PAYMENT_STATUSES,
            "paymentStatus",
        )?;

        if state
            .plans
            .find_by_id(dto.plan_id)
            .await
            .context("Failed to load plan")?
            .is_none()
        {
            return Err(AppError::bad_request(anyhow!("Invalid plan ID")));
        }

        if state
            .subscriptions
            .find_by_owner(user_id)
            .await
            .context("Failed to check existing subscription")?
            .is_some()
        {
            return Err(AppError::bad_request(anyhow!(
                "You already have an active subscription"
            )));
        }

        let subscription = state
            .subscriptions
            .create(NewSubscription {
                user_id,
                plan_id: dto.plan_id,
                user_name: dto.user_name.trim().to_string(),
                plan_type: dto.plan_type,
                plan_amount: dto.plan_amount,
                start_date: dto.start_date,
                end_date: dto.end_date,
                status: dto.status.unwrap_or_else(|| "active".to_string()),
                payment_status: dto.payment_status.unwrap_or_else(|| "pending".to_string()),
            })
            .await
            .map_err(|e| match e {
                StoreError::Conflict(msg) => AppError::bad_request(anyhow!(msg)),
                other => AppError::internal(other),
            })?;

        info!(subscription_id = %subscription.id, "Subscription created");
        Ok(subscription)
    }

    /// Loads a subscription the caller owns, or any subscription for an admin.
    #[instrument(skip(state))]
    pub async fn get(
        state: &AppState,
        principal: Principal,
        id: Uuid,
    ) -> Result<Subscription, AppError> {
        let subscription = state
            .subscriptions
            .find_by_id(id)
            .await
            .context("Failed to load subscription")?
            .ok_or_else(subscription_not_found)?;

        if subscription.user_id != principal.id() && !principal.is_admin() {
            return Err(AppError::forbidden(anyhow!(
                "You can only access your own subscription"
            )));
        }
        Ok(subscription)
    }

    #[instrument(skip(state, dto))]
    pub async fn update(
        state: &AppState,
        principal: Principal,
        id: Uuid,
        dto: UpdateSubscriptionRequest,
    ) -> Result<Subscription, AppError> {
        check_status(dto.status.as_deref(), SUBSCRIPTION_STATUSES, "status")?;
        check_status(
            dto.payment_status.as_deref(),
            PAYMENT_STATUSES,
            "paymentStatus",
        )?;

        Self::get(state, principal, id).await?;

        let subscription = state
            .subscriptions
            .update(id, dto.into())
            .await
            .context("Failed to update subscription")?
            .ok_or_else(subscription_not_found)?;

        info!(subscription_id = %subscription.id, "Subscription updated");
        Ok(subscription)
    }

    #[instrument(skip(state))]
    pub async fn delete(state: &AppState, id: Uuid) -> Result<(), AppError> {
        let deleted = state
            .subscriptions
            .delete(id)
            .await
            .context("Failed to delete subscription")?;
        if !deleted {
            return Err(subscription_not_found());
        }

        info!(subscription_id = %id, "Subscription deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_status() {
        assert!(check_status(None, SUBSCRIPTION_STATUSES, "status").is_ok());
        assert!(check_status(Some("active"), SUBSCRIPTION_STATUSES, "status").is_ok());

        let err = check_status(Some("paused"), SUBSCRIPTION_STATUSES, "status").unwrap_err();
        assert_eq!(
            err.public_message(),
            "status must be one of: active, expired, cancelled"
        );
    }
}
