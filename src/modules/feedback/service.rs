use anyhow::{Context, anyhow};
use ironpass_core::AppError;
use ironpass_db::StoreError;
use ironpass_models::{
    CreateFeedbackRequest, Feedback, NewFeedback, RatingStat, UpdateFeedbackRequest,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::middleware::Principal;
use crate::state::AppState;

fn feedback_not_found() -> AppError {
    AppError::not_found(anyhow!("Feedback not found"))
}

pub struct FeedbackService;

impl FeedbackService {
    #[instrument(skip(state, dto))]
    pub async fn create(
        state: &AppState,
        user_id: Uuid,
        dto: CreateFeedbackRequest,
    ) -> Result<Feedback, AppError> {
        if state
            .feedback
            .find_by_owner(user_id)
            .await
            .context("Failed to check existing feedback")?
            .is_some()
        {
            return Err(AppError::bad_request(anyhow!(
                "You have already submitted feedback"
            )));
        }

        let feedback = state
            .feedback
            .create(NewFeedback {
                user_id,
                message: dto.message.trim().to_string(),
                rating: dto.rating,
            })
            .await
            .map_err(|e| match e {
                StoreError::Conflict(msg) => AppError::bad_request(anyhow!(msg)),
                other => AppError::internal(other),
            })?;

        info!(feedback_id = %feedback.id, "Feedback submitted");
        Ok(feedback)
    }

    pub async fn list(state: &AppState) -> Result<Vec<Feedback>, AppError> {
        let feedback = state
            .feedback
            .list()
            .await
            .context("Failed to list feedback")?;
        Ok(feedback)
    }

    #[instrument(skip(state))]
    pub async fn list_own(state: &AppState, user_id: Uuid) -> Result<Vec<Feedback>, AppError> {
        let feedback = state
            .feedback
            .list_by_owner(user_id)
            .await
            .context("Failed to list feedback")?;
        Ok(feedback)
    }

    /// Loads feedback that `principal` may modify: their own, or any for an admin.
    async fn load_modifiable(
        state: &AppState,
        principal: Principal,
        id: Uuid,
    ) -> Result<Feedback, AppError> {
        let feedback = state
            .feedback
            .find_by_id(id)
            .await
            .context("Failed to load feedback")?
            .ok_or_else(feedback_not_found)?;

        if feedback.user_id != principal.id() && !principal.is_admin() {
            return Err(AppError::forbidden(anyhow!(
                "You can only modify your own feedback"
            )));
        }
        Ok(feedback)
    }

    #[instrument(skip(state, dto))]
    pub async fn update(
        state: &AppState,
        principal: Principal,
        id: Uuid,
        dto: UpdateFeedbackRequest,
    ) -> Result<Feedback, AppError> {
        Self::load_modifiable(state, principal, id).await?;

        let feedback = state
            .feedback
            .update(id, dto.message.map(|m| m.trim().to_string()), dto.rating)
            .await
            .context("Failed to update feedback")?
            .ok_or_else(feedback_not_found)?;

        info!(feedback_id = %feedback.id, "Feedback updated");
        Ok(feedback)
    }

    #[instrument(skip(state))]
    pub async fn delete(state: &AppState, principal: Principal, id: Uuid) -> Result<(), AppError> {
        Self::load_modifiable(state, principal, id).await?;

        let deleted = state
            .feedback
            .delete(id)
            .await
            .context("Failed to delete feedback")?;
        if !deleted {
            return Err(feedback_not_found());
        }

        info!(feedback_id = %id, "Feedback deleted");
        Ok(())
    }

    /// Total feedback count and the share of each rating.
    pub async fn stats(state: &AppState) -> Result<(i64, Vec<RatingStat>), AppError> {
        let counts = state
            .feedback
            .rating_stats()
            .await
            .context("Failed to compute feedback stats")?;
        let total = counts.iter().map(|(_, count)| count).sum();
        Ok((total, RatingStat::from_counts(counts)))
    }
}
