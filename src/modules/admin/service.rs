//! Admin dashboard queries and member management.

use anyhow::{Context, anyhow};
use ironpass_core::{AppError, ListQuery};
use ironpass_models::{
    Contact, Feedback, RevenueSummary, Role, Subscription, UserSummary,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::state::AppState;

/// Number of entries returned by the "recent activity" endpoints.
pub const RECENT_LIMIT: i64 = 5;

fn user_not_found() -> AppError {
    AppError::not_found(anyhow!("User not found"))
}

/// Dashboard totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tally {
    Users,
    Plans,
    Subscriptions,
    Contacts,
    Feedback,
}

pub struct AdminService;

impl AdminService {
    pub async fn count(state: &AppState, tally: Tally) -> Result<i64, AppError> {
        let count = match tally {
            Tally::Users => state.users.count().await,
            Tally::Plans => state.plans.count().await,
            Tally::Subscriptions => state.subscriptions.count().await,
            Tally::Contacts => state.contacts.count().await,
            Tally::Feedback => state.feedback.count().await,
        }
        .with_context(|| format!("Failed to count {tally:?}"))?;
        Ok(count)
    }

    pub async fn revenue(state: &AppState) -> Result<RevenueSummary, AppError> {
        let revenue = state
            .subscriptions
            .revenue()
            .await
            .context("Failed to compute revenue")?;
        Ok(revenue)
    }

    #[instrument(skip(state))]
    pub async fn list_users(
        state: &AppState,
        query: &ListQuery,
    ) -> Result<(Vec<UserSummary>, i64), AppError> {
        let (users, total) = state
            .users
            .list(query.search(), query.limit(), query.offset())
            .await
            .context("Failed to list users")?;
        Ok((users.iter().map(|u| u.summary()).collect(), total))
    }

    #[instrument(skip(state))]
    pub async fn list_subscriptions(
        state: &AppState,
        query: &ListQuery,
    ) -> Result<(Vec<Subscription>, i64), AppError> {
        let page = state
            .subscriptions
            .list(query.search(), query.limit(), query.offset())
            .await
            .context("Failed to list subscriptions")?;
        Ok(page)
    }

    #[instrument(skip(state))]
    pub async fn delete_user(state: &AppState, acting: Uuid, target: Uuid) -> Result<(), AppError> {
        if acting == target {
            return Err(AppError::bad_request(anyhow!(
                "You cannot delete your own account"
            )));
        }

        let deleted = state
            .users
            .delete(target)
            .await
            .context("Failed to delete user")?;
        if !deleted {
            return Err(user_not_found());
        }

        info!(user_id = %target, "User deleted by admin");
        Ok(())
    }

    #[instrument(skip(state))]
    pub async fn set_role(
        state: &AppState,
        acting: Uuid,
        target: Uuid,
        role: Role,
    ) -> Result<UserSummary, AppError> {
        if acting == target && !role.is_admin() {
            return Err(AppError::bad_request(anyhow!(
                "You cannot remove your own admin privileges"
            )));
        }

        let user = state
            .users
            .set_role(target, role)
            .await
            .context("Failed to change role")?
            .ok_or_else(user_not_found)?;

        info!(user_id = %target, role = ?role, "Role changed");
        Ok(user.summary())
    }

    pub async fn recent_subscriptions(state: &AppState) -> Result<Vec<Subscription>, AppError> {
        let subscriptions = state
            .subscriptions
            .recent(RECENT_LIMIT)
            .await
            .context("Failed to load recent subscriptions")?;
        Ok(subscriptions)
    }

    pub async fn recent_contacts(state: &AppState) -> Result<Vec<Contact>, AppError> {
        let contacts = state
            .contacts
            .recent(RECENT_LIMIT)
            .await
            .context("Failed to load recent contacts")?;
        Ok(contacts)
    }

    pub async fn recent_feedback(state: &AppState) -> Result<Vec<Feedback>, AppError> {
        let feedback = state
            .feedback
            .recent(RECENT_LIMIT)
            .await
            .context("Failed to load recent feedback")?;
        Ok(feedback)
    }
}
