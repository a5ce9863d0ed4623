use anyhow::{Context, anyhow};
use ironpass_core::{AppError, hash_password, verify_password};
use ironpass_db::StoreError;
use ironpass_models::{
    ForgotPasswordRequest, Feedback, LoginRequest, NewUser, ProfileChanges, RegisterRequest, Role,
    SubscriptionWithPlan, UpdateProfileRequest, UserSummary, is_valid_contact,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::state::AppState;

const INVALID_LOGIN: &str = "Invalid email or password";
const INVALID_CONTACT: &str = "Contact must be a 10 digit number";

/// A successful login: the member and their freshly issued token.
pub struct LoginOutcome {
    pub user: UserSummary,
    pub token: String,
}

pub struct AuthService;

impl AuthService {
    #[instrument(skip(state, dto), fields(email = %dto.email))]
    pub async fn register(state: &AppState, dto: RegisterRequest) -> Result<UserSummary, AppError> {
        if !is_valid_contact(&dto.contact) {
            return Err(AppError::bad_request(anyhow!(INVALID_CONTACT)));
        }

        let email = dto.email.trim().to_lowercase();
        if state
            .users
            .find_by_email(&email)
            .await
            .context("Failed to check existing user")?
            .is_some()
        {
            return Err(AppError::bad_request(anyhow!("User already registered")));
        }

        let new_user = NewUser {
            name: dto.name.trim().to_string(),
            email,
            password_hash: hash_password(&dto.password)?,
            city: dto.city.trim().to_string(),
            contact: dto.contact,
            role: Role::from_input(dto.role.as_ref()),
        };

        let user = state.users.create(new_user).await.map_err(|e| match e {
            StoreError::Conflict(msg) => AppError::bad_request(anyhow!(msg)),
            other => AppError::internal(other),
        })?;

        info!(user_id = %user.id, "User registered");
        Ok(user.summary())
    }

    #[instrument(skip(state, dto), fields(email = %dto.email))]
    pub async fn login(state: &AppState, dto: LoginRequest) -> Result<LoginOutcome, AppError> {
        let Some(creds) = state
            .users
            .find_credentials_by_email(dto.email.trim())
            .await
            .context("Failed to load credentials")?
        else {
            warn!("Login attempt for unknown email");
            return Err(AppError::unauthorized(anyhow!(INVALID_LOGIN)));
        };

        if !verify_password(&dto.password, &creds.password_hash)? {
            warn!(user_id = %creds.id, "Login attempt with wrong password");
            return Err(AppError::unauthorized(anyhow!(INVALID_LOGIN)));
        }

        let user = state
            .users
            .find_by_id(creds.id)
            .await
            .context("Failed to load user")?
            .ok_or_else(|| AppError::unauthorized(anyhow!(INVALID_LOGIN)))?;

        let token = state
            .tokens
            .issue(user.id, user.role)
            .context("Failed to issue token")?;

        info!(user_id = %user.id, "User logged in");
        Ok(LoginOutcome {
            user: user.summary(),
            token,
        })
    }

    #[instrument(skip(state, dto), fields(email = %dto.email))]
    pub async fn forgot_password(
        state: &AppState,
        dto: ForgotPasswordRequest,
    ) -> Result<(), AppError> {
        let user = state
            .users
            .find_by_email(dto.email.trim())
            .await
            .context("Failed to look up user")?
            .ok_or_else(|| AppError::not_found(anyhow!("User not found")))?;

        let hash = hash_password(&dto.new_password)?;
        state
            .users
            .update_password(user.id, &hash)
            .await
            .context("Failed to update password")?;

        info!(user_id = %user.id, "Password reset");
        Ok(())
    }

    #[instrument(skip(state))]
    pub async fn current_user(state: &AppState, user_id: Uuid) -> Result<UserSummary, AppError> {
        let user = state
            .users
            .find_by_id(user_id)
            .await
            .context("Failed to load user")?
            .ok_or_else(|| AppError::not_found(anyhow!("User not found")))?;
        Ok(user.summary())
    }

    #[instrument(skip(state, dto))]
    pub async fn update_profile(
        state: &AppState,
        user_id: Uuid,
        dto: UpdateProfileRequest,
    ) -> Result<UserSummary, AppError> {
        if let Some(contact) = &dto.contact {
            if !is_valid_contact(contact) {
                return Err(AppError::bad_request(anyhow!(INVALID_CONTACT)));
            }
        }

        let password_hash = match dto.password.as_deref() {
            Some(password) => Some(hash_password(password)?),
            None => None,
        };

        let changes = ProfileChanges {
            name: dto.name.map(|n| n.trim().to_string()),
            password_hash,
            city: dto.city.map(|c| c.trim().to_string()),
            contact: dto.contact,
        };

        let user = state
            .users
            .update_profile(user_id, changes)
            .await
            .context("Failed to update profile")?
            .ok_or_else(|| AppError::not_found(anyhow!("User not found")))?;

        info!(user_id = %user.id, "Profile updated");
        Ok(user.summary())
    }

    /// The caller's subscription together with the plan it refers to.
    #[instrument(skip(state))]
    pub async fn user_plan(
        state: &AppState,
        user_id: Uuid,
    ) -> Result<SubscriptionWithPlan, AppError> {
        let subscription = state
            .subscriptions
            .find_by_owner(user_id)
            .await
            .context("Failed to load subscription")?
            .ok_or_else(|| AppError::not_found(anyhow!("No subscription found")))?;

        let plan = state
            .plans
            .find_by_id(subscription.plan_id)
            .await
            .context("Failed to load plan")?;

        Ok(SubscriptionWithPlan { subscription, plan })
    }

    #[instrument(skip(state))]
    pub async fn user_plans(
        state: &AppState,
        user_id: Uuid,
    ) -> Result<Vec<SubscriptionWithPlan>, AppError> {
        let subscriptions = state
            .subscriptions
            .list_by_owner(user_id)
            .await
            .context("Failed to load subscriptions")?;

        let mut result = Vec::with_capacity(subscriptions.len());
        for subscription in subscriptions {
            let plan = state
                .plans
                .find_by_id(subscription.plan_id)
                .await
                .context("Failed to load plan")?;
            result.push(SubscriptionWithPlan { subscription, plan });
        }
        Ok(result)
    }

    #[instrument(skip(state))]
    pub async fn user_feedback(state: &AppState, user_id: Uuid) -> Result<Vec<Feedback>, AppError> {
        let feedback = state
            .feedback
            .list_by_owner(user_id)
            .await
            .context("Failed to load feedback")?;
        Ok(feedback)
    }

    pub async fn user_count(state: &AppState) -> Result<i64, AppError> {
        let count = state.users.count().await.context("Failed to count users")?;
        Ok(count)
    }
}
