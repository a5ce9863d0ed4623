use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use super::{auth::Principal, error::AuthError};
use crate::state::AppState;

/// Succeeds when `principal` owns at least one subscription record.
pub async fn check_active_subscription(
    state: &AppState,
    principal: Option<Principal>,
) -> Result<(), AuthError> {
    let principal = principal.ok_or(AuthError::MissingCredential)?;

    match state.subscriptions.find_by_owner(principal.id()).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(AuthError::NoActiveSubscription),
        Err(e) => Err(AuthError::Internal {
            message: "Internal server error",
            detail: e.to_string(),
        }),
    }
}

/// Gate: the authenticated caller must hold a subscription.
pub async fn require_active_subscription(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let principal = req.extensions().get::<Principal>().copied();

    match check_active_subscription(&state, principal).await {
        Ok(()) => next.run(req).await,
        Err(err) => err.render(state.config.env),
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use ironpass_models::{NewPlan, NewSubscription, PlanFeatures, Role};

    use super::*;
    use crate::middleware::test_support::{insert_user, memory_state};

    #[tokio::test]
    async fn test_no_principal_is_missing_credential() {
        let (state, _) = memory_state();
        let err = check_active_subscription(&state, None).await.unwrap_err();
        assert_eq!(err, AuthError::MissingCredential);
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_member_without_subscription_is_forbidden() {
        let (state, _) = memory_state();
        let user = insert_user(&state, "member@example.com", Role::Regular).await;

        let err = check_active_subscription(&state, Some(Principal::new(user.id, user.role)))
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::NoActiveSubscription);
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_subscriber_passes() {
        let (state, _) = memory_state();
        let user = insert_user(&state, "member@example.com", Role::Regular).await;
        let plan = state
            .plans
            .create(NewPlan {
                plan_name: "Gold".to_string(),
                monthly_plan_amount: 30.0,
                yearly_plan_amount: 300.0,
                is_popular: false,
                is_active: true,
                features: PlanFeatures::default(),
                created_by: user.id,
            })
            .await
            .unwrap();
        state
            .subscriptions
            .create(NewSubscription {
                user_id: user.id,
                plan_id: plan.id,
                user_name: user.name.clone(),
                plan_type: "monthly".to_string(),
                plan_amount: plan.monthly_plan_amount,
                start_date: None,
                end_date: None,
                status: "active".to_string(),
                payment_status: "paid".to_string(),
            })
            .await
            .unwrap();

        check_active_subscription(&state, Some(Principal::new(user.id, user.role)))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_store_fault_is_internal() {
        let (state, store) = memory_state();
        let user = insert_user(&state, "member@example.com", Role::Regular).await;
        store.set_offline(true);

        let err = check_active_subscription(&state, Some(Principal::new(user.id, user.role)))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AuthError::Internal {
                message: "Internal server error",
                ..
            }
        ));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
