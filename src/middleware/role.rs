use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use super::{auth::Principal, error::AuthError};
use crate::state::AppState;

/// Confirms against the store that `principal` is currently an admin.
///
/// The role is re-read rather than taken from the token or from the
/// authentication step, so a promotion or demotion applies to the very next
/// request.
pub async fn check_admin(
    state: &AppState,
    principal: Option<Principal>,
) -> Result<Principal, AuthError> {
    let principal = principal.ok_or(AuthError::MissingCredential)?;

    match state.users.find_role(principal.id()).await {
        Ok(Some(role)) if role.is_admin() => Ok(Principal::new(principal.id(), role)),
        Ok(Some(_)) => Err(AuthError::InsufficientRole),
        Ok(None) => Err(AuthError::NotFound),
        Err(e) => Err(AuthError::Internal {
            message: "Error verifying admin status",
            detail: e.to_string(),
        }),
    }
}

/// Gate: the authenticated caller must hold the admin role.
///
/// Must be layered inside [`super::require_authenticated`].
pub async fn require_admin(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let principal = req.extensions().get::<Principal>().copied();

    match check_admin(&state, principal).await {
        Ok(principal) => {
            debug!(user_id = %principal.id(), "Admin access granted");
            req.extensions_mut().insert(principal);
            next.run(req).await
        }
        Err(err) => err.render(state.config.env),
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use ironpass_models::Role;

    use super::*;
    use crate::middleware::test_support::{insert_user, memory_state};

    #[tokio::test]
    async fn test_no_principal_is_missing_credential() {
        let (state, _) = memory_state();
        let err = check_admin(&state, None).await.unwrap_err();
        assert_eq!(err, AuthError::MissingCredential);
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_admin_passes_with_stored_role() {
        let (state, _) = memory_state();
        let admin = insert_user(&state, "boss@example.com", Role::Admin).await;

        // token still claims the old role
        let principal = check_admin(&state, Some(Principal::new(admin.id, Role::Regular)))
            .await
            .unwrap();
        assert_eq!(principal.id(), admin.id);
        assert_eq!(principal.role(), Role::Admin);
    }

    #[tokio::test]
    async fn test_demoted_admin_is_forbidden() {
        let (state, _) = memory_state();
        let user = insert_user(&state, "member@example.com", Role::Regular).await;

        let err = check_admin(&state, Some(Principal::new(user.id, Role::Admin)))
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::InsufficientRole);
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_deleted_account_is_not_found() {
        let (state, _) = memory_state();
        let admin = insert_user(&state, "gone@example.com", Role::Admin).await;
        assert!(state.users.delete(admin.id).await.unwrap());

        let err = check_admin(&state, Some(Principal::new(admin.id, Role::Admin)))
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::NotFound);
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_store_fault_is_internal() {
        let (state, store) = memory_state();
        let admin = insert_user(&state, "boss@example.com", Role::Admin).await;
        store.set_offline(true);

        let err = check_admin(&state, Some(Principal::new(admin.id, Role::Admin)))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AuthError::Internal {
                message: "Error verifying admin status",
                ..
            }
        ));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
