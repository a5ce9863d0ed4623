use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, Method, request::Parts},
    middleware::Next,
    response::Response,
};
use ironpass_auth::{TokenError, extract_credential};
use ironpass_db::UserStore;
use ironpass_models::Role;
use tracing::debug;
use uuid::Uuid;

use super::error::AuthError;
use crate::state::AppState;

/// The authenticated caller, attached to request extensions by
/// [`require_authenticated`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    id: Uuid,
    role: Role,
}

impl Principal {
    pub fn new(id: Uuid, role: Role) -> Self {
        Self { id, role }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .copied()
            .ok_or(AuthError::MissingCredential)
    }
}

/// Maps a verified subject to the member's current record.
pub async fn resolve(users: &dyn UserStore, id: Uuid) -> Result<Principal, AuthError> {
    match users.find_by_id(id).await {
        Ok(Some(user)) => Ok(Principal::new(user.id, user.role)),
        Ok(None) => Err(AuthError::PrincipalGone),
        Err(e) => Err(AuthError::AuthenticationFailed {
            detail: e.to_string(),
        }),
    }
}

/// Runs credential extraction, token verification and identity resolution.
pub async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<Principal, AuthError> {
    let raw = extract_credential(headers).ok_or(AuthError::MissingCredential)?;

    let claims = state.tokens.verify(&raw).map_err(|e| match e {
        TokenError::Expired => AuthError::SessionExpired,
        TokenError::Malformed => AuthError::InvalidCredential,
        TokenError::Encoding(detail) => AuthError::AuthenticationFailed { detail },
    })?;

    let id = claims.subject_id().ok_or(AuthError::MalformedClaims)?;

    resolve(state.users.as_ref(), id).await
}

/// Gate: the request must carry a valid token for an existing member.
///
/// CORS preflight (`OPTIONS`) requests pass through untouched.
pub async fn require_authenticated(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    if req.method() == Method::OPTIONS {
        return next.run(req).await;
    }

    match authenticate(&state, req.headers()).await {
        Ok(principal) => {
            debug!(user_id = %principal.id(), "Request authenticated");
            req.extensions_mut().insert(principal);
            next.run(req).await
        }
        Err(err) => err.render(state.config.env),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_admin_follows_role() {
        let id = Uuid::new_v4();
        assert!(Principal::new(id, Role::Admin).is_admin());
        assert!(!Principal::new(id, Role::Regular).is_admin());
    }

    #[tokio::test]
    async fn test_extractor_without_principal_is_missing_credential() {
        let (mut parts, _) = axum::http::Request::new(()).into_parts();
        let result = Principal::from_request_parts(&mut parts, &()).await;
        assert_eq!(result.unwrap_err(), AuthError::MissingCredential);
    }

    #[tokio::test]
    async fn test_extractor_reads_extension() {
        let (mut parts, _) = axum::http::Request::new(()).into_parts();
        let principal = Principal::new(Uuid::new_v4(), Role::Regular);
        parts.extensions.insert(principal);

        let extracted = Principal::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(extracted, principal);
    }
}
