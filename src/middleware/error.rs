use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use ironpass_config::AppEnv;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Why a gate refused a request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Authentication required. Please log in.")]
    MissingCredential,
    #[error("Invalid or expired token. Please log in again.")]
    InvalidCredential,
    #[error("Session expired. Please log in again.")]
    SessionExpired,
    #[error("Invalid token format: missing user ID")]
    MalformedClaims,
    #[error("User not found. Please log in again.")]
    PrincipalGone,
    /// An unexpected fault while authenticating.
    #[error("Authentication failed")]
    AuthenticationFailed { detail: String },
    #[error("Admin access required")]
    InsufficientRole,
    #[error("You need an active subscription to perform this action")]
    NoActiveSubscription,
    #[error("User not found")]
    NotFound,
    #[error("{message}")]
    Internal {
        message: &'static str,
        detail: String,
    },
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::MissingCredential
            | AuthError::InvalidCredential
            | AuthError::SessionExpired
            | AuthError::MalformedClaims
            | AuthError::PrincipalGone
            | AuthError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            AuthError::InsufficientRole | AuthError::NoActiveSubscription => StatusCode::FORBIDDEN,
            AuthError::NotFound => StatusCode::NOT_FOUND,
            AuthError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            AuthError::MissingCredential => "missing_credential",
            AuthError::InvalidCredential => "invalid_credential",
            AuthError::SessionExpired => "session_expired",
            AuthError::MalformedClaims => "malformed_claims",
            AuthError::PrincipalGone => "principal_gone",
            AuthError::AuthenticationFailed { .. } => "authentication_failed",
            AuthError::InsufficientRole => "insufficient_role",
            AuthError::NoActiveSubscription => "no_active_subscription",
            AuthError::NotFound => "not_found",
            AuthError::Internal { .. } => "internal",
        }
    }

    fn detail(&self) -> Option<&str> {
        match self {
            AuthError::AuthenticationFailed { detail } | AuthError::Internal { detail, .. } => {
                Some(detail)
            }
            _ => None,
        }
    }

    /// Renders the rejection. Fault details are only echoed outside production.
    pub fn render(self, env: AppEnv) -> Response {
        let status = self.status();
        match self.detail() {
            Some(detail) => error!(kind = self.kind(), status = status.as_u16(), %detail, "Request rejected"),
            None => warn!(kind = self.kind(), status = status.as_u16(), "Request rejected"),
        }

        let mut body = json!({
            "success": false,
            "message": self.to_string(),
        });
        if !env.is_production() {
            if let Some(detail) = self.detail() {
                body["error"] = json!(detail);
            }
        }

        (status, Json(body)).into_response()
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.render(AppEnv::Production)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_statuses() {
        assert_eq!(AuthError::MissingCredential.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::SessionExpired.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::InsufficientRole.status(), StatusCode::FORBIDDEN);
        assert_eq!(AuthError::NoActiveSubscription.status(), StatusCode::FORBIDDEN);
        assert_eq!(AuthError::NotFound.status(), StatusCode::NOT_FOUND);
        let internal = AuthError::Internal {
            message: "Internal server error",
            detail: "boom".to_string(),
        };
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_expired_wording_differs_from_invalid() {
        assert_ne!(
            AuthError::SessionExpired.to_string(),
            AuthError::InvalidCredential.to_string()
        );
    }

    #[tokio::test]
    async fn test_detail_only_in_development() {
        let err = || AuthError::AuthenticationFailed {
            detail: "store unavailable".to_string(),
        };

        let dev = body_json(err().render(AppEnv::Development)).await;
        assert_eq!(dev["success"], false);
        assert_eq!(dev["message"], "Authentication failed");
        assert_eq!(dev["error"], "store unavailable");

        let prod = body_json(err().render(AppEnv::Production)).await;
        assert_eq!(prod["message"], "Authentication failed");
        assert!(prod.get("error").is_none());
    }

    #[tokio::test]
    async fn test_plain_denial_has_no_detail() {
        let body = body_json(AuthError::InsufficientRole.render(AppEnv::Development)).await;
        assert_eq!(body["message"], "Admin access required");
        assert!(body.get("error").is_none());
    }
}
