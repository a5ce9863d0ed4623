use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
};
use axum_extra::extract::CookieJar;
use ironpass_auth::{extract_credential, removal_cookie, session_cookie};
use ironpass_core::AppError;
use ironpass_models::{
    ForgotPasswordRequest, LoginRequest, LoginResponse, RegisterRequest, UpdateProfileRequest,
};
use tracing::instrument;

use super::model::{SessionCheckResponse, UserPlanResponse, UserPlansResponse, UserResponse};
use super::service::AuthService;
use crate::middleware::Principal;
use crate::modules::feedback::model::FeedbackListResponse;
use crate::response::{CountResponse, ErrorResponse, MessageResponse};
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Register a new member
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = UserResponse),
        (status = 400, description = "Validation error or email already registered", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let user = AuthService::register(&state, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            success: true,
            message: "User registered successfully".to_string(),
            user,
        }),
    ))
}

/// Log in and receive a session token
///
/// The token is returned in the body and also set as the HttpOnly `token` cookie.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Invalid email or password", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, jar, dto))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), AppError> {
    let outcome = AuthService::login(&state, dto).await?;
    let cookie = session_cookie(
        outcome.token.clone(),
        state.tokens.ttl_secs(),
        state.config.env.is_production(),
    );

    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            success: true,
            message: "Login successfully".to_string(),
            user: outcome.user,
            token: outcome.token,
        }),
    ))
}

/// Log out by clearing the session cookie
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    responses(
        (status = 200, description = "Logged out", body = MessageResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn logout(headers: HeaderMap, jar: CookieJar) -> (CookieJar, Json<MessageResponse>) {
    let message = if extract_credential(&headers).is_some() {
        "Logged out successfully"
    } else {
        "Already logged out"
    };
    (jar.remove(removal_cookie()), Json(MessageResponse::ok(message)))
}

/// Reset a password by email
#[utoipa::path(
    post,
    path = "/api/v1/auth/forgot-password",
    request_body = ForgotPasswordRequest,
    responses(
        (status = 200, description = "Password reset", body = MessageResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn forgot_password(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<ForgotPasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    AuthService::forgot_password(&state, dto).await?;
    Ok(Json(MessageResponse::ok("Password Reset Successfully")))
}

/// Check that the caller holds a valid session
#[utoipa::path(
    get,
    path = "/api/v1/auth/user-auth",
    responses(
        (status = 200, description = "Session is valid", body = SessionCheckResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip(state))]
pub async fn user_auth(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<Json<SessionCheckResponse>, AppError> {
    let user = AuthService::current_user(&state, principal.id()).await?;
    Ok(Json(SessionCheckResponse { ok: true, user }))
}

/// Check that the caller holds a valid admin session
#[utoipa::path(
    get,
    path = "/api/v1/auth/admin-auth",
    responses(
        (status = 200, description = "Caller is an admin", body = SessionCheckResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip(state))]
pub async fn admin_auth(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<Json<SessionCheckResponse>, AppError> {
    let user = AuthService::current_user(&state, principal.id()).await?;
    Ok(Json(SessionCheckResponse { ok: true, user }))
}

/// Update the caller's profile
#[utoipa::path(
    put,
    path = "/api/v1/auth/user-profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = UserResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn update_profile(
    State(state): State<AppState>,
    principal: Principal,
    ValidatedJson(dto): ValidatedJson<UpdateProfileRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let user = AuthService::update_profile(&state, principal.id(), dto).await?;
    Ok(Json(UserResponse {
        success: true,
        message: "Profile updated successfully".to_string(),
        user,
    }))
}

/// The caller's subscription and its plan
#[utoipa::path(
    get,
    path = "/api/v1/auth/get-user-plan",
    responses(
        (status = 200, description = "Caller's subscription", body = UserPlanResponse),
        (status = 404, description = "No subscription found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip(state))]
pub async fn get_user_plan(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<Json<UserPlanResponse>, AppError> {
    let subscription = AuthService::user_plan(&state, principal.id()).await?;
    Ok(Json(UserPlanResponse {
        success: true,
        subscription,
    }))
}

/// Every subscription the caller holds
#[utoipa::path(
    get,
    path = "/api/v1/auth/get-all-user-plan",
    responses(
        (status = 200, description = "Caller's subscriptions", body = UserPlansResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip(state))]
pub async fn get_all_user_plans(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<Json<UserPlansResponse>, AppError> {
    let subscriptions = AuthService::user_plans(&state, principal.id()).await?;
    Ok(Json(UserPlansResponse {
        success: true,
        subscriptions,
    }))
}

/// Every feedback entry the caller wrote
#[utoipa::path(
    get,
    path = "/api/v1/auth/get-all-user-feedback",
    responses(
        (status = 200, description = "Caller's feedback", body = FeedbackListResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip(state))]
pub async fn get_all_user_feedback(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<Json<FeedbackListResponse>, AppError> {
    let feedback = AuthService::user_feedback(&state, principal.id()).await?;
    Ok(Json(FeedbackListResponse {
        success: true,
        feedback,
    }))
}

/// Number of registered members
#[utoipa::path(
    get,
    path = "/api/v1/auth/user-count",
    responses(
        (status = 200, description = "Member count", body = CountResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
pub async fn user_count(State(state): State<AppState>) -> Result<Json<CountResponse>, AppError> {
    let count = AuthService::user_count(&state).await?;
    Ok(Json(CountResponse::ok(count)))
}
