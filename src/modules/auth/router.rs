use axum::{
    Router,
    routing::{get, post, put},
};

use super::controller::{
    admin_auth, forgot_password, get_all_user_feedback, get_all_user_plans, get_user_plan, login,
    logout, register, update_profile, user_auth, user_count,
};
use crate::middleware::{admin_only, authenticated};
use crate::state::AppState;

pub fn init_auth_router(state: &AppState) -> Router<AppState> {
    let member = authenticated(
        Router::new()
            .route("/user-auth", get(user_auth))
            .route("/user-profile", put(update_profile))
            .route("/get-user-plan", get(get_user_plan))
            .route("/get-all-user-plan", get(get_all_user_plans))
            .route("/get-all-user-feedback", get(get_all_user_feedback)),
        state,
    );

    let admin = admin_only(
        Router::new()
            .route("/admin-auth", get(admin_auth))
            .route("/user-count", get(user_count)),
        state,
    );

    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/forgot-password", post(forgot_password))
        .merge(member)
        .merge(admin)
}
