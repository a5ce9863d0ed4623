use axum::{
    Router,
    routing::{delete, get, post, put},
};

use super::controller::{
    create_feedback, delete_feedback, feedback_stats, get_all_feedback, get_feedback,
    update_feedback,
};
use crate::middleware::{admin_only, authenticated};
use crate::state::AppState;

pub fn init_feedback_router(state: &AppState) -> Router<AppState> {
    let member = authenticated(
        Router::new()
            .route("/create-feedback", post(create_feedback))
            .route("/get-feedback", get(get_feedback))
            .route("/update-feedback/{id}", put(update_feedback))
            .route("/delete-feedback/{id}", delete(delete_feedback)),
        state,
    );

    let admin = admin_only(Router::new().route("/stats", get(feedback_stats)), state);

    Router::new()
        .route("/getall-feedback", get(get_all_feedback))
        .merge(member)
        .merge(admin)
}
