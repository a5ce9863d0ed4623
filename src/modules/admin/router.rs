use axum::{
    Router,
    routing::{delete, get, put},
};

use super::controller::{
    count_contacts, count_feedback, count_plans, count_subscriptions, count_users, delete_user,
    list_subscriptions, list_users, make_admin, recent_contacts, recent_feedback,
    recent_subscriptions, remove_admin, total_revenue,
};
use crate::middleware::admin_only;
use crate::state::AppState;

pub fn init_admin_router(state: &AppState) -> Router<AppState> {
    admin_only(
        Router::new()
            .route("/users/count", get(count_users))
            .route("/plans/count", get(count_plans))
            .route("/subscriptions/count", get(count_subscriptions))
            .route("/contacts/count", get(count_contacts))
            .route("/feedbacks/count", get(count_feedback))
            .route("/revenue/total", get(total_revenue))
            .route("/users", get(list_users))
            .route("/users/{id}", delete(delete_user))
            .route("/users/{id}/make-admin", put(make_admin))
            .route("/users/{id}/remove-admin", put(remove_admin))
            .route("/subscriptions", get(list_subscriptions))
            .route("/subscribers", get(list_subscriptions))
            .route("/recent-subscriptions", get(recent_subscriptions))
            .route("/recent-contacts", get(recent_contacts))
            .route("/recent-feedbacks", get(recent_feedback)),
        state,
    )
}
