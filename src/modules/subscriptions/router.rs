use axum::{
    Router,
    routing::{delete, get, post, put},
};

use super::controller::{
    create_subscription, delete_subscription, get_subscription, update_subscription,
};
use crate::middleware::{admin_only, authenticated, subscribers_only};
use crate::state::AppState;

pub fn init_subscriptions_router(state: &AppState) -> Router<AppState> {
    let member = authenticated(
        Router::new().route("/create-subscription", post(create_subscription)),
        state,
    );

    let subscriber = subscribers_only(
        Router::new()
            .route("/get-subscription/{id}", get(get_subscription))
            .route("/update-subscription/{id}", put(update_subscription)),
        state,
    );

    let admin = admin_only(
        Router::new().route("/delete-subscription/{id}", delete(delete_subscription)),
        state,
    );

    Router::new().merge(member).merge(subscriber).merge(admin)
}
