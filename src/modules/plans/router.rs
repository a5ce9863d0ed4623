use axum::{
    Router,
    routing::{delete, get, post, put},
};

use super::controller::{
    create_plan, delete_plan, get_all_plans, get_plan, plan_count, update_plan,
};
use crate::middleware::admin_only;
use crate::state::AppState;

pub fn init_plans_router(state: &AppState) -> Router<AppState> {
    let admin = admin_only(
        Router::new()
            .route("/create-plan", post(create_plan))
            .route("/update-plan/{id}", put(update_plan))
            .route("/delete-plan/{id}", delete(delete_plan)),
        state,
    );

    Router::new()
        .route("/getall-plan", get(get_all_plans))
        .route("/get-plan/{id}", get(get_plan))
        .route("/plan-count", get(plan_count))
        .merge(admin)
}
