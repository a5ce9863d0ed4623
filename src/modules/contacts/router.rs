use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{create_contact, get_all_contacts};
use crate::middleware::admin_only;
use crate::state::AppState;

pub fn init_contacts_router(state: &AppState) -> Router<AppState> {
    let admin = admin_only(
        Router::new().route("/getall-contact", get(get_all_contacts)),
        state,
    );

    Router::new()
        .route("/create-contact", post(create_contact))
        .merge(admin)
}
