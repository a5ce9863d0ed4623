//! Access gates for protected routes.
//!
//! - [`auth`]: `require_authenticated` and the [`Principal`] it attaches
//! - [`role`]: `require_admin`, which re-reads the caller's role from the store
//! - [`subscription`]: `require_active_subscription`
//! - [`error`]: the [`AuthError`] taxonomy and its JSON rendering
//!
//! Gates are attached with `route_layer`, so only matched routes are guarded
//! and unknown paths still fall through to the 404 handler. The helpers below
//! apply them in the required order: authentication always runs first.
//!
//! ```ignore
//! let admin_routes = admin_only(
//!     Router::new().route("/plans/count", get(count_plans)),
//!     &state,
//! );
//! ```

pub mod auth;
pub mod error;
pub mod role;
pub mod subscription;

use axum::{Router, middleware::from_fn_with_state};

use crate::state::AppState;

pub use auth::{Principal, require_authenticated};
pub use error::AuthError;
pub use role::require_admin;
pub use subscription::require_active_subscription;

/// Guards every route in `router` with `require_authenticated`.
pub fn authenticated(router: Router<AppState>, state: &AppState) -> Router<AppState> {
    router.route_layer(from_fn_with_state(state.clone(), require_authenticated))
}

/// Guards every route in `router` with authentication followed by the admin check.
pub fn admin_only(router: Router<AppState>, state: &AppState) -> Router<AppState> {
    // the last route_layer added runs first
    router
        .route_layer(from_fn_with_state(state.clone(), require_admin))
        .route_layer(from_fn_with_state(state.clone(), require_authenticated))
}

/// Guards every route in `router` with authentication followed by the
/// active-subscription check.
pub fn subscribers_only(router: Router<AppState>, state: &AppState) -> Router<AppState> {
    router
        .route_layer(from_fn_with_state(
            state.clone(),
            require_active_subscription,
        ))
        .route_layer(from_fn_with_state(state.clone(), require_authenticated))
}

#[cfg(test)]
pub(crate) mod test_support {
    use ironpass_config::AppConfig;
    use ironpass_db::MemoryStore;
    use ironpass_models::{NewUser, Role, User};

    use crate::state::AppState;

    /// State over an empty in-memory store, plus a handle to that store.
    pub(crate) fn memory_state() -> (AppState, MemoryStore) {
        let config = AppConfig::from_lookup(|key| {
            (key == "JWT_SECRET").then(|| "gate-test-secret".to_string())
        })
        .unwrap();
        let store = MemoryStore::new();
        (AppState::new(config, store.clone()), store)
    }

    pub(crate) async fn insert_user(state: &AppState, email: &str, role: Role) -> User {
        state
            .users
            .create(NewUser {
                name: "Gate Tester".to_string(),
                email: email.to_string(),
                password_hash: "not-a-real-hash".to_string(),
                city: "Lagos".to_string(),
                contact: "0801234567".to_string(),
                role,
            })
            .await
            .unwrap()
    }
}
