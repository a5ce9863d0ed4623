use std::sync::Arc;

use ironpass_auth::TokenCodec;
use ironpass_config::AppConfig;
use ironpass_db::{ContactStore, FeedbackStore, PlanStore, SubscriptionStore, UserStore};

/// Shared, read-only application state. Cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub tokens: TokenCodec,
    pub users: Arc<dyn UserStore>,
    pub plans: Arc<dyn PlanStore>,
    pub subscriptions: Arc<dyn SubscriptionStore>,
    pub contacts: Arc<dyn ContactStore>,
    pub feedback: Arc<dyn FeedbackStore>,
}

impl AppState {
    /// Builds state over a single backend that implements every store.
    pub fn new<S>(config: AppConfig, store: S) -> Self
    where
        S: UserStore + PlanStore + SubscriptionStore + ContactStore + FeedbackStore + 'static,
    {
        let store = Arc::new(store);
        Self {
            tokens: TokenCodec::new(&config.jwt),
            config: Arc::new(config),
            users: store.clone(),
            plans: store.clone(),
            subscriptions: store.clone(),
            contacts: store.clone(),
            feedback: store,
        }
    }
}
