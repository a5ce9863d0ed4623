use ironpass_models::{SubscriptionWithPlan, UserSummary};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub success: bool,
    pub message: String,
    pub user: UserSummary,
}

/// Answer of the session-check endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionCheckResponse {
    pub ok: bool,
    pub user: UserSummary,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserPlanResponse {
    pub success: bool,
    pub subscription: SubscriptionWithPlan,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserPlansResponse {
    pub success: bool,
    pub subscriptions: Vec<SubscriptionWithPlan>,
}
