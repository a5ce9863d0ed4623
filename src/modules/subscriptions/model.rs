use ironpass_models::Subscription;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct SubscriptionResponse {
    pub success: bool,
    pub message: String,
    pub subscription: Subscription,
}
