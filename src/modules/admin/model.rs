use ironpass_core::PageMeta;
use ironpass_models::{RevenueSummary, Subscription, UserSummary};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct RevenueResponse {
    pub success: bool,
    #[serde(flatten)]
    pub revenue: RevenueSummary,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserListResponse {
    pub success: bool,
    pub users: Vec<UserSummary>,
    pub pagination: PageMeta,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubscriptionListResponse {
    pub success: bool,
    pub subscriptions: Vec<Subscription>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PageMeta>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RoleChangeResponse {
    pub success: bool,
    pub message: String,
    pub user: UserSummary,
}
