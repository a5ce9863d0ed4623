use ironpass_models::{Feedback, RatingStat};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct FeedbackResponse {
    pub success: bool,
    pub message: String,
    pub feedback: Feedback,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FeedbackListResponse {
    pub success: bool,
    pub feedback: Vec<Feedback>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FeedbackStatsResponse {
    pub success: bool,
    pub total: i64,
    pub stats: Vec<RatingStat>,
}
