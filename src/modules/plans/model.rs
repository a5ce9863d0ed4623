use ironpass_models::Plan;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Serialize, ToSchema)]
pub struct PlanResponse {
    pub success: bool,
    pub message: String,
    pub plan: Plan,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PlanDetailResponse {
    pub success: bool,
    pub plan: Plan,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PlanListResponse {
    pub success: bool,
    pub count: usize,
    pub plans: Vec<Plan>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct PlanSearch {
    /// Case-insensitive substring of the plan name
    pub search: Option<String>,
}

impl PlanSearch {
    pub fn term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}
