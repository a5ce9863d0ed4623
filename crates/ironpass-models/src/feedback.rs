//! Member feedback.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: Uuid,
    pub user_id: Uuid,
    pub message: String,
    pub rating: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewFeedback {
    pub user_id: Uuid,
    pub message: String,
    pub rating: i32,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateFeedbackRequest {
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateFeedbackRequest {
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: Option<String>,
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: Option<i32>,
}

/// Share of all feedback carrying one particular rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RatingStat {
    pub rating: i32,
    pub count: i64,
    pub percentage: f64,
}

impl RatingStat {
    /// Builds per-rating statistics from `(rating, count)` pairs, sorted by rating.
    pub fn from_counts(mut counts: Vec<(i32, i64)>) -> Vec<RatingStat> {
        let total: i64 = counts.iter().map(|(_, c)| c).sum();
        if total == 0 {
            return Vec::new();
        }
        counts.sort_by_key(|(rating, _)| *rating);
        counts
            .into_iter()
            .map(|(rating, count)| RatingStat {
                rating,
                count,
                percentage: count as f64 * 100.0 / total as f64,
            })
            .collect()
    }
}
