//! Plan purchases.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::plans::Plan;

pub const SUBSCRIPTION_STATUSES: &[&str] = &["active", "expired", "cancelled"];
pub const PAYMENT_STATUSES: &[&str] = &["pending", "paid", "failed", "refunded"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: Uuid,
    pub user_id: Uuid,
    pub plan_id: Uuid,
    pub user_name: String,
    pub plan_type: String,
    pub plan_amount: f64,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub status: String,
    pub payment_status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionWithPlan {
    #[serde(flatten)]
    pub subscription: Subscription,
    pub plan: Option<Plan>,
}

#[derive(Debug, Clone)]
pub struct NewSubscription {
    pub user_id: Uuid,
    pub plan_id: Uuid,
    pub user_name: String,
    pub plan_type: String,
    pub plan_amount: f64,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub status: String,
    pub payment_status: String,
}

/// Partial update; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct SubscriptionChanges {
    pub plan_type: Option<String>,
    pub plan_amount: Option<f64>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub status: Option<String>,
    pub payment_status: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubscriptionRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub user_name: String,
    #[validate(length(min = 1, message = "Plan type is required"))]
    pub plan_type: String,
    #[validate(range(min = 0.0, message = "Plan amount cannot be negative"))]
    pub plan_amount: f64,
    pub plan_id: Uuid,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub status: Option<String>,
    pub payment_status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubscriptionRequest {
    #[validate(length(min = 1))]
    pub plan_type: Option<String>,
    #[validate(range(min = 0.0))]
    pub plan_amount: Option<f64>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub status: Option<String>,
    pub payment_status: Option<String>,
}

impl From<UpdateSubscriptionRequest> for SubscriptionChanges {
    fn from(dto: UpdateSubscriptionRequest) -> Self {
        Self {
            plan_type: dto.plan_type,
            plan_amount: dto.plan_amount,
            start_date: dto.start_date,
            end_date: dto.end_date,
            status: dto.status,
            payment_status: dto.payment_status,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RevenueSummary {
    pub total_revenue: f64,
    pub total_subscriptions: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_camel_case() {
        let plan_id = Uuid::new_v4();
        let json = format!(
            r#"{{"userName":"ann","planType":"monthly","planAmount":49.0,"planId":"{plan_id}"}}"#
        );
        let dto: CreateSubscriptionRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(dto.plan_id, plan_id);
        assert!(dto.status.is_none());
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_with_plan_flattens_subscription() {
        let sub = Subscription {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            plan_id: Uuid::new_v4(),
            user_name: "ann".to_string(),
            plan_type: "yearly".to_string(),
            plan_amount: 400.0,
            start_date: None,
            end_date: None,
            status: "active".to_string(),
            payment_status: "paid".to_string(),
            created_at: Utc::now(),
        };
        let value = serde_json::to_value(SubscriptionWithPlan {
            subscription: sub,
            plan: None,
        })
        .unwrap();
        assert_eq!(value["planType"], "yearly");
        assert!(value["plan"].is_null());
    }
}
