//! Membership plan catalog.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Amenities bundled with a plan. Unspecified features default to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct PlanFeatures {
    pub water_stations: bool,
    pub locker_rooms: bool,
    pub wifi_service: bool,
    pub cardio_class: bool,
    pub refreshment: bool,
    pub group_fitness_classes: bool,
    pub personal_trainer: bool,
    pub special_events: bool,
    pub cafe_or_lounge: bool,
}

impl PlanFeatures {
    /// Names of the enabled features, in declaration order.
    pub fn enabled(&self) -> Vec<&'static str> {
        [
            ("waterStations", self.water_stations),
            ("lockerRooms", self.locker_rooms),
            ("wifiService", self.wifi_service),
            ("cardioClass", self.cardio_class),
            ("refreshment", self.refreshment),
            ("groupFitnessClasses", self.group_fitness_classes),
            ("personalTrainer", self.personal_trainer),
            ("specialEvents", self.special_events),
            ("cafeOrLounge", self.cafe_or_lounge),
        ]
        .into_iter()
        .filter_map(|(name, on)| on.then_some(name))
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: Uuid,
    pub plan_name: String,
    pub monthly_plan_amount: f64,
    pub yearly_plan_amount: f64,
    pub is_popular: bool,
    pub is_active: bool,
    #[sqlx(flatten)]
    pub features: PlanFeatures,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Plan {
    pub fn monthly_amount_in_cents(&self) -> i64 {
        (self.monthly_plan_amount * 100.0).round() as i64
    }

    pub fn yearly_amount_in_cents(&self) -> i64 {
        (self.yearly_plan_amount * 100.0).round() as i64
    }
}

#[derive(Debug, Clone)]
pub struct NewPlan {
    pub plan_name: String,
    pub monthly_plan_amount: f64,
    pub yearly_plan_amount: f64,
    pub is_popular: bool,
    pub is_active: bool,
    pub features: PlanFeatures,
    pub created_by: Uuid,
}

/// Body of both the create and the update plan endpoints.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertPlanRequest {
    #[validate(length(
        min = 1,
        max = 50,
        message = "Plan name is required and cannot exceed 50 characters"
    ))]
    pub plan_name: String,
    #[validate(range(min = 0.0, message = "Monthly amount must be a positive number"))]
    pub monthly_plan_amount: f64,
    #[validate(range(min = 0.0, message = "Yearly amount must be a positive number"))]
    pub yearly_plan_amount: f64,
    #[serde(default)]
    pub is_popular: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub features: PlanFeatures,
}

fn default_true() -> bool {
    true
}

impl UpsertPlanRequest {
    /// A yearly price may not exceed twelve monthly payments.
    pub fn yearly_within_bounds(&self) -> bool {
        self.yearly_plan_amount <= self.monthly_plan_amount * 12.0
    }

    pub fn into_new_plan(self, created_by: Uuid) -> NewPlan {
        NewPlan {
            plan_name: self.plan_name.trim().to_string(),
            monthly_plan_amount: self.monthly_plan_amount,
            yearly_plan_amount: self.yearly_plan_amount,
            is_popular: self.is_popular,
            is_active: self.is_active,
            features: self.features,
            created_by,
        }
    }
}
