use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use ironpass_core::PageMeta;
use ironpass_models::{
    Contact, CreateContactRequest, CreateFeedbackRequest, CreateSubscriptionRequest, Feedback,
    ForgotPasswordRequest, LoginRequest, LoginResponse, Plan, PlanFeatures, RatingStat,
    RegisterRequest, RevenueSummary, Subscription, SubscriptionWithPlan, UpdateFeedbackRequest,
    UpdateProfileRequest, UpdateSubscriptionRequest, UpsertPlanRequest, User, UserSummary,
};

use crate::modules::admin::model::{
    RevenueResponse, RoleChangeResponse, SubscriptionListResponse, UserListResponse,
};
use crate::modules::auth::model::{
    SessionCheckResponse, UserPlanResponse, UserPlansResponse, UserResponse,
};
use crate::modules::contacts::model::{ContactListResponse, ContactResponse};
use crate::modules::feedback::model::{
    FeedbackListResponse, FeedbackResponse, FeedbackStatsResponse,
};
use crate::modules::plans::model::{PlanDetailResponse, PlanListResponse, PlanResponse};
use crate::modules::subscriptions::model::SubscriptionResponse;
use crate::response::{CountResponse, ErrorResponse, MessageResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register,
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::logout,
        crate::modules::auth::controller::forgot_password,
        crate::modules::auth::controller::user_auth,
        crate::modules::auth::controller::admin_auth,
        crate::modules::auth::controller::update_profile,
        crate::modules::auth::controller::get_user_plan,
        crate::modules::auth::controller::get_all_user_plans,
        crate::modules::auth::controller::get_all_user_feedback,
        crate::modules::auth::controller::user_count,
        crate::modules::plans::controller::create_plan,
        crate::modules::plans::controller::update_plan,
        crate::modules::plans::controller::delete_plan,
        crate::modules::plans::controller::get_all_plans,
        crate::modules::plans::controller::get_plan,
        crate::modules::plans::controller::plan_count,
        crate::modules::subscriptions::controller::create_subscription,
        crate::modules::subscriptions::controller::get_subscription,
        crate::modules::subscriptions::controller::update_subscription,
        crate::modules::subscriptions::controller::delete_subscription,
        crate::modules::contacts::controller::create_contact,
        crate::modules::contacts::controller::get_all_contacts,
        crate::modules::feedback::controller::create_feedback,
        crate::modules::feedback::controller::get_all_feedback,
        crate::modules::feedback::controller::get_feedback,
        crate::modules::feedback::controller::update_feedback,
        crate::modules::feedback::controller::delete_feedback,
        crate::modules::feedback::controller::feedback_stats,
        crate::modules::admin::controller::count_users,
        crate::modules::admin::controller::count_plans,
        crate::modules::admin::controller::count_subscriptions,
        crate::modules::admin::controller::count_contacts,
        crate::modules::admin::controller::count_feedback,
        crate::modules::admin::controller::total_revenue,
        crate::modules::admin::controller::list_users,
        crate::modules::admin::controller::list_subscriptions,
        crate::modules::admin::controller::delete_user,
        crate::modules::admin::controller::make_admin,
        crate::modules::admin::controller::remove_admin,
        crate::modules::admin::controller::recent_subscriptions,
        crate::modules::admin::controller::recent_contacts,
        crate::modules::admin::controller::recent_feedback,
    ),
    components(
        schemas(
            User,
            UserSummary,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            ForgotPasswordRequest,
            UpdateProfileRequest,
            UserResponse,
            SessionCheckResponse,
            UserPlanResponse,
            UserPlansResponse,
            Plan,
            PlanFeatures,
            UpsertPlanRequest,
            PlanResponse,
            PlanDetailResponse,
            PlanListResponse,
            Subscription,
            SubscriptionWithPlan,
            CreateSubscriptionRequest,
            UpdateSubscriptionRequest,
            SubscriptionResponse,
            SubscriptionListResponse,
            RevenueSummary,
            RevenueResponse,
            Contact,
            CreateContactRequest,
            ContactResponse,
            ContactListResponse,
            Feedback,
            CreateFeedbackRequest,
            UpdateFeedbackRequest,
            RatingStat,
            FeedbackResponse,
            FeedbackListResponse,
            FeedbackStatsResponse,
            UserListResponse,
            RoleChangeResponse,
            PageMeta,
            MessageResponse,
            CountResponse,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login and profile endpoints"),
        (name = "Plans", description = "Membership plan catalog"),
        (name = "Subscriptions", description = "Member subscriptions"),
        (name = "Contact", description = "Contact form submissions"),
        (name = "Feedback", description = "Member feedback and ratings"),
        (name = "Admin", description = "Dashboard counts, listings and role management")
    ),
    info(
        title = "Ironpass API",
        version = "0.1.0",
        description = "Gym membership backend built with Rust, Axum, and PostgreSQL. Requests authenticate with a bearer token or the `token` session cookie.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
