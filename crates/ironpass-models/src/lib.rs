//! # Ironpass Models
//!
//! Domain models and DTOs for the Ironpass API.
//!
//! - [`users`]: Members, the [`Role`] enum, and the auth request/response DTOs
//! - [`plans`]: Membership plan catalog
//! - [`subscriptions`]: Plan purchases made by members
//! - [`contacts`]: Contact-form submissions
//! - [`feedback`]: Member feedback and rating statistics
//!
//! JSON field names are camelCase throughout, matching what the web client sends.

pub mod contacts;
pub mod feedback;
pub mod plans;
pub mod subscriptions;
pub mod users;

// Re-export commonly used types at crate root for convenience
pub use contacts::{Contact, CreateContactRequest, NewContact};
pub use feedback::{
    CreateFeedbackRequest, Feedback, NewFeedback, RatingStat, UpdateFeedbackRequest,
};
pub use plans::{NewPlan, Plan, PlanFeatures, UpsertPlanRequest};
pub use subscriptions::{
    CreateSubscriptionRequest, NewSubscription, RevenueSummary, Subscription,
    SubscriptionChanges, SubscriptionWithPlan, UpdateSubscriptionRequest,
};
pub use users::{
    ForgotPasswordRequest, LoginRequest, LoginResponse, NewUser, ProfileChanges,
    RegisterRequest, Role, UpdateProfileRequest, User, UserCredentials, UserSummary,
    is_valid_contact,
};
