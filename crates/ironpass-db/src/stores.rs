//! Store traits shared by the PostgreSQL and in-memory backends.

use async_trait::async_trait;
use ironpass_models::{
    Contact, Feedback, NewContact, NewFeedback, NewPlan, NewSubscription, NewUser, Plan,
    ProfileChanges, RevenueSummary, Role, Subscription, SubscriptionChanges, User,
    UserCredentials,
};
use uuid::Uuid;

use crate::StoreError;

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Looks a member up without its password hash.
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>>;
    /// Reads only the current role, for freshness checks.
    async fn find_role(&self, id: Uuid) -> StoreResult<Option<Role>>;
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;
    async fn find_credentials_by_email(&self, email: &str)
    -> StoreResult<Option<UserCredentials>>;
    /// Fails with [`StoreError::Conflict`] when the email is taken.
    async fn create(&self, user: NewUser) -> StoreResult<User>;
    async fn update_profile(&self, id: Uuid, changes: ProfileChanges)
    -> StoreResult<Option<User>>;
    async fn update_password(&self, id: Uuid, password_hash: &str) -> StoreResult<bool>;
    async fn set_role(&self, id: Uuid, role: Role) -> StoreResult<Option<User>>;
    /// Removes the member together with their subscriptions and feedback.
    async fn delete(&self, id: Uuid) -> StoreResult<bool>;
    async fn count(&self) -> StoreResult<i64>;
    /// Newest first; returns the page and the total number of matches.
    async fn list(
        &self,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> StoreResult<(Vec<User>, i64)>;
}

#[async_trait]
pub trait PlanStore: Send + Sync {
    async fn create(&self, plan: NewPlan) -> StoreResult<Plan>;
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Plan>>;
    async fn find_by_name_ci(&self, name: &str) -> StoreResult<Option<Plan>>;
    async fn list(&self, search: Option<&str>) -> StoreResult<Vec<Plan>>;
    /// Replaces every field except `id`, `created_by` and `created_at`.
    async fn update(&self, id: Uuid, plan: NewPlan) -> StoreResult<Option<Plan>>;
    /// Deletes the plan and every subscription to it.
    async fn delete(&self, id: Uuid) -> StoreResult<bool>;
    async fn count(&self) -> StoreResult<i64>;
}

#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    /// Any subscription owned by `user_id`.
    async fn find_by_owner(&self, user_id: Uuid) -> StoreResult<Option<Subscription>>;
    async fn list_by_owner(&self, user_id: Uuid) -> StoreResult<Vec<Subscription>>;
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Subscription>>;
    /// Fails with [`StoreError::Conflict`] when `user_id` already holds one.
    async fn create(&self, subscription: NewSubscription) -> StoreResult<Subscription>;
    async fn update(
        &self,
        id: Uuid,
        changes: SubscriptionChanges,
    ) -> StoreResult<Option<Subscription>>;
    async fn delete(&self, id: Uuid) -> StoreResult<bool>;
    async fn count(&self) -> StoreResult<i64>;
    async fn list(
        &self,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> StoreResult<(Vec<Subscription>, i64)>;
    async fn recent(&self, n: i64) -> StoreResult<Vec<Subscription>>;
    async fn revenue(&self) -> StoreResult<RevenueSummary>;
}

#[async_trait]
pub trait ContactStore: Send + Sync {
    async fn create(&self, contact: NewContact) -> StoreResult<Contact>;
    async fn list(&self) -> StoreResult<Vec<Contact>>;
    async fn count(&self) -> StoreResult<i64>;
    async fn recent(&self, n: i64) -> StoreResult<Vec<Contact>>;
}

#[async_trait]
pub trait FeedbackStore: Send + Sync {
    /// Fails with [`StoreError::Conflict`] when `user_id` already left feedback.
    async fn create(&self, feedback: NewFeedback) -> StoreResult<Feedback>;
    async fn find_by_owner(&self, user_id: Uuid) -> StoreResult<Option<Feedback>>;
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Feedback>>;
    async fn list(&self) -> StoreResult<Vec<Feedback>>;
    async fn list_by_owner(&self, user_id: Uuid) -> StoreResult<Vec<Feedback>>;
    async fn update(
        &self,
        id: Uuid,
        message: Option<String>,
        rating: Option<i32>,
    ) -> StoreResult<Option<Feedback>>;
    async fn delete(&self, id: Uuid) -> StoreResult<bool>;
    async fn count(&self) -> StoreResult<i64>;
    async fn recent(&self, n: i64) -> StoreResult<Vec<Feedback>>;
    /// `(rating, count)` pairs for every rating that occurs.
    async fn rating_stats(&self) -> StoreResult<Vec<(i32, i64)>>;
}
