//! Process-local stores backed by `tokio::sync::RwLock`.
//!
//! Rows are kept in insertion order, so "newest first" is simply reverse
//! iteration. [`MemoryStore::set_offline`] makes every call fail with
//! [`StoreError::Unavailable`], which lets callers exercise their fault paths.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use ironpass_models::{
    Contact, Feedback, NewContact, NewFeedback, NewPlan, NewSubscription, NewUser, Plan,
    ProfileChanges, RevenueSummary, Role, Subscription, SubscriptionChanges, User,
    UserCredentials,
};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::StoreError;
use crate::stores::{
    ContactStore, FeedbackStore, PlanStore, StoreResult, SubscriptionStore, UserStore,
};

#[derive(Debug, Clone)]
struct UserRow {
    user: User,
    password_hash: String,
}

#[derive(Debug, Default)]
struct Tables {
    users: Vec<UserRow>,
    plans: Vec<Plan>,
    subscriptions: Vec<Subscription>,
    contacts: Vec<Contact>,
    feedback: Vec<Feedback>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
    offline: Arc<AtomicBool>,
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn page<T: Clone>(rows: Vec<&T>, limit: i64, offset: i64) -> (Vec<T>, i64) {
    let total = rows.len() as i64;
    let items = rows
        .into_iter()
        .skip(offset.max(0) as usize)
        .take(limit.max(0) as usize)
        .cloned()
        .collect();
    (items, total)
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// While offline every store call returns [`StoreError::Unavailable`].
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check(&self) -> StoreResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store is offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .find(|row| row.user.id == id)
            .map(|row| row.user.clone()))
    }

    async fn find_role(&self, id: Uuid) -> StoreResult<Option<Role>> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .find(|row| row.user.id == id)
            .map(|row| row.user.role))
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .find(|row| row.user.email.eq_ignore_ascii_case(email))
            .map(|row| row.user.clone()))
    }

    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> StoreResult<Option<UserCredentials>> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .find(|row| row.user.email.eq_ignore_ascii_case(email))
            .map(|row| UserCredentials {
                id: row.user.id,
                email: row.user.email.clone(),
                password_hash: row.password_hash.clone(),
                role: row.user.role,
            }))
    }

    async fn create(&self, user: NewUser) -> StoreResult<User> {
        self.check()?;
        let mut tables = self.tables.write().await;
        if tables
            .users
            .iter()
            .any(|row| row.user.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(StoreError::Conflict("User already registered".to_string()));
        }

        let now = Utc::now();
        let created = User {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            city: user.city,
            contact: user.contact,
            role: user.role,
            created_at: now,
            updated_at: now,
        };
        tables.users.push(UserRow {
            user: created.clone(),
            password_hash: user.password_hash,
        });
        Ok(created)
    }

    async fn update_profile(
        &self,
        id: Uuid,
        changes: ProfileChanges,
    ) -> StoreResult<Option<User>> {
        self.check()?;
        let mut tables = self.tables.write().await;
        let Some(row) = tables.users.iter_mut().find(|row| row.user.id == id) else {
            return Ok(None);
        };

        if let Some(name) = changes.name {
            row.user.name = name;
        }
        if let Some(hash) = changes.password_hash {
            row.password_hash = hash;
        }
        if let Some(city) = changes.city {
            row.user.city = city;
        }
        if let Some(contact) = changes.contact {
            row.user.contact = contact;
        }
        row.user.updated_at = Utc::now();
        Ok(Some(row.user.clone()))
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> StoreResult<bool> {
        self.check()?;
        let mut tables = self.tables.write().await;
        match tables.users.iter_mut().find(|row| row.user.id == id) {
            Some(row) => {
                row.password_hash = password_hash.to_string();
                row.user.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_role(&self, id: Uuid, role: Role) -> StoreResult<Option<User>> {
        self.check()?;
        let mut tables = self.tables.write().await;
        Ok(tables
            .users
            .iter_mut()
            .find(|row| row.user.id == id)
            .map(|row| {
                row.user.role = role;
                row.user.updated_at = Utc::now();
                row.user.clone()
            }))
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        self.check()?;
        let mut tables = self.tables.write().await;
        let before = tables.users.len();
        tables.users.retain(|row| row.user.id != id);
        if tables.users.len() == before {
            return Ok(false);
        }
        tables.subscriptions.retain(|s| s.user_id != id);
        tables.feedback.retain(|f| f.user_id != id);
        Ok(true)
    }

    async fn count(&self) -> StoreResult<i64> {
        self.check()?;
        Ok(self.tables.read().await.users.len() as i64)
    }

    async fn list(
        &self,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> StoreResult<(Vec<User>, i64)> {
        self.check()?;
        let tables = self.tables.read().await;
        let matches: Vec<&User> = tables
            .users
            .iter()
            .rev()
            .map(|row| &row.user)
            .filter(|u| {
                search.is_none_or(|s| contains_ci(&u.name, s) || contains_ci(&u.email, s))
            })
            .collect();
        Ok(page(matches, limit, offset))
    }
}

#[async_trait]
impl PlanStore for MemoryStore {
    async fn create(&self, plan: NewPlan) -> StoreResult<Plan> {
        self.check()?;
        let mut tables = self.tables.write().await;
        if tables
            .plans
            .iter()
            .any(|p| p.plan_name.eq_ignore_ascii_case(&plan.plan_name))
        {
            return Err(StoreError::Conflict("Plan name already exists".to_string()));
        }

        let created = Plan {
            id: Uuid::new_v4(),
            plan_name: plan.plan_name,
            monthly_plan_amount: plan.monthly_plan_amount,
            yearly_plan_amount: plan.yearly_plan_amount,
            is_popular: plan.is_popular,
            is_active: plan.is_active,
            features: plan.features,
            created_by: plan.created_by,
            created_at: Utc::now(),
        };
        tables.plans.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Plan>> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables.plans.iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_name_ci(&self, name: &str) -> StoreResult<Option<Plan>> {
        self.check()?;
        let name = name.trim();
        let tables = self.tables.read().await;
        Ok(tables
            .plans
            .iter()
            .find(|p| p.plan_name.eq_ignore_ascii_case(name))
            .cloned())
    }

    async fn list(&self, search: Option<&str>) -> StoreResult<Vec<Plan>> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables
            .plans
            .iter()
            .rev()
            .filter(|p| search.is_none_or(|s| contains_ci(&p.plan_name, s)))
            .cloned()
            .collect())
    }

    async fn update(&self, id: Uuid, plan: NewPlan) -> StoreResult<Option<Plan>> {
        self.check()?;
        let mut tables = self.tables.write().await;
        if tables
            .plans
            .iter()
            .any(|p| p.id != id && p.plan_name.eq_ignore_ascii_case(&plan.plan_name))
        {
            return Err(StoreError::Conflict("Plan name already exists".to_string()));
        }

        Ok(tables.plans.iter_mut().find(|p| p.id == id).map(|p| {
            p.plan_name = plan.plan_name;
            p.monthly_plan_amount = plan.monthly_plan_amount;
            p.yearly_plan_amount = plan.yearly_plan_amount;
            p.is_popular = plan.is_popular;
            p.is_active = plan.is_active;
            p.features = plan.features;
            p.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        self.check()?;
        let mut tables = self.tables.write().await;
        let before = tables.plans.len();
        tables.plans.retain(|p| p.id != id);
        if tables.plans.len() == before {
            return Ok(false);
        }
        tables.subscriptions.retain(|s| s.plan_id != id);
        Ok(true)
    }

    async fn count(&self) -> StoreResult<i64> {
        self.check()?;
        Ok(self.tables.read().await.plans.len() as i64)
    }
}

#[async_trait]
impl SubscriptionStore for MemoryStore {
    async fn find_by_owner(&self, user_id: Uuid) -> StoreResult<Option<Subscription>> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables
            .subscriptions
            .iter()
            .rev()
            .find(|s| s.user_id == user_id)
            .cloned())
    }

    async fn list_by_owner(&self, user_id: Uuid) -> StoreResult<Vec<Subscription>> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables
            .subscriptions
            .iter()
            .rev()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Subscription>> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables.subscriptions.iter().find(|s| s.id == id).cloned())
    }

    async fn create(&self, subscription: NewSubscription) -> StoreResult<Subscription> {
        self.check()?;
        let mut tables = self.tables.write().await;
        if tables
            .subscriptions
            .iter()
            .any(|s| s.user_id == subscription.user_id)
        {
            return Err(StoreError::Conflict(
                "You already have an active subscription".to_string(),
            ));
        }

        let created = Subscription {
            id: Uuid::new_v4(),
            user_id: subscription.user_id,
            plan_id: subscription.plan_id,
            user_name: subscription.user_name,
            plan_type: subscription.plan_type,
            plan_amount: subscription.plan_amount,
            start_date: subscription.start_date,
            end_date: subscription.end_date,
            status: subscription.status,
            payment_status: subscription.payment_status,
            created_at: Utc::now(),
        };
        tables.subscriptions.push(created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        id: Uuid,
        changes: SubscriptionChanges,
    ) -> StoreResult<Option<Subscription>> {
        self.check()?;
        let mut tables = self.tables.write().await;
        let Some(sub) = tables.subscriptions.iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };

        if let Some(plan_type) = changes.plan_type {
            sub.plan_type = plan_type;
        }
        if let Some(amount) = changes.plan_amount {
            sub.plan_amount = amount;
        }
        if changes.start_date.is_some() {
            sub.start_date = changes.start_date;
        }
        if changes.end_date.is_some() {
            sub.end_date = changes.end_date;
        }
        if let Some(status) = changes.status {
            sub.status = status;
        }
        if let Some(payment_status) = changes.payment_status {
            sub.payment_status = payment_status;
        }
        Ok(Some(sub.clone()))
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        self.check()?;
        let mut tables = self.tables.write().await;
        let before = tables.subscriptions.len();
        tables.subscriptions.retain(|s| s.id != id);
        Ok(tables.subscriptions.len() != before)
    }

    async fn count(&self) -> StoreResult<i64> {
        self.check()?;
        Ok(self.tables.read().await.subscriptions.len() as i64)
    }

    async fn list(
        &self,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> StoreResult<(Vec<Subscription>, i64)> {
        self.check()?;
        let tables = self.tables.read().await;
        let matches: Vec<&Subscription> = tables
            .subscriptions
            .iter()
            .rev()
            .filter(|sub| {
                search.is_none_or(|s| contains_ci(&sub.user_name, s) || contains_ci(&sub.plan_type, s))
            })
            .collect();
        Ok(page(matches, limit, offset))
    }

    async fn recent(&self, n: i64) -> StoreResult<Vec<Subscription>> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables
            .subscriptions
            .iter()
            .rev()
            .take(n.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn revenue(&self) -> StoreResult<RevenueSummary> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(RevenueSummary {
            total_revenue: tables.subscriptions.iter().map(|s| s.plan_amount).sum(),
            total_subscriptions: tables.subscriptions.len() as i64,
        })
    }
}

#[async_trait]
impl ContactStore for MemoryStore {
    async fn create(&self, contact: NewContact) -> StoreResult<Contact> {
        self.check()?;
        let created = Contact {
            id: Uuid::new_v4(),
            name: contact.name,
            email: contact.email,
            city: contact.city,
            phone: contact.phone,
            message: contact.message,
            created_at: Utc::now(),
        };
        self.tables.write().await.contacts.push(created.clone());
        Ok(created)
    }

    async fn list(&self) -> StoreResult<Vec<Contact>> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables.contacts.iter().rev().cloned().collect())
    }

    async fn count(&self) -> StoreResult<i64> {
        self.check()?;
        Ok(self.tables.read().await.contacts.len() as i64)
    }

    async fn recent(&self, n: i64) -> StoreResult<Vec<Contact>> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables
            .contacts
            .iter()
            .rev()
            .take(n.max(0) as usize)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl FeedbackStore for MemoryStore {
    async fn create(&self, feedback: NewFeedback) -> StoreResult<Feedback> {
        self.check()?;
        let mut tables = self.tables.write().await;
        if tables.feedback.iter().any(|f| f.user_id == feedback.user_id) {
            return Err(StoreError::Conflict(
                "You have already submitted feedback".to_string(),
            ));
        }

        let created = Feedback {
            id: Uuid::new_v4(),
            user_id: feedback.user_id,
            message: feedback.message,
            rating: feedback.rating,
            created_at: Utc::now(),
        };
        tables.feedback.push(created.clone());
        Ok(created)
    }

    async fn find_by_owner(&self, user_id: Uuid) -> StoreResult<Option<Feedback>> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables.feedback.iter().find(|f| f.user_id == user_id).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Feedback>> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables.feedback.iter().find(|f| f.id == id).cloned())
    }

    async fn list(&self) -> StoreResult<Vec<Feedback>> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables.feedback.iter().rev().cloned().collect())
    }

    async fn list_by_owner(&self, user_id: Uuid) -> StoreResult<Vec<Feedback>> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables
            .feedback
            .iter()
            .rev()
            .filter(|f| f.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        id: Uuid,
        message: Option<String>,
        rating: Option<i32>,
    ) -> StoreResult<Option<Feedback>> {
        self.check()?;
        let mut tables = self.tables.write().await;
        Ok(tables.feedback.iter_mut().find(|f| f.id == id).map(|f| {
            if let Some(message) = message {
                f.message = message;
            }
            if let Some(rating) = rating {
                f.rating = rating;
            }
            f.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        self.check()?;
        let mut tables = self.tables.write().await;
        let before = tables.feedback.len();
        tables.feedback.retain(|f| f.id != id);
        Ok(tables.feedback.len() != before)
    }

    async fn count(&self) -> StoreResult<i64> {
        self.check()?;
        Ok(self.tables.read().await.feedback.len() as i64)
    }

    async fn recent(&self, n: i64) -> StoreResult<Vec<Feedback>> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables
            .feedback
            .iter()
            .rev()
            .take(n.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn rating_stats(&self) -> StoreResult<Vec<(i32, i64)>> {
        self.check()?;
        let tables = self.tables.read().await;
        let mut counts: Vec<(i32, i64)> = Vec::new();
        for f in &tables.feedback {
            match counts.iter_mut().find(|(rating, _)| *rating == f.rating) {
                Some((_, count)) => *count += 1,
                None => counts.push((f.rating, 1)),
            }
        }
        counts.sort_by_key(|(rating, _)| *rating);
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ironpass_models::PlanFeatures;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Ann".to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            city: "Pune".to_string(),
            contact: "9876543210".to_string(),
            role: Role::Regular,
        }
    }

    fn new_plan(name: &str) -> NewPlan {
        NewPlan {
            plan_name: name.to_string(),
            monthly_plan_amount: 10.0,
            yearly_plan_amount: 100.0,
            is_popular: false,
            is_active: true,
            features: PlanFeatures::default(),
            created_by: Uuid::new_v4(),
        }
    }

    fn new_subscription(user_id: Uuid, plan_id: Uuid, amount: f64) -> NewSubscription {
        NewSubscription {
            user_id,
            plan_id,
            user_name: "ann".to_string(),
            plan_type: "monthly".to_string(),
            plan_amount: amount,
            start_date: None,
            end_date: None,
            status: "active".to_string(),
            payment_status: "pending".to_string(),
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let store = MemoryStore::new();
        UserStore::create(&store, new_user("ann@example.com"))
            .await
            .unwrap();

        let err = UserStore::create(&store, new_user("ANN@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_credentials_include_hash_but_user_does_not() {
        let store = MemoryStore::new();
        let user = UserStore::create(&store, new_user("ann@example.com"))
            .await
            .unwrap();

        let creds = store
            .find_credentials_by_email("ann@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(creds.id, user.id);
        assert_eq!(creds.password_hash, "hash");
    }

    #[tokio::test]
    async fn test_role_change_visible_immediately() {
        let store = MemoryStore::new();
        let user = UserStore::create(&store, new_user("ann@example.com"))
            .await
            .unwrap();
        assert_eq!(store.find_role(user.id).await.unwrap(), Some(Role::Regular));

        store.set_role(user.id, Role::Admin).await.unwrap();
        assert_eq!(store.find_role(user.id).await.unwrap(), Some(Role::Admin));
    }

    #[tokio::test]
    async fn test_deleting_user_cascades() {
        let store = MemoryStore::new();
        let user = UserStore::create(&store, new_user("ann@example.com"))
            .await
            .unwrap();
        let plan = PlanStore::create(&store, new_plan("Gold")).await.unwrap();
        SubscriptionStore::create(&store, new_subscription(user.id, plan.id, 10.0))
            .await
            .unwrap();

        assert!(UserStore::delete(&store, user.id).await.unwrap());
        assert!(SubscriptionStore::find_by_owner(&store, user.id)
            .await
            .unwrap()
            .is_none());
        assert!(!UserStore::delete(&store, user.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_deleting_plan_removes_its_subscriptions() {
        let store = MemoryStore::new();
        let gold = PlanStore::create(&store, new_plan("Gold")).await.unwrap();
        let silver = PlanStore::create(&store, new_plan("Silver")).await.unwrap();
        SubscriptionStore::create(&store, new_subscription(Uuid::new_v4(), gold.id, 10.0))
            .await
            .unwrap();
        SubscriptionStore::create(&store, new_subscription(Uuid::new_v4(), silver.id, 5.0))
            .await
            .unwrap();

        assert!(PlanStore::delete(&store, gold.id).await.unwrap());
        assert_eq!(SubscriptionStore::count(&store).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_one_subscription_per_member() {
        let store = MemoryStore::new();
        let user_id = Uuid::new_v4();
        let gold = PlanStore::create(&store, new_plan("Gold")).await.unwrap();
        let silver = PlanStore::create(&store, new_plan("Silver")).await.unwrap();
        SubscriptionStore::create(&store, new_subscription(user_id, gold.id, 10.0))
            .await
            .unwrap();

        let err = SubscriptionStore::create(&store, new_subscription(user_id, silver.id, 5.0))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
        assert_eq!(SubscriptionStore::count(&store).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_one_feedback_per_member() {
        let store = MemoryStore::new();
        let user_id = Uuid::new_v4();
        let feedback = |rating| NewFeedback {
            user_id,
            message: "great gym".to_string(),
            rating,
        };
        FeedbackStore::create(&store, feedback(5)).await.unwrap();

        let err = FeedbackStore::create(&store, feedback(1)).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
        assert_eq!(FeedbackStore::list(&store).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_plan_name_unique_case_insensitive() {
        let store = MemoryStore::new();
        PlanStore::create(&store, new_plan("Gold")).await.unwrap();

        assert!(store.find_by_name_ci(" gold ").await.unwrap().is_some());
        let err = PlanStore::create(&store, new_plan("GOLD")).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_list_pages_newest_first() {
        let store = MemoryStore::new();
        for i in 0..5 {
            UserStore::create(&store, new_user(&format!("user{i}@example.com")))
                .await
                .unwrap();
        }

        let (users, total) = UserStore::list(&store, None, 2, 0).await.unwrap();
        assert_eq!(total, 5);
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].email, "user4@example.com");

        let (users, total) = UserStore::list(&store, Some("USER1"), 10, 0).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(users[0].email, "user1@example.com");
    }

    #[tokio::test]
    async fn test_revenue_and_stats() {
        let store = MemoryStore::new();
        let plan_id = Uuid::new_v4();
        SubscriptionStore::create(&store, new_subscription(Uuid::new_v4(), plan_id, 10.0))
            .await
            .unwrap();
        SubscriptionStore::create(&store, new_subscription(Uuid::new_v4(), plan_id, 32.5))
            .await
            .unwrap();

        let revenue = store.revenue().await.unwrap();
        assert_eq!(revenue.total_revenue, 42.5);
        assert_eq!(revenue.total_subscriptions, 2);

        for rating in [5, 3, 5] {
            FeedbackStore::create(
                &store,
                NewFeedback {
                    user_id: Uuid::new_v4(),
                    message: "ok".to_string(),
                    rating,
                },
            )
            .await
            .unwrap();
        }
        assert_eq!(store.rating_stats().await.unwrap(), vec![(3, 1), (5, 2)]);
    }

    #[tokio::test]
    async fn test_offline_store_faults() {
        let store = MemoryStore::new();
        store.set_offline(true);
        let err = UserStore::find_by_id(&store, Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));

        store.set_offline(false);
        assert!(UserStore::find_by_id(&store, Uuid::new_v4())
            .await
            .unwrap()
            .is_none());
    }
}
