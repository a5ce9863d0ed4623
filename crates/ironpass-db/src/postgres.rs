//! PostgreSQL-backed stores.

use async_trait::async_trait;
use ironpass_models::{
    Contact, Feedback, NewContact, NewFeedback, NewPlan, NewSubscription, NewUser, Plan,
    ProfileChanges, RevenueSummary, Role, Subscription, SubscriptionChanges, User,
    UserCredentials,
};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::StoreError;
use crate::stores::{
    ContactStore, FeedbackStore, PlanStore, StoreResult, SubscriptionStore, UserStore,
};

const USER_COLUMNS: &str = "id, name, email, city, contact, role, created_at, updated_at";

const PLAN_COLUMNS: &str = "id, plan_name, monthly_plan_amount, yearly_plan_amount, \
     is_popular, is_active, water_stations, locker_rooms, wifi_service, cardio_class, \
     refreshment, group_fitness_classes, personal_trainer, special_events, cafe_or_lounge, \
     created_by, created_at";

const SUBSCRIPTION_COLUMNS: &str = "id, user_id, plan_id, user_name, plan_type, plan_amount, \
     start_date, end_date, status, payment_status, created_at";

const CONTACT_COLUMNS: &str = "id, name, email, city, phone, message, created_at";

const FEEDBACK_COLUMNS: &str = "id, user_id, message, rating, created_at";

/// Wraps a search term for a case-insensitive `ILIKE` match.
fn like_pattern(search: Option<&str>) -> Option<String> {
    search.map(|s| {
        let escaped = s
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        format!("%{escaped}%")
    })
}

#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl UserStore for PgStore {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn find_role(&self, id: Uuid) -> StoreResult<Option<Role>> {
        let role = sqlx::query_scalar::<_, Role>("SELECT role FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(role)
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE LOWER(email) = LOWER($1)");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> StoreResult<Option<UserCredentials>> {
        let creds = sqlx::query_as::<_, UserCredentials>(
            "SELECT id, email, password_hash, role FROM users WHERE LOWER(email) = LOWER($1)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(creds)
    }

    #[instrument(skip(self, user), fields(email = %user.email))]
    async fn create(&self, user: NewUser) -> StoreResult<User> {
        let sql = format!(
            "INSERT INTO users (id, name, email, password_hash, city, contact, role) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {USER_COLUMNS}"
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(Uuid::new_v4())
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.city)
            .bind(&user.contact)
            .bind(user.role)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::unique(e, "User already registered"))
    }

    #[instrument(skip(self, changes))]
    async fn update_profile(
        &self,
        id: Uuid,
        changes: ProfileChanges,
    ) -> StoreResult<Option<User>> {
        let sql = format!(
            "UPDATE users SET name = COALESCE($2, name), \
             password_hash = COALESCE($3, password_hash), \
             city = COALESCE($4, city), contact = COALESCE($5, contact), \
             updated_at = NOW() WHERE id = $1 RETURNING {USER_COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .bind(changes.name)
            .bind(changes.password_hash)
            .bind(changes.city)
            .bind(changes.contact)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    #[instrument(skip(self, password_hash))]
    async fn update_password(&self, id: Uuid, password_hash: &str) -> StoreResult<bool> {
        let result =
            sqlx::query("UPDATE users SET password_hash = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(password_hash)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn set_role(&self, id: Uuid, role: Role) -> StoreResult<Option<User>> {
        let sql = format!(
            "UPDATE users SET role = $2, updated_at = NOW() WHERE id = $1 RETURNING {USER_COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .bind(role)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        // subscriptions and feedback go with the user via ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> StoreResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    #[instrument(skip(self))]
    async fn list(
        &self,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> StoreResult<(Vec<User>, i64)> {
        let pattern = like_pattern(search);
        let filter = "($1::TEXT IS NULL OR name ILIKE $1 OR email ILIKE $1)";

        let total =
            sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM users WHERE {filter}"))
                .bind(&pattern)
                .fetch_one(&self.pool)
                .await?;

        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE {filter} \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3"
        );
        let users = sqlx::query_as::<_, User>(&sql)
            .bind(&pattern)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok((users, total))
    }
}

#[async_trait]
impl PlanStore for PgStore {
    #[instrument(skip(self, plan), fields(plan_name = %plan.plan_name))]
    async fn create(&self, plan: NewPlan) -> StoreResult<Plan> {
        let f = plan.features;
        let sql = format!(
            "INSERT INTO plans (id, plan_name, monthly_plan_amount, yearly_plan_amount, \
             is_popular, is_active, water_stations, locker_rooms, wifi_service, cardio_class, \
             refreshment, group_fitness_classes, personal_trainer, special_events, \
             cafe_or_lounge, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16) \
             RETURNING {PLAN_COLUMNS}"
        );
        sqlx::query_as::<_, Plan>(&sql)
            .bind(Uuid::new_v4())
            .bind(&plan.plan_name)
            .bind(plan.monthly_plan_amount)
            .bind(plan.yearly_plan_amount)
            .bind(plan.is_popular)
            .bind(plan.is_active)
            .bind(f.water_stations)
            .bind(f.locker_rooms)
            .bind(f.wifi_service)
            .bind(f.cardio_class)
            .bind(f.refreshment)
            .bind(f.group_fitness_classes)
            .bind(f.personal_trainer)
            .bind(f.special_events)
            .bind(f.cafe_or_lounge)
            .bind(plan.created_by)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::unique(e, "Plan name already exists"))
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Plan>> {
        let sql = format!("SELECT {PLAN_COLUMNS} FROM plans WHERE id = $1");
        let plan = sqlx::query_as::<_, Plan>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(plan)
    }

    #[instrument(skip(self))]
    async fn find_by_name_ci(&self, name: &str) -> StoreResult<Option<Plan>> {
        let sql = format!("SELECT {PLAN_COLUMNS} FROM plans WHERE LOWER(plan_name) = LOWER($1)");
        let plan = sqlx::query_as::<_, Plan>(&sql)
            .bind(name.trim())
            .fetch_optional(&self.pool)
            .await?;
        Ok(plan)
    }

    #[instrument(skip(self))]
    async fn list(&self, search: Option<&str>) -> StoreResult<Vec<Plan>> {
        let sql = format!(
            "SELECT {PLAN_COLUMNS} FROM plans WHERE ($1::TEXT IS NULL OR plan_name ILIKE $1) \
             ORDER BY created_at DESC"
        );
        let plans = sqlx::query_as::<_, Plan>(&sql)
            .bind(like_pattern(search))
            .fetch_all(&self.pool)
            .await?;
        Ok(plans)
    }

    #[instrument(skip(self, plan))]
    async fn update(&self, id: Uuid, plan: NewPlan) -> StoreResult<Option<Plan>> {
        let f = plan.features;
        let sql = format!(
            "UPDATE plans SET plan_name = $2, monthly_plan_amount = $3, yearly_plan_amount = $4, \
             is_popular = $5, is_active = $6, water_stations = $7, locker_rooms = $8, \
             wifi_service = $9, cardio_class = $10, refreshment = $11, \
             group_fitness_classes = $12, personal_trainer = $13, special_events = $14, \
             cafe_or_lounge = $15 WHERE id = $1 RETURNING {PLAN_COLUMNS}"
        );
        sqlx::query_as::<_, Plan>(&sql)
            .bind(id)
            .bind(&plan.plan_name)
            .bind(plan.monthly_plan_amount)
            .bind(plan.yearly_plan_amount)
            .bind(plan.is_popular)
            .bind(plan.is_active)
            .bind(f.water_stations)
            .bind(f.locker_rooms)
            .bind(f.wifi_service)
            .bind(f.cardio_class)
            .bind(f.refreshment)
            .bind(f.group_fitness_classes)
            .bind(f.personal_trainer)
            .bind(f.special_events)
            .bind(f.cafe_or_lounge)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::unique(e, "Plan name already exists"))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM subscriptions WHERE plan_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM plans WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> StoreResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM plans")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl SubscriptionStore for PgStore {
    #[instrument(skip(self))]
    async fn find_by_owner(&self, user_id: Uuid) -> StoreResult<Option<Subscription>> {
        let sql = format!(
            "SELECT {SUBSCRIPTION_COLUMNS} FROM subscriptions WHERE user_id = $1 \
             ORDER BY created_at DESC LIMIT 1"
        );
        let sub = sqlx::query_as::<_, Subscription>(&sql)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(sub)
    }

    #[instrument(skip(self))]
    async fn list_by_owner(&self, user_id: Uuid) -> StoreResult<Vec<Subscription>> {
        let sql = format!(
            "SELECT {SUBSCRIPTION_COLUMNS} FROM subscriptions WHERE user_id = $1 \
             ORDER BY created_at DESC"
        );
        let subs = sqlx::query_as::<_, Subscription>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(subs)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Subscription>> {
        let sql = format!("SELECT {SUBSCRIPTION_COLUMNS} FROM subscriptions WHERE id = $1");
        let sub = sqlx::query_as::<_, Subscription>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(sub)
    }

    #[instrument(skip(self, subscription), fields(user_id = %subscription.user_id))]
    async fn create(&self, subscription: NewSubscription) -> StoreResult<Subscription> {
        let sql = format!(
            "INSERT INTO subscriptions (id, user_id, plan_id, user_name, plan_type, plan_amount, \
             start_date, end_date, status, payment_status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING {SUBSCRIPTION_COLUMNS}"
        );
        let sub = sqlx::query_as::<_, Subscription>(&sql)
            .bind(Uuid::new_v4())
            .bind(subscription.user_id)
            .bind(subscription.plan_id)
            .bind(&subscription.user_name)
            .bind(&subscription.plan_type)
            .bind(subscription.plan_amount)
            .bind(subscription.start_date)
            .bind(subscription.end_date)
            .bind(&subscription.status)
            .bind(&subscription.payment_status)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::unique(e, "You already have an active subscription"))?;
        Ok(sub)
    }

    #[instrument(skip(self, changes))]
    async fn update(
        &self,
        id: Uuid,
        changes: SubscriptionChanges,
    ) -> StoreResult<Option<Subscription>> {
        let sql = format!(
            "UPDATE subscriptions SET plan_type = COALESCE($2, plan_type), \
             plan_amount = COALESCE($3, plan_amount), start_date = COALESCE($4, start_date), \
             end_date = COALESCE($5, end_date), status = COALESCE($6, status), \
             payment_status = COALESCE($7, payment_status) \
             WHERE id = $1 RETURNING {SUBSCRIPTION_COLUMNS}"
        );
        let sub = sqlx::query_as::<_, Subscription>(&sql)
            .bind(id)
            .bind(changes.plan_type)
            .bind(changes.plan_amount)
            .bind(changes.start_date)
            .bind(changes.end_date)
            .bind(changes.status)
            .bind(changes.payment_status)
            .fetch_optional(&self.pool)
            .await?;
        Ok(sub)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM subscriptions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> StoreResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM subscriptions")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    #[instrument(skip(self))]
    async fn list(
        &self,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> StoreResult<(Vec<Subscription>, i64)> {
        let pattern = like_pattern(search);
        let filter = "($1::TEXT IS NULL OR user_name ILIKE $1 OR plan_type ILIKE $1)";

        let total = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM subscriptions WHERE {filter}"
        ))
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await?;

        let sql = format!(
            "SELECT {SUBSCRIPTION_COLUMNS} FROM subscriptions WHERE {filter} \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3"
        );
        let subs = sqlx::query_as::<_, Subscription>(&sql)
            .bind(&pattern)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok((subs, total))
    }

    async fn recent(&self, n: i64) -> StoreResult<Vec<Subscription>> {
        let sql = format!(
            "SELECT {SUBSCRIPTION_COLUMNS} FROM subscriptions ORDER BY created_at DESC LIMIT $1"
        );
        let subs = sqlx::query_as::<_, Subscription>(&sql)
            .bind(n)
            .fetch_all(&self.pool)
            .await?;
        Ok(subs)
    }

    async fn revenue(&self) -> StoreResult<RevenueSummary> {
        let (total_revenue, total_subscriptions) = sqlx::query_as::<_, (f64, i64)>(
            "SELECT COALESCE(SUM(plan_amount), 0)::FLOAT8, COUNT(*) FROM subscriptions",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(RevenueSummary {
            total_revenue,
            total_subscriptions,
        })
    }
}

#[async_trait]
impl ContactStore for PgStore {
    #[instrument(skip(self, contact), fields(email = %contact.email))]
    async fn create(&self, contact: NewContact) -> StoreResult<Contact> {
        let sql = format!(
            "INSERT INTO contacts (id, name, email, city, phone, message) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {CONTACT_COLUMNS}"
        );
        let contact = sqlx::query_as::<_, Contact>(&sql)
            .bind(Uuid::new_v4())
            .bind(&contact.name)
            .bind(&contact.email)
            .bind(&contact.city)
            .bind(&contact.phone)
            .bind(&contact.message)
            .fetch_one(&self.pool)
            .await?;
        Ok(contact)
    }

    async fn list(&self) -> StoreResult<Vec<Contact>> {
        let sql = format!("SELECT {CONTACT_COLUMNS} FROM contacts ORDER BY created_at DESC");
        let contacts = sqlx::query_as::<_, Contact>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(contacts)
    }

    async fn count(&self) -> StoreResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM contacts")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn recent(&self, n: i64) -> StoreResult<Vec<Contact>> {
        let sql =
            format!("SELECT {CONTACT_COLUMNS} FROM contacts ORDER BY created_at DESC LIMIT $1");
        let contacts = sqlx::query_as::<_, Contact>(&sql)
            .bind(n)
            .fetch_all(&self.pool)
            .await?;
        Ok(contacts)
    }
}

#[async_trait]
impl FeedbackStore for PgStore {
    #[instrument(skip(self, feedback), fields(user_id = %feedback.user_id))]
    async fn create(&self, feedback: NewFeedback) -> StoreResult<Feedback> {
        let sql = format!(
            "INSERT INTO feedback (id, user_id, message, rating) \
             VALUES ($1, $2, $3, $4) RETURNING {FEEDBACK_COLUMNS}"
        );
        let feedback = sqlx::query_as::<_, Feedback>(&sql)
            .bind(Uuid::new_v4())
            .bind(feedback.user_id)
            .bind(&feedback.message)
            .bind(feedback.rating)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::unique(e, "You have already submitted feedback"))?;
        Ok(feedback)
    }

    #[instrument(skip(self))]
    async fn find_by_owner(&self, user_id: Uuid) -> StoreResult<Option<Feedback>> {
        let sql = format!("SELECT {FEEDBACK_COLUMNS} FROM feedback WHERE user_id = $1 LIMIT 1");
        let feedback = sqlx::query_as::<_, Feedback>(&sql)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(feedback)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Feedback>> {
        let sql = format!("SELECT {FEEDBACK_COLUMNS} FROM feedback WHERE id = $1");
        let feedback = sqlx::query_as::<_, Feedback>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(feedback)
    }

    async fn list(&self) -> StoreResult<Vec<Feedback>> {
        let sql = format!("SELECT {FEEDBACK_COLUMNS} FROM feedback ORDER BY created_at DESC");
        let feedback = sqlx::query_as::<_, Feedback>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(feedback)
    }

    #[instrument(skip(self))]
    async fn list_by_owner(&self, user_id: Uuid) -> StoreResult<Vec<Feedback>> {
        let sql = format!(
            "SELECT {FEEDBACK_COLUMNS} FROM feedback WHERE user_id = $1 ORDER BY created_at DESC"
        );
        let feedback = sqlx::query_as::<_, Feedback>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(feedback)
    }

    #[instrument(skip(self, message))]
    async fn update(
        &self,
        id: Uuid,
        message: Option<String>,
        rating: Option<i32>,
    ) -> StoreResult<Option<Feedback>> {
        let sql = format!(
            "UPDATE feedback SET message = COALESCE($2, message), rating = COALESCE($3, rating) \
             WHERE id = $1 RETURNING {FEEDBACK_COLUMNS}"
        );
        let feedback = sqlx::query_as::<_, Feedback>(&sql)
            .bind(id)
            .bind(message)
            .bind(rating)
            .fetch_optional(&self.pool)
            .await?;
        Ok(feedback)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM feedback WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> StoreResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM feedback")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn recent(&self, n: i64) -> StoreResult<Vec<Feedback>> {
        let sql =
            format!("SELECT {FEEDBACK_COLUMNS} FROM feedback ORDER BY created_at DESC LIMIT $1");
        let feedback = sqlx::query_as::<_, Feedback>(&sql)
            .bind(n)
            .fetch_all(&self.pool)
            .await?;
        Ok(feedback)
    }

    async fn rating_stats(&self) -> StoreResult<Vec<(i32, i64)>> {
        let stats = sqlx::query_as::<_, (i32, i64)>(
            "SELECT rating, COUNT(*) FROM feedback GROUP BY rating ORDER BY rating",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(stats)
    }
}
