//! # Ironpass DB
//!
//! Persistence for the Ironpass API.
//!
//! Every collaborator the HTTP layer talks to is a trait in [`stores`], so the
//! gates and services only ever see explicit results: a value, `None` for
//! "absent", or a [`StoreError`] for a fault. Two implementations ship:
//!
//! - [`PgStore`]: PostgreSQL through sqlx, schema in `migrations/`
//! - [`MemoryStore`]: process-local tables, used by tests and `--memory` runs
//!
//! # Example
//!
//! ```ignore
//! use ironpass_db::{PgStore, init_db_pool};
//!
//! let pool = init_db_pool(&database_url).await?;
//! ironpass_db::run_migrations(&pool).await?;
//! let store = PgStore::new(pool);
//! ```

pub mod error;
pub mod memory;
pub mod postgres;
pub mod stores;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use stores::{ContactStore, FeedbackStore, PlanStore, SubscriptionStore, UserStore};

// Re-export PgPool for convenience
pub use sqlx::PgPool;

use sqlx::postgres::PgPoolOptions;

/// Connects a PostgreSQL pool to `database_url`.
pub async fn init_db_pool(database_url: &str) -> Result<PgPool, StoreError> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Applies pending schema migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::migrate!()
        .run(pool)
        .await
        .map_err(|e| StoreError::Unavailable(e.to_string()))
}
