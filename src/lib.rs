//! # Ironpass API
//!
//! REST backend for a gym membership service: member registration and login,
//! a plan catalog, subscription tracking, contact-form submissions and member
//! feedback, with an admin dashboard on top.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── middleware/       # Access gates: authenticated, admin, active subscription
//! ├── modules/          # Feature modules
//! │   ├── auth/        # Register, login, logout, profile
//! │   ├── plans/       # Plan catalog
//! │   ├── subscriptions/
//! │   ├── contacts/
//! │   ├── feedback/
//! │   └── admin/       # Dashboard counts, listings, role management
//! ├── cli.rs            # create-admin command
//! ├── docs.rs           # OpenAPI document
//! ├── router.rs         # Route tree, CORS, request logging
//! └── state.rs          # Shared application state
//! ```
//!
//! Each feature module has a `controller.rs` (HTTP handlers), `service.rs`
//! (business logic over the stores), `model.rs` (response bodies) and
//! `router.rs`.
//!
//! ## Request pipeline
//!
//! Every protected request passes through credential extraction, token
//! verification and a fresh user lookup before any handler runs. Admin routes
//! then re-read the caller's role; subscription routes check that the caller
//! owns a subscription. Each stage can end the request with a
//! `{ "success": false, "message": ... }` body.
//!
//! ## Workspace crates
//!
//! - [`ironpass_core`]: `AppError`, password hashing, pagination
//! - [`ironpass_config`]: environment configuration
//! - [`ironpass_models`]: domain models and DTOs
//! - [`ironpass_auth`]: token codec and credential extraction
//! - [`ironpass_db`]: store traits with PostgreSQL and in-memory backends
//! - [`ironpass_observability`]: tracing setup

pub mod cli;
pub mod docs;
pub mod middleware;
pub mod modules;
pub mod response;
pub mod router;
pub mod state;
pub mod validator;

// Re-export workspace crates for convenience
pub use ironpass_auth;
pub use ironpass_config;
pub use ironpass_core;
pub use ironpass_db;
pub use ironpass_models;
