//! # Ironpass Core
//!
//! Core types, errors, and utilities for the Ironpass API.
//!
//! - [`errors`]: Application error type with JSON response conversion
//! - [`pagination`]: Page-based listing parameters and response metadata
//! - [`password`]: bcrypt password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use ironpass_core::{AppError, ListQuery, hash_password};
//!
//! let error = AppError::not_found(anyhow::anyhow!("Plan not found"));
//! let hash = hash_password("secure_password")?;
//! let query = ListQuery::default();
//! assert_eq!(query.offset(), 0);
//! ```

pub mod errors;
pub mod pagination;
pub mod password;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use pagination::{ListQuery, PageMeta};
pub use password::{hash_password, verify_password};
