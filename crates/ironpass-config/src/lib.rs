//! # Ironpass Config
//!
//! Configuration types for the Ironpass API, loaded once at startup from
//! environment variables and never mutated afterwards.
//!
//! - [`app`]: Top-level [`AppConfig`] and the [`AppEnv`] switch
//! - [`jwt`]: Token signing configuration
//! - [`cors`]: Allowed browser origins
//!
//! Every loader has a `from_lookup` twin that takes a key lookup function, so
//! configuration parsing can be exercised without touching the process
//! environment.
//!
//! # Example
//!
//! ```ignore
//! use ironpass_config::AppConfig;
//!
//! let config = AppConfig::from_env()?; // fails fast when JWT_SECRET is unset
//! ```

pub mod app;
pub mod cors;
pub mod jwt;

use thiserror::Error;

// Re-export commonly used types at crate root
pub use app::{AppConfig, AppEnv};
pub use cors::CorsConfig;
pub use jwt::JwtConfig;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Reads `key` through `lookup`, treating blank values as unset.
pub(crate) fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::collections::HashMap;

    pub fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }
}
