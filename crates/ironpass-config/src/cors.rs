use std::env;

use crate::non_empty;

const DEFAULT_ORIGINS: &str = "http://localhost:5173,http://localhost:3000";

#[derive(Clone, Debug)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut allowed_origins: Vec<String> = Vec::new();
        let configured = non_empty(&lookup, "ALLOWED_ORIGINS").unwrap_or_default();

        for origin in DEFAULT_ORIGINS.split(',').chain(configured.split(',')) {
            let origin = origin.trim().trim_end_matches('/');
            if !origin.is_empty() && !allowed_origins.iter().any(|o| o == origin) {
                allowed_origins.push(origin.to_string());
            }
        }

        Self { allowed_origins }
    }
}
