use std::env;

use crate::{ConfigError, non_empty};

/// Tokens stay valid for seven days after issuance unless overridden.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 7 * 24 * 60 * 60;

/// Upper bound accepted for `JWT_EXPIRY`: ten years.
pub const MAX_TOKEN_TTL_SECS: i64 = 10 * 365 * 24 * 60 * 60;

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub token_ttl_secs: i64,
}

impl JwtConfig {
    /// Loads `JWT_SECRET` (required) and `JWT_EXPIRY` (seconds, optional).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = non_empty(&lookup, "JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let token_ttl_secs = match non_empty(&lookup, "JWT_EXPIRY") {
            Some(raw) => raw
                .parse::<i64>()
                .ok()
                .filter(|secs| (1..=MAX_TOKEN_TTL_SECS).contains(secs))
                .ok_or_else(|| ConfigError::Invalid {
                    key: "JWT_EXPIRY",
                    reason: format!(
                        "expected between 1 and {MAX_TOKEN_TTL_SECS} seconds, got {raw:?}"
                    ),
                })?,
            None => DEFAULT_TOKEN_TTL_SECS,
        };

        Ok(Self {
            secret,
            token_ttl_secs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::lookup;

    #[test]
    fn test_missing_secret_is_fatal() {
        let result = JwtConfig::from_lookup(lookup(&[]));
        assert_eq!(result.unwrap_err(), ConfigError::Missing("JWT_SECRET"));
    }

    #[test]
    fn test_blank_secret_is_missing() {
        let result = JwtConfig::from_lookup(lookup(&[("JWT_SECRET", "   ")]));
        assert!(matches!(result, Err(ConfigError::Missing("JWT_SECRET"))));
    }

    #[test]
    fn test_default_ttl_is_seven_days() {
        let config = JwtConfig::from_lookup(lookup(&[("JWT_SECRET", "s3cret")])).unwrap();
        assert_eq!(config.secret, "s3cret");
        assert_eq!(config.token_ttl_secs, 604800);
    }

    #[test]
    fn test_custom_ttl() {
        let config =
            JwtConfig::from_lookup(lookup(&[("JWT_SECRET", "s3cret"), ("JWT_EXPIRY", "3600")]))
                .unwrap();
        assert_eq!(config.token_ttl_secs, 3600);
    }

    #[test]
    fn test_ten_year_ttl_accepted() {
        let config = JwtConfig::from_lookup(lookup(&[
            ("JWT_SECRET", "s3cret"),
            ("JWT_EXPIRY", "315360000"),
        ]))
        .unwrap();
        assert_eq!(config.token_ttl_secs, MAX_TOKEN_TTL_SECS);
    }

    #[test]
    fn test_invalid_ttl_rejected() {
        for raw in ["soon", "0", "-5", "315360001", "9223372036854775807"] {
            let result =
                JwtConfig::from_lookup(lookup(&[("JWT_SECRET", "s3cret"), ("JWT_EXPIRY", raw)]));
            assert!(matches!(
                result,
                Err(ConfigError::Invalid {
                    key: "JWT_EXPIRY",
                    ..
                })
            ));
        }
    }
}
