use std::env;

use crate::{ConfigError, CorsConfig, JwtConfig, non_empty};

/// Deployment environment. Controls cookie security and whether internal
/// fault details may be echoed back to clients.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AppEnv {
    #[default]
    Development,
    Production,
}

impl AppEnv {
    pub fn is_production(self) -> bool {
        matches!(self, AppEnv::Production)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AppEnv::Development => "development",
            AppEnv::Production => "production",
        }
    }
}

impl std::str::FromStr for AppEnv {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(AppEnv::Development),
            "production" | "prod" => Ok(AppEnv::Production),
            other => Err(ConfigError::Invalid {
                key: "APP_ENV",
                reason: format!("unknown environment {other:?}"),
            }),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub env: AppEnv,
    pub port: u16,
    pub database_url: Option<String>,
    pub jwt: JwtConfig,
    pub cors: CorsConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = match non_empty(&lookup, "APP_ENV") {
            Some(raw) => raw.parse()?,
            None => AppEnv::default(),
        };

        let port = match non_empty(&lookup, "PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::Invalid {
                key: "PORT",
                reason: e.to_string(),
            })?,
            None => 5000,
        };

        Ok(Self {
            env,
            port,
            database_url: non_empty(&lookup, "DATABASE_URL"),
            jwt: JwtConfig::from_lookup(&lookup)?,
            cors: CorsConfig::from_lookup(&lookup),
        })
    }
}
