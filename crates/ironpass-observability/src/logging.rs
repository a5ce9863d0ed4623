use std::{env, fs, io};

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_DIR: &str = "storage/logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// Level for the application's own targets when `RUST_LOG` is unset.
    pub level: String,
    pub dir: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: DEFAULT_LOG_DIR.to_string(),
        }
    }
}

impl LogSettings {
    /// Reads `LOG_LEVEL` and `LOG_DIR`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            level: env::var("LOG_LEVEL").unwrap_or(defaults.level),
            dir: env::var("LOG_DIR").unwrap_or(defaults.dir),
        }
    }

    fn directives(&self) -> String {
        format!(
            "ironpass={level},ironpass_db={level},ironpass_auth={level},\
             tower_http=warn,hyper=warn,sqlx=warn",
            level = self.level
        )
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.directives()))
    }
}

/// Installs the global subscriber: compact console, an error-only log file and
/// a JSON log file, both rotated daily under `settings.dir`.
pub fn init_tracing(settings: &LogSettings) -> io::Result<()> {
    fs::create_dir_all(&settings.dir)?;

    let console_layer = fmt::layer()
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .compact()
        .with_filter(settings.env_filter());

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &settings.dir, "ironpass.log");
    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_filter(EnvFilter::new("error"));

    let json_appender = RollingFileAppender::new(Rotation::DAILY, &settings.dir, "ironpass.json");
    let json_layer = fmt::layer()
        .json()
        .with_writer(json_appender)
        .with_current_span(true)
        .with_span_list(true)
        .with_filter(settings.env_filter());

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .with(json_layer)
        .init();

    Ok(())
}

/// Console-only logging, for one-shot CLI commands.
pub fn init_console_logging(settings: &LogSettings) {
    let console_layer = fmt::layer()
        .compact()
        .with_target(true)
        .with_filter(settings.env_filter());

    tracing_subscriber::registry().with(console_layer).init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = LogSettings::default();
        assert_eq!(settings.level, "info");
        assert_eq!(settings.dir, "storage/logs");
    }

    #[test]
    fn test_directives_use_level_and_quiet_dependencies() {
        let settings = LogSettings {
            level: "debug".to_string(),
            dir: DEFAULT_LOG_DIR.to_string(),
        };
        let directives = settings.directives();
        assert!(directives.starts_with("ironpass=debug,"));
        assert!(directives.contains("ironpass_auth=debug"));
        assert!(directives.contains("sqlx=warn"));
        assert!(EnvFilter::try_new(&directives).is_ok());
    }
}
