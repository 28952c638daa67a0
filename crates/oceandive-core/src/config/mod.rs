//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod booking;
pub mod logging;

use serde::{Deserialize, Serialize};

pub use self::booking::{BookingConfig, EligibilityStrategyKind, ReferenceConfig, StoreBackend};
pub use self::logging::LoggingConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// Top-level deserialization target for the merged TOML configuration
/// (base file + environment overlay + `OCEANDIVE__*` variables).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Booking engine settings.
    #[serde(default)]
    pub booking: BookingConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Database connection pool configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL.
    #[serde(default = "default_database_url")]
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
    /// Idle connection timeout in seconds.
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_seconds: default_connect_timeout(),
            idle_timeout_seconds: default_idle_timeout(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file plus an optional environment overlay.
    ///
    /// `path` is the base file (for example `config/default.toml`); when `env`
    /// is given, `config/{env}.toml` next to it is merged on top. Variables
    /// prefixed with `OCEANDIVE__` override both, using `__` as the section
    /// separator (`OCEANDIVE__BOOKING__STORE=postgres`).
    pub fn load(path: &str, env: Option<&str>) -> Result<Self, AppError> {
        let mut builder =
            config::Config::builder().add_source(config::File::with_name(path).required(false));

        if let Some(env) = env {
            let overlay = std::path::Path::new(path)
                .parent()
                .map(|dir| dir.join(env))
                .unwrap_or_else(|| std::path::PathBuf::from(env));
            builder = builder.add_source(
                config::File::with_name(&overlay.to_string_lossy()).required(false),
            );
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix("OCEANDIVE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Parse configuration from an in-memory TOML document.
    pub fn from_toml(document: &str) -> Result<Self, AppError> {
        config::Config::builder()
            .add_source(config::File::from_str(document, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

fn default_database_url() -> String {
    "postgres://localhost:5432/oceandive".to_string()
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    2
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_idle_timeout() -> u64 {
    300
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.booking.store, StoreBackend::Memory);
        assert_eq!(
            config.booking.eligibility_strategy,
            EligibilityStrategyKind::Ordinal
        );
        assert_eq!(config.booking.lock_timeout_ms, 5_000);
        assert!(config.booking.reference.unique);
        assert_eq!(config.booking.reference.max_attempts, 16);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_sections_override_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [database]
            url = "postgres://dive:secret@db:5432/dive"

            [booking]
            store = "postgres"
            eligibility_strategy = "rules"
            lock_timeout_ms = 250

            [booking.reference]
            unique = false

            [logging]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.database.url, "postgres://dive:secret@db:5432/dive");
        assert_eq!(config.database.max_connections, 20);
        assert_eq!(config.booking.store, StoreBackend::Postgres);
        assert_eq!(
            config.booking.eligibility_strategy,
            EligibilityStrategyKind::Rules
        );
        assert_eq!(config.booking.lock_timeout_ms, 250);
        assert!(!config.booking.reference.unique);
        assert_eq!(config.booking.reference.max_attempts, 16);
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_unknown_strategy_is_rejected() {
        let result = AppConfig::from_toml(
            r#"
            [booking]
            eligibility_strategy = "coin_flip"
            "#,
        );
        assert!(result.is_err());
    }
}
